/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware. The state holds the domain services behind `Arc`,
/// so the HTTP layer works the same whether they are wired to PostgreSQL
/// stores (production) or in-memory stores (tests).

use crate::config::Config;
use accredia_shared::auth::jwt::TokenCodec;
use accredia_shared::services::accreditations::AccreditationsService;
use accredia_shared::services::auth::AuthService;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

/// Authenticated caller, injected into request extensions by [`jwt_auth_layer`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Subject of the verified access token
    pub user_id: Uuid,

    /// Email claim of the verified access token
    pub email: String,
}

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Uses `Arc`
/// internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<AuthService>,

    /// Accreditation guard service
    pub accreditations: Arc<AccreditationsService>,

    /// Token codec, used by the auth middleware and the refresh handler
    codec: TokenCodec,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        auth: Arc<AuthService>,
        accreditations: Arc<AccreditationsService>,
        codec: TokenCodec,
        config: Config,
    ) -> Self {
        Self {
            auth,
            accreditations,
            codec,
            config: Arc::new(config),
        }
    }

    /// Token codec for verification and unverified subject extraction
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check (public)
/// ├── /auth/                      # Authentication endpoints (public)
/// │   ├── POST /register
/// │   ├── POST /login
/// │   └── POST /refresh
/// └── /accreditations/            # Owned resources (bearer JWT required)
///     ├── GET    /
///     ├── POST   /
///     ├── PATCH  /:id
///     └── DELETE /:id
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (accreditation routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Accreditation routes (require a verified access token)
    let accreditation_routes = Router::new()
        .route("/", get(routes::accreditations::list))
        .route("/", post(routes::accreditations::create))
        .route("/:id", patch(routes::accreditations::update))
        .route("/:id", delete(routes::accreditations::remove))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/accreditations", accreditation_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Extracts and verifies the bearer token from the Authorization header, then
/// injects [`CurrentUser`] into request extensions. An expired or tampered
/// token never reaches a handler.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::error::ApiError::BadRequest("Expected Bearer token".to_string()))?;

    let claims = state.codec().verify(token)?;

    req.extensions_mut().insert(CurrentUser {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
