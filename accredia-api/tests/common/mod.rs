/// Shared test infrastructure for the API integration tests
///
/// Builds the full router over in-memory stores, so the complete HTTP stack
/// (routing, middleware, extractors, error mapping) is exercised without a
/// database. Requests go through `tower::ServiceExt::oneshot`.

use accredia_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig},
};
use accredia_shared::{
    auth::jwt::TokenCodec,
    services::{
        accreditations::AccreditationsService,
        auth::{AuthService, TokenLifetimes},
    },
    store::memory::{MemoryAccreditationStore, MemoryUserDirectory},
};
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test harness holding the router and handles for test arrangement
pub struct TestContext {
    pub router: Router,
    pub accreditation_store: MemoryAccreditationStore,
    pub codec: TokenCodec,
}

impl TestContext {
    /// Builds a fresh application over empty in-memory stores
    pub fn new() -> Self {
        let codec = TokenCodec::new(TEST_SECRET);
        let users = Arc::new(MemoryUserDirectory::new());
        let accreditation_store = MemoryAccreditationStore::new();

        let auth = Arc::new(AuthService::new(
            users,
            codec.clone(),
            TokenLifetimes::default(),
        ));
        let accreditations = Arc::new(AccreditationsService::new(Arc::new(
            accreditation_store.clone(),
        )));

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgresql://unused".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                access_ttl_minutes: 10,
                refresh_ttl_days: 7,
            },
        };

        let state = AppState::new(auth, accreditations, codec.clone(), config);

        Self {
            router: build_router(state),
            accreditation_store,
            codec,
        }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router never fails")
    }

    /// Sends a JSON request and returns (status, parsed body)
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .expect("valid request"),
            None => builder.body(Body::empty()).expect("valid request"),
        };

        let response = self.send(request).await;
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body is JSON")
        };

        (status, value)
    }

    /// Registers a user and returns (access_token, refresh_token)
    pub async fn register(&self, email: &str) -> (String, String) {
        let (status, body) = self
            .send_json(
                "POST",
                "/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": "correct horse battery staple",
                    "first_name": "Test",
                    "last_name": "User",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "registration failed: {}", body);

        (
            body["access_token"].as_str().expect("access token").to_string(),
            body["refresh_token"]
                .as_str()
                .expect("refresh token")
                .to_string(),
        )
    }

    /// Creates an accreditation for the bearer and returns its id
    pub async fn create_accreditation(&self, access_token: &str, name: &str) -> String {
        let (status, body) = self
            .send_json(
                "POST",
                "/accreditations",
                Some(access_token),
                Some(json!({ "name": name })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "creation failed: {}", body);
        body["id"].as_str().expect("id").to_string()
    }
}
