/// In-memory implementations of the storage collaborators
///
/// Backing stores for the service and API test suites: no database, no
/// external services, same trait surface and same tagged outcomes as the
/// PostgreSQL implementations. Records live in `tokio::sync::RwLock`-guarded
/// vectors for the lifetime of the store.
///
/// The accreditation store additionally exposes [`MemoryAccreditationStore::set_status`],
/// standing in for the external review process that moves accreditations out
/// of `PENDING`.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AccreditationStore, StoreError, UserDirectory};
use crate::models::accreditation::{
    Accreditation, AccreditationStatus, CreateAccreditation, UpdateAccreditation,
};
use crate::models::user::{CreateUser, User};

/// User directory holding records in memory
#[derive(Clone, Default)]
pub struct MemoryUserDirectory {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        // Same uniqueness rule the database enforces via constraint
        if users.iter().any(|u| u.email == data.email) {
            return Err(StoreError::Conflict);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            password_hash: data.password_hash,
            hashed_refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn set_refresh_hash(&self, id: Uuid, hash: &str) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;

        user.hashed_refresh_token = Some(hash.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }
}

/// Accreditation store holding records in memory
///
/// Records are kept in creation order; `list_by_owner` returns them reversed,
/// matching the `ORDER BY created_at DESC` of the PostgreSQL store.
#[derive(Clone, Default)]
pub struct MemoryAccreditationStore {
    accreditations: Arc<RwLock<Vec<Accreditation>>>,
}

impl MemoryAccreditationStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves an accreditation to a new status
    ///
    /// Stand-in for the external review process, which is outside this
    /// service's scope. Test suites use it to exercise the lifecycle guard
    /// on deletion.
    pub async fn set_status(&self, id: Uuid, status: AccreditationStatus) -> Result<(), StoreError> {
        let mut accreditations = self.accreditations.write().await;

        let record = accreditations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;

        record.status = status;
        Ok(())
    }
}

#[async_trait]
impl AccreditationStore for MemoryAccreditationStore {
    async fn create(&self, data: CreateAccreditation) -> Result<Accreditation, StoreError> {
        let mut accreditations = self.accreditations.write().await;

        let accreditation = Accreditation {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            name: data.name,
            status: AccreditationStatus::Pending,
            expiration_date: None,
            created_at: Utc::now(),
        };

        accreditations.push(accreditation.clone());
        Ok(accreditation)
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Accreditation>, StoreError> {
        let accreditations = self.accreditations.read().await;

        Ok(accreditations
            .iter()
            .filter(|a| a.user_id == user_id)
            .rev()
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Accreditation>, StoreError> {
        let accreditations = self.accreditations.read().await;
        Ok(accreditations.iter().find(|a| a.id == id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        data: UpdateAccreditation,
    ) -> Result<Accreditation, StoreError> {
        let mut accreditations = self.accreditations.write().await;

        let record = accreditations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(name) = data.name {
            record.name = name;
        }

        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut accreditations = self.accreditations.write().await;

        let position = accreditations
            .iter()
            .position(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;

        accreditations.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let directory = MemoryUserDirectory::new();
        directory.create(sample_user("a@x.com")).await.unwrap();

        let result = directory.create(sample_user("a@x.com")).await;
        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[tokio::test]
    async fn test_set_refresh_hash_overwrites() {
        let directory = MemoryUserDirectory::new();
        let user = directory.create(sample_user("a@x.com")).await.unwrap();
        assert!(user.hashed_refresh_token.is_none());

        directory.set_refresh_hash(user.id, "hash-1").await.unwrap();
        directory.set_refresh_hash(user.id, "hash-2").await.unwrap();

        let stored = directory.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.hashed_refresh_token.as_deref(), Some("hash-2"));
    }

    #[tokio::test]
    async fn test_set_refresh_hash_unknown_user() {
        let directory = MemoryUserDirectory::new();
        let result = directory.set_refresh_hash(Uuid::new_v4(), "hash").await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_by_owner_is_newest_first() {
        let store = MemoryAccreditationStore::new();
        let owner = Uuid::new_v4();

        for name in ["first", "second", "third"] {
            store
                .create(CreateAccreditation {
                    user_id: owner,
                    name: name.to_string(),
                })
                .await
                .unwrap();
        }

        let listed = store.list_by_owner(owner).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_list_by_owner_filters_other_users() {
        let store = MemoryAccreditationStore::new();
        let owner = Uuid::new_v4();

        store
            .create(CreateAccreditation {
                user_id: owner,
                name: "mine".to_string(),
            })
            .await
            .unwrap();
        store
            .create(CreateAccreditation {
                user_id: Uuid::new_v4(),
                name: "theirs".to_string(),
            })
            .await
            .unwrap();

        let listed = store.list_by_owner(owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "mine");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let store = MemoryAccreditationStore::new();
        let result = store
            .update(Uuid::new_v4(), UpdateAccreditation { name: None })
            .await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_set_status_transitions_record() {
        let store = MemoryAccreditationStore::new();
        let record = store
            .create(CreateAccreditation {
                user_id: Uuid::new_v4(),
                name: "cert".to_string(),
            })
            .await
            .unwrap();

        store
            .set_status(record.id, AccreditationStatus::Approved)
            .await
            .unwrap();

        let stored = store.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AccreditationStatus::Approved);
    }
}
