//! 内存实现
//! 用于集成测试和无数据库的嵌入式部署

use crate::{
    error::AppError,
    models::user::{NewUser, User},
    repository::{TokenRevocationStore, UserStore},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 内存用户存储
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AppError::internal_error("user store lock poisoned"))?;

        // 邮箱唯一约束
        if users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::email_taken());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self
            .users
            .read()
            .map_err(|_| AppError::internal_error("user store lock poisoned"))?;

        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self
            .users
            .read()
            .map_err(|_| AppError::internal_error("user store lock poisoned"))?;

        Ok(users.get(&id).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// 内存撤销表
#[derive(Default)]
pub struct MemoryRevocationStore {
    revoked: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRevocationStore for MemoryRevocationStore {
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, AppError> {
        let mut revoked = self
            .revoked
            .write()
            .map_err(|_| AppError::internal_error("revocation store lock poisoned"))?;

        if revoked.contains_key(token_id) {
            return Ok(false);
        }

        revoked.insert(token_id.to_string(), expires_at);
        Ok(true)
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, AppError> {
        let revoked = self
            .revoked
            .read()
            .map_err(|_| AppError::internal_error("revocation store lock poisoned"))?;

        Ok(revoked.contains_key(token_id))
    }

    async fn purge_expired(&self) -> Result<u64, AppError> {
        let mut revoked = self
            .revoked
            .write()
            .map_err(|_| AppError::internal_error("revocation store lock poisoned"))?;

        let before = revoked.len();
        let now = Utc::now();
        revoked.retain(|_, expires_at| *expires_at > now);

        Ok((before - revoked.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let store = MemoryUserStore::new();

        let created = store.create(new_user("a@example.com")).await.unwrap();

        let by_email = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();

        store.create(new_user("a@example.com")).await.unwrap();
        let result = store.create(new_user("a@example.com")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_revoke_is_not_idempotent() {
        let store = MemoryRevocationStore::new();
        let expires_at = Utc::now() + Duration::seconds(900);

        assert!(store.revoke("jti-1", expires_at).await.unwrap());
        assert!(store.is_revoked("jti-1").await.unwrap());

        // 重复撤销返回 false
        assert!(!store.revoke("jti-1", expires_at).await.unwrap());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = MemoryRevocationStore::new();

        store
            .revoke("expired", Utc::now() - Duration::seconds(10))
            .await
            .unwrap();
        store
            .revoke("live", Utc::now() + Duration::seconds(900))
            .await
            .unwrap();

        let purged = store.purge_expired().await.unwrap();
        assert_eq!(purged, 1);
        assert!(!store.is_revoked("expired").await.unwrap());
        assert!(store.is_revoked("live").await.unwrap());
    }
}
