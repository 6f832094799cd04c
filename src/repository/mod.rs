//! 持久化层
//! 用户存储与令牌撤销表的抽象，以及 PostgreSQL / 内存两种实现

use crate::error::AppError;
use crate::models::user::{NewUser, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod memory;
pub mod revocation_repo;
pub mod user_repo;

pub use memory::{MemoryRevocationStore, MemoryUserStore};
pub use revocation_repo::PgRevocationStore;
pub use user_repo::PgUserStore;

/// 用户存储
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 持久化一个新用户；邮箱唯一性冲突返回验证错误
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// 存储可达性检查（就绪探针使用）
    async fn ping(&self) -> Result<(), AppError>;
}

/// 令牌撤销表（denylist，按 jti 记录）
#[async_trait]
pub trait TokenRevocationStore: Send + Sync {
    /// 撤销令牌。已撤销过的令牌返回 false（重复撤销是错误，不静默成功）
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, AppError>;

    async fn is_revoked(&self, token_id: &str) -> Result<bool, AppError>;

    /// 清理已自然过期的撤销记录
    async fn purge_expired(&self) -> Result<u64, AppError>;

    /// 存储可达性检查（就绪探针使用）
    async fn ping(&self) -> Result<(), AppError>;
}
