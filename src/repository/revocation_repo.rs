//! Token revocation store (PostgreSQL)

use crate::{error::AppError, repository::TokenRevocationStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

pub struct PgRevocationStore {
    db: PgPool,
}

impl PgRevocationStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRevocationStore for PgRevocationStore {
    /// 撤销令牌（已存在的记录不覆盖，返回 false）
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO revoked_tokens (token_id, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (token_id) DO NOTHING
            "#,
        )
        .bind(token_id)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 检查令牌是否已被撤销
    async fn is_revoked(&self, token_id: &str) -> Result<bool, AppError> {
        let revoked: bool =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token_id = $1)")
                .bind(token_id)
                .fetch_one(&self.db)
                .await?
                .get(0);

        Ok(revoked)
    }

    /// 清理已自然过期的撤销记录
    async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_one(&self.db).await?;
        Ok(())
    }
}
