//! JWT 认证中间件
//! 除注册/登录外的所有端点先经过此关卡

use crate::{error::AppError, middleware::AppState};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// 认证上下文（附加到请求扩展）
///
/// 处理器以显式参数接收当前主体，而不是通过全局单例访问。
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    /// 当前令牌的 jti，登出/刷新时写入撤销表
    pub token_id: String,
    /// 当前令牌的自然过期时间
    pub expires_at: DateTime<Utc>,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// 从 Authorization 头提取令牌
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .ok_or(AppError::Unauthorized)
}

/// JWT 认证中间件 - 必须认证
///
/// 校验顺序：格式/签名/过期 -> 撤销表 -> 主体解析。
/// 任一失败都以同一个 401 返回，不区分原因。
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 从 Authorization 头提取令牌
    let token = extract_token(req.headers())?;

    // 验证签名与过期时间
    let claims = state.jwt_service.decode(&token)?;

    // 检查撤销表
    if state.revocations.is_revoked(&claims.jti).await? {
        tracing::debug!(jti = %claims.jti, "Rejected revoked token");
        return Err(AppError::Unauthorized);
    }

    // 创建认证上下文
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;
    let expires_at =
        DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(AppError::Unauthorized)?;

    let auth_context = AuthContext {
        user_id,
        token_id: claims.jti,
        expires_at,
    };

    // 附加到请求扩展
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer test_token_123".parse().unwrap());

        let token = extract_token(&headers).unwrap();
        assert_eq!(token, "test_token_123");
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_extract_token_invalid_format() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "InvalidFormat".parse().unwrap());

        assert!(extract_token(&headers).is_err());
    }
}
