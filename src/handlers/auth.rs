//! 认证相关的 HTTP 处理器
//! 注册、登录、登出、令牌刷新、用户信息

use crate::{
    acl::AccessControlData,
    auth::middleware::AuthContext,
    error::AppError,
    middleware::AppState,
    models::token::TokenResponse,
    models::user::*,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 注册
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    // 邮箱唯一性预检查；并发竞争由存储层的唯一约束兜底
    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::email_taken());
    }

    let password_hash = state.password_hasher.hash(&req.password)?;

    let user = state
        .users
        .create(NewUser {
            name: req.name,
            email: req.email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Successfully registered",
            "data": { "user": UserResponse::from(user) }
        })),
    ))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    // 未知邮箱与错误密码返回同一个 401，避免用户枚举
    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    state.password_hasher.verify(&req.password, &user.password_hash)?;

    let issued = state.jwt_service.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(json!({
        "message": "Logged in successfully",
        "data": TokenResponse::bearer(issued.access_token, issued.expires_in)
    })))
}

/// 登出（撤销当前令牌）
pub async fn logout(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let revoked = state
        .revocations
        .revoke(&auth_context.token_id, auth_context.expires_at)
        .await?;

    // 认证关卡已拦截被撤销的令牌；这里只在并发竞争下触发
    if !revoked {
        return Err(AppError::Unauthorized);
    }

    tracing::info!(user_id = %auth_context.user_id, "User logged out");

    Ok(Json(json!({ "message": "Successfully logged out" })))
}

/// 刷新令牌（旧令牌作废，签发同一主体的新令牌）
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    // 主体必须仍然存在
    let user = state
        .users
        .find_by_id(auth_context.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // 先撤销旧令牌，再签发新令牌
    let revoked = state
        .revocations
        .revoke(&auth_context.token_id, auth_context.expires_at)
        .await?;

    if !revoked {
        return Err(AppError::Unauthorized);
    }

    let issued = state.jwt_service.issue(&user.id)?;

    tracing::info!(user_id = %user.id, "Token refreshed");

    Ok(Json(json!({
        "message": "Token refreshed successfully",
        "data": TokenResponse::bearer(issued.access_token, issued.expires_in)
    })))
}

/// 获取当前用户信息
pub async fn profile(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .find_by_id(auth_context.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // 访问控制协作方可选；缺席时 acl 为空对象
    let acl = match &state.access_control {
        Some(provider) => json!(AccessControlData {
            roles: provider.roles(user.id).await?,
            permissions: provider.permissions(user.id).await?,
        }),
        None => json!({}),
    };

    Ok(Json(json!({
        "message": "Profile obtained successfully",
        "data": {
            "user": UserResponse::from(user),
            "acl": acl
        }
    })))
}
