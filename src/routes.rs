//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, middleware::AppState};

/// 创建应用路由
///
/// 处理器以显式函数引用注册；注册与登录是仅有的两个
/// 免认证业务端点，其余路由先经过 JWT 认证关卡。
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // 免认证端点
    let open_routes = Router::new()
        .route("/jwt-auth/register", post(handlers::auth::register))
        .route("/jwt-auth/login", post(handlers::auth::login));

    // 需要认证的路由
    let authenticated_routes = Router::new()
        .route("/jwt-auth/logout", post(handlers::auth::logout))
        .route("/jwt-auth/refresh", post(handlers::auth::refresh))
        .route("/jwt-auth/profile", get(handlers::auth::profile))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::jwt_auth_middleware,
        ));

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(open_routes)
        .merge(authenticated_routes)
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
