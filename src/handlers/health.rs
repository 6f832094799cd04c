//! 健康检查处理器
//! 提供 /health 和 /ready 端点

use crate::middleware::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// 存活探针响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// 就绪探针响应
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<HealthCheck>,
}

/// 健康检查项
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 存活探针
/// 快速响应，不检查依赖
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 就绪探针
/// 检查用户存储与撤销表
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    let mut checks = Vec::new();

    checks.push(store_check("user_store", state.users.ping().await));
    checks.push(store_check("revocation_store", state.revocations.ping().await));

    let all_healthy = checks.iter().all(|c| c.status == "healthy");

    Json(ReadinessResponse {
        ready: all_healthy,
        checks,
    })
}

fn store_check(name: &str, result: Result<(), crate::error::AppError>) -> HealthCheck {
    match result {
        Ok(()) => HealthCheck {
            name: name.to_string(),
            status: "healthy".to_string(),
            message: None,
        },
        Err(e) => HealthCheck {
            name: name.to_string(),
            status: "unhealthy".to_string(),
            message: Some(e.user_message()),
        },
    }
}
