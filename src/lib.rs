//! JWT 认证服务库
//! 提供注册、登录、登出、令牌刷新与用户信息接口

pub mod acl;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod telemetry;
