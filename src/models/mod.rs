//! 数据模型模块

pub mod token;
pub mod user;
