//! 可选的访问控制协作方
//! 在构造时以 Option 注入，缺席时 profile 的 acl 字段为空

use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// 访问控制提供方
///
/// 角色/权限引擎是外部协作方；本服务只在 profile 中转发其解析结果。
#[async_trait]
pub trait AccessControl: Send + Sync {
    async fn roles(&self, user_id: Uuid) -> Result<Vec<String>, AppError>;

    async fn permissions(&self, user_id: Uuid) -> Result<Vec<String>, AppError>;
}

/// 角色与权限数据
#[derive(Debug, Serialize)]
pub struct AccessControlData {
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

/// 静态表实现（测试与简单部署）
#[derive(Default)]
pub struct StaticAccessControl {
    grants: HashMap<Uuid, AccessGrant>,
}

#[derive(Default, Clone)]
struct AccessGrant {
    roles: Vec<String>,
    permissions: Vec<String>,
}

impl StaticAccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(
        mut self,
        user_id: Uuid,
        roles: Vec<String>,
        permissions: Vec<String>,
    ) -> Self {
        self.grants.insert(user_id, AccessGrant { roles, permissions });
        self
    }
}

#[async_trait]
impl AccessControl for StaticAccessControl {
    async fn roles(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        Ok(self
            .grants
            .get(&user_id)
            .map(|g| g.roles.clone())
            .unwrap_or_default())
    }

    async fn permissions(&self, user_id: Uuid) -> Result<Vec<String>, AppError> {
        Ok(self
            .grants
            .get(&user_id)
            .map(|g| g.permissions.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_access_control_grants() {
        let user_id = Uuid::new_v4();
        let acl = StaticAccessControl::new().grant(
            user_id,
            vec!["admin".to_string()],
            vec!["users.read".to_string(), "users.write".to_string()],
        );

        assert_eq!(acl.roles(user_id).await.unwrap(), vec!["admin"]);
        assert_eq!(acl.permissions(user_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_user_gets_empty_grants() {
        let acl = StaticAccessControl::new();

        assert!(acl.roles(Uuid::new_v4()).await.unwrap().is_empty());
        assert!(acl.permissions(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
