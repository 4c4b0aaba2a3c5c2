use crate::domain::model::{CallOutcome, RoleQueryResult};
use async_trait::async_trait;

/// Role operations the batch needs from the remote administration service.
///
/// Implementations log their own failures and never return errors: a failed
/// call is reported through the outcome so one user cannot stop the batch.
#[async_trait]
pub trait RoleService: Send + Sync {
    async fn get_roles(&self, user_id: &str) -> RoleQueryResult;
    async fn remove_roles(&self, user_id: &str, roles: &[String]) -> CallOutcome;
}
