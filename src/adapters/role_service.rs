use crate::adapters::xmlmc::{MethodCall, XmlmcSession};
use crate::domain::model::{CallOutcome, RoleQueryResult};
use crate::domain::ports::RoleService;
use crate::utils::error::RemoverError;
use async_trait::async_trait;

const ADMIN_SERVICE: &str = "admin";
const GET_ROLE_LIST: &str = "userGetRoleList";
const REMOVE_ROLE: &str = "userRemoveRole";

/// Role listing and removal through the `admin` method-call service.
pub struct XmlmcRoleService {
    session: XmlmcSession,
}

impl XmlmcRoleService {
    pub fn new(session: XmlmcSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl RoleService for XmlmcRoleService {
    async fn get_roles(&self, user_id: &str) -> RoleQueryResult {
        let call = MethodCall::new(ADMIN_SERVICE, GET_ROLE_LIST).param("userId", user_id);

        match self.session.invoke(&call, false).await {
            Ok(response) => RoleQueryResult::found(response.params.roles),
            Err(e) => RoleQueryResult::failed(e.to_string()),
        }
    }

    async fn remove_roles(&self, user_id: &str, roles: &[String]) -> CallOutcome {
        let call = roles.iter().fold(
            MethodCall::new(ADMIN_SERVICE, REMOVE_ROLE).param("userId", user_id),
            |call, role| call.param("role", role.as_str()),
        );

        match self.session.invoke(&call, true).await {
            Ok(_) => CallOutcome::Success,
            Err(RemoverError::DryRunSkipped { .. }) => CallOutcome::DryRun,
            Err(e) => CallOutcome::Failed(e.to_string()),
        }
    }
}
