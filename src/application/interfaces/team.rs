use crate::error::AppError;
use async_trait::async_trait;
use serde_json::Value;

/// Interface for the team member service
///
/// Every endpoint of this family takes a JSON body.
#[async_trait]
pub trait TeamService: Send + Sync {
    /// Lists the members of the current team
    async fn team_members(&self) -> Result<Vec<Value>, AppError>;

    /// Changes the role of a member, e.g. to `admin` or `member`
    async fn set_team_member_role(&self, member_id: &str, role: &str)
    -> Result<Value, AppError>;

    /// Removes a member from the team
    async fn remove_team_member(&self, member_id: &str) -> Result<Value, AppError>;

    /// Invites someone to the team
    async fn invite_team_member(&self, email: &str, role: &str) -> Result<Value, AppError>;
}
