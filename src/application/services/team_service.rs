use crate::application::client::Client;
use crate::application::csrf::ResourceKind;
use crate::application::interfaces::team::TeamService;
use crate::error::AppError;
use crate::model::requests::{
    Invite, RemoveTeamMembersRequest, SendInvitesRequest, SetTeamMemberRolesRequest,
    TeamScopedRequest,
};
use crate::model::responses::into_records;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

#[async_trait]
impl TeamService for Client {
    async fn team_members(&self) -> Result<Vec<Value>, AppError> {
        info!("Listing team members");
        let body = TeamScopedRequest {
            team_id: self.team_id().await?,
        };
        into_records(self.post_json("account/getTeamMembers", &body).await?)
    }

    async fn set_team_member_role(
        &self,
        member_id: &str,
        role: &str,
    ) -> Result<Value, AppError> {
        info!("Setting role {} on team member {}", role, member_id);
        self.ensure_csrf(ResourceKind::TeamMember).await?;

        let body = SetTeamMemberRolesRequest {
            team_id: self.team_id().await?,
            role: role.to_string(),
            team_member_ids: vec![member_id.to_string()],
        };
        self.post_json("account/setTeamMemberRoles", &body).await
    }

    async fn remove_team_member(&self, member_id: &str) -> Result<Value, AppError> {
        info!("Removing team member {}", member_id);
        self.ensure_csrf(ResourceKind::TeamMember).await?;

        let body = RemoveTeamMembersRequest {
            team_id: self.team_id().await?,
            team_member_ids: vec![member_id.to_string()],
        };
        self.post_json("account/removeTeamMembers", &body).await
    }

    async fn invite_team_member(&self, email: &str, role: &str) -> Result<Value, AppError> {
        info!("Inviting {} as {}", email, role);
        self.ensure_csrf(ResourceKind::TeamMember).await?;

        let body = SendInvitesRequest {
            invites: vec![Invite {
                recipient_email: email.to_string(),
                recipient_role: role.to_string(),
            }],
            team_id: self.team_id().await?,
        };
        self.post_json("account/sendInvites", &body).await
    }
}
