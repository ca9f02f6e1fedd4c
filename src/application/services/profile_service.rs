use crate::application::client::Client;
use crate::application::csrf::ResourceKind;
use crate::application::interfaces::profile::ProfileService;
use crate::constants::PROFILE_MARKER;
use crate::error::AppError;
use crate::model::http::RequestBody;
use crate::model::requests::{FormParams, Platform, ProfileRequest};
use crate::model::responses::into_records;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

#[async_trait]
impl ProfileService for Client {
    async fn provisioning_profiles(&self, platform: Platform) -> Result<Vec<Value>, AppError> {
        info!("Listing {} provisioning profiles", platform);
        let path = format!("account/{platform}/profile/listProvisioningProfiles.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("sort", "name=asc")
            .with("includeInactiveProfiles", true)
            .with("onlyCountLists", true);
        self.paged(&path, params, "provisioningProfiles").await
    }

    async fn provisioning_profiles_via_xcode(
        &self,
        platform: Platform,
    ) -> Result<Vec<Value>, AppError> {
        info!("Listing {} provisioning profiles through the IDE host", platform);
        let url = format!(
            "{}/{platform}/listProvisioningProfiles.action",
            self.config().portal.xcode_base_url.trim_end_matches('/')
        );
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("includeInactiveProfiles", true)
            .with("onlyCountLists", true);

        let value = self
            .http()
            .request(
                Method::POST,
                &url,
                RequestBody::Query(params),
                Some("provisioningProfiles"),
            )
            .await?;
        let profiles = into_records(value)?;
        debug!("Provisioning profiles obtained: {}", profiles.len());
        Ok(profiles)
    }

    async fn provisioning_profile_details(
        &self,
        profile_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        debug!("Getting details of provisioning profile {}", profile_id);
        let path = format!("account/{platform}/profile/getProvisioningProfile.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("provisioningProfileId", profile_id);
        self.post_form(&path, params, Some("provisioningProfile"))
            .await
    }

    async fn create_provisioning_profile(
        &self,
        request: &ProfileRequest,
    ) -> Result<Value, AppError> {
        info!("Creating provisioning profile {}", request.name);
        self.ensure_csrf(ResourceKind::ProvisioningProfile).await?;

        let path = format!(
            "account/{}/profile/createProvisioningProfile.action",
            request.platform
        );
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("provisioningProfileName", &request.name)
            .with("appIdId", &request.app_id)
            .with("distributionType", &request.distribution_method)
            .with_many("certificateIds", &request.certificate_ids)
            .with_many("deviceIds", &request.device_ids)
            .with_opt("subPlatform", request.sub_platform.as_deref());
        self.post_form(&path, params, Some("provisioningProfile"))
            .await
    }

    async fn download_provisioning_profile(
        &self,
        profile_id: &str,
        platform: Platform,
    ) -> Result<Vec<u8>, AppError> {
        info!("Downloading provisioning profile {}", profile_id);
        self.ensure_csrf(ResourceKind::ProvisioningProfile).await?;

        let path = format!("account/{platform}/profile/downloadProfileContent");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("provisioningProfileId", profile_id);
        self.http().download(&path, params, PROFILE_MARKER).await
    }

    async fn delete_provisioning_profile(
        &self,
        profile_id: &str,
        platform: Platform,
    ) -> Result<Value, AppError> {
        info!("Deleting provisioning profile {}", profile_id);
        self.ensure_csrf(ResourceKind::ProvisioningProfile).await?;

        let path = format!("account/{platform}/profile/deleteProvisioningProfile.action");
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("provisioningProfileId", profile_id);
        self.post_form(&path, params, None).await
    }

    async fn repair_provisioning_profile(
        &self,
        profile_id: &str,
        request: &ProfileRequest,
    ) -> Result<Value, AppError> {
        info!("Repairing provisioning profile {}", profile_id);
        self.ensure_csrf(ResourceKind::ProvisioningProfile).await?;

        let path = format!(
            "account/{}/profile/regenProvisioningProfile.action",
            request.platform
        );
        // Regeneration takes the certificates as one comma separated value.
        let params = FormParams::new()
            .with("teamId", self.team_id().await?)
            .with("provisioningProfileId", profile_id)
            .with("provisioningProfileName", &request.name)
            .with("appIdId", &request.app_id)
            .with("distributionType", &request.distribution_method)
            .with("certificateIds", request.certificate_ids.join(","))
            .with_many("deviceIds", &request.device_ids)
            .with_opt("subPlatform", request.sub_platform.as_deref());
        self.post_form(&path, params, Some("provisioningProfile"))
            .await
    }
}
