/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform segment of an endpoint path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// `ios` endpoints (also used by tvOS and watchOS resources)
    #[default]
    Ios,
    /// `mac` endpoints
    Mac,
}

impl Platform {
    /// Path segment used by the portal
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Mac => "mac",
        }
    }

    /// Picks the platform from the usual `mac` flag
    #[must_use]
    pub fn from_mac(mac: bool) -> Self {
        if mac { Platform::Mac } else { Platform::Ios }
    }

    /// Whether this is the `mac` platform
    #[must_use]
    pub fn is_mac(self) -> bool {
        self == Platform::Mac
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Ordered form parameters
///
/// Keys may repeat: list values are encoded as one pair per element
/// (`deviceIds=a&deviceIds=b`), which is what the portal expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormParams(Vec<(String, String)>);

impl FormParams {
    /// Empty parameter list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one pair
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Appends one pair when `value` is present
    #[must_use]
    pub fn with_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Appends one pair per element
    #[must_use]
    pub fn with_many<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.0.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// First value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All pairs in insertion order
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// Whether no pair has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Kind of app identifier to register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppType {
    /// Exact bundle identifier
    Explicit,
    /// Bundle identifier ending in `*`
    Wildcard,
}

impl AppType {
    /// Value of the `type` form field
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AppType::Explicit => "explicit",
            AppType::Wildcard => "wildcard",
        }
    }
}

/// A capability toggle on an app identifier
#[derive(Debug, Clone, PartialEq, Eq, DisplaySimple, Serialize, Deserialize)]
pub struct AppFeature {
    /// Feature key, e.g. `push` or `APG3427HIY`
    pub service_id: String,
    /// Value to set, e.g. `on`, `off` or a data protection level
    pub value: String,
    /// Endpoint that updates this feature on an existing app
    pub service_uri: String,
}

impl AppFeature {
    /// Creates a feature toggle
    pub fn new(service_id: &str, value: &str, service_uri: &str) -> Self {
        Self {
            service_id: service_id.to_string(),
            value: value.to_string(),
            service_uri: service_uri.to_string(),
        }
    }
}

/// Parameters for registering a new app identifier
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize)]
pub struct NewApp {
    /// Explicit or wildcard identifier
    pub app_type: AppType,
    /// Display name, sanitized before it is sent
    pub name: String,
    /// Bundle identifier
    pub bundle_id: String,
    /// Target platform
    pub platform: Platform,
    /// Features to enable at creation time
    pub enable_services: Vec<AppFeature>,
}

impl NewApp {
    /// Explicit app identifier on iOS with no extra features
    pub fn explicit(name: &str, bundle_id: &str) -> Self {
        Self {
            app_type: AppType::Explicit,
            name: name.to_string(),
            bundle_id: bundle_id.to_string(),
            platform: Platform::Ios,
            enable_services: Vec::new(),
        }
    }

    /// Wildcard app identifier on iOS
    pub fn wildcard(name: &str, bundle_id: &str) -> Self {
        Self {
            app_type: AppType::Wildcard,
            ..Self::explicit(name, bundle_id)
        }
    }

    /// Set the platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Enable an additional feature
    pub fn with_service(mut self, feature: AppFeature) -> Self {
        self.enable_services.push(feature);
        self
    }
}

/// Parameters shared by profile creation and repair
#[derive(Debug, Clone, DisplaySimple, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Profile name
    pub name: String,
    /// `limited`, `store`, `adhoc` or `inhouse`
    pub distribution_method: String,
    /// Internal app identifier the profile is bound to
    pub app_id: String,
    /// Certificates embedded in the profile
    pub certificate_ids: Vec<String>,
    /// Devices embedded in the profile
    pub device_ids: Vec<String>,
    /// Target platform
    pub platform: Platform,
    /// Sub platform, e.g. `tvOS`
    pub sub_platform: Option<String>,
}

impl ProfileRequest {
    /// Creates an iOS profile request without devices
    pub fn new(name: &str, distribution_method: &str, app_id: &str) -> Self {
        Self {
            name: name.to_string(),
            distribution_method: distribution_method.to_string(),
            app_id: app_id.to_string(),
            certificate_ids: Vec::new(),
            device_ids: Vec::new(),
            platform: Platform::Ios,
            sub_platform: None,
        }
    }

    /// Set the certificates
    pub fn with_certificates(mut self, certificate_ids: &[&str]) -> Self {
        self.certificate_ids = certificate_ids.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the devices
    pub fn with_devices(mut self, device_ids: &[&str]) -> Self {
        self.device_ids = device_ids.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the sub platform
    pub fn with_sub_platform(mut self, sub_platform: &str) -> Self {
        self.sub_platform = Some(sub_platform.to_string());
        self
    }
}

/// JSON body of team endpoints that only need the team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScopedRequest {
    /// Team identifier
    pub team_id: String,
}

/// JSON body of `setTeamMemberRoles`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTeamMemberRolesRequest {
    /// Team identifier
    pub team_id: String,
    /// New role, e.g. `admin` or `member`
    pub role: String,
    /// Members to update
    pub team_member_ids: Vec<String>,
}

/// JSON body of `removeTeamMembers`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTeamMembersRequest {
    /// Team identifier
    pub team_id: String,
    /// Members to remove
    pub team_member_ids: Vec<String>,
}

/// One invitation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    /// Email address of the invitee
    pub recipient_email: String,
    /// Role granted on acceptance
    pub recipient_role: String,
}

/// JSON body of `sendInvites`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInvitesRequest {
    /// Invitations to send
    pub invites: Vec<Invite>,
    /// Team identifier
    pub team_id: String,
}
