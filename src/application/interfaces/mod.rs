/// App identifier service interface
pub mod app;
/// App group service interface
pub mod app_group;
/// Certificate service interface
pub mod certificate;
/// Device service interface
pub mod device;
/// Provisioning profile service interface
pub mod profile;
/// Team member service interface
pub mod team;
/// Website push identifier service interface
pub mod website_push;

pub use app::AppService;
pub use app_group::AppGroupService;
pub use certificate::CertificateService;
pub use device::DeviceService;
pub use profile::ProfileService;
pub use team::TeamService;
pub use website_push::WebsitePushService;
