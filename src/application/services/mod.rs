/// App identifier operations
pub mod app_service;
/// App group operations
pub mod app_group_service;
/// Certificate operations
pub mod certificate_service;
/// Device operations
pub mod device_service;
/// Provisioning profile operations
pub mod profile_service;
/// Team member operations
pub mod team_service;
/// Website push identifier operations
pub mod website_push_service;
