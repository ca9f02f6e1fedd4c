/// Login through an identity provider
pub mod auth;
/// Signed-in portal client
pub mod client;
/// Application configuration module
pub mod config;
/// Anti-forgery token cache
pub mod csrf;
/// Resource service interfaces
pub mod interfaces;
/// Page collection for listing endpoints
pub mod pagination;
/// Resource service implementations
pub mod services;
/// Session state
pub mod session;
/// Interactive team selection
pub mod team_selector;
