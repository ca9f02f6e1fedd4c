/// Module containing environment configuration helpers
pub mod config;
/// Module containing logging utilities
pub mod logger;
/// Module containing display name sanitization
pub mod naming;

pub use logger::*;
pub use naming::*;
