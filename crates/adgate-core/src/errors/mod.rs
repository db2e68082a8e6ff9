//! Error types for every adgate subsystem.
//!
//! Unknown plans and corrupt persisted state are not errors: they resolve
//! to deny-all and the zero state respectively. Only storage writes,
//! publishing, config loading and entitlement fetches can fail.

mod adgate_error;
mod config_error;
mod entitlement_error;
pub mod error_code;
mod publish_error;
mod storage_error;

pub use adgate_error::{AdGateError, AdGateResult};
pub use config_error::ConfigError;
pub use entitlement_error::EntitlementError;
pub use error_code::AdGateErrorCode;
pub use publish_error::PublishError;
pub use storage_error::StorageError;
