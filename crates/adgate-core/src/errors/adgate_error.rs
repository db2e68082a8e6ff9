use super::error_code::AdGateErrorCode;
use super::{ConfigError, EntitlementError, PublishError, StorageError};

/// Top-level error type. Subsystem errors convert into this via `From`.
#[derive(Debug, thiserror::Error)]
pub enum AdGateError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("entitlement error: {0}")]
    Entitlement(#[from] EntitlementError),

    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl AdGateErrorCode for AdGateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Entitlement(e) => e.error_code(),
            Self::Publish(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience type alias.
pub type AdGateResult<T> = Result<T, AdGateError>;
