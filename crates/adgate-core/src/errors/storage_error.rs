//! Errors raised by key-value storage backends.

use super::error_code::{self, AdGateErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend error: {message}")]
    Backend { message: String },

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StorageError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

impl AdGateErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Backend { .. } => error_code::STORAGE_ERROR,
            Self::Unavailable { .. } => error_code::STORAGE_UNAVAILABLE,
        }
    }
}
