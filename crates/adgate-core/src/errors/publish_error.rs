use super::error_code::{self, AdGateErrorCode};

/// Message bus publish failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error("publish to '{topic}' failed: {message}")]
    Failed { topic: String, message: String },

    #[error("bus full: capacity {capacity} reached")]
    Full { capacity: usize },
}

impl AdGateErrorCode for PublishError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Failed { .. } => error_code::PUBLISH_FAILED,
            Self::Full { .. } => error_code::BUS_FULL,
        }
    }
}
