//! Entitlement fetch failures. The shell treats every variant the same
//! way (ads off, content rendered); the variants exist for logging.

use super::error_code::{self, AdGateErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntitlementError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("unauthenticated")]
    Unauthorized,

    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    #[error("malformed entitlement body: {0}")]
    Malformed(String),
}

impl AdGateErrorCode for EntitlementError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => error_code::ENTITLEMENT_TRANSPORT,
            Self::Unauthorized => error_code::ENTITLEMENT_UNAUTHORIZED,
            Self::Http { .. } => error_code::ENTITLEMENT_HTTP,
            Self::Malformed(_) => error_code::ENTITLEMENT_MALFORMED,
        }
    }
}
