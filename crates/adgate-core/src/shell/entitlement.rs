//! Entitlement snapshot and the source it is fetched from.

use serde::{Deserialize, Serialize};

use crate::errors::EntitlementError;

/// The caller's plan and onboarding status, fetched per route-enter and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    /// Raw plan name as reported by the backend. Resolved through the
    /// plan registry, so unknown names fail closed.
    pub plan: String,
    pub onboarding_completed: bool,
}

impl Entitlement {
    /// Parse a `/me` response body.
    pub fn from_json(body: &str) -> Result<Self, EntitlementError> {
        serde_json::from_str(body).map_err(|e| EntitlementError::Malformed(e.to_string()))
    }
}

/// Anything that can resolve the current caller's entitlement.
pub trait EntitlementSource {
    fn fetch(&self) -> Result<Entitlement, EntitlementError>;
}

impl<T: EntitlementSource + ?Sized> EntitlementSource for &T {
    fn fetch(&self) -> Result<Entitlement, EntitlementError> {
        (**self).fetch()
    }
}

/// Source returning a fixed result. Useful for SSR fixtures and tests.
#[derive(Debug, Clone)]
pub struct StaticEntitlementSource {
    result: Result<Entitlement, EntitlementError>,
}

impl StaticEntitlementSource {
    pub fn ok(entitlement: Entitlement) -> Self {
        Self {
            result: Ok(entitlement),
        }
    }

    pub fn failing(error: EntitlementError) -> Self {
        Self { result: Err(error) }
    }
}

impl EntitlementSource for StaticEntitlementSource {
    fn fetch(&self) -> Result<Entitlement, EntitlementError> {
        self.result.clone()
    }
}
