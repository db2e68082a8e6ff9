//! Route classification settings.

use serde::{Deserialize, Serialize};

/// Which paths are public (never gated) and which leading path segments
/// are locale prefixes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoutingConfig {
    /// Path prefixes matched on whole segments. `/` matches only the home page.
    pub public_prefixes: Vec<String>,
    /// Locale segments stripped before matching (case-insensitive).
    pub locales: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            public_prefixes: [
                "/",
                "/onboarding",
                "/auth",
                "/login",
                "/register",
                "/signup",
                "/forgot-password",
                "/reset-password",
                "/verify-email",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            locales: ["en", "fr", "de", "es", "it", "nl", "pt", "pt-br"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
