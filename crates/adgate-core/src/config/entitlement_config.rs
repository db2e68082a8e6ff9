use serde::{Deserialize, Serialize};

/// Where the authenticated entitlement endpoint lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntitlementConfig {
    /// API base URL, e.g. `https://api.example.com`. `None` disables fetching.
    pub base_url: Option<String>,
    pub me_path: String,
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            me_path: "/me".to_string(),
        }
    }
}

impl EntitlementConfig {
    /// Full endpoint URL, if a base URL is configured.
    pub fn endpoint(&self) -> Option<String> {
        let base = self.base_url.as_deref()?.trim_end_matches('/');
        let path = self.me_path.trim_start_matches('/');
        Some(format!("{base}/{path}"))
    }
}
