//! Configuration, loaded from TOML. Every section is optional.
//!
//! ```toml
//! [plans.basic]
//! max_per_session = 5
//!
//! [plans.free]
//! max_per_session = "unlimited"
//! min_interval_sec = 60
//!
//! [routing]
//! public_prefixes = ["/", "/auth", "/onboarding"]
//!
//! [debug]
//! allow_force = false
//!
//! [entitlement]
//! base_url = "https://api.example.com"
//! ```

pub mod debug_config;
pub mod entitlement_config;
pub mod plans_config;
pub mod routing_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use debug_config::DebugConfig;
pub use entitlement_config::EntitlementConfig;
pub use plans_config::{PlanOverride, PlansConfig};
pub use routing_config::RoutingConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AdGateConfig {
    pub plans: PlansConfig,
    pub routing: RoutingConfig,
    pub debug: DebugConfig,
    pub entitlement: EntitlementConfig,
}

impl AdGateConfig {
    /// Parse and validate a TOML string. Missing fields take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(bad) = self
            .routing
            .public_prefixes
            .iter()
            .find(|p| !p.starts_with('/'))
        {
            return Err(ConfigError::Invalid {
                field: "routing.public_prefixes".to_string(),
                message: format!("'{bad}' must start with '/'"),
            });
        }
        if self.debug.force_param.is_empty() || self.debug.reset_param.is_empty() {
            return Err(ConfigError::Invalid {
                field: "debug".to_string(),
                message: "switch parameter names must not be empty".to_string(),
            });
        }
        if self.debug.force_param == self.debug.reset_param {
            return Err(ConfigError::Invalid {
                field: "debug".to_string(),
                message: "force_param and reset_param must differ".to_string(),
            });
        }
        Ok(())
    }
}
