use serde::{Deserialize, Serialize};

/// Query-string switches for manual QA.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// When false the force switch is ignored. The reset switch always works.
    pub allow_force: bool,
    pub force_param: String,
    pub reset_param: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            allow_force: true,
            force_param: "ads_debug".to_string(),
            reset_param: "ads_reset".to_string(),
        }
    }
}
