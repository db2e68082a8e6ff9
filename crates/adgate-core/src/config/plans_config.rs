//! Plan policy overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::plans::SessionCap;

/// Per-plan overrides keyed by plan name (`[plans.basic]` in TOML).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct PlansConfig {
    pub overrides: BTreeMap<String, PlanOverride>,
}

/// Fields left unset keep the built-in value for that plan.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PlanOverride {
    pub max_per_session: Option<SessionCap>,
    pub min_interval_sec: Option<u64>,
}
