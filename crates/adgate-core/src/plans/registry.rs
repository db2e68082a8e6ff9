//! PlanRegistry: the immutable plan → policy table.

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::config::PlansConfig;

use super::plan::{PlanName, PlanPolicy};

/// Static plan table, built once at startup.
#[derive(Debug, Clone)]
pub struct PlanRegistry {
    policies: FxHashMap<PlanName, PlanPolicy>,
}

impl PlanRegistry {
    /// Registry with the built-in policy for every plan.
    pub fn new() -> Self {
        let policies = PlanName::ALL
            .iter()
            .map(|plan| (*plan, default_policy(*plan)))
            .collect();
        Self { policies }
    }

    /// Apply config overrides on top of the built-in table.
    /// Plans absent from the config keep their default policy, and
    /// overrides only replace the fields they set.
    pub fn from_config(config: &PlansConfig) -> Self {
        let mut registry = Self::new();
        for (key, o) in &config.overrides {
            let Some(plan) = PlanName::parse(key) else {
                warn!(plan = %key, "Ignoring config override for unknown plan");
                continue;
            };
            let policy = registry
                .policies
                .entry(plan)
                .or_insert_with(|| default_policy(plan));
            if let Some(cap) = o.max_per_session {
                policy.max_per_session = cap;
            }
            if let Some(interval) = o.min_interval_sec {
                policy.min_interval_sec = interval;
            }
        }
        registry
    }

    /// Policy for a known plan.
    pub fn policy(&self, plan: PlanName) -> PlanPolicy {
        // Every PlanName is inserted at construction.
        self.policies
            .get(&plan)
            .copied()
            .unwrap_or(PlanPolicy::DENY_ALL)
    }

    /// Policy for a plan name as reported by the backend. Unknown names
    /// fail closed to [`PlanPolicy::DENY_ALL`].
    pub fn policy_for(&self, plan_name: &str) -> PlanPolicy {
        match PlanName::parse(plan_name) {
            Some(plan) => self.policy(plan),
            None => {
                warn!(plan = %plan_name, "Unknown plan, denying ads");
                PlanPolicy::DENY_ALL
            }
        }
    }
}

impl Default for PlanRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in policy table.
pub fn default_policy(plan: PlanName) -> PlanPolicy {
    match plan {
        PlanName::Free => PlanPolicy::unlimited(90),
        PlanName::Basic => PlanPolicy::limited(3, 300),
        PlanName::Premium | PlanName::Business => PlanPolicy::DENY_ALL,
    }
}

/// Lookup against the built-in table.
pub fn policy_for(plan_name: &str) -> PlanPolicy {
    match PlanName::parse(plan_name) {
        Some(plan) => default_policy(plan),
        None => {
            warn!(plan = %plan_name, "Unknown plan, denying ads");
            PlanPolicy::DENY_ALL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlanOverride, PlansConfig};
    use crate::plans::SessionCap;

    #[test]
    fn every_plan_has_an_entry() {
        let registry = PlanRegistry::new();
        for plan in PlanName::ALL {
            assert_eq!(registry.policy(plan), default_policy(plan));
        }
    }

    #[test]
    fn unknown_plan_fails_closed() {
        assert_eq!(policy_for("platinum").max_per_session, SessionCap::Limited(0));
        assert_eq!(PlanRegistry::new().policy_for(""), PlanPolicy::DENY_ALL);
    }

    #[test]
    fn paid_plans_exempt_sessions() {
        assert!(policy_for("premium").exempts_session());
        assert!(policy_for("business").exempts_session());
        assert!(!policy_for("free").exempts_session());
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let mut config = PlansConfig::default();
        config.overrides.insert(
            "basic".to_string(),
            PlanOverride {
                max_per_session: Some(SessionCap::Limited(5)),
                min_interval_sec: None,
            },
        );
        config.overrides.insert(
            "mystery".to_string(),
            PlanOverride {
                max_per_session: Some(SessionCap::Unlimited),
                min_interval_sec: Some(1),
            },
        );

        let registry = PlanRegistry::from_config(&config);
        assert_eq!(registry.policy(PlanName::Basic), PlanPolicy::limited(5, 300));
        assert_eq!(registry.policy(PlanName::Free), default_policy(PlanName::Free));
        assert_eq!(registry.policy_for("mystery"), PlanPolicy::DENY_ALL);
    }
}
