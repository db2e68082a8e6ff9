//! Pure gating decisions. No storage, no clock: the caller supplies
//! `now` once per decision.

use serde::{Deserialize, Serialize};

use crate::plans::{PlanPolicy, SessionCap};
use crate::state::SessionAdState;

/// Outcome of a gating check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Allowed,
    /// Debug override. Recording still happens normally.
    Forced,
    /// Plan has a zero cap.
    Exempt,
    CapReached { shown: u32, cap: u32 },
    RateLimited { retry_after_sec: u64 },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed | Self::Forced)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allowed => "allowed",
            Self::Forced => "forced",
            Self::Exempt => "exempt",
            Self::CapReached { .. } => "cap_reached",
            Self::RateLimited { .. } => "rate_limited",
        }
    }
}

/// Apply the gating rules in order: zero cap, session cap, interval.
pub fn evaluate(policy: &PlanPolicy, state: &SessionAdState, now: u64) -> GateDecision {
    if policy.exempts_session() {
        return GateDecision::Exempt;
    }

    if let SessionCap::Limited(cap) = policy.max_per_session {
        if state.shown_count >= cap {
            return GateDecision::CapReached {
                shown: state.shown_count,
                cap,
            };
        }
    }

    if let Some(last) = state.last_shown_at {
        // A clock that moved backwards counts as no time elapsed.
        let elapsed = now.saturating_sub(last);
        if elapsed < policy.min_interval_sec {
            return GateDecision::RateLimited {
                retry_after_sec: policy.min_interval_sec - elapsed,
            };
        }
    }

    GateDecision::Allowed
}

pub fn can_show_now(policy: &PlanPolicy, state: &SessionAdState, now: u64) -> bool {
    evaluate(policy, state, now).is_allowed()
}

/// State after one rendered impression at `now`.
pub fn record_shown(state: &SessionAdState, now: u64) -> SessionAdState {
    SessionAdState {
        shown_count: state.shown_count.saturating_add(1),
        last_shown_at: Some(now),
    }
}

/// Evaluator with the optional debug override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdGate {
    pub debug_force: bool,
}

impl AdGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forced() -> Self {
        Self { debug_force: true }
    }

    pub fn decide(&self, policy: &PlanPolicy, state: &SessionAdState, now: u64) -> GateDecision {
        if self.debug_force {
            GateDecision::Forced
        } else {
            evaluate(policy, state, now)
        }
    }

    pub fn can_show_now(&self, policy: &PlanPolicy, state: &SessionAdState, now: u64) -> bool {
        self.decide(policy, state, now).is_allowed()
    }

    /// Identical to [`record_shown`]; the override never changes counting.
    pub fn record_shown(&self, state: &SessionAdState, now: u64) -> SessionAdState {
        record_shown(state, now)
    }
}
