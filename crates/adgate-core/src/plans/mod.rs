//! Plan registry: plan names mapped to ad-display policy.
//!
//! ## Default table
//! - **free**: unlimited impressions, at least 90s apart
//! - **basic**: 3 impressions per session, at least 300s apart
//! - **premium**, **business**: no ads
//!
//! Unrecognised plan names resolve to [`PlanPolicy::DENY_ALL`].

pub mod plan;
pub mod registry;

pub use plan::{PlanName, PlanPolicy, SessionCap, LEGACY_UNLIMITED_THRESHOLD};
pub use registry::{default_policy, policy_for, PlanRegistry};
