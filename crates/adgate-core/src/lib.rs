//! # adgate-core
//!
//! Plan-gated ad policy engine for the job-matching frontend.
//! Defines plans, session ad-state, the gating evaluator, route
//! classification, the presentation shell, config, errors and tracing.
//! Storage backends and the entitlement HTTP client live in sibling crates.

pub mod bus;
pub mod config;
pub mod constants;
pub mod debug;
pub mod errors;
pub mod gating;
pub mod plans;
pub mod routing;
pub mod shell;
pub mod state;
pub mod telemetry;

// Re-export the most commonly used types at the crate root.
pub use config::AdGateConfig;
pub use errors::{AdGateError, AdGateErrorCode, AdGateResult};
pub use gating::{can_show_now, record_shown, AdGate, AdSession, GateDecision};
pub use plans::{policy_for, PlanName, PlanPolicy, PlanRegistry, SessionCap};
pub use routing::{is_gated, route_class, RouteClass};
pub use shell::{AdsMode, Entitlement, EntitlementSource, PresentationShell, ShellView};
pub use state::{AdStateStore, KeyValueStorage, MemoryStorage, SessionAdState};
