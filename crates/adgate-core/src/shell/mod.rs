//! Presentation shell: route-enter handling, entitlement snapshots and
//! the resulting per-page ad mode.

pub mod entitlement;
pub mod presentation;

pub use entitlement::{Entitlement, EntitlementSource, StaticEntitlementSource};
pub use presentation::{AdsMode, FetchTicket, PresentationShell, RouteEnter, ShellView};
