//! Ad gating: the decision rules and the session that persists their
//! outcome.
//!
//! Permission (`evaluate`, `can_show_now`) is separate from recording
//! (`record_shown`), so a failed delivery never touches the counters.

pub mod evaluator;
pub mod session;

pub use evaluator::{can_show_now, evaluate, record_shown, AdGate, GateDecision};
pub use session::AdSession;
