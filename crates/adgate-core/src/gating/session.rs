//! AdSession: binds the evaluator to a persistent store and a message bus.
//!
//! Storage is read at the start of each call and written only by
//! `record_impression`, which callers invoke after an impression actually
//! rendered. A fill the ad network declined is never recorded.

use serde_json::json;
use tracing::{debug, warn};

use crate::bus::{MessageBus, NoopBus};
use crate::constants::IMPRESSION_TOPIC;
use crate::errors::StorageError;
use crate::plans::{PlanPolicy, PlanRegistry};
use crate::state::{AdStateStore, KeyValueStorage, SessionAdState};

use super::evaluator::{AdGate, GateDecision};

pub struct AdSession<S, B = NoopBus> {
    store: AdStateStore<S>,
    gate: AdGate,
    bus: B,
}

impl<S: KeyValueStorage> AdSession<S, NoopBus> {
    pub fn new(store: AdStateStore<S>) -> Self {
        Self::with_bus(store, NoopBus)
    }
}

impl<S: KeyValueStorage, B: MessageBus> AdSession<S, B> {
    pub fn with_bus(store: AdStateStore<S>, bus: B) -> Self {
        Self {
            store,
            gate: AdGate::new(),
            bus,
        }
    }

    pub fn set_gate(&mut self, gate: AdGate) {
        self.gate = gate;
    }

    pub fn gate(&self) -> AdGate {
        self.gate
    }

    pub fn store(&self) -> &AdStateStore<S> {
        &self.store
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Current persisted state.
    pub fn state(&self) -> SessionAdState {
        self.store.read()
    }

    /// Decide whether an impression may be shown at `now`. Does not write.
    pub fn check(&self, policy: &PlanPolicy, now: u64) -> GateDecision {
        let state = self.store.read();
        let decision = self.gate.decide(policy, &state, now);
        debug!(
            session_id = %self.store.session_id(),
            decision = decision.as_str(),
            shown_count = state.shown_count,
            cap = %policy.max_per_session,
            "Ad gating decision"
        );
        decision
    }

    /// Resolve `plan_name` through the registry, then [`Self::check`].
    pub fn check_plan(&self, registry: &PlanRegistry, plan_name: &str, now: u64) -> GateDecision {
        self.check(&registry.policy_for(plan_name), now)
    }

    /// Count one rendered impression at `now` and persist it.
    pub fn record_impression(&self, now: u64) -> Result<SessionAdState, StorageError> {
        let before = self.store.read();
        let after = self.gate.record_shown(&before, now);
        self.store.write(&after)?;

        let payload = json!({
            "session_id": self.store.session_id(),
            "shown_count": after.shown_count,
            "shown_at": now,
            "forced": self.gate.debug_force,
        });
        if let Err(e) = self.bus.publish(IMPRESSION_TOPIC, payload) {
            warn!(error = %e, "Impression event not published");
        }
        Ok(after)
    }

    /// Remove all ad-state keys.
    pub fn reset(&self) -> Result<usize, StorageError> {
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::InMemoryBus;
    use crate::state::MemoryStorage;

    fn session() -> AdSession<MemoryStorage, InMemoryBus> {
        let store = AdStateStore::with_session(MemoryStorage::new(), "tab-1");
        AdSession::with_bus(store, InMemoryBus::new())
    }

    #[test]
    fn check_does_not_write() {
        let s = session();
        let policy = PlanPolicy::limited(2, 20);
        assert!(s.check(&policy, 0).is_allowed());
        assert!(s.check(&policy, 0).is_allowed());
        assert_eq!(s.state(), SessionAdState::ZERO);
    }

    #[test]
    fn record_persists_and_publishes() {
        let s = session();
        let after = s.record_impression(42).unwrap();
        assert_eq!(after.shown_count, 1);
        assert_eq!(s.state(), after);

        let messages = s.bus().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].topic, IMPRESSION_TOPIC);
        assert_eq!(messages[0].payload["shown_count"], 1);
        assert_eq!(messages[0].payload["session_id"], "tab-1");
    }

    #[test]
    fn full_bus_does_not_fail_recording() {
        let store = AdStateStore::with_session(MemoryStorage::new(), "tab-1");
        let s = AdSession::with_bus(store, InMemoryBus::with_capacity(0));
        assert_eq!(s.record_impression(1).unwrap().shown_count, 1);
        assert!(s.bus().messages().is_empty());
    }

    #[test]
    fn forced_session_still_counts() {
        let mut s = session();
        s.set_gate(AdGate::forced());
        assert_eq!(s.check(&PlanPolicy::DENY_ALL, 0), GateDecision::Forced);
        s.record_impression(0).unwrap();
        s.record_impression(1).unwrap();
        assert_eq!(s.state().shown_count, 2);
        assert_eq!(s.bus().messages()[1].payload["forced"], true);
    }

    #[test]
    fn unknown_plan_is_exempt() {
        let s = session();
        let registry = PlanRegistry::new();
        assert_eq!(s.check_plan(&registry, "gold", 0), GateDecision::Exempt);
    }

    #[test]
    fn reset_returns_to_zero() {
        let s = session();
        s.record_impression(3).unwrap();
        assert!(s.reset().unwrap() >= 2);
        assert_eq!(s.state(), SessionAdState::ZERO);
    }
}
