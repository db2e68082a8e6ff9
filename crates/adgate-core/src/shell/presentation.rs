//! PresentationShell: per-route gating state.
//!
//! Each route-enter gets a fresh id. A fetch result is applied only if
//! its ticket still names the current route, so a slow response for a
//! page the user already left cannot leak onto the next page.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RoutingConfig;
use crate::errors::{AdGateErrorCode, EntitlementError};
use crate::gating::AdGate;
use crate::plans::{PlanName, PlanPolicy, PlanRegistry};
use crate::routing::{RouteClass, RouteClassifier};

use super::entitlement::{Entitlement, EntitlementSource};

/// Whether ads may be considered on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AdsMode {
    Off,
    Eligible { plan: PlanName, policy: PlanPolicy },
    /// Debug force on a gated route. `policy` is whatever the entitlement
    /// resolved to (deny-all before or without one); the forced gate
    /// ignores it.
    Forced { policy: PlanPolicy },
}

/// What the page should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub route_class: RouteClass,
    /// Always true: gating never blocks content.
    pub render_content: bool,
    pub ads: AdsMode,
    pub onboarding_pending: bool,
}

impl ShellView {
    fn content_only(route_class: RouteClass) -> Self {
        Self {
            route_class,
            render_content: true,
            ads: AdsMode::Off,
            onboarding_pending: false,
        }
    }

    pub fn ads_policy(&self) -> Option<&PlanPolicy> {
        match &self.ads {
            AdsMode::Eligible { policy, .. } | AdsMode::Forced { policy } => Some(policy),
            AdsMode::Off => None,
        }
    }
}

/// Result of entering a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEnter {
    /// No fetch, no gating.
    Public,
    /// Fetch the entitlement, then hand the result back with this ticket.
    Fetch(FetchTicket),
}

/// Tags a fetch with the route that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    route_id: u64,
    path: String,
}

impl FetchTicket {
    pub fn route_id(&self) -> u64 {
        self.route_id
    }
}

pub struct PresentationShell {
    classifier: RouteClassifier,
    registry: PlanRegistry,
    gate: AdGate,
    current_route: Option<u64>,
    next_route_id: u64,
    view: ShellView,
}

impl PresentationShell {
    pub fn new(routing: &RoutingConfig, registry: PlanRegistry) -> Self {
        Self {
            classifier: RouteClassifier::new(routing),
            registry,
            gate: AdGate::new(),
            current_route: None,
            next_route_id: 1,
            view: ShellView::content_only(RouteClass::Public),
        }
    }

    pub fn view(&self) -> ShellView {
        self.view
    }

    pub fn registry(&self) -> &PlanRegistry {
        &self.registry
    }

    /// Install the debug gate. Takes effect from the next route-enter.
    pub fn set_gate(&mut self, gate: AdGate) {
        self.gate = gate;
    }

    pub fn gate(&self) -> AdGate {
        self.gate
    }

    /// Navigate to `path`. Any fetch still in flight becomes stale.
    pub fn enter_route(&mut self, path: &str) -> RouteEnter {
        let id = self.next_route_id;
        self.next_route_id += 1;
        self.current_route = Some(id);

        let class = self.classifier.classify(path);
        self.view = ShellView::content_only(class);
        if class == RouteClass::Gated && self.gate.debug_force {
            self.view.ads = AdsMode::Forced {
                policy: PlanPolicy::DENY_ALL,
            };
        }

        match class {
            RouteClass::Public => {
                debug!(path, "Public route, gating skipped");
                RouteEnter::Public
            }
            RouteClass::Gated => RouteEnter::Fetch(FetchTicket {
                route_id: id,
                path: path.to_string(),
            }),
        }
    }

    /// Apply a fetch result. Returns `None` when the ticket is stale;
    /// otherwise the updated view.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Entitlement, EntitlementError>,
    ) -> Option<ShellView> {
        if self.current_route != Some(ticket.route_id) {
            debug!(
                route_id = ticket.route_id,
                path = %ticket.path,
                "Discarding entitlement for a route no longer active"
            );
            return None;
        }

        self.view = match result {
            Ok(entitlement) => self.view_for(&entitlement),
            Err(e) => {
                warn!(
                    path = %ticket.path,
                    code = e.error_code(),
                    error = %e,
                    "Entitlement fetch failed, ads off"
                );
                self.failed_view()
            }
        };
        Some(self.view)
    }

    /// Enter `path` and, if gated, fetch synchronously from `source`.
    pub fn enter_and_fetch<E: EntitlementSource>(&mut self, path: &str, source: &E) -> ShellView {
        match self.enter_route(path) {
            RouteEnter::Public => self.view,
            RouteEnter::Fetch(ticket) => {
                let result = source.fetch();
                self.complete_fetch(ticket, result).unwrap_or(self.view)
            }
        }
    }

    fn view_for(&self, entitlement: &Entitlement) -> ShellView {
        let mut view = ShellView::content_only(RouteClass::Gated);
        view.onboarding_pending = !entitlement.onboarding_completed;

        let policy = self.registry.policy_for(&entitlement.plan);
        let plan = PlanName::parse(&entitlement.plan);
        view.ads = match plan {
            _ if self.gate.debug_force => AdsMode::Forced { policy },
            Some(plan) if entitlement.onboarding_completed && !policy.exempts_session() => {
                AdsMode::Eligible { plan, policy }
            }
            _ => AdsMode::Off,
        };
        view
    }

    fn failed_view(&self) -> ShellView {
        let mut view = ShellView::content_only(RouteClass::Gated);
        if self.gate.debug_force {
            view.ads = AdsMode::Forced {
                policy: PlanPolicy::DENY_ALL,
            };
        }
        view
    }
}

impl Default for PresentationShell {
    fn default() -> Self {
        Self::new(&RoutingConfig::default(), PlanRegistry::new())
    }
}
