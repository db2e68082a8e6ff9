//! Route classification: which paths skip entitlement fetch and gating.

use serde::{Deserialize, Serialize};

use crate::config::RoutingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteClass {
    /// Home, onboarding and auth pages. Never fetch, never gate.
    Public,
    Gated,
}

/// Classifies request paths against a [`RoutingConfig`].
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    public_prefixes: Vec<Vec<String>>,
    locales: Vec<String>,
}

impl RouteClassifier {
    pub fn new(config: &RoutingConfig) -> Self {
        Self {
            public_prefixes: config
                .public_prefixes
                .iter()
                .map(|p| segments(p).map(str::to_ascii_lowercase).collect())
                .collect(),
            locales: config
                .locales
                .iter()
                .map(|l| l.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        let mut segs: Vec<String> = segments(strip_query(path))
            .map(str::to_ascii_lowercase)
            .collect();
        if segs.first().is_some_and(|s| self.locales.contains(s)) {
            segs.remove(0);
        }

        let is_public = self.public_prefixes.iter().any(|prefix| {
            if prefix.is_empty() {
                // "/" is the home page only.
                segs.is_empty()
            } else {
                segs.len() >= prefix.len() && segs[..prefix.len()] == prefix[..]
            }
        });

        if is_public {
            RouteClass::Public
        } else {
            RouteClass::Gated
        }
    }

    pub fn is_gated(&self, path: &str) -> bool {
        self.classify(path) == RouteClass::Gated
    }
}

impl Default for RouteClassifier {
    fn default() -> Self {
        Self::new(&RoutingConfig::default())
    }
}

/// Classify against the default public routes.
pub fn route_class(path: &str) -> RouteClass {
    RouteClassifier::default().classify(path)
}

pub fn is_gated(path: &str) -> bool {
    route_class(path) == RouteClass::Gated
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
