//! Config loading: defaults, overrides, validation.

use std::io::Write;

use adgate_core::config::AdGateConfig;
use adgate_core::errors::{AdGateErrorCode, ConfigError};
use adgate_core::plans::{PlanName, PlanPolicy, PlanRegistry, SessionCap};
use adgate_core::routing::RouteClassifier;

#[test]
fn empty_toml_gives_defaults() {
    let config = AdGateConfig::from_toml("").unwrap();
    assert_eq!(config, AdGateConfig::default());
    assert!(config.debug.allow_force);
    assert_eq!(config.debug.force_param, "ads_debug");
    assert_eq!(config.entitlement.endpoint(), None);
}

#[test]
fn plan_overrides_flow_into_registry() {
    let config = AdGateConfig::from_toml(
        r#"
        [plans.basic]
        max_per_session = 5

        [plans.free]
        max_per_session = 9999
        min_interval_sec = 45
        "#,
    )
    .unwrap();

    let registry = PlanRegistry::from_config(&config.plans);
    assert_eq!(registry.policy(PlanName::Basic), PlanPolicy::limited(5, 300));
    assert_eq!(
        registry.policy(PlanName::Free),
        PlanPolicy {
            max_per_session: SessionCap::Unlimited,
            min_interval_sec: 45,
        }
    );
    assert_eq!(registry.policy(PlanName::Premium), PlanPolicy::DENY_ALL);
}

#[test]
fn routing_section_replaces_defaults() {
    let config = AdGateConfig::from_toml(
        r#"
        [routing]
        public_prefixes = ["/", "/pricing"]
        locales = ["sv"]
        "#,
    )
    .unwrap();
    let classifier = RouteClassifier::new(&config.routing);
    assert!(!classifier.is_gated("/sv/pricing"));
    assert!(classifier.is_gated("/auth/login"));
}

#[test]
fn entitlement_endpoint_joins_cleanly() {
    let config = AdGateConfig::from_toml(
        r#"
        [entitlement]
        base_url = "https://api.example.com/v1/"
        "#,
    )
    .unwrap();
    assert_eq!(
        config.entitlement.endpoint().as_deref(),
        Some("https://api.example.com/v1/me")
    );
}

#[test]
fn invalid_values_are_rejected() {
    let err = AdGateConfig::from_toml(
        r#"
        [routing]
        public_prefixes = ["auth"]
        "#,
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_INVALID");

    let err = AdGateConfig::from_toml(
        r#"
        [debug]
        force_param = "x"
        reset_param = "x"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));

    let err = AdGateConfig::from_toml(
        r#"
        [plans.basic]
        max_per_session = "many"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[debug]\nallow_force = false").unwrap();
    let config = AdGateConfig::load(file.path()).unwrap();
    assert!(!config.debug.allow_force);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AdGateConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_READ");
}
