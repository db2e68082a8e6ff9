//! # adgate-entitlement
//!
//! Blocking HTTP client for the backend `/me` endpoint. Implements
//! `adgate_core::shell::EntitlementSource` so the presentation shell can
//! fetch the caller's plan on every gated route-enter.

pub mod client;

pub use client::{map_response, HttpEntitlementConfig, HttpEntitlementSource};
