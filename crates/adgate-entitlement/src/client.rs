//! `HttpEntitlementSource`: GET `<base>/me` → [`Entitlement`].
//!
//! Every failure (transport, non-2xx, bad body) becomes an
//! [`EntitlementError`]; the shell turns all of them into "ads off".
//! No request timeout is configured beyond reqwest's own defaults.

use std::fmt;

use adgate_core::config::EntitlementConfig;
use adgate_core::errors::EntitlementError;
use adgate_core::shell::{Entitlement, EntitlementSource};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpEntitlementConfig {
    /// Full URL of the entitlement endpoint.
    pub endpoint: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub bearer_token: Option<String>,
    pub user_agent: String,
}

impl HttpEntitlementConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token: None,
            user_agent: concat!("adgate/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Build from the `[entitlement]` config section. `None` when no base
    /// URL is configured.
    pub fn from_config(config: &EntitlementConfig) -> Option<Self> {
        config.endpoint().map(Self::new)
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpEntitlementSource {
    http: Client,
    config: HttpEntitlementConfig,
}

impl HttpEntitlementSource {
    pub fn new(config: HttpEntitlementConfig) -> Result<Self, EntitlementError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| EntitlementError::Transport(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &HttpEntitlementConfig {
        &self.config
    }
}

impl EntitlementSource for HttpEntitlementSource {
    fn fetch(&self) -> Result<Entitlement, EntitlementError> {
        let mut request = self
            .http
            .get(&self.config.endpoint)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.config.bearer_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let res = request
            .send()
            .map_err(|e| EntitlementError::Transport(e.to_string()))?;
        let status = res.status();
        let body = read_body(res.text())?;
        debug!(
            endpoint = %self.config.endpoint,
            status = status.as_u16(),
            "Entitlement response"
        );
        map_response(status, &body)
    }
}

/// A body that cannot be read is a transport failure whatever the status.
fn read_body<E: fmt::Display>(body: Result<String, E>) -> Result<String, EntitlementError> {
    body.map_err(|e| EntitlementError::Transport(e.to_string()))
}

/// Map an HTTP status and body to an entitlement result.
pub fn map_response(status: StatusCode, body: &str) -> Result<Entitlement, EntitlementError> {
    match status {
        s if s.is_success() => Entitlement::from_json(body),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(EntitlementError::Unauthorized),
        s => Err(EntitlementError::Http {
            status: s.as_u16(),
            body: body.chars().take(512).collect(),
        }),
    }
}
