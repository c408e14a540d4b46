//! Connection settings for the Glean REST API, read once at process start.

use anyhow::{bail, Result};

pub const SUBDOMAIN_VAR: &str = "GLEAN_SUBDOMAIN";
pub const API_TOKEN_VAR: &str = "GLEAN_API_TOKEN";
pub const ACT_AS_VAR: &str = "GLEAN_ACT_AS";

/// Instance identity and credentials for the upstream API.
#[derive(Debug, Clone)]
pub struct GleanConfig {
    /// Instance subdomain, e.g. `acme` for `acme-be.glean.com`.
    pub subdomain: String,
    /// Bearer token for the REST API.
    pub api_token: String,
    /// Optional identity to act as (requires a global-scoped token).
    pub act_as: Option<String>,
}

impl GleanConfig {
    pub fn new(subdomain: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            api_token: api_token.into(),
            act_as: None,
        }
    }

    /// Read configuration from the process environment.
    ///
    /// `GLEAN_SUBDOMAIN` and `GLEAN_API_TOKEN` are mandatory; a missing value
    /// is a startup-fatal condition, not a per-request error. `GLEAN_ACT_AS`
    /// is optional.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            subdomain: required(SUBDOMAIN_VAR)?,
            api_token: required(API_TOKEN_VAR)?,
            act_as: optional(ACT_AS_VAR),
        })
    }

    /// REST endpoint base for this instance.
    pub fn base_url(&self) -> String {
        format!("https://{}-be.glean.com/rest/api/v1", self.subdomain)
    }
}

fn required(var: &str) -> Result<String> {
    match optional(var) {
        Some(value) => Ok(value),
        None => bail!("{var} is not set (required to reach the Glean API)"),
    }
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
