//! Error taxonomy for upstream failures.
//!
//! Non-2xx responses from the Glean API are classified into a closed set of
//! variants keyed by HTTP status. Transport-level failures (connection reset,
//! DNS, TLS) collapse into [`GleanError::Generic`] so the taxonomy stays
//! closed. Variants are constructed once at the point of failure and consumed
//! by [`GleanError::user_message`] when rendered as tool output.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

/// Upstream failure, classified by HTTP status.
///
/// Every variant carries the upstream message, the status code and the raw
/// response payload. The payload is opaque: it is only ever rendered back to
/// the caller, never inspected beyond classification.
#[derive(Debug, Clone, Error)]
pub enum GleanError {
    #[error("invalid request ({status}): {message}")]
    InvalidRequest {
        message: String,
        status: u16,
        response: Value,
    },
    #[error("authentication failed ({status}): {message}")]
    Authentication {
        message: String,
        status: u16,
        response: Value,
    },
    #[error("permission denied ({status}): {message}")]
    Permission {
        message: String,
        status: u16,
        response: Value,
    },
    #[error("request timeout ({status}): {message}")]
    RequestTimeout {
        message: String,
        status: u16,
        response: Value,
    },
    #[error("invalid query ({status}): {message}")]
    Validation {
        message: String,
        status: u16,
        response: Value,
    },
    #[error("rate limited ({status}): {message}")]
    RateLimit {
        message: String,
        status: u16,
        response: Value,
        reset_at: DateTime<Utc>,
    },
    #[error("glean api error ({status}): {message}")]
    Generic {
        message: String,
        status: u16,
        response: Value,
    },
}

impl GleanError {
    /// Map a non-2xx status and its parsed body to the matching variant.
    ///
    /// `payload.message` overrides the per-variant default when present.
    /// For 429 responses, `payload.reset_at` (RFC 3339 string or epoch
    /// seconds) sets the retry horizon; absent or unparseable values default
    /// to one minute from now.
    pub fn classify(status: u16, payload: &Value) -> Self {
        let message = |fallback: &str| {
            payload
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };
        let response = payload.clone();

        match status {
            400 => Self::InvalidRequest {
                message: message("Invalid request"),
                status,
                response,
            },
            401 => Self::Authentication {
                message: message("Authentication failed"),
                status,
                response,
            },
            403 => Self::Permission {
                message: message("Forbidden"),
                status,
                response,
            },
            408 => Self::RequestTimeout {
                message: message("Request timeout"),
                status,
                response,
            },
            422 => Self::Validation {
                message: message("Invalid query"),
                status,
                response,
            },
            429 => Self::RateLimit {
                message: message("Too many requests"),
                status,
                response,
                reset_at: parse_reset_at(payload.get("reset_at")),
            },
            _ => Self::Generic {
                message: message("Glean API error"),
                status,
                response,
            },
        }
    }

    /// Wrap a connection-level failure that never produced a status code.
    pub fn from_transport(err: reqwest::Error) -> Self {
        Self::Generic {
            message: format!("Request failed: {err}"),
            status: 500,
            response: Value::Null,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidRequest { status, .. }
            | Self::Authentication { status, .. }
            | Self::Permission { status, .. }
            | Self::RequestTimeout { status, .. }
            | Self::Validation { status, .. }
            | Self::RateLimit { status, .. }
            | Self::Generic { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidRequest { message, .. }
            | Self::Authentication { message, .. }
            | Self::Permission { message, .. }
            | Self::RequestTimeout { message, .. }
            | Self::Validation { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Generic { message, .. } => message,
        }
    }

    /// Render the user-facing error text for a tool result.
    ///
    /// InvalidRequest and Validation append the raw response payload so the
    /// caller can see which parameter upstream rejected; RateLimit appends
    /// the retry horizon.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest {
                message, response, ..
            } => with_details("Invalid Request", message, response),
            Self::Authentication { message, .. } => format!("Authentication Failed: {message}"),
            Self::Permission { message, .. } => format!("Permission Denied: {message}"),
            Self::RequestTimeout { message, .. } => format!("Request Timeout: {message}"),
            Self::Validation {
                message, response, ..
            } => with_details("Invalid Query", message, response),
            Self::RateLimit {
                message, reset_at, ..
            } => format!(
                "Rate Limit Exceeded: {message}\nResets at: {}",
                reset_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ),
            Self::Generic { message, .. } => format!("Glean API Error: {message}"),
        }
    }
}

fn with_details(label: &str, message: &str, response: &Value) -> String {
    let mut out = format!("{label}: {message}");
    if !response_is_empty(response) {
        if let Ok(details) = serde_json::to_string(response) {
            out.push_str("\nDetails: ");
            out.push_str(&details);
        }
    }
    out
}

fn response_is_empty(response: &Value) -> bool {
    match response {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn parse_reset_at(raw: Option<&Value>) -> DateTime<Utc> {
    let fallback = || Utc::now() + Duration::seconds(60);
    match raw {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| fallback()),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(fallback),
        _ => fallback(),
    }
}
