//! Error taxonomy for the account REST API.
//!
//! ERROR HANDLING
//! ==============
//! Every mutating operation resolves with a value or an `ApiError`; nothing
//! is swallowed. The only failure the session core reinterprets locally is
//! "authorization denied on the identity fetch", which maps to a signed-out
//! state instead of surfacing here.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

use thiserror::Error;

/// Field name → list of messages, as returned by mutation endpoints on
/// validation failure. Field names are passed through uninterpreted.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Failure of a REST call to the account backend.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-validation HTTP failure (403/429/5xx and unclassified 4xx).
    /// Display-only; never retried automatically.
    #[error("request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// 4xx with a field-level error payload, propagated verbatim for the
    /// form to display.
    #[error("{}", render_field_errors(.0))]
    Validation(FieldErrors),

    /// Transport-level failure (offline, DNS, aborted).
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not match the expected schema.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-OK response from its status and parsed JSON body.
    ///
    /// A JSON object with a `detail` string is a plain status failure; any
    /// other JSON object is treated as field-level validation errors. The
    /// status split mirrors the backend: validation payloads only accompany
    /// 4xx responses.
    pub fn from_status_body(status: u16, body: Option<serde_json::Value>) -> Self {
        let Some(serde_json::Value::Object(map)) = body else {
            return Self::Status {
                status,
                detail: String::new(),
            };
        };
        if let Some(serde_json::Value::String(detail)) = map.get("detail") {
            return Self::Status {
                status,
                detail: detail.clone(),
            };
        }
        if (400..500).contains(&status) && !map.is_empty() {
            let mut fields = FieldErrors::new();
            for (key, value) in map {
                fields.insert(key, messages_from_value(&value));
            }
            return Self::Validation(fields);
        }
        Self::Status {
            status,
            detail: serde_json::Value::Object(map).to_string(),
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn messages_from_value(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items.iter().map(scalar_to_string).collect(),
        other => vec![scalar_to_string(other)],
    }
}

fn scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Join field errors as `field: msg, msg; field: msg` for display.
fn render_field_errors(fields: &FieldErrors) -> String {
    let parts: Vec<String> = fields
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect();
    if parts.is_empty() {
        "validation failed".to_owned()
    } else {
        parts.join("; ")
    }
}
