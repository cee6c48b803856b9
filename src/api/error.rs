// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Failures talking to the Freddie API.

use serde_json::Value;
use thiserror::Error;

/// Error type for API client operations. `Display` is user-facing.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; the message comes from the body when the server supplied one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connection, TLS or timeout failure.
    #[error("Network error: {0}")]
    Transport(String),

    /// 2xx response whose body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot carry request paths.
    #[error("Invalid API URL: {0}")]
    Url(String),
}

impl ApiError {
    /// Build a status error, preferring the server's own message over `fallback`.
    pub fn from_status(status: u16, body: &str, fallback: &str) -> Self {
        let message = message_from_body(body).unwrap_or_else(|| fallback.to_string());
        Self::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract `message` (string or list of strings) or `error` from a JSON error body.
pub fn message_from_body(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let pick = |key: &str| match json.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    };
    pick("message").or_else(|| pick("error"))
}
