// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Freddie Admin contributors

//! Display helpers for loosely typed API values.

use chrono::{DateTime, Local};
use serde_json::Value;

/// Convert a JSON value into display text; `null` yields `None`.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "yes" } else { "no" }.to_string()),
        other => Some(other.to_string()),
    }
}

/// Render an RFC 3339 timestamp in local time; unparseable input is shown as-is.
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "—".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_render_plainly() {
        assert_eq!(value_to_string(&Value::Null), None);
        assert_eq!(value_to_string(&Value::from(3)), Some("3".into()));
        assert_eq!(value_to_string(&Value::from(false)), Some("no".into()));
    }

    #[test]
    fn bad_timestamps_pass_through() {
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
        assert_eq!(format_timestamp(None), "—");
        assert_eq!(format_timestamp(Some("2025-01-02T03:04:05Z")).len(), 16);
    }
}
