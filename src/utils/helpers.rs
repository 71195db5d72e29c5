//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc, Duration};
use serde_json::{Map, Value};
use crate::utils::errors::{ClubPortalError, Result};

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Format the date part of a timestamp
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a %d %b %Y").to_string()
}

/// Format a timestamp relative to `now` ("in 3 days", "2 hours ago")
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = timestamp.signed_duration_since(now);
    let (magnitude, future) = if diff >= Duration::zero() {
        (diff, true)
    } else {
        (-diff, false)
    };

    let text = if magnitude < Duration::minutes(1) {
        return "now".to_string();
    } else if magnitude < Duration::hours(1) {
        format!("{} minutes", magnitude.num_minutes())
    } else if magnitude < Duration::days(1) {
        format!("{} hours", magnitude.num_hours())
    } else if magnitude < Duration::weeks(5) {
        format!("{} days", magnitude.num_days())
    } else {
        return format_date(timestamp);
    };

    if future {
        format!("in {}", text)
    } else {
        format!("{} ago", text)
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parse `key=value` pairs into a JSON object.
///
/// Values that parse as JSON (numbers, booleans, arrays) keep their type,
/// everything else is sent as a string. A comma separated value for a key
/// ending in `[]` becomes an array of strings.
pub fn parse_key_value_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Map<String, Value>> {
    let mut object = Map::new();

    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            ClubPortalError::InvalidInput(format!("Expected key=value, got {:?}", pair))
        })?;

        if key.is_empty() {
            return Err(ClubPortalError::InvalidInput(format!("Missing field name in {:?}", pair)));
        }

        let value = match key.strip_suffix("[]") {
            Some(list_key) => {
                let items = value
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| Value::String(item.to_string()))
                    .collect();
                object.insert(list_key.to_string(), Value::Array(items));
                continue;
            }
            None => serde_json::from_str::<Value>(value)
                .ok()
                .filter(|v| !v.is_object())
                .unwrap_or_else(|| Value::String(value.to_string())),
        };

        object.insert(key.to_string(), value);
    }

    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 8), "hello...");
    }

    #[test]
    fn test_format_relative_time() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time(now + Duration::days(3), now), "in 3 days");
        assert_eq!(format_relative_time(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(format_relative_time(now, now), "now");
    }

    #[test]
    fn test_parse_key_value_pairs() {
        let parsed = parse_key_value_pairs(&[
            "title=Rust night",
            "points=20",
            "is_member=true",
            "tech_skills[]=rust, go ,",
        ])
        .unwrap();

        assert_eq!(parsed["title"], Value::String("Rust night".to_string()));
        assert_eq!(parsed["points"], Value::from(20));
        assert_eq!(parsed["is_member"], Value::Bool(true));
        assert_eq!(parsed["tech_skills"], serde_json::json!(["rust", "go"]));
    }

    #[test]
    fn test_parse_key_value_pairs_rejects_bare_words() {
        assert!(parse_key_value_pairs(&["oops"]).is_err());
        assert!(parse_key_value_pairs(&["=1"]).is_err());
    }
}
