//! Event model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_type: EventType,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub is_past: Option<bool>,
    #[serde(default)]
    pub attendance_count: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Meetup,
    Workshop,
    Hackathon,
    Webinar,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Meetup => "meetup",
            EventType::Workshop => "workshop",
            EventType::Hackathon => "hackathon",
            EventType::Webinar => "webinar",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meetup" => Ok(EventType::Meetup),
            "workshop" => Ok(EventType::Workshop),
            "hackathon" => Ok(EventType::Hackathon),
            "webinar" => Ok(EventType::Webinar),
            other => Err(format!("unknown event type: {}", other)),
        }
    }
}
