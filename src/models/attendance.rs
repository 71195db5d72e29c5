//! Attendance model

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::event::Event;

/// One user's attendance at one event, with the event embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttendanceRecord")]
pub struct AttendanceRecord {
    pub id: i64,
    pub event: Event,
    pub status: AttendanceStatus,
    pub user: Option<i64>,
    pub marked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "present"),
            AttendanceStatus::Absent => write!(f, "absent"),
            AttendanceStatus::Excused => write!(f, "excused"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "excused" => Ok(AttendanceStatus::Excused),
            other => Err(format!("unknown attendance status: {}", other)),
        }
    }
}

/// Wire shape: `event` is either the embedded event or its id, in which
/// case the summary travels in `event_details`.
#[derive(Debug, Deserialize)]
struct RawAttendanceRecord {
    id: i64,
    event: EventRef,
    #[serde(default)]
    event_details: Option<Event>,
    status: AttendanceStatus,
    #[serde(default)]
    user: Option<i64>,
    #[serde(default)]
    marked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventRef {
    Embedded(Box<Event>),
    Id(i64),
}

impl TryFrom<RawAttendanceRecord> for AttendanceRecord {
    type Error = String;

    fn try_from(raw: RawAttendanceRecord) -> Result<Self, Self::Error> {
        let event = match (raw.event, raw.event_details) {
            (EventRef::Embedded(event), _) => *event,
            (EventRef::Id(id), Some(details)) if details.id == id => details,
            (EventRef::Id(id), Some(details)) => {
                return Err(format!(
                    "attendance record {} references event {} but carries details for event {}",
                    raw.id, id, details.id
                ));
            }
            (EventRef::Id(id), None) => {
                return Err(format!(
                    "attendance record {} references event {} without event details",
                    raw.id, id
                ));
            }
        };

        Ok(AttendanceRecord {
            id: raw.id,
            event,
            status: raw.status,
            user: raw.user,
            marked_at: raw.marked_at,
        })
    }
}

/// Body of `POST attendance/`
#[derive(Debug, Clone, Serialize)]
pub struct MarkAttendanceRequest {
    pub user: i64,
    pub event: i64,
    pub status: AttendanceStatus,
}
