//! Test data helpers for building backend payloads

use serde_json::{json, Value};

/// Flat profile as returned by `GET auth/profile/`
pub fn profile_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{}@example.org", username),
        "full_name": "",
        "points": 40,
        "is_member": true,
        "is_club_admin": false,
        "is_staff": false,
        "is_superuser": false
    })
}

/// Profile carrying the given capability flag set to true
pub fn admin_profile_json(id: i64, username: &str, flag: &str) -> Value {
    let mut profile = profile_json(id, username);
    profile[flag] = Value::Bool(true);
    profile
}

pub fn event_json(id: i64, event_type: &str, event_date: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Event {}", id),
        "description": "",
        "event_type": event_type,
        "event_date": event_date,
        "location": "Lab 1",
        "meeting_link": null
    })
}

/// Attendance record with the event embedded
pub fn attendance_embedded_json(id: i64, event: Value) -> Value {
    json!({
        "id": id,
        "user": 1,
        "event": event,
        "status": "present",
        "marked_at": "2025-01-01T20:00:00Z"
    })
}

/// Attendance record as the backend serializer sends it: event id plus details
pub fn attendance_with_details_json(id: i64, event: Value) -> Value {
    json!({
        "id": id,
        "user": 1,
        "event": event["id"],
        "event_details": {
            "id": event["id"],
            "title": event["title"],
            "event_date": event["event_date"],
            "event_type": event["event_type"]
        },
        "status": "present"
    })
}

pub fn leaderboard_entry_json(id: i64, username: &str, points: i64) -> Value {
    json!({
        "id": id,
        "username": username,
        "full_name": "",
        "points": points,
        "batch_year": 2024
    })
}

pub fn task_json(id: i64, status: &str, points: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Task {}", id),
        "description": "",
        "assigned_to": 1,
        "status": status,
        "points": points,
        "due_date": null,
        "submission_link": null,
        "is_overdue": false
    })
}
