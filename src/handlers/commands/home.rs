//! Home page handler

use std::fmt::Write;
use chrono::{DateTime, Utc};
use crate::models::leaderboard::Dashboard;
use crate::state::AppContext;
use crate::utils::errors::Result;
use crate::utils::helpers::{format_relative_time, truncate_text};

pub fn render_dashboard(dashboard: &Dashboard, now: DateTime<Utc>) -> String {
    let user = &dashboard.user;
    let mut out = String::new();

    let name = user.name.as_deref().filter(|n| !n.trim().is_empty()).unwrap_or(&user.username);
    let _ = writeln!(out, "Welcome back, {}!", name);
    let _ = write!(out, "Points: {}  Events attended: {}", user.points, dashboard.attendance_count);
    if let Some(batch) = user.batch {
        let _ = write!(out, "  Batch: {}", batch);
    }
    out.push('\n');

    out.push_str("\nActive tasks\n");
    if dashboard.active_tasks.is_empty() {
        out.push_str("  none\n");
    }
    for task in &dashboard.active_tasks {
        let due = task
            .due_date
            .map(|d| format!(" (due {})", format_relative_time(d, now)))
            .unwrap_or_default();
        let _ = writeln!(out, "  #{} {} [{}] {} pts{}", task.id, task.title, task.status.as_str(), task.points, due);
    }

    out.push_str("\nUpcoming events\n");
    if dashboard.upcoming_events.is_empty() {
        out.push_str("  none\n");
    }
    for event in &dashboard.upcoming_events {
        let _ = writeln!(
            out,
            "  {} ({}) {}",
            event.title,
            event.event_type,
            format_relative_time(event.event_date, now)
        );
    }

    out.push_str("\nRecent projects\n");
    if dashboard.recent_projects.is_empty() {
        out.push_str("  none\n");
    }
    for project in &dashboard.recent_projects {
        let description = project.description.as_deref().unwrap_or("");
        let _ = writeln!(out, "  #{} {}  {}", project.id, project.name, truncate_text(description, 50));
    }

    out.trim_end().to_string()
}

/// Handle `home`
pub async fn handle_home(ctx: &AppContext) -> Result<()> {
    let dashboard = ctx.services.user_service.fetch_dashboard().await?;
    println!("{}", render_dashboard(&dashboard, Utc::now()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_render_dashboard() {
        let dashboard: Dashboard = serde_json::from_value(json!({
            "user": {"id": 1, "name": "", "username": "ada", "points": 40, "batch": 2025, "is_admin": false},
            "active_tasks": [],
            "upcoming_events": [{
                "id": 2, "title": "Rust night", "event_type": "meetup",
                "event_date": "2025-06-18T18:00:00Z"
            }],
            "recent_projects": [],
            "attendance_count": 3
        }))
        .unwrap();

        let now = Utc.with_ymd_and_hms(2025, 6, 15, 18, 0, 0).unwrap();
        let text = render_dashboard(&dashboard, now);

        assert!(text.starts_with("Welcome back, ada!"));
        assert!(text.contains("Events attended: 3"));
        assert!(text.contains("Rust night (meetup) in 3 days"));
    }
}
