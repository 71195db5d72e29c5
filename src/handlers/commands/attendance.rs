//! Attendance page handler

use std::fmt::Write;
use crate::models::event::EventType;
use crate::models::user::User;
use crate::services::attendance::{AttendanceBand, AttendanceSummary};
use crate::state::AppContext;
use crate::utils::errors::Result;
use crate::utils::helpers::format_date;

fn band_label(band: AttendanceBand) -> &'static str {
    match band {
        AttendanceBand::Good => "good",
        AttendanceBand::Fair => "fair",
        AttendanceBand::Poor => "poor",
    }
}

pub fn render_attendance(summary: &AttendanceSummary, counted_type: EventType) -> String {
    let mut out = String::new();

    match (summary.percentage, summary.band()) {
        (Some(percentage), Some(band)) => {
            let _ = writeln!(
                out,
                "Attendance: {}% ({}), {} of {} {}s",
                percentage,
                band_label(band),
                summary.attended_past_count,
                summary.total_past,
                counted_type
            );
        }
        _ => {
            let _ = writeln!(out, "Attendance: N/A, no {}s held yet", counted_type);
        }
    }

    let _ = writeln!(out, "\nAttended ({})", summary.attended.len());
    if summary.attended.is_empty() {
        out.push_str("  none\n");
    }
    for record in &summary.attended {
        let _ = writeln!(
            out,
            "  {} {} [{}]",
            format_date(record.event.event_date),
            record.event.title,
            record.status
        );
    }

    let _ = writeln!(out, "\nMissed ({})", summary.missed.len());
    if summary.missed.is_empty() {
        out.push_str("  none\n");
    }
    for event in &summary.missed {
        let _ = writeln!(out, "  {} {}", format_date(event.event_date), event.title);
    }

    out.trim_end().to_string()
}

/// Handle `attendance` for the session user
pub async fn handle_attendance(ctx: &AppContext, user: Option<&User>) -> Result<()> {
    let service = &ctx.services.attendance_service;
    let summary = service.load_summary(user.map(|u| u.id)).await?;
    println!("{}", render_attendance(&summary, service.policy().counted_type));
    Ok(())
}
