//! Event page handlers: events list, meetings and calendar

use std::fmt::Write;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;
use crate::models::event::{Event, EventType};
use crate::services::events::{filter_and_sort, group_by_month, EventFilter};
use crate::state::AppContext;
use crate::utils::errors::{ClubPortalError, Result};
use crate::utils::helpers::{format_relative_time, format_timestamp};

fn render_event_line(out: &mut String, event: &Event, now: DateTime<Utc>) {
    let _ = writeln!(
        out,
        "  #{} {} [{}] {} ({})",
        event.id,
        event.title,
        event.event_type,
        format_timestamp(event.event_date),
        format_relative_time(event.event_date, now)
    );
    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        let _ = writeln!(out, "      at {}", location);
    }
    if let Some(link) = event.meeting_link.as_deref().filter(|l| !l.is_empty()) {
        let _ = writeln!(out, "      join {}", link);
    }
}

/// Page body for an already filtered and ordered list
pub fn render_events(title: &str, events: &[Event], now: DateTime<Utc>) -> String {
    let mut out = format!("{}\n", title);
    if events.is_empty() {
        out.push_str("  No events to show\n");
    }
    for event in events {
        render_event_line(&mut out, event, now);
    }
    out.trim_end().to_string()
}

pub fn render_calendar(events: &[Event]) -> String {
    let months = group_by_month(events);
    if months.is_empty() {
        return "No events scheduled".to_string();
    }

    let mut out = String::new();
    for ((year, month), events) in &months {
        let heading = NaiveDate::from_ymd_opt(*year, *month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", year, month));
        let _ = writeln!(out, "{}", heading);
        for event in events {
            let _ = writeln!(
                out,
                "  {}  {} [{}]",
                event.event_date.format("%a %d %H:%M"),
                event.title,
                event.event_type
            );
        }
    }
    out.trim_end().to_string()
}

/// Handle `events`
pub async fn handle_events(ctx: &AppContext, filter: &str, event_type: Option<&str>) -> Result<()> {
    let filter: EventFilter = filter.parse().map_err(ClubPortalError::InvalidInput)?;
    let event_type = event_type
        .map(str::parse::<EventType>)
        .transpose()
        .map_err(ClubPortalError::InvalidInput)?;

    let events = ctx.services.event_service.fetch_all_events(event_type).await?;
    let now = Utc::now();
    let shown = filter_and_sort(&events, filter, now);
    debug!(fetched = events.len(), shown = shown.len(), filter = %filter, "Events page");

    println!("{}", render_events(&format!("Events ({})", filter), &shown, now));
    Ok(())
}

/// Handle `meetings`: upcoming meetups only
pub async fn handle_meetings(ctx: &AppContext) -> Result<()> {
    let events = ctx
        .services
        .event_service
        .fetch_all_events(Some(EventType::Meetup))
        .await?;
    let now = Utc::now();
    let shown = filter_and_sort(&events, EventFilter::Upcoming, now);

    println!("{}", render_events("Upcoming meetings", &shown, now));
    Ok(())
}

/// Handle `calendar`
pub async fn handle_calendar(ctx: &AppContext) -> Result<()> {
    let events = ctx.services.event_service.fetch_all_events(None).await?;
    println!("{}", render_calendar(&events));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(id: i64, title: &str, date: DateTime<Utc>) -> Event {
        Event {
            id,
            title: title.to_string(),
            description: None,
            event_type: EventType::Workshop,
            event_date: date,
            location: Some("Lab 3".to_string()),
            meeting_link: None,
            is_past: None,
            attendance_count: None,
        }
    }

    #[test]
    fn test_render_empty_events() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(render_events("Events (past)", &[], now), "Events (past)\n  No events to show");
    }

    #[test]
    fn test_render_events_lists_location() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let date = Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap();
        let text = render_events("Events (upcoming)", &[event(5, "Async Rust", date)], now);
        assert!(text.contains("#5 Async Rust [workshop] 2025-06-03 00:00 UTC (in 2 days)"));
        assert!(text.contains("at Lab 3"));
    }

    #[test]
    fn test_render_calendar_headings() {
        let events = vec![
            event(1, "Later", Utc.with_ymd_and_hms(2025, 8, 2, 18, 0, 0).unwrap()),
            event(2, "Sooner", Utc.with_ymd_and_hms(2025, 7, 9, 18, 0, 0).unwrap()),
        ];
        let text = render_calendar(&events);
        let july = text.find("July 2025").unwrap();
        let august = text.find("August 2025").unwrap();
        assert!(july < august);
        assert_eq!(render_calendar(&[]), "No events scheduled");
    }
}
