//! Event listing, filtering and ordering

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Datelike, Utc};
use crate::models::event::{Event, EventType};
use crate::services::client::ResourceClient;
use crate::utils::errors::{ClubPortalError, Result};

const EVENTS_PATH: &str = "events/";

/// Time window shown on the events page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFilter {
    #[default]
    Upcoming,
    Past,
    All,
}

impl FromStr for EventFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Ok(EventFilter::Upcoming),
            "past" => Ok(EventFilter::Past),
            "all" => Ok(EventFilter::All),
            other => Err(format!("unknown event filter: {} (expected upcoming, past or all)", other)),
        }
    }
}

impl fmt::Display for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventFilter::Upcoming => write!(f, "upcoming"),
            EventFilter::Past => write!(f, "past"),
            EventFilter::All => write!(f, "all"),
        }
    }
}

/// Select and order events relative to `now`.
///
/// Upcoming events (`event_date >= now`) come soonest first; past events
/// (`event_date < now`) and the full list come most recent first. The sort
/// is stable, so events sharing a date keep their input order.
pub fn filter_and_sort(events: &[Event], filter: EventFilter, now: DateTime<Utc>) -> Vec<Event> {
    let mut selected: Vec<Event> = events
        .iter()
        .filter(|event| match filter {
            EventFilter::Upcoming => event.event_date >= now,
            EventFilter::Past => event.event_date < now,
            EventFilter::All => true,
        })
        .cloned()
        .collect();

    match filter {
        EventFilter::Upcoming => selected.sort_by(|a, b| a.event_date.cmp(&b.event_date)),
        EventFilter::Past | EventFilter::All => selected.sort_by(|a, b| b.event_date.cmp(&a.event_date)),
    }

    selected
}

/// [`filter_and_sort`] against the current instant, captured on every call
pub fn filter_and_sort_now(events: &[Event], filter: EventFilter) -> Vec<Event> {
    filter_and_sort(events, filter, Utc::now())
}

/// Group events by `(year, month)` in chronological order, for the calendar
pub fn group_by_month(events: &[Event]) -> BTreeMap<(i32, u32), Vec<Event>> {
    let mut months: BTreeMap<(i32, u32), Vec<Event>> = BTreeMap::new();

    for event in events {
        months
            .entry((event.event_date.year(), event.event_date.month()))
            .or_default()
            .push(event.clone());
    }

    for month in months.values_mut() {
        month.sort_by(|a, b| a.event_date.cmp(&b.event_date));
    }

    months
}

/// Read access to the events resource
#[derive(Clone, Debug)]
pub struct EventService {
    client: ResourceClient,
}

impl EventService {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// `GET events/[?type=T]`
    pub async fn fetch_all_events(&self, event_type: Option<EventType>) -> Result<Vec<Event>> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(event_type) = event_type {
            query.push(("type", event_type.as_str()));
        }

        self.client
            .get_with_query(EVENTS_PATH, &query)
            .await
            .map_err(|e| ClubPortalError::fetch("events", e))
    }

    /// `GET events/?time=past[&type=T]`; the backend decides what is past
    pub async fn fetch_past_events(&self, event_type: Option<EventType>) -> Result<Vec<Event>> {
        let mut query = vec![("time", "past")];
        if let Some(event_type) = event_type {
            query.push(("type", event_type.as_str()));
        }

        self.client
            .get_with_query(EVENTS_PATH, &query)
            .await
            .map_err(|e| ClubPortalError::fetch("past events", e))
    }
}
