//! Attendance reconciliation
//!
//! The attendance page is built from two independently fetched collections:
//! the member's attendance records (every event type) and the list of past
//! events of the counted type. [`reconcile`] turns them into the attended
//! list, the missed list and an attendance percentage.

use std::collections::HashSet;
use futures::future::try_join;
use tracing::{debug, info};
use crate::config::AttendanceConfig;
use crate::models::attendance::{AttendanceRecord, MarkAttendanceRequest};
use crate::models::event::{Event, EventType};
use crate::services::client::ResourceClient;
use crate::services::events::EventService;
use crate::utils::errors::{ClubPortalError, Result};

const ATTENDANCE_PATH: &str = "attendance/";

/// Which events count and what an empty history is worth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendancePolicy {
    pub counted_type: EventType,
    /// Reported when no counted event has happened yet; `None` means N/A
    pub empty_history_percentage: Option<u8>,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            counted_type: EventType::Meetup,
            empty_history_percentage: Some(100),
        }
    }
}

impl AttendancePolicy {
    pub fn from_config(config: &AttendanceConfig) -> Result<Self> {
        let counted_type = config
            .counted_event_type
            .parse::<EventType>()
            .map_err(ClubPortalError::Config)?;

        Ok(Self {
            counted_type,
            empty_history_percentage: config.empty_history_percentage.map(|p| p.min(100)),
        })
    }
}

/// Colour band the percentage is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceBand {
    Good,
    Fair,
    Poor,
}

impl AttendanceBand {
    pub fn for_percentage(percentage: u8) -> Self {
        if percentage >= 75 {
            AttendanceBand::Good
        } else if percentage >= 50 {
            AttendanceBand::Fair
        } else {
            AttendanceBand::Poor
        }
    }
}

/// Reconciled attendance picture for one member
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    /// Records for counted-type events, in input order
    pub attended: Vec<AttendanceRecord>,
    /// Past counted-type events with no attendance record, in input order
    pub missed: Vec<Event>,
    /// Past events covered by an attended record
    pub attended_past_count: usize,
    pub total_past: usize,
    /// `None` when no event was held and the policy reports N/A
    pub percentage: Option<u8>,
}

impl AttendanceSummary {
    pub fn band(&self) -> Option<AttendanceBand> {
        self.percentage.map(AttendanceBand::for_percentage)
    }
}

/// Reconcile attendance records against the past events of the counted type.
///
/// `past_events` is trusted to be past-only and of the counted type already;
/// only `records` are filtered by type. Each past event is either counted
/// as attended or listed as missed, never both.
pub fn reconcile(
    records: Vec<AttendanceRecord>,
    past_events: Vec<Event>,
    policy: &AttendancePolicy,
) -> AttendanceSummary {
    let attended: Vec<AttendanceRecord> = records
        .into_iter()
        .filter(|record| record.event.event_type == policy.counted_type)
        .collect();

    let attended_ids: HashSet<i64> = attended.iter().map(|record| record.event.id).collect();
    let total_past = past_events.len();

    let (covered, missed): (Vec<Event>, Vec<Event>) = past_events
        .into_iter()
        .partition(|event| attended_ids.contains(&event.id));

    let attended_past_count = covered.len();
    let percentage = if total_past > 0 {
        Some(rounded_percentage(attended_past_count, total_past))
    } else {
        policy.empty_history_percentage
    };

    AttendanceSummary {
        attended,
        missed,
        attended_past_count,
        total_past,
        percentage,
    }
}

/// `round(part / whole * 100)` with halves rounded up, in integers
fn rounded_percentage(part: usize, whole: usize) -> u8 {
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((part * 200 + whole) / (whole * 2)) as u8
}

/// Loads and reconciles attendance for the signed-in member
#[derive(Clone, Debug)]
pub struct AttendanceService {
    client: ResourceClient,
    events: EventService,
    policy: AttendancePolicy,
}

impl AttendanceService {
    pub fn new(client: ResourceClient, policy: AttendancePolicy) -> Self {
        let events = EventService::new(client.clone());
        Self { client, events, policy }
    }

    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// `GET attendance/`: the signed-in member's records.
    ///
    /// Admin accounts see every member's records unless `user_id` narrows
    /// the listing, so the session user's id should be passed.
    pub async fn fetch_my_attendance(&self, user_id: Option<i64>) -> Result<Vec<AttendanceRecord>> {
        let user = user_id.map(|id| id.to_string());
        let query: Vec<(&str, &str)> = user.as_deref().map(|id| vec![("user", id)]).unwrap_or_default();

        self.client
            .get_with_query(ATTENDANCE_PATH, &query)
            .await
            .map_err(|e| ClubPortalError::fetch("attendance records", e))
    }

    /// Fetch both collections concurrently and reconcile them.
    ///
    /// Both fetches must succeed; a failure of either yields one
    /// `FetchFailure` and nothing is reconciled.
    pub async fn load_summary(&self, user_id: Option<i64>) -> Result<AttendanceSummary> {
        let (records, past_events) = try_join(
            self.fetch_my_attendance(user_id),
            self.events.fetch_past_events(Some(self.policy.counted_type)),
        )
        .await?;

        debug!(
            records = records.len(),
            past_events = past_events.len(),
            "Reconciling attendance"
        );

        Ok(reconcile(records, past_events, &self.policy))
    }

    /// Admin: mark one member's attendance at an event
    pub async fn mark(&self, request: &MarkAttendanceRequest) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .post(ATTENDANCE_PATH, request)
            .await
            .map_err(|e| ClubPortalError::operation("Marking attendance", e))?;

        info!(user = request.user, event = request.event, status = %request.status, "Attendance marked");
        Ok(())
    }
}
