//! Member directory, leaderboard and dashboard service

use tracing::debug;
use crate::models::leaderboard::{Dashboard, LeaderboardEntry, LeaderboardPeriod};
use crate::models::user::User;
use crate::services::client::ResourceClient;
use crate::utils::errors::{ClubPortalError, Result};

const USERS_PATH: &str = "users/";
const LEADERBOARD_PATH: &str = "leaderboard/";
const DASHBOARD_PATH: &str = "dashboard/";

/// Order leaderboard entries for display.
///
/// Entries are sorted by points, highest first (stable for ties). A rank
/// sent by the backend is kept; missing ranks become the 1-based position.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.points.cmp(&a.points));

    for (position, entry) in entries.iter_mut().enumerate() {
        if entry.rank.is_none() {
            entry.rank = Some(position as u32 + 1);
        }
    }

    entries
}

#[derive(Clone, Debug)]
pub struct UserService {
    client: ResourceClient,
}

impl UserService {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// `GET users/[?search=S]`: members visible to the signed-in user
    pub async fn fetch_members(&self, search: Option<&str>) -> Result<Vec<User>> {
        let query: Vec<(&str, &str)> = search
            .filter(|s| !s.trim().is_empty())
            .map(|s| vec![("search", s.trim())])
            .unwrap_or_default();

        let members: Vec<User> = self
            .client
            .get_with_query(USERS_PATH, &query)
            .await
            .map_err(|e| ClubPortalError::fetch("members", e))?;

        debug!(count = members.len(), "Fetched members");
        Ok(members)
    }

    /// `GET leaderboard/?period=P[&limit=N]`, ranked for display
    pub async fn fetch_leaderboard(
        &self,
        period: LeaderboardPeriod,
        limit: Option<u32>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let limit = limit.map(|l| l.to_string());
        let mut query = vec![("period", period.as_str())];
        if let Some(limit) = limit.as_deref() {
            query.push(("limit", limit));
        }

        let entries: Vec<LeaderboardEntry> = self
            .client
            .get_with_query(LEADERBOARD_PATH, &query)
            .await
            .map_err(|e| ClubPortalError::fetch("leaderboard", e))?;

        Ok(rank_entries(entries))
    }

    /// `GET dashboard/`: home page overview
    pub async fn fetch_dashboard(&self) -> Result<Dashboard> {
        self.client
            .get(DASHBOARD_PATH)
            .await
            .map_err(|e| ClubPortalError::fetch("dashboard", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, points: i64, rank: Option<u32>) -> LeaderboardEntry {
        LeaderboardEntry {
            id,
            username: format!("user{}", id),
            full_name: None,
            points,
            batch_year: None,
            skill_level: None,
            rank,
        }
    }

    #[test]
    fn test_rank_entries_assigns_positions() {
        let ranked = rank_entries(vec![entry(1, 10, None), entry(2, 30, None), entry(3, 20, None)]);
        let view: Vec<_> = ranked.iter().map(|e| (e.id, e.rank)).collect();
        assert_eq!(view, vec![(2, Some(1)), (3, Some(2)), (1, Some(3))]);
    }

    #[test]
    fn test_rank_entries_keeps_backend_rank() {
        let ranked = rank_entries(vec![entry(1, 50, Some(1)), entry(2, 50, Some(2))]);
        assert_eq!(ranked[0].rank, Some(1));
        assert_eq!(ranked[1].rank, Some(2));
    }
}
