//! Leaderboard and dashboard models

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::event::Event;
use super::project::{Project, Task};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub batch_year: Option<i32>,
    #[serde(default)]
    pub skill_level: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardPeriod {
    Weekly,
    Monthly,
    #[default]
    AllTime,
}

impl LeaderboardPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardPeriod::Weekly => "weekly",
            LeaderboardPeriod::Monthly => "monthly",
            LeaderboardPeriod::AllTime => "all_time",
        }
    }
}

impl fmt::Display for LeaderboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardPeriod::Weekly => write!(f, "Weekly"),
            LeaderboardPeriod::Monthly => write!(f, "Monthly"),
            LeaderboardPeriod::AllTime => write!(f, "All Time"),
        }
    }
}

impl FromStr for LeaderboardPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "weekly" | "week" => Ok(LeaderboardPeriod::Weekly),
            "monthly" | "month" => Ok(LeaderboardPeriod::Monthly),
            "all_time" | "all" => Ok(LeaderboardPeriod::AllTime),
            other => Err(format!("unknown leaderboard period: {}", other)),
        }
    }
}

/// Response of `GET dashboard/`
#[derive(Debug, Clone, Deserialize)]
pub struct Dashboard {
    pub user: DashboardUser,
    #[serde(default)]
    pub active_tasks: Vec<Task>,
    #[serde(default)]
    pub upcoming_events: Vec<Event>,
    #[serde(default)]
    pub recent_projects: Vec<Project>,
    #[serde(default)]
    pub attendance_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardUser {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub username: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub batch: Option<i32>,
    #[serde(default)]
    pub is_admin: bool,
}
