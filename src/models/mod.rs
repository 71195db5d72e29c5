//! Data models module
//!
//! This module contains all data structures exchanged with the club backend

pub mod user;
pub mod event;
pub mod attendance;
pub mod project;
pub mod leaderboard;

// Re-export commonly used models
pub use user::{User, LoginRequest, RegisterRequest, normalize_profile};
pub use event::{Event, EventType};
pub use attendance::{AttendanceRecord, AttendanceStatus, MarkAttendanceRequest};
pub use project::{Project, ProjectStatus, Task, TaskStatus, SubmitTaskRequest, TaskVerification};
pub use leaderboard::{LeaderboardEntry, LeaderboardPeriod, Dashboard, DashboardUser};
