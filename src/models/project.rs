//! Project and task models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub github_repo: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub lead: Option<i64>,
    #[serde(default)]
    pub contributors: Vec<i64>,
    #[serde(default)]
    pub contributor_count: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Archived => "archived",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            "archived" => Ok(ProjectStatus::Archived),
            other => Err(format!("unknown project status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    pub status: TaskStatus,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submission_link: Option<String>,
    #[serde(default)]
    pub is_overdue: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Submitted,
    Verified,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Submitted => "submitted",
            TaskStatus::Verified => "verified",
        }
    }
}

/// Body of `POST tasks/{id}/submit/`
#[derive(Debug, Clone, Serialize)]
pub struct SubmitTaskRequest {
    pub submission_link: String,
}

/// Response of `POST tasks/{id}/verify/`
#[derive(Debug, Clone, Deserialize)]
pub struct TaskVerification {
    pub task: Task,
    pub points_awarded: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_deserialization() {
        let json = r#"{
            "id": 2, "name": "Club site", "description": null, "status": "in_progress",
            "status_display": "In Progress", "tech_stack": ["rust", "svelte"],
            "lead": 4, "lead_details": {"id": 4, "username": "ada"},
            "contributors": [4, 9], "contributor_count": 2
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.contributors, vec![4, 9]);
    }

    #[test]
    fn test_project_status_parsing() {
        assert_eq!("In Progress".parse::<ProjectStatus>(), Ok(ProjectStatus::InProgress));
        assert!("stalled".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn test_task_verification_deserialization() {
        let json = r#"{"task": {"id": 1, "title": "Write docs", "status": "verified", "points": 15}, "points_awarded": 15}"#;
        let verification: TaskVerification = serde_json::from_str(json).unwrap();
        assert_eq!(verification.task.status, TaskStatus::Verified);
        assert_eq!(verification.points_awarded, 15);
    }
}
