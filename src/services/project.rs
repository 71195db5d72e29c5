//! Projects and member tasks

use std::str::FromStr;
use tracing::info;
use crate::models::project::{Project, ProjectStatus, SubmitTaskRequest, Task};
use crate::services::client::{Detail, ResourceClient};
use crate::utils::errors::{ClubPortalError, Result};

const PROJECTS_PATH: &str = "projects/";
const TASKS_PATH: &str = "tasks/";

/// Filters accepted by `GET projects/`
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub status: Option<ProjectStatus>,
    pub tech: Option<String>,
    pub mine: bool,
}

impl ProjectQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(tech) = self.tech.as_ref().filter(|t| !t.is_empty()) {
            pairs.push(("tech", tech.clone()));
        }
        if self.mine {
            pairs.push(("my_projects", "true".to_string()));
        }
        pairs
    }
}

/// Membership change on a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Join,
    Leave,
}

impl FromStr for Membership {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "join" => Ok(Membership::Join),
            "leave" => Ok(Membership::Leave),
            other => Err(format!("unknown project action: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProjectService {
    client: ResourceClient,
}

impl ProjectService {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    pub async fn fetch_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        self.client
            .get_with_query(PROJECTS_PATH, &query.pairs())
            .await
            .map_err(|e| ClubPortalError::fetch("projects", e))
    }

    /// Join or leave a project as contributor
    pub async fn change_membership(&self, project_id: i64, membership: Membership) -> Result<String> {
        let (action, label) = match membership {
            Membership::Join => ("join", "Joining project"),
            Membership::Leave => ("leave", "Leaving project"),
        };
        let path = format!("{}{}/{}/", PROJECTS_PATH, project_id, action);

        let detail: Detail = self
            .client
            .post(&path, &serde_json::json!({}))
            .await
            .map_err(|e| ClubPortalError::operation(label, e))?;

        info!(project_id = project_id, action = action, "Project membership changed");
        Ok(detail.detail)
    }

    /// Tasks visible to the signed-in member (own tasks for non-admins)
    pub async fn fetch_tasks(&self) -> Result<Vec<Task>> {
        self.client
            .get(TASKS_PATH)
            .await
            .map_err(|e| ClubPortalError::fetch("tasks", e))
    }

    /// Submit work for an assigned task
    pub async fn submit_task(&self, task_id: i64, submission_link: &str) -> Result<Task> {
        if submission_link.trim().is_empty() {
            return Err(ClubPortalError::InvalidInput("submission_link is required".to_string()));
        }

        let request = SubmitTaskRequest {
            submission_link: submission_link.trim().to_string(),
        };
        let path = format!("{}{}/submit/", TASKS_PATH, task_id);

        self.client
            .post(&path, &request)
            .await
            .map_err(|e| ClubPortalError::operation("Task submission", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_query_pairs() {
        let query = ProjectQuery {
            status: Some(ProjectStatus::Completed),
            tech: Some(String::new()),
            mine: true,
        };
        assert_eq!(
            query.pairs(),
            vec![("status", "completed".to_string()), ("my_projects", "true".to_string())]
        );
        assert!(ProjectQuery::default().pairs().is_empty());
    }
}
