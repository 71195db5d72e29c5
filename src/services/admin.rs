//! Admin dashboard service
//!
//! CRUD over users, events, projects and tasks, plus task verification.
//! Mutations report `OperationFailure` so the caller can keep the form
//! input and let the admin correct it.

use std::fmt;
use std::str::FromStr;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use crate::models::event::Event;
use crate::models::project::{Project, Task, TaskVerification};
use crate::models::user::User;
use crate::services::client::ResourceClient;
use crate::utils::errors::{ClubPortalError, Result};
use crate::utils::logging;

/// Resources managed from the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminResource {
    Users,
    Events,
    Projects,
    Tasks,
}

impl AdminResource {
    pub fn path(&self) -> &'static str {
        match self {
            AdminResource::Users => "users/",
            AdminResource::Events => "events/",
            AdminResource::Projects => "projects/",
            AdminResource::Tasks => "tasks/",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            AdminResource::Users => "user",
            AdminResource::Events => "event",
            AdminResource::Projects => "project",
            AdminResource::Tasks => "task",
        }
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}{}/", self.path(), id)
    }
}

impl fmt::Display for AdminResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().trim_end_matches('/'))
    }
}

impl FromStr for AdminResource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(AdminResource::Users),
            "events" | "event" => Ok(AdminResource::Events),
            "projects" | "project" => Ok(AdminResource::Projects),
            "tasks" | "task" => Ok(AdminResource::Tasks),
            other => Err(format!("unknown resource: {}", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AdminService {
    client: ResourceClient,
    admin_id: i64,
}

impl AdminService {
    /// `admin_id` identifies the acting admin in the audit log
    pub fn new(client: ResourceClient, admin_id: i64) -> Self {
        Self { client, admin_id }
    }

    async fn list<T: DeserializeOwned>(&self, resource: AdminResource, search: Option<&str>) -> Result<Vec<T>> {
        let query: Vec<(&str, &str)> = search.map(|s| vec![("search", s)]).unwrap_or_default();

        self.client
            .get_with_query(resource.path(), &query)
            .await
            .map_err(|e| ClubPortalError::fetch(resource.to_string(), e))
    }

    pub async fn list_users(&self, search: Option<&str>) -> Result<Vec<User>> {
        self.list(AdminResource::Users, search).await
    }

    pub async fn list_events(&self, search: Option<&str>) -> Result<Vec<Event>> {
        self.list(AdminResource::Events, search).await
    }

    pub async fn list_projects(&self, search: Option<&str>) -> Result<Vec<Project>> {
        self.list(AdminResource::Projects, search).await
    }

    pub async fn list_tasks(&self, search: Option<&str>) -> Result<Vec<Task>> {
        self.list(AdminResource::Tasks, search).await
    }

    /// Create a resource from raw form fields; returns the created representation
    pub async fn create(&self, resource: AdminResource, fields: Map<String, Value>) -> Result<Value> {
        if fields.is_empty() {
            return Err(ClubPortalError::InvalidInput(format!(
                "No fields given for the new {}",
                resource.singular()
            )));
        }

        let created: Value = self
            .client
            .post(resource.path(), &fields)
            .await
            .map_err(|e| ClubPortalError::operation(format!("Creating {}", resource.singular()), e))?;

        logging::log_admin_action(self.admin_id, "create", Some(resource.path()), None);
        Ok(created)
    }

    /// Partially update a resource
    pub async fn update(&self, resource: AdminResource, id: i64, fields: Map<String, Value>) -> Result<Value> {
        if fields.is_empty() {
            return Err(ClubPortalError::InvalidInput("Nothing to update".to_string()));
        }

        let path = resource.item_path(id);
        let updated: Value = self
            .client
            .patch(&path, &fields)
            .await
            .map_err(|e| ClubPortalError::operation(format!("Updating {} {}", resource.singular(), id), e))?;

        logging::log_admin_action(self.admin_id, "update", Some(&path), None);
        Ok(updated)
    }

    pub async fn delete(&self, resource: AdminResource, id: i64) -> Result<()> {
        let path = resource.item_path(id);
        self.client
            .delete(&path)
            .await
            .map_err(|e| ClubPortalError::operation(format!("Deleting {} {}", resource.singular(), id), e))?;

        logging::log_admin_action(self.admin_id, "delete", Some(&path), None);
        Ok(())
    }

    /// Verify a submitted task, awarding its points to the assignee
    pub async fn verify_task(&self, task_id: i64) -> Result<TaskVerification> {
        let path = format!("{}{}/verify/", AdminResource::Tasks.path(), task_id);
        let verification: TaskVerification = self
            .client
            .post(&path, &serde_json::json!({}))
            .await
            .map_err(|e| ClubPortalError::operation(format!("Verifying task {}", task_id), e))?;

        let details = format!("points_awarded={}", verification.points_awarded);
        logging::log_admin_action(self.admin_id, "verify", Some(&path), Some(&details));
        Ok(verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(AdminResource::Events.item_path(4), "events/4/");
        assert_eq!("Tasks".parse::<AdminResource>(), Ok(AdminResource::Tasks));
        assert_eq!(AdminResource::Users.to_string(), "users");
        assert!("groups".parse::<AdminResource>().is_err());
    }
}
