//! Services module
//!
//! This module contains the backend-facing services. All of them share one
//! [`ResourceClient`], and with it one cookie jar and session.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod client;
pub mod events;
pub mod project;
pub mod user;

// Re-export commonly used services
pub use admin::{AdminResource, AdminService};
pub use attendance::{AttendanceBand, AttendancePolicy, AttendanceService, AttendanceSummary};
pub use auth::{AuthDecision, AuthService, DenialReason, SessionGate};
pub use client::ResourceClient;
pub use events::{EventFilter, EventService};
pub use project::{Membership, ProjectQuery, ProjectService};
pub use user::UserService;

use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub client: ResourceClient,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub event_service: EventService,
    pub attendance_service: AttendanceService,
    pub project_service: ProjectService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory around an existing client
    pub fn new(client: ResourceClient, settings: &Settings) -> Result<Self> {
        let policy = AttendancePolicy::from_config(&settings.attendance)?;

        Ok(Self {
            auth_service: AuthService::new(client.clone()),
            user_service: UserService::new(client.clone()),
            event_service: EventService::new(client.clone()),
            attendance_service: AttendanceService::new(client.clone(), policy),
            project_service: ProjectService::new(client.clone()),
            client,
        })
    }

    /// Admin operations on behalf of `admin_id`
    pub fn admin_service(&self, admin_id: i64) -> AdminService {
        AdminService::new(self.client.clone(), admin_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventType;

    #[test]
    fn test_factory_uses_configured_policy() {
        let mut settings = Settings::default();
        settings.attendance.counted_event_type = "workshop".to_string();
        settings.attendance.empty_history_percentage = None;

        let client = ResourceClient::new(&settings).unwrap();
        let factory = ServiceFactory::new(client, &settings).unwrap();

        assert_eq!(factory.attendance_service.policy().counted_type, EventType::Workshop);
        assert_eq!(factory.attendance_service.policy().empty_history_percentage, None);
    }

    #[test]
    fn test_factory_rejects_unknown_event_type() {
        let mut settings = Settings::default();
        settings.attendance.counted_event_type = "gala".to_string();

        let client = ResourceClient::new(&settings).unwrap();
        assert!(ServiceFactory::new(client, &settings).is_err());
    }
}
