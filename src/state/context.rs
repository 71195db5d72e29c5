//! Application context
//!
//! Ties together settings, the cookie-carrying client, the services built
//! on it and the on-disk session.

use std::sync::Arc;
use reqwest::cookie::Jar;
use tracing::debug;
use crate::config::Settings;
use crate::models::user::User;
use crate::services::auth::{decide, fetch_profile, AuthDecision, DenialReason};
use crate::services::{ResourceClient, ServiceFactory};
use crate::utils::errors::Result;
use crate::utils::logging;
use super::storage::SessionStore;

/// Resolved session for one navigation.
///
/// [`SessionContext::init`] fetches the profile once; every later
/// [`SessionContext::decision`] is derived from that single answer.
#[derive(Debug, Clone)]
pub struct SessionContext {
    profile: std::result::Result<User, DenialReason>,
}

impl SessionContext {
    pub async fn init(client: &ResourceClient) -> Self {
        Self {
            profile: fetch_profile(client).await,
        }
    }

    /// Build from an already settled profile fetch
    pub fn from_profile(profile: std::result::Result<User, DenialReason>) -> Self {
        Self { profile }
    }

    pub fn decision(&self, require_admin: bool) -> AuthDecision {
        let decision = decide(&self.profile, require_admin);
        logging::log_auth_decision(require_admin, decision.label(), decision.user().map(|u| u.id));
        decision
    }

    pub fn user(&self) -> Option<&User> {
        self.profile.as_ref().ok()
    }

    /// End of the navigation; the profile is discarded
    pub fn teardown(self) {
        debug!(signed_in = self.profile.is_ok(), "Session context torn down");
    }
}

/// Application-wide context containing services and settings
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub services: Arc<ServiceFactory>,
    pub session_store: SessionStore,
}

impl AppContext {
    /// Build the context and restore any saved session cookies
    pub async fn init(settings: Settings) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = ResourceClient::with_jar(&settings, jar.clone())?;
        let session_store = SessionStore::new(&settings.session.cookie_file);

        let restored = session_store.load(&jar, client.root()).await?;
        debug!(restored = restored, root = %client.root(), "Application context ready");

        let services = Arc::new(ServiceFactory::new(client, &settings)?);

        Ok(Self {
            settings,
            services,
            session_store,
        })
    }

    pub fn client(&self) -> &ResourceClient {
        &self.services.client
    }

    /// Persist the current cookies, e.g. after signing in
    pub async fn save_session(&self) -> Result<()> {
        let client = self.client();
        self.session_store.save(client.jar(), client.root()).await
    }

    /// Drop the saved session, e.g. after signing out
    pub async fn clear_session(&self) -> Result<()> {
        self.session_store.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_context_decisions() {
        let user = User {
            id: 4,
            username: "member".to_string(),
            ..Default::default()
        };
        let session = SessionContext::from_profile(Ok(user));
        assert!(session.decision(false).is_granted());
        assert!(matches!(session.decision(true), AuthDecision::RedirectHome { .. }));
        assert_eq!(session.user().map(|u| u.id), Some(4));
        session.teardown();

        let session = SessionContext::from_profile(Err(DenialReason::Unauthenticated));
        assert_eq!(session.decision(true), AuthDecision::Denied(DenialReason::Unauthenticated));
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_init_restores_saved_cookies() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.session.cookie_file = dir.path().join("session.toml").display().to_string();

        let first = AppContext::init(settings.clone()).await.unwrap();
        first
            .client()
            .jar()
            .add_cookie_str("csrftoken=abc%3D; Path=/", first.client().root());
        first.save_session().await.unwrap();

        let second = AppContext::init(settings).await.unwrap();
        assert_eq!(second.client().csrf_token().as_deref(), Some("abc="));

        second.clear_session().await.unwrap();
        let third = AppContext::init(second.settings.clone()).await.unwrap();
        assert_eq!(third.client().csrf_token(), None);
    }
}
