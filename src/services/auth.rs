//! Authentication service implementation
//!
//! This service handles sign-in and sign-out against the backend session
//! endpoints, profile retrieval, and the session gate deciding whether a
//! protected page may render.

use serde_json::{Map, Value};
use tracing::{info, warn, debug};
use crate::models::user::{normalize_profile, LoginRequest, RegisterRequest, User};
use crate::services::client::{Detail, ResourceClient};
use crate::state::context::SessionContext;
use crate::utils::errors::{ApiError, ClubPortalError, Result};

pub const PROFILE_PATH: &str = "auth/profile/";
const LOGIN_PATH: &str = "auth/login/";
const LOGOUT_PATH: &str = "auth/logout/";
const REGISTER_PATH: &str = "auth/register/";

/// Why a session resolved to [`AuthDecision::Denied`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The backend refused the session (401/403)
    Unauthenticated,
    /// No HTTP answer: network failure or timeout
    Unreachable,
    /// The backend answered with an error status other than 401/403, or
    /// with a body that is not a profile
    Malformed,
}

impl DenialReason {
    pub fn from_api_error(err: &ApiError) -> Self {
        if err.is_unauthorized() {
            DenialReason::Unauthenticated
        } else if err.is_transport() {
            DenialReason::Unreachable
        } else {
            DenialReason::Malformed
        }
    }
}

/// Outcome of resolving the current session for a protected page
#[derive(Debug, Clone, PartialEq)]
pub enum AuthDecision {
    /// Profile fetch still in flight
    Pending,
    /// Not signed in. Every kind of profile failure lands here.
    Denied(DenialReason),
    /// Signed in; `is_admin` reflects the capability flags
    Granted { user: User, is_admin: bool },
    /// Signed in, but an admin-only page was requested without capability
    RedirectHome { user: User },
}

impl AuthDecision {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AuthDecision::Pending)
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, AuthDecision::Granted { .. })
    }

    /// Signed-in user, if any
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthDecision::Granted { user, .. } | AuthDecision::RedirectHome { user } => Some(user),
            AuthDecision::Pending | AuthDecision::Denied(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthDecision::Pending => "pending",
            AuthDecision::Denied(_) => "denied",
            AuthDecision::Granted { .. } => "granted",
            AuthDecision::RedirectHome { .. } => "redirect_home",
        }
    }
}

/// Turn a settled profile fetch into a decision.
///
/// `profile` is the normalized user on success, or the classified failure.
pub fn decide(profile: &std::result::Result<User, DenialReason>, require_admin: bool) -> AuthDecision {
    match profile {
        Err(reason) => AuthDecision::Denied(*reason),
        Ok(user) => {
            let is_admin = user.is_admin_capable();
            if require_admin && !is_admin {
                AuthDecision::RedirectHome { user: user.clone() }
            } else {
                AuthDecision::Granted { user: user.clone(), is_admin }
            }
        }
    }
}

/// Fetch and normalize the current profile, classifying any failure
pub async fn fetch_profile(client: &ResourceClient) -> std::result::Result<User, DenialReason> {
    let raw: Value = client.get(PROFILE_PATH).await.map_err(|e| {
        let reason = DenialReason::from_api_error(&e);
        debug!(error = %e, reason = ?reason, "Profile fetch failed");
        reason
    })?;

    normalize_profile(raw).map_err(|e| {
        warn!(error = %e, "Profile payload could not be normalized");
        DenialReason::Malformed
    })
}

/// One-shot gate run before a protected page renders.
///
/// Starts `Pending`; [`SessionGate::resolve`] consumes the gate, resolves a
/// [`SessionContext`] (a single profile fetch) and returns the terminal
/// decision. There is no retry.
#[derive(Debug)]
pub struct SessionGate<'a> {
    client: &'a ResourceClient,
    state: AuthDecision,
}

impl<'a> SessionGate<'a> {
    pub fn new(client: &'a ResourceClient) -> Self {
        Self {
            client,
            state: AuthDecision::Pending,
        }
    }

    /// Decision so far; `Pending` until resolved
    pub fn state(&self) -> &AuthDecision {
        &self.state
    }

    pub async fn resolve(mut self, require_admin: bool) -> AuthDecision {
        let session = SessionContext::init(self.client).await;
        self.state = session.decision(require_admin);
        session.teardown();

        self.state
    }
}

/// Authentication service for session management and profile access
#[derive(Clone, Debug)]
pub struct AuthService {
    client: ResourceClient,
}

impl AuthService {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Sign in; the backend sets the session and CSRF cookies on success
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        if username.is_empty() || password.is_empty() {
            return Err(ClubPortalError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let raw: Value = self.client.post(LOGIN_PATH, &request).await.map_err(|e| {
            if e.is_unauthorized() {
                ClubPortalError::AuthFailure("Invalid credentials".to_string())
            } else {
                ClubPortalError::operation("Login", e)
            }
        })?;

        let user = normalize_profile(raw)?;
        info!(user_id = user.id, username = %user.username, "Signed in");
        Ok(user)
    }

    /// Sign out; the session cookie is invalidated server side
    pub async fn logout(&self) -> Result<()> {
        let detail: Detail = self
            .client
            .post(LOGOUT_PATH, &serde_json::json!({}))
            .await
            .map_err(|e| ClubPortalError::operation("Logout", e))?;

        info!(detail = %detail.detail, "Signed out");
        Ok(())
    }

    /// Create a new account
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        if request.password != request.password_confirm {
            return Err(ClubPortalError::InvalidInput("Passwords do not match".to_string()));
        }

        if request.password.chars().count() < 8 {
            return Err(ClubPortalError::InvalidInput(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let raw: Value = self
            .client
            .post(REGISTER_PATH, request)
            .await
            .map_err(|e| ClubPortalError::operation("Registration", e))?;

        Ok(normalize_profile(raw)?)
    }

    /// Current profile, for the profile page
    pub async fn profile(&self) -> Result<User> {
        let raw: Value = self
            .client
            .get(PROFILE_PATH)
            .await
            .map_err(|e| ClubPortalError::fetch("profile", e))?;

        Ok(normalize_profile(raw)?)
    }

    /// Partially update the current profile
    pub async fn update_profile(&self, fields: Map<String, Value>) -> Result<User> {
        if fields.is_empty() {
            return Err(ClubPortalError::InvalidInput("Nothing to update".to_string()));
        }

        let raw: Value = self
            .client
            .patch(PROFILE_PATH, &fields)
            .await
            .map_err(|e| ClubPortalError::operation("Profile update", e))?;

        Ok(normalize_profile(raw)?)
    }
}
