//! Authentication middleware
//!
//! Guards page routes. Public pages render immediately; protected and
//! admin-only pages resolve a [`SessionContext`] first and render only
//! once it grants access.

use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use crate::models::user::User;
use crate::services::auth::{AuthDecision, DenialReason};
use crate::services::client::ResourceClient;
use crate::state::context::SessionContext;

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Protected,
    AdminOnly,
}

/// Pages of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Projects,
    Members,
    Events,
    Meetings,
    Calendar,
    Leaderboard,
    Attendance,
    Profile,
    Admin,
}

impl Route {
    pub fn access(&self) -> RouteAccess {
        match self {
            Route::Login | Route::Register => RouteAccess::Public,
            Route::Admin => RouteAccess::AdminOnly,
            _ => RouteAccess::Protected,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Home => "/",
            Route::Projects => "/projects",
            Route::Members => "/members",
            Route::Events => "/events",
            Route::Meetings => "/meetings",
            Route::Calendar => "/calendar",
            Route::Leaderboard => "/leaderboard",
            Route::Attendance => "/attendance",
            Route::Profile => "/profile",
            Route::Admin => "/admin",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/') {
            "login" => Ok(Route::Login),
            "register" => Ok(Route::Register),
            "" | "home" => Ok(Route::Home),
            "projects" => Ok(Route::Projects),
            "members" => Ok(Route::Members),
            "events" => Ok(Route::Events),
            "meetings" => Ok(Route::Meetings),
            "calendar" => Ok(Route::Calendar),
            "leaderboard" => Ok(Route::Leaderboard),
            "attendance" => Ok(Route::Attendance),
            "profile" => Ok(Route::Profile),
            "admin" => Ok(Route::Admin),
            other => Err(format!("unknown page: {}", other)),
        }
    }
}

/// What the router does with a requested route
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Render the page. `user` is `None` only on public pages.
    Render { user: Option<User>, is_admin: bool },
    /// Session not resolved yet; show a loading indicator
    Loading,
    /// Not signed in; go to the login page
    RedirectLogin(DenialReason),
    /// Signed in without admin capability; go to the home page
    RedirectHome { user: User },
}

/// Map a gate decision onto the outcome for `route`
pub fn outcome_for(route: Route, decision: &AuthDecision) -> RouteOutcome {
    if route.access() == RouteAccess::Public {
        return RouteOutcome::Render { user: None, is_admin: false };
    }

    match decision {
        AuthDecision::Pending => RouteOutcome::Loading,
        AuthDecision::Denied(reason) => RouteOutcome::RedirectLogin(*reason),
        AuthDecision::Granted { user, is_admin } => RouteOutcome::Render {
            user: Some(user.clone()),
            is_admin: *is_admin,
        },
        AuthDecision::RedirectHome { user } => RouteOutcome::RedirectHome { user: user.clone() },
    }
}

/// Guard `route` with the current session.
///
/// `None` means the session has not been resolved yet.
pub fn guard(route: Route, session: Option<&SessionContext>) -> RouteOutcome {
    let access = route.access();
    match (access, session) {
        (RouteAccess::Public, _) => outcome_for(route, &AuthDecision::Pending),
        (_, None) => RouteOutcome::Loading,
        (_, Some(session)) => outcome_for(route, &session.decision(access == RouteAccess::AdminOnly)),
    }
}

/// Route guard backed by the resource client
#[derive(Clone, Debug)]
pub struct AuthMiddleware {
    client: ResourceClient,
}

impl AuthMiddleware {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }

    /// Resolve access to `route`; public routes skip the profile fetch
    pub async fn check(&self, route: Route) -> RouteOutcome {
        let access = route.access();
        if access == RouteAccess::Public {
            debug!(route = %route, "Public route");
            return outcome_for(route, &AuthDecision::Pending);
        }

        let session = SessionContext::init(&self.client).await;
        let outcome = guard(route, Some(&session));
        session.teardown();

        match &outcome {
            RouteOutcome::RedirectLogin(reason) => {
                debug!(route = %route, reason = ?reason, "Redirecting to login")
            }
            RouteOutcome::RedirectHome { user } => {
                warn!(route = %route, user_id = user.id, "Admin page requested without capability")
            }
            _ => {}
        }

        outcome
    }
}
