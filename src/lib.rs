//! ClubPortal
//!
//! Client for a university tech club's management portal. This library
//! provides the session gate guarding protected pages, attendance
//! reconciliation, event filtering and a typed client for the club's REST
//! backend (members, projects, tasks, events, attendance and leaderboard).

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ClubPortalError, ApiError, Result};

// Re-export main components for easy access
pub use services::{ResourceClient, ServiceFactory, SessionGate, AuthDecision};
pub use state::{AppContext, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
