//! Middleware module
//!
//! This module contains the route guard run before every page

pub mod auth;

// Re-export commonly used middleware
pub use auth::{AuthMiddleware, Route, RouteAccess, RouteOutcome};
