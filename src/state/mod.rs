//! State management module
//!
//! This module handles the application context, the per-navigation
//! session and the persisted session cookies

pub mod context;
pub mod storage;

// Re-export commonly used state components
pub use context::{AppContext, SessionContext};
pub use storage::{SessionStore, StoredSession};
