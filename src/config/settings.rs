//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub attendance: AttendanceConfig,
    pub logging: LoggingConfig,
}

/// Club backend API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin; requests go to `{base_url}/api/`
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
}

/// Session persistence configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the session cookies between invocations
    pub cookie_file: String,
}

/// Attendance calculation policy
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AttendanceConfig {
    /// Event type counted towards the attendance percentage
    pub counted_event_type: String,
    /// Percentage reported when no counted event has happened yet.
    /// `None` reports "not applicable".
    pub empty_history_percentage: Option<u8>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the rolling log file; stderr only when unset
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name("clubportal").required(false))
            .add_source(config::Environment::with_prefix("CLUBPORTAL").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ClubPortalError> {
        super::validation::validate_settings(self)
    }

    /// Root URL every resource path is resolved against
    pub fn api_root(&self) -> String {
        format!("{}/api/", self.api.base_url.trim_end_matches('/'))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            attendance: AttendanceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 10,
            user_agent: format!("ClubPortal/{}", env!("CARGO_PKG_VERSION")),
            csrf_cookie_name: "csrftoken".to_string(),
            csrf_header_name: "X-CSRFToken".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_file: ".clubportal-session.toml".to_string(),
        }
    }
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            counted_event_type: "meetup".to_string(),
            empty_history_percentage: Some(100),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file_path: None,
            json: false,
        }
    }
}
