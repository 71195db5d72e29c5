//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{ClubPortalError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_session_config(&settings.session)?;
    validate_attendance_config(&settings.attendance)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(ClubPortalError::Config(
            "API base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url).map_err(|e| {
        ClubPortalError::Config(format!("Invalid API base URL {}: {}", config.base_url, e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(ClubPortalError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    if config.csrf_cookie_name.is_empty() || config.csrf_header_name.is_empty() {
        return Err(ClubPortalError::Config(
            "CSRF cookie and header names are required".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.cookie_file.is_empty() {
        return Err(ClubPortalError::Config(
            "Session cookie file path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate attendance policy
fn validate_attendance_config(config: &super::AttendanceConfig) -> Result<()> {
    if config.counted_event_type.is_empty() {
        return Err(ClubPortalError::Config(
            "Counted event type is required".to_string()
        ));
    }

    if config.counted_event_type.parse::<crate::models::event::EventType>().is_err() {
        return Err(ClubPortalError::Config(
            format!("Unknown counted event type: {}", config.counted_event_type)
        ));
    }

    if let Some(percentage) = config.empty_history_percentage {
        if percentage > 100 {
            return Err(ClubPortalError::Config(
                format!("Empty history percentage must be within 0..=100, got {}", percentage)
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ClubPortalError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ClubPortalError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
