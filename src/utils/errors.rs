//! Error handling for ClubPortal
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.
//!
//! Page-level failures fall into three groups: `AuthFailure` (the profile
//! fetch failed, so the visitor is treated as unauthenticated), `FetchFailure`
//! (a page could not load its data and shows a single terminal error) and
//! `OperationFailure` (a mutation was rejected and the form stays open).

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for ClubPortal application
#[derive(Error, Debug)]
pub enum ClubPortalError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    #[error("Failed to load {resource}: {source}")]
    FetchFailure {
        resource: String,
        #[source]
        source: ApiError,
    },

    #[error("{operation} failed: {source}")]
    OperationFailure {
        operation: String,
        #[source]
        source: ApiError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session file error: {0}")]
    SessionFile(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Errors raised by the REST resource client
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request to {path} was rejected with HTTP {status}: {detail}")]
    Status {
        path: String,
        status: StatusCode,
        detail: String,
    },

    #[error("request to {path} timed out")]
    Timeout { path: String },

    #[error("backend unreachable at {path}: {message}")]
    Unreachable { path: String, message: String },

    #[error("invalid response from {path}: {message}")]
    InvalidResponse { path: String, message: String },
}

impl ApiError {
    /// Whether the backend explicitly refused the session (401/403)
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Status { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }

    /// Whether the request never got an HTTP answer
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Timeout { .. } | ApiError::Unreachable { .. })
    }

    /// Request path the error refers to
    pub fn path(&self) -> &str {
        match self {
            ApiError::Status { path, .. }
            | ApiError::Timeout { path }
            | ApiError::Unreachable { path, .. }
            | ApiError::InvalidResponse { path, .. } => path,
        }
    }
}

/// Result type alias for ClubPortal operations
pub type Result<T> = std::result::Result<T, ClubPortalError>;

/// Result type alias for raw API calls
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ClubPortalError {
    /// Wrap an API error raised while loading page data
    pub fn fetch(resource: impl Into<String>, source: ApiError) -> Self {
        ClubPortalError::FetchFailure {
            resource: resource.into(),
            source,
        }
    }

    /// Wrap an API error raised by a mutation
    pub fn operation(operation: impl Into<String>, source: ApiError) -> Self {
        ClubPortalError::OperationFailure {
            operation: operation.into(),
            source,
        }
    }

    /// Check if the error is recoverable by repeating the user action
    pub fn is_recoverable(&self) -> bool {
        match self {
            ClubPortalError::Api(e) => e.is_transport(),
            ClubPortalError::AuthFailure(_) => true,
            ClubPortalError::FetchFailure { .. } => true,
            ClubPortalError::OperationFailure { .. } => true,
            ClubPortalError::Config(_) => false,
            ClubPortalError::PermissionDenied(_) => false,
            ClubPortalError::InvalidInput(_) => true,
            ClubPortalError::Http(_) => true,
            ClubPortalError::Serialization(_) => false,
            ClubPortalError::SessionFile(_) => false,
            ClubPortalError::Io(_) => true,
            ClubPortalError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClubPortalError::Config(_) => ErrorSeverity::Critical,
            ClubPortalError::SessionFile(_) => ErrorSeverity::Critical,
            ClubPortalError::AuthFailure(_) => ErrorSeverity::Warning,
            ClubPortalError::PermissionDenied(_) => ErrorSeverity::Warning,
            ClubPortalError::OperationFailure { .. } => ErrorSeverity::Warning,
            ClubPortalError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
