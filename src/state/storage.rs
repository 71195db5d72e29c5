//! Session storage implementation
//!
//! Persists the backend's session and CSRF cookies between invocations in a
//! small TOML file, so that signing in once keeps later commands
//! authenticated.

use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use reqwest::cookie::{CookieStore, Jar};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use crate::utils::errors::{ClubPortalError, Result};

/// On-disk representation of a saved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    /// API root the cookies belong to
    pub base_url: String,
    /// `name=value` pairs as sent by the jar
    pub cookies: Vec<String>,
    pub saved_at: DateTime<Utc>,
}

/// File-backed cookie persistence
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved session, if any
    pub async fn read(&self) -> Result<Option<StoredSession>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored = toml::from_str::<StoredSession>(&contents)
            .map_err(|e| ClubPortalError::SessionFile(format!("{}: {}", self.path.display(), e)))?;
        Ok(Some(stored))
    }

    /// Restore saved cookies into `jar`.
    ///
    /// Returns the number of cookies restored. A session saved for another
    /// API root is ignored.
    pub async fn load(&self, jar: &Jar, root: &Url) -> Result<usize> {
        let Some(stored) = self.read().await? else {
            debug!(path = %self.path.display(), "No saved session");
            return Ok(0);
        };

        if stored.base_url != root.as_str() {
            warn!(
                saved_for = %stored.base_url,
                current = %root,
                "Ignoring session saved for a different backend"
            );
            return Ok(0);
        }

        for cookie in &stored.cookies {
            jar.add_cookie_str(&format!("{}; Path=/", cookie), root);
        }

        debug!(count = stored.cookies.len(), "Restored session cookies");
        Ok(stored.cookies.len())
    }

    /// Write the jar's cookies for `root` to disk
    pub async fn save(&self, jar: &Jar, root: &Url) -> Result<()> {
        let cookies: Vec<String> = match jar.cookies(root) {
            Some(header) => header
                .to_str()
                .map_err(|e| ClubPortalError::SessionFile(e.to_string()))?
                .split(';')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        if cookies.is_empty() {
            return self.clear().await;
        }

        let stored = StoredSession {
            base_url: root.to_string(),
            cookies,
            saved_at: Utc::now(),
        };

        let contents = toml::to_string(&stored)
            .map_err(|e| ClubPortalError::SessionFile(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, contents).await?;

        debug!(path = %self.path.display(), count = stored.cookies.len(), "Saved session");
        Ok(())
    }

    /// Forget the saved session
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
