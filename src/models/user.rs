//! User model

use serde::{Deserialize, Serialize};
use serde_json::Value;
use chrono::{DateTime, Utc};

/// Club member as returned by `users/` and `auth/profile/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub student_id: Option<String>,
    pub batch_year: Option<i32>,
    pub points: i64,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub github_username: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub tech_skills: Vec<String>,
    pub skill_level: Option<String>,
    pub is_member: bool,
    pub is_club_admin: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Any capability flag grants access to the admin area
    pub fn is_admin_capable(&self) -> bool {
        self.is_club_admin || self.is_staff || self.is_superuser
    }

    /// Name to show in listings
    pub fn display_name(&self) -> String {
        if let Some(full_name) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return full_name.to_string();
        }

        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if joined.is_empty() {
            self.username.clone()
        } else {
            joined
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_year: Option<i32>,
}

fn flag(value: &Value, name: &str) -> bool {
    value.get(name).and_then(Value::as_bool).unwrap_or(false)
}

/// Normalize a profile payload into the canonical [`User`].
///
/// The profile may be the user object itself, or an envelope carrying the
/// user under `user` (login and aggregate endpoints). Top-level
/// `is_club_admin`/`is_staff`/`is_superuser` and nested
/// `is_club_admin`/`is_staff` are folded into the returned flags, so
/// capability checks only ever look at one shape.
pub fn normalize_profile(raw: Value) -> Result<User, serde_json::Error> {
    let nested = raw.get("user").filter(|v| v.is_object()).cloned();
    let top_is_user = raw.get("id").is_some() || raw.get("username").is_some();

    let mut user: User = match &nested {
        Some(inner) if !top_is_user => serde_json::from_value(inner.clone())?,
        _ => serde_json::from_value(raw.clone())?,
    };

    let nested_flag = |name: &str| nested.as_ref().map(|inner| flag(inner, name)).unwrap_or(false);

    user.is_club_admin = flag(&raw, "is_club_admin") || nested_flag("is_club_admin");
    user.is_staff = flag(&raw, "is_staff") || nested_flag("is_staff");
    user.is_superuser = flag(&raw, "is_superuser");

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_profile() {
        let user = normalize_profile(json!({
            "id": 7,
            "username": "ada",
            "full_name": "Ada Lovelace",
            "is_member": true,
            "is_club_admin": false,
            "is_staff": true,
            "points": 120
        }))
        .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.username, "ada");
        assert!(user.is_admin_capable());
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_nested_profile() {
        let user = normalize_profile(json!({
            "detail": "Login successful",
            "user": {"id": 3, "username": "grace", "is_club_admin": true}
        }))
        .unwrap();

        assert_eq!(user.id, 3);
        assert!(user.is_club_admin);
        assert!(user.is_admin_capable());
    }

    #[test]
    fn test_nested_superuser_is_not_counted() {
        let user = normalize_profile(json!({
            "user": {"id": 3, "username": "grace", "is_superuser": true}
        }))
        .unwrap();

        // only is_club_admin/is_staff are honoured one level down
        assert_eq!(user.id, 3);
        assert!(!user.is_admin_capable());
    }

    #[test]
    fn test_flags_only_payload() {
        let user = normalize_profile(json!({"is_staff": true})).unwrap();
        assert!(user.is_admin_capable());

        let user = normalize_profile(json!({"is_club_admin": false, "is_staff": false})).unwrap();
        assert!(!user.is_admin_capable());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = User {
            username: "linus".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "linus");

        user.first_name = Some("Linus".to_string());
        user.full_name = Some(" ".to_string());
        assert_eq!(user.display_name(), "Linus");
    }
}
