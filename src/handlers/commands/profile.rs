//! Profile page handler

use std::fmt::Write;
use crate::models::user::User;
use crate::state::AppContext;
use crate::utils::errors::Result;
use crate::utils::helpers::parse_key_value_pairs;

pub fn render_profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (@{})", user.display_name(), user.username);

    let fields = [
        ("Email", user.email.clone()),
        ("Student ID", user.student_id.clone()),
        ("Batch", user.batch_year.map(|b| b.to_string())),
        ("Skill level", user.skill_level.clone()),
        ("GitHub", user.github_username.clone()),
        ("LinkedIn", user.linkedin_url.clone()),
        ("Portfolio", user.portfolio_url.clone()),
        ("Bio", user.bio.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            let _ = writeln!(out, "  {}: {}", label, value);
        }
    }

    if !user.tech_skills.is_empty() {
        let _ = writeln!(out, "  Skills: {}", user.tech_skills.join(", "));
    }
    let _ = writeln!(out, "  Points: {}", user.points);

    let role = if user.is_admin_capable() {
        "admin"
    } else if user.is_member {
        "member"
    } else {
        "guest"
    };
    let _ = writeln!(out, "  Role: {}", role);

    out.trim_end().to_string()
}

/// Handle `profile`; `set` holds `field=value` updates.
///
/// `user` is the profile the route guard already resolved; it is only
/// fetched again when no session user was handed in.
pub async fn handle_profile(ctx: &AppContext, set: &[String], user: Option<&User>) -> Result<()> {
    let auth = &ctx.services.auth_service;

    let user = match (set.is_empty(), user) {
        (true, Some(user)) => user.clone(),
        (true, None) => auth.profile().await?,
        (false, _) => {
            let fields = parse_key_value_pairs(set)?;
            let user = auth.update_profile(fields).await?;
            println!("Profile updated\n");
            user
        }
    };

    println!("{}", render_profile(&user));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_profile() {
        let user = User {
            id: 2,
            username: "grace".to_string(),
            full_name: Some("Grace Hopper".to_string()),
            email: Some("grace@example.org".to_string()),
            is_member: true,
            points: 55,
            ..Default::default()
        };
        let text = render_profile(&user);
        assert!(text.starts_with("Grace Hopper (@grace)"));
        assert!(text.contains("Email: grace@example.org"));
        assert!(text.ends_with("Role: member"));
        assert!(!text.contains("GitHub"));
    }
}
