//! Member directory handler

use std::fmt::Write;
use crate::models::user::User;
use crate::state::AppContext;
use crate::utils::errors::Result;

pub fn render_members(members: &[User]) -> String {
    if members.is_empty() {
        return "No members found".to_string();
    }

    let mut out = String::new();
    for member in members {
        let _ = write!(out, "{} (@{}) {} pts", member.display_name(), member.username, member.points);
        if let Some(batch) = member.batch_year {
            let _ = write!(out, ", batch {}", batch);
        }
        if !member.tech_skills.is_empty() {
            let _ = write!(out, ", skills: {}", member.tech_skills.join(", "));
        }
        if let Some(github) = member.github_username.as_deref().filter(|g| !g.is_empty()) {
            let _ = write!(out, ", github.com/{}", github);
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Handle `members`
pub async fn handle_members(ctx: &AppContext, search: Option<&str>) -> Result<()> {
    let members = ctx.services.user_service.fetch_members(search).await?;
    println!("{}", render_members(&members));
    Ok(())
}
