//! Session command handlers

use tracing::{info, warn};
use crate::models::user::{RegisterRequest, User};
use crate::state::AppContext;
use crate::utils::errors::Result;

pub fn render_welcome(user: &User) -> String {
    let mut text = format!("Signed in as {} ({})", user.display_name(), user.username);
    if user.is_admin_capable() {
        text.push_str("\nAdmin dashboard available: clubportal admin");
    }
    text
}

/// Handle `login`
pub async fn handle_login(ctx: &AppContext, username: &str, password: &str) -> Result<()> {
    let user = ctx.services.auth_service.login(username, password).await?;
    ctx.save_session().await?;

    println!("{}", render_welcome(&user));
    Ok(())
}

/// Handle `logout`; the local session is dropped even if the backend call fails
pub async fn handle_logout(ctx: &AppContext) -> Result<()> {
    let result = ctx.services.auth_service.logout().await;
    ctx.clear_session().await?;

    if let Err(e) = &result {
        warn!(error = %e, "Backend logout failed, local session cleared");
    }
    result?;

    println!("Signed out");
    Ok(())
}

/// Handle `register`
pub async fn handle_register(ctx: &AppContext, request: &RegisterRequest) -> Result<()> {
    let user = ctx.services.auth_service.register(request).await?;
    info!(user_id = user.id, "Account registered");

    println!("Account created for {}. Sign in with: clubportal login {}", user.username, user.username);
    Ok(())
}
