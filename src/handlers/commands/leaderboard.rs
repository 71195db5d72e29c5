//! Leaderboard handler

use std::fmt::Write;
use crate::models::leaderboard::{LeaderboardEntry, LeaderboardPeriod};
use crate::state::AppContext;
use crate::utils::errors::{ClubPortalError, Result};

/// Render already ranked entries
pub fn render_leaderboard(entries: &[LeaderboardEntry], period: LeaderboardPeriod) -> String {
    let mut out = format!("Leaderboard ({})\n", period);
    if entries.is_empty() {
        out.push_str("  No points awarded yet");
        return out;
    }

    for entry in entries {
        let name = entry
            .full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&entry.username);
        let rank = entry.rank.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "{:>4}. {:<24} {:>6} pts", rank, name, entry.points);
    }
    out.trim_end().to_string()
}

/// Handle `leaderboard`
pub async fn handle_leaderboard(ctx: &AppContext, period: &str, limit: Option<u32>) -> Result<()> {
    let period: LeaderboardPeriod = period.parse().map_err(ClubPortalError::InvalidInput)?;
    let entries = ctx.services.user_service.fetch_leaderboard(period, limit).await?;
    println!("{}", render_leaderboard(&entries, period));
    Ok(())
}
