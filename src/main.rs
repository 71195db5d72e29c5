//! ClubPortal command line client
//!
//! Main application entry point

use std::process::ExitCode;
use clap::Parser;
use tracing::{debug, error, warn};

use ClubPortal::{
    config::Settings,
    handlers::commands::{self, home, Command},
    middleware::{AuthMiddleware, RouteOutcome},
    services::DenialReason,
    state::AppContext,
    utils::{errors::ClubPortalError, logging},
};

/// Command-line client for the tech club portal
#[derive(Parser)]
#[command(
    name = "clubportal",
    version = env!("CARGO_PKG_VERSION"),
    about = "Members, projects, events and attendance of the tech club",
    long_about = None
)]
struct Cli {
    /// Override the backend base URL
    #[arg(global = true, long = "base-url")]
    base_url: Option<String>,

    /// Log at debug level
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn login_hint(reason: DenialReason) -> &'static str {
    match reason {
        DenialReason::Unauthenticated => "Not signed in. Run: clubportal login <username> --password <password>",
        DenialReason::Unreachable => "Could not reach the club server. Check api.base_url and try signing in again",
        DenialReason::Malformed => "The server did not return a usable profile. Please sign in again",
    }
}

/// User-facing text for a failed page
fn describe_error(err: &ClubPortalError) -> String {
    match err {
        ClubPortalError::FetchFailure { resource, .. } => {
            format!("Could not load {}. Please try again later.", resource)
        }
        ClubPortalError::OperationFailure { operation, source } => {
            format!("{} failed: {}", operation, source)
        }
        ClubPortalError::AuthFailure(message) => message.clone(),
        other => other.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    // Load configuration
    let mut settings = Settings::new()?;
    if let Some(base_url) = cli.base_url {
        settings.api.base_url = base_url;
    }
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    }
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    let ctx = AppContext::init(settings).await?;
    let route = cli.command.route();
    debug!(route = %route, "Resolving route");

    let outcome = AuthMiddleware::new(ctx.client().clone()).check(route).await;

    let result = match outcome {
        RouteOutcome::Render { user, .. } => {
            commands::handle_command(&ctx, cli.command, user.as_ref()).await
        }
        RouteOutcome::RedirectLogin(reason) => {
            eprintln!("{}", login_hint(reason));
            return Ok(ExitCode::FAILURE);
        }
        RouteOutcome::RedirectHome { user } => {
            warn!(user_id = user.id, route = %route, "Redirected home");
            eprintln!("Admin privileges required. Showing the home page instead.\n");
            home::handle_home(&ctx).await
        }
        RouteOutcome::Loading => {
            error!(route = %route, "Session gate did not settle");
            return Ok(ExitCode::FAILURE);
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            debug!(
                error = %err,
                severity = %err.severity(),
                recoverable = err.is_recoverable(),
                "Command failed"
            );
            eprintln!("{}", describe_error(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}
