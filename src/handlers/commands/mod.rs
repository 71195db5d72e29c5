//! Command handlers module
//!
//! Each subcommand is one page of the portal. The dispatcher runs after the
//! route guard, so handlers can rely on `user` being present on every
//! non-public page.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod events;
pub mod home;
pub mod leaderboard;
pub mod members;
pub mod profile;
pub mod projects;

use clap::Subcommand;
use crate::middleware::Route;
use crate::models::user::User;
use crate::state::AppContext;
use crate::utils::errors::{ClubPortalError, Result};

/// All available pages
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in and save the session
    Login {
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Create an account
    Register {
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long = "password-confirm")]
        password_confirm: String,

        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long = "student-id")]
        student_id: Option<String>,

        #[arg(long = "batch-year")]
        batch_year: Option<i32>,
    },

    /// Dashboard overview
    Home,

    /// Browse projects, join or leave them, and submit tasks
    Projects {
        #[command(subcommand)]
        action: Option<ProjectAction>,

        #[arg(long, help = "planning, in_progress, completed or archived")]
        status: Option<String>,

        #[arg(long, help = "Filter by technology")]
        tech: Option<String>,

        #[arg(long, help = "Only projects I lead or contribute to")]
        mine: bool,
    },

    /// Member directory
    Members {
        #[arg(long)]
        search: Option<String>,
    },

    /// Events list
    Events {
        #[arg(long, default_value = "upcoming", help = "upcoming, past or all")]
        filter: String,

        #[arg(long = "type", help = "meetup, workshop, hackathon or webinar")]
        event_type: Option<String>,
    },

    /// Upcoming meetups
    Meetings,

    /// All events grouped by month
    Calendar,

    /// Points ranking
    Leaderboard {
        #[arg(long, default_value = "all_time", help = "weekly, monthly or all_time")]
        period: String,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Attended and missed meetups with the attendance percentage
    Attendance,

    /// Show or edit the profile
    Profile {
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },

    /// Admin dashboard (admins only)
    Admin {
        #[command(subcommand)]
        command: admin::AdminCommand,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectAction {
    /// Join a project as contributor
    Join { id: i64 },
    /// Leave a project
    Leave { id: i64 },
    /// List my tasks
    Tasks,
    /// Submit work for a task
    Submit {
        id: i64,
        #[arg(long)]
        link: String,
    },
}

impl Command {
    /// Page guarded for this command
    pub fn route(&self) -> Route {
        match self {
            Command::Login { .. } | Command::Logout => Route::Login,
            Command::Register { .. } => Route::Register,
            Command::Home => Route::Home,
            Command::Projects { .. } => Route::Projects,
            Command::Members { .. } => Route::Members,
            Command::Events { .. } => Route::Events,
            Command::Meetings => Route::Meetings,
            Command::Calendar => Route::Calendar,
            Command::Leaderboard { .. } => Route::Leaderboard,
            Command::Attendance => Route::Attendance,
            Command::Profile { .. } => Route::Profile,
            Command::Admin { .. } => Route::Admin,
        }
    }
}

/// Main command dispatcher
pub async fn handle_command(ctx: &AppContext, cmd: Command, user: Option<&User>) -> Result<()> {
    match cmd {
        Command::Login { username, password } => auth::handle_login(ctx, &username, &password).await,
        Command::Logout => auth::handle_logout(ctx).await,
        Command::Register {
            username,
            email,
            password,
            password_confirm,
            first_name,
            last_name,
            student_id,
            batch_year,
        } => {
            let request = crate::models::user::RegisterRequest {
                username,
                email,
                password,
                password_confirm,
                first_name,
                last_name,
                student_id,
                batch_year,
            };
            auth::handle_register(ctx, &request).await
        }
        Command::Home => home::handle_home(ctx).await,
        Command::Projects { action, status, tech, mine } => {
            projects::handle_projects(ctx, action, status.as_deref(), tech, mine).await
        }
        Command::Members { search } => members::handle_members(ctx, search.as_deref()).await,
        Command::Events { filter, event_type } => {
            events::handle_events(ctx, &filter, event_type.as_deref()).await
        }
        Command::Meetings => events::handle_meetings(ctx).await,
        Command::Calendar => events::handle_calendar(ctx).await,
        Command::Leaderboard { period, limit } => {
            leaderboard::handle_leaderboard(ctx, &period, limit).await
        }
        Command::Attendance => attendance::handle_attendance(ctx, user).await,
        Command::Profile { set } => profile::handle_profile(ctx, &set, user).await,
        Command::Admin { command } => {
            let admin = user.ok_or_else(|| {
                ClubPortalError::PermissionDenied("Admin privileges required".to_string())
            })?;
            admin::handle_admin(ctx, admin, command).await
        }
    }
}
