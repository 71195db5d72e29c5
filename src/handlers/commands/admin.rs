//! Admin dashboard command handlers

use std::fmt::Write;
use clap::Subcommand;
use serde_json::Value;
use tracing::info;
use crate::models::attendance::{AttendanceStatus, MarkAttendanceRequest};
use crate::models::user::User;
use crate::services::admin::{AdminResource, AdminService};
use crate::state::AppContext;
use crate::utils::errors::{ClubPortalError, Result};
use crate::utils::helpers::{format_timestamp, parse_key_value_pairs};

#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommand {
    /// Manage members
    Users {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage events
    Events {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: CrudAction,
    },
    /// Manage and verify tasks
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Record attendance
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CrudAction {
    /// List all records
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a record from field=value pairs
    Create {
        #[arg(value_name = "FIELD=VALUE", required = true)]
        fields: Vec<String>,
    },
    /// Update fields of a record
    Update {
        id: i64,
        #[arg(value_name = "FIELD=VALUE", required = true)]
        fields: Vec<String>,
    },
    /// Delete a record
    Delete { id: i64 },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TaskAction {
    #[command(flatten)]
    Crud(CrudAction),
    /// Verify a submitted task and award its points
    Verify { id: i64 },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AttendanceAction {
    /// Mark one member's attendance at an event
    Mark {
        #[arg(long)]
        user: i64,
        #[arg(long)]
        event: i64,
        #[arg(long, default_value = "present", help = "present, absent or excused")]
        status: String,
    },
}

/// One line per record, picking the most telling fields of each resource
pub fn render_rows(resource: AdminResource, rows: &[Value]) -> String {
    if rows.is_empty() {
        return format!("No {} found", resource);
    }

    let text = |row: &Value, key: &str| row.get(key).and_then(Value::as_str).unwrap_or("").to_string();
    let number = |row: &Value, key: &str| row.get(key).and_then(Value::as_i64).unwrap_or_default();

    let mut out = String::new();
    for row in rows {
        let id = number(row, "id");
        let line = match resource {
            AdminResource::Users => format!(
                "#{} {} <{}> {} pts{}",
                id,
                text(row, "username"),
                text(row, "email"),
                number(row, "points"),
                if row.get("is_club_admin").and_then(Value::as_bool).unwrap_or(false) { " admin" } else { "" }
            ),
            AdminResource::Events => format!(
                "#{} {} [{}] {}",
                id,
                text(row, "title"),
                text(row, "event_type"),
                text(row, "event_date")
            ),
            AdminResource::Projects => format!("#{} {} [{}]", id, text(row, "name"), text(row, "status")),
            AdminResource::Tasks => format!(
                "#{} {} [{}] {} pts",
                id,
                text(row, "title"),
                text(row, "status"),
                number(row, "points")
            ),
        };
        let _ = writeln!(out, "{}", line);
    }
    out.trim_end().to_string()
}

async fn list_rows(service: &AdminService, resource: AdminResource, search: Option<&str>) -> Result<Vec<Value>> {
    let rows: Vec<Value> = match resource {
        AdminResource::Users => to_values(service.list_users(search).await?)?,
        AdminResource::Events => to_values(service.list_events(search).await?)?,
        AdminResource::Projects => to_values(service.list_projects(search).await?)?,
        AdminResource::Tasks => to_values(service.list_tasks(search).await?)?,
    };
    Ok(rows)
}

fn to_values<T: serde::Serialize>(items: Vec<T>) -> Result<Vec<Value>> {
    items
        .into_iter()
        .map(|item| serde_json::to_value(item).map_err(ClubPortalError::from))
        .collect()
}

async fn run_crud(service: &AdminService, resource: AdminResource, action: CrudAction) -> Result<()> {
    match action {
        CrudAction::List { search } => {
            let rows = list_rows(service, resource, search.as_deref()).await?;
            println!("{}", render_rows(resource, &rows));
        }
        CrudAction::Create { fields } => {
            let created = service.create(resource, parse_key_value_pairs(&fields)?).await?;
            let id = created.get("id").and_then(Value::as_i64).unwrap_or_default();
            println!("Created {} #{}", resource.singular(), id);
        }
        CrudAction::Update { id, fields } => {
            service.update(resource, id, parse_key_value_pairs(&fields)?).await?;
            println!("Updated {} #{}", resource.singular(), id);
        }
        CrudAction::Delete { id } => {
            service.delete(resource, id).await?;
            println!("Deleted {} #{}", resource.singular(), id);
        }
    }
    Ok(())
}

/// Handle `admin`; the route guard has already checked capability
pub async fn handle_admin(ctx: &AppContext, admin: &User, command: AdminCommand) -> Result<()> {
    if !admin.is_admin_capable() {
        return Err(ClubPortalError::PermissionDenied("Admin privileges required".to_string()));
    }

    let service = ctx.services.admin_service(admin.id);
    info!(admin_id = admin.id, command = ?command, "Admin command");

    match command {
        AdminCommand::Users { action } => run_crud(&service, AdminResource::Users, action).await,
        AdminCommand::Events { action } => run_crud(&service, AdminResource::Events, action).await,
        AdminCommand::Projects { action } => run_crud(&service, AdminResource::Projects, action).await,
        AdminCommand::Tasks { action: TaskAction::Crud(action) } => {
            run_crud(&service, AdminResource::Tasks, action).await
        }
        AdminCommand::Tasks { action: TaskAction::Verify { id } } => {
            let verification = service.verify_task(id).await?;
            println!(
                "Task #{} verified, {} points awarded",
                verification.task.id, verification.points_awarded
            );
            Ok(())
        }
        AdminCommand::Attendance { action: AttendanceAction::Mark { user, event, status } } => {
            let status: AttendanceStatus = status.parse().map_err(ClubPortalError::InvalidInput)?;
            let request = MarkAttendanceRequest { user, event, status };
            ctx.services.attendance_service.mark(&request).await?;
            println!(
                "Marked user #{} {} for event #{} at {}",
                user,
                status,
                event,
                format_timestamp(chrono::Utc::now())
            );
            Ok(())
        }
    }
}
