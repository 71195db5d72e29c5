//! Project page handlers

use std::fmt::Write;
use crate::models::project::{Project, ProjectStatus, Task};
use crate::services::project::{Membership, ProjectQuery};
use crate::state::AppContext;
use crate::utils::errors::{ClubPortalError, Result};
use crate::utils::helpers::{format_date, truncate_text};
use super::ProjectAction;

pub fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found".to_string();
    }

    let mut out = String::new();
    for project in projects {
        let contributors = project
            .contributor_count
            .unwrap_or(project.contributors.len() as i64);
        let _ = writeln!(
            out,
            "#{} {} [{}] {} contributor(s)",
            project.id,
            project.name,
            project.status.as_str(),
            contributors
        );
        if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "    {}", truncate_text(description, 72));
        }
        if !project.tech_stack.is_empty() {
            let _ = writeln!(out, "    stack: {}", project.tech_stack.join(", "));
        }
        if let Some(repo) = project.github_repo.as_deref() {
            let _ = writeln!(out, "    repo: {}", repo);
        }
    }
    out.trim_end().to_string()
}

pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks assigned".to_string();
    }

    let mut out = String::new();
    for task in tasks {
        let _ = write!(out, "#{} {} [{}] {} pts", task.id, task.title, task.status.as_str(), task.points);
        if let Some(due) = task.due_date {
            let _ = write!(out, " due {}", format_date(due));
        }
        if task.is_overdue {
            out.push_str(" OVERDUE");
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Handle `projects`
pub async fn handle_projects(
    ctx: &AppContext,
    action: Option<ProjectAction>,
    status: Option<&str>,
    tech: Option<String>,
    mine: bool,
) -> Result<()> {
    let service = &ctx.services.project_service;

    match action {
        None => {
            let status = status
                .map(str::parse::<ProjectStatus>)
                .transpose()
                .map_err(ClubPortalError::InvalidInput)?;
            let query = ProjectQuery { status, tech, mine };

            let projects = service.fetch_projects(&query).await?;
            println!("{}", render_projects(&projects));
        }
        Some(ProjectAction::Join { id }) => {
            println!("{}", service.change_membership(id, Membership::Join).await?);
        }
        Some(ProjectAction::Leave { id }) => {
            println!("{}", service.change_membership(id, Membership::Leave).await?);
        }
        Some(ProjectAction::Tasks) => {
            let tasks = service.fetch_tasks().await?;
            println!("{}", render_tasks(&tasks));
        }
        Some(ProjectAction::Submit { id, link }) => {
            let task = service.submit_task(id, &link).await?;
            println!("Task #{} is now {}", task.id, task.status.as_str());
        }
    }

    Ok(())
}
