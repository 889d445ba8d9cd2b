//! Session commands.
//!
//! - `whoami`: Show the user behind the configured session
//! - `projects`: List projects on the server

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, connect};
use crate::error::{Result, SprintboardError};
use crate::gateway::SessionGateway;
use crate::roles::Role;
use crate::session::SessionState;

/// Show the current user and their roles
pub async fn cmd_whoami(output_json: bool) -> Result<()> {
    let (_config, gateway) = connect()?;
    let session = SessionState::resolve(gateway.as_ref()).await?;
    let user = session.user().ok_or(SprintboardError::NotAuthenticated)?;

    let role_names: Vec<String> = user
        .roles
        .iter()
        .map(|code| match code.parse::<Role>() {
            Ok(role) => role.display_name().to_string(),
            Err(_) => code.clone(),
        })
        .collect();

    let mut text = format!("{} ({})\n", user.display_name().bold(), user.username.cyan());
    if !user.email.is_empty() {
        text.push_str(&format!("email: {}\n", user.email));
    }
    if role_names.is_empty() {
        text.push_str(&format!("roles: {}\n", "none".dimmed()));
    } else {
        text.push_str(&format!("roles: {}\n", role_names.join(", ")));
    }
    text.push_str(&format!(
        "can move stories: {}, mark sprint ready: {}, estimate: {}",
        yes_no(session.can_move_stories()),
        yes_no(session.can_mark_sprint_ready()),
        yes_no(session.can_estimate()),
    ));

    CommandOutput::new(json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "full_name": user.full_name,
        "roles": user.roles,
        "permissions": {
            "move_stories": session.can_move_stories(),
            "mark_sprint_ready": session.can_mark_sprint_ready(),
            "estimate": session.can_estimate(),
        },
    }))
    .with_text(text)
    .print(output_json)
}

/// List projects visible to the session
pub async fn cmd_projects(output_json: bool) -> Result<()> {
    let (_config, gateway) = connect()?;
    let projects = gateway.list_projects().await?;

    let text = if projects.is_empty() {
        "No projects found".to_string()
    } else {
        projects
            .iter()
            .map(|p| {
                let key = p.project_key.as_deref().unwrap_or("-");
                let stories = p
                    .user_story_count
                    .map(|n| format!(" ({n} stories)"))
                    .unwrap_or_default();
                format!(
                    "{:>4} {:<8} {}{}",
                    p.id.to_string().cyan(),
                    key,
                    p.name,
                    stories.dimmed()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    CommandOutput::new(serde_json::to_value(&projects)?)
        .with_text(text)
        .print(output_json)
}

fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".dimmed().to_string()
    }
}
