mod board;
mod config;
mod session;
mod story;

pub use board::{cmd_board_move, cmd_board_show};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use session::{cmd_projects, cmd_whoami};
pub use story::{cmd_story_estimate, cmd_story_ls, cmd_story_sprint_ready};

use std::sync::Arc;

use owo_colors::OwoColorize;
use serde_json::Value;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::HttpGateway;
use crate::session::{CurrentUser, SessionState};
use crate::types::{BoardColumn, Story, StoryPriority};

/// Result of a command, printable as JSON or as human-readable text
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print to stdout; falls back to pretty JSON when no text was given
    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => println!("{text}"),
            _ => print_json(&self.json)?,
        }
        Ok(())
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Load config and build a gateway for it
pub(crate) fn connect() -> Result<(Config, Arc<HttpGateway>)> {
    let config = Config::load()?;
    let gateway = HttpGateway::from_config(&config)?;
    tracing::debug!(server = %gateway.base_url(), "connecting");
    Ok((config, Arc::new(gateway)))
}

/// Resolve the session and check that its roles allow `action`
pub(crate) async fn authorize(
    gateway: &HttpGateway,
    action: &str,
    allowed: fn(&[String]) -> bool,
) -> Result<CurrentUser> {
    let session = SessionState::resolve(gateway).await?;
    session.require(action, allowed).cloned()
}

/// Format a story for single-line display
pub fn format_story_line(story: &Story) -> String {
    let id = format!("#{:<5}", story.id);
    let priority = format!("[{}]", story.priority);
    let colored_priority = match story.priority {
        StoryPriority::Critical => priority.red().to_string(),
        StoryPriority::High => priority.yellow().to_string(),
        _ => priority.dimmed().to_string(),
    };

    let points = if story.points > 0 {
        format!(" ({} pts)", story.points)
    } else {
        String::new()
    };
    let ready = if story.is_sprint_ready {
        format!(" {}", "sprint ready".green())
    } else {
        String::new()
    };

    format!(
        "{} {} {}{}{}",
        id.cyan(),
        colored_priority,
        story.title,
        points.dimmed(),
        ready
    )
}

/// Column name colored by how far along the board it is
pub fn format_column(column: BoardColumn) -> String {
    match column {
        BoardColumn::Backlog => column.name().dimmed().to_string(),
        BoardColumn::ToDo => column.name().yellow().to_string(),
        BoardColumn::InProgress => column.name().blue().to_string(),
        BoardColumn::Done => column.name().green().to_string(),
    }
}
