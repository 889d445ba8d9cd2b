//! Story commands.
//!
//! - `story ls`: Table of a project's stories, optionally filtered
//! - `story sprint-ready`: Set or clear the sprint-ready flag
//! - `story estimate`: Record story points

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{CommandOutput, authorize, connect, print_json};
use crate::board::{Board, StoryFilter};
use crate::error::Result;
use crate::notify::NotificationChannel;
use crate::roles;
use crate::types::{Story, StoryId};

/// A row in the story table
#[derive(Tabled)]
struct StoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Ready")]
    ready: String,
}

impl From<&Story> for StoryRow {
    fn from(story: &Story) -> Self {
        Self {
            id: format!("#{}", story.id),
            title: story.title.clone(),
            status: story.status.to_string(),
            priority: story.priority.to_string(),
            points: if story.points > 0 {
                story.points.to_string()
            } else {
                "-".to_string()
            },
            ready: if story.is_sprint_ready { "yes" } else { "no" }.to_string(),
        }
    }
}

fn render_table(stories: &[&Story]) -> String {
    let rows: Vec<StoryRow> = stories.iter().map(|s| StoryRow::from(*s)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// List stories of a project
pub async fn cmd_story_ls(
    project: Option<u64>,
    filter: &StoryFilter,
    output_json: bool,
) -> Result<()> {
    let (config, gateway) = connect()?;
    let project_id = config.project_or_default(project)?;

    let board = Board::new(gateway, NotificationChannel::new(config.toast_duration()));
    board.load_project(project_id).await?;

    let store = board.store();
    let stories = store.query(filter);

    if output_json {
        return print_json(&serde_json::to_value(&stories)?);
    }

    if stories.is_empty() {
        let message = if filter.is_empty() {
            "No stories in this project"
        } else {
            "No stories match the given filters"
        };
        println!("{}", message.dimmed());
    } else {
        println!("{}", render_table(&stories));
    }
    Ok(())
}

/// Set or clear the sprint-ready flag
pub async fn cmd_story_sprint_ready(id: StoryId, ready: bool, output_json: bool) -> Result<()> {
    let (config, gateway) = connect()?;
    authorize(
        gateway.as_ref(),
        "mark stories as sprint ready",
        roles::can_mark_sprint_ready::<String>,
    )
    .await?;

    let board = Board::new(gateway, NotificationChannel::new(config.toast_duration()));
    let story = board.set_sprint_ready(id, ready).await?;

    let text = if story.is_sprint_ready {
        format!("#{} {} is {}", story.id, story.title, "sprint ready".green())
    } else {
        format!("#{} {} is {}", story.id, story.title, "not sprint ready".yellow())
    };

    CommandOutput::new(json!({
        "id": story.id,
        "action": "sprint_ready_changed",
        "sprint_ready": story.is_sprint_ready,
    }))
    .with_text(text)
    .print(output_json)
}

/// Record a story point estimate
pub async fn cmd_story_estimate(id: StoryId, points: u32, output_json: bool) -> Result<()> {
    let (config, gateway) = connect()?;
    authorize(
        gateway.as_ref(),
        "estimate stories",
        roles::can_estimate_stories::<String>,
    )
    .await?;

    let board = Board::new(gateway, NotificationChannel::new(config.toast_duration()));
    let story = board.estimate(id, points).await?;

    CommandOutput::new(json!({
        "id": story.id,
        "action": "estimated",
        "points": story.points,
    }))
    .with_text(format!(
        "Estimated #{} {} at {} pts",
        story.id, story.title, story.points
    ))
    .print(output_json)
}
