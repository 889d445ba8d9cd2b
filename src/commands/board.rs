//! Board commands.
//!
//! - `board show`: Stories grouped by column with point totals
//! - `board move`: Drag a story to another column

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, authorize, connect, format_column, format_story_line};
use crate::board::{Board, DragPhase, Rejection, not_sprint_ready_message};
use crate::error::{Result, SprintboardError};
use crate::notify::NotificationChannel;
use crate::roles;
use crate::types::{BoardColumn, StoryId};

pub async fn cmd_board_show(project: Option<u64>, output_json: bool) -> Result<()> {
    let (config, gateway) = connect()?;
    let project_id = config.project_or_default(project)?;

    let board = Board::new(gateway, NotificationChannel::new(config.toast_duration()));
    board.load_project(project_id).await?;
    let columns = board.store().columns();

    let mut text = String::new();
    for summary in &columns {
        text.push_str(&format!(
            "{} {}\n",
            format_column(summary.column).bold(),
            format!(
                "({} stories, {} pts)",
                summary.stories.len(),
                summary.total_points
            )
            .dimmed()
        ));
        if summary.stories.is_empty() {
            text.push_str(&format!("  {}\n", "empty".dimmed()));
        }
        for story in &summary.stories {
            text.push_str(&format!("  {}\n", format_story_line(story)));
        }
        text.push('\n');
    }

    CommandOutput::new(json!({
        "project_id": project_id,
        "columns": columns,
    }))
    .with_text(text.trim_end().to_string())
    .print(output_json)
}

/// Move a story and report how the move ended.
///
/// A refused or rolled back move is an error so the exit status reflects it.
pub async fn cmd_board_move(
    id: StoryId,
    column: BoardColumn,
    project: Option<u64>,
    output_json: bool,
) -> Result<()> {
    let (config, gateway) = connect()?;
    let project_id = config.project_or_default(project)?;
    authorize(
        gateway.as_ref(),
        "change story status",
        roles::can_update_story_status::<String>,
    )
    .await?;

    let notifications = NotificationChannel::new(config.toast_duration());
    let board = Board::new(gateway, notifications.clone());
    board.load_project(project_id).await?;

    let op = board.controller().drop_story(id, column).await;

    match op.phase {
        DragPhase::Confirmed => {
            let from = op.previous.unwrap_or(column);
            let title = board
                .store()
                .get(id)
                .map(|s| s.title.clone())
                .unwrap_or_default();
            CommandOutput::new(json!({
                "id": id,
                "action": "status_changed",
                "previous_status": from,
                "new_status": column,
            }))
            .with_text(format!(
                "Moved #{} {}: {} -> {}",
                id,
                title,
                format_column(from),
                format_column(column)
            ))
            .print(output_json)
        }
        DragPhase::Rejected(Rejection::UnknownStory) => Err(SprintboardError::StoryNotFound(id)),
        DragPhase::Rejected(Rejection::NotSprintReady) => {
            let message = board
                .store()
                .get(id)
                .map(not_sprint_ready_message)
                .unwrap_or_else(|| format!("#{id} has not been marked as Sprint Ready."));
            Err(SprintboardError::Validation(message))
        }
        DragPhase::RolledBack => {
            let message = match notifications.acknowledge() {
                Some(alert) => format!("{}: {}", alert.title, alert.message),
                None => op
                    .error
                    .unwrap_or_else(|| "status update failed".to_string()),
            };
            Err(SprintboardError::Other(message))
        }
        phase => Err(SprintboardError::Other(format!(
            "move of #{id} ended unexpectedly ({phase})"
        ))),
    }
}
