use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;

use crate::types::{BoardColumn, StoryId, StoryPriority, VALID_COLUMNS, VALID_PRIORITIES};

#[derive(Parser)]
#[command(name = "sprintboard")]
#[command(about = "Scrum board client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the user the current session belongs to
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List projects visible to the current user
    Projects {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Kanban board for a project
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Work with user stories
    Story {
        #[command(subcommand)]
        action: StoryAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Show stories grouped by column
    Show {
        /// Project ID (default: project.default)
        #[arg(short, long)]
        project: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move a story to another column
    Move {
        /// Story ID (e.g. 7 or #7)
        #[arg(value_parser = parse_story_id)]
        id: StoryId,

        /// Target column: Backlog, "To Do", "In Progress", Done
        #[arg(value_parser = parse_column)]
        column: BoardColumn,

        /// Project ID (default: project.default)
        #[arg(short, long)]
        project: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum StoryAction {
    /// List stories of a project
    Ls {
        /// Project ID (default: project.default)
        #[arg(short, long)]
        project: Option<u64>,

        /// Only stories in this column
        #[arg(long, value_parser = parse_column)]
        status: Option<BoardColumn>,

        /// Only stories with this priority
        #[arg(long, value_parser = parse_priority)]
        priority: Option<StoryPriority>,

        /// Case-insensitive text to look for in title or description
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a story as sprint ready
    SprintReady {
        /// Story ID (e.g. 7 or #7)
        #[arg(value_parser = parse_story_id)]
        id: StoryId,

        /// Clear the flag instead of setting it
        #[arg(long)]
        unset: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a story point estimate
    Estimate {
        /// Story ID (e.g. 7 or #7)
        #[arg(value_parser = parse_story_id)]
        id: StoryId,

        /// Story points
        points: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (server.url, project.default, session.cookie, toast.seconds, remote.timeout)
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (server.url, project.default, session.cookie, toast.seconds, remote.timeout)
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            cmd_board_move, cmd_board_show, cmd_config_get, cmd_config_set, cmd_config_show,
            cmd_projects, cmd_story_estimate, cmd_story_ls, cmd_story_sprint_ready, cmd_whoami,
        };
        use crate::board::StoryFilter;

        match self {
            Commands::Whoami { json } => cmd_whoami(json).await,
            Commands::Projects { json } => cmd_projects(json).await,

            Commands::Board { action } => match action {
                BoardAction::Show { project, json } => cmd_board_show(project, json).await,
                BoardAction::Move {
                    id,
                    column,
                    project,
                    json,
                } => cmd_board_move(id, column, project, json).await,
            },

            Commands::Story { action } => match action {
                StoryAction::Ls {
                    project,
                    status,
                    priority,
                    search,
                    json,
                } => {
                    let filter = StoryFilter {
                        status,
                        priority,
                        search_text: search,
                    };
                    cmd_story_ls(project, &filter, json).await
                }
                StoryAction::SprintReady { id, unset, json } => {
                    cmd_story_sprint_ready(id, !unset, json).await
                }
                StoryAction::Estimate { id, points, json } => {
                    cmd_story_estimate(id, points, json).await
                }
            },

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_column(s: &str) -> Result<BoardColumn, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "column",
        VALID_COLUMNS,
    )
}

fn parse_priority(s: &str) -> Result<StoryPriority, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        VALID_PRIORITIES,
    )
}

fn parse_story_id(s: &str) -> Result<StoryId, String> {
    s.parse()
        .map_err(|_| format!("Invalid story ID '{s}'. Expected a number such as 7 or #7"))
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "sprintboard", &mut io::stdout());
}
