use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use unicase::UniCase;

use crate::error::SprintboardError;

/// Backend-assigned story identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub u64);

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoryId {
    type Err = SprintboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('#');
        trimmed
            .parse::<u64>()
            .map(StoryId)
            .map_err(|_| SprintboardError::Other(format!("invalid story id: {}", s)))
    }
}

/// Backend-assigned project identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four kanban lanes shown to the user, in board order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum BoardColumn {
    #[default]
    Backlog,
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl BoardColumn {
    pub const ALL: [BoardColumn; 4] = [
        BoardColumn::Backlog,
        BoardColumn::ToDo,
        BoardColumn::InProgress,
        BoardColumn::Done,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BoardColumn::Backlog => "Backlog",
            BoardColumn::ToDo => "To Do",
            BoardColumn::InProgress => "In Progress",
            BoardColumn::Done => "Done",
        }
    }

    /// Strict lookup by display name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let needle = UniCase::new(name.trim());
        Self::ALL
            .into_iter()
            .find(|column| UniCase::new(column.name()) == needle)
    }
}

impl fmt::Display for BoardColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoardColumn {
    type Err = SprintboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| SprintboardError::InvalidColumn(s.to_string()))
    }
}

pub const VALID_COLUMNS: &[&str] = &["Backlog", "To Do", "In Progress", "Done"];

/// The five status codes the backend persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackendStatus {
    #[default]
    New,
    InProgress,
    InReview,
    Blocked,
    Done,
}

impl BackendStatus {
    pub const ALL: [BackendStatus; 5] = [
        BackendStatus::New,
        BackendStatus::InProgress,
        BackendStatus::InReview,
        BackendStatus::Blocked,
        BackendStatus::Done,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            BackendStatus::New => "NEW",
            BackendStatus::InProgress => "IN_PROGRESS",
            BackendStatus::InReview => "IN_REVIEW",
            BackendStatus::Blocked => "BLOCKED",
            BackendStatus::Done => "DONE",
        }
    }

    /// Strict lookup by code, ignoring case
    pub fn from_code(code: &str) -> Option<Self> {
        let needle = UniCase::new(code.trim());
        Self::ALL
            .into_iter()
            .find(|status| UniCase::new(status.code()) == needle)
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BackendStatus {
    type Err = SprintboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| SprintboardError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoryPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl StoryPriority {
    /// Lenient parse used for backend payloads; unknown values fall back to medium
    pub fn from_wire(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for StoryPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryPriority::Low => write!(f, "low"),
            StoryPriority::Medium => write!(f, "medium"),
            StoryPriority::High => write!(f, "high"),
            StoryPriority::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for StoryPriority {
    type Err = SprintboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(StoryPriority::Low),
            "medium" => Ok(StoryPriority::Medium),
            "high" => Ok(StoryPriority::High),
            "critical" => Ok(StoryPriority::Critical),
            _ => Err(SprintboardError::InvalidPriority(s.to_string())),
        }
    }
}

pub const VALID_PRIORITIES: &[&str] = &["low", "medium", "high", "critical"];

/// A story as the board sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub description: String,
    pub priority: StoryPriority,
    /// Estimate in story points, 0 when unestimated
    pub points: u32,
    pub status: BoardColumn,
    pub is_sprint_ready: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Story payload as returned by `GET /api/stories`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub story_points: Option<i64>,
    #[serde(default)]
    pub business_value: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sprint_ready: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        let points = record
            .story_points
            .or(record.business_value)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(0);

        Story {
            id: StoryId(record.id),
            title: record.title,
            description: record.description.unwrap_or_default(),
            priority: StoryPriority::from_wire(record.priority.as_deref()),
            points,
            status: crate::status::to_board_column(record.status.as_deref().unwrap_or_default()),
            is_sprint_ready: record.sprint_ready.unwrap_or(false),
            tags: record.tags,
            labels: record.labels,
        }
    }
}

/// Project payload as returned by `GET /api/projects`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: ProjectId,
    #[serde(default)]
    pub project_key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: Option<u32>,
    #[serde(default)]
    pub user_story_count: Option<u32>,
}
