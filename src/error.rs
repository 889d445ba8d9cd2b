use thiserror::Error;

use crate::types::StoryId;

#[derive(Error, Debug)]
pub enum SprintboardError {
    #[error("story #{0} not found")]
    StoryNotFound(StoryId),

    #[error("invalid status '{0}'")]
    InvalidStatus(String),

    #[error("invalid board column '{0}'. Must be one of: Backlog, To Do, In Progress, Done")]
    InvalidColumn(String),

    #[error("invalid priority '{0}'. Must be one of: low, medium, high, critical")]
    InvalidPriority(String),

    #[error("invalid role '{0}'")]
    InvalidRole(String),

    #[error("invalid drag transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("{0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not logged in. Set a session with: sprintboard config set session.cookie <JSESSIONID>")]
    NotAuthenticated,

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("API error ({status}): {message}")]
    Api {
        status: http::StatusCode,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SprintboardError {
    /// Whether the backend rejected the request because the session is missing or expired
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            SprintboardError::NotAuthenticated
                | SprintboardError::Api {
                    status: http::StatusCode::UNAUTHORIZED | http::StatusCode::FORBIDDEN,
                    ..
                }
        )
    }
}

pub type Result<T> = std::result::Result<T, SprintboardError>;
