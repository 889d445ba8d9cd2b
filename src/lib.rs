pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod roles;
pub mod session;
pub mod status;
pub mod types;

pub use board::{
    Board, BoardStateStore, ColumnSummary, DragDropController, DragOperation, DragPhase,
    Rejection, StoryFilter,
};
pub use config::Config;
pub use error::{Result, SprintboardError};
pub use gateway::{HttpGateway, SessionGateway, StoryGateway};
pub use notify::{Alert, NotificationChannel, Toast, ToastLevel};
pub use roles::Role;
pub use session::{CurrentUser, SessionState};
pub use status::{to_backend_status, to_board_column};
pub use types::{
    BackendStatus, BoardColumn, ProjectId, ProjectSummary, Story, StoryId, StoryPriority,
    StoryRecord,
};
