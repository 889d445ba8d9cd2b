//! Mapping between backend status codes and board columns.
//!
//! The backend persists five codes while the board shows four lanes, so the
//! mapping is many-to-one: `BLOCKED` collapses into Backlog and `IN_REVIEW`
//! into In Progress. Moving such a story back writes `NEW` / `IN_PROGRESS`,
//! never the original code. Both directions are total: anything unrecognized
//! falls back to Backlog / `NEW`.

use unicase::UniCase;

use crate::types::{BackendStatus, BoardColumn};

/// Map a backend status code (any case) to the column it is shown in
pub fn to_board_column(backend_status: &str) -> BoardColumn {
    match BackendStatus::from_code(backend_status) {
        Some(status) => column_for(status),
        // Already in board-column space: keeps the mapping idempotent
        None => BoardColumn::from_name(backend_status).unwrap_or_default(),
    }
}

/// Map a board column name (any case) to the backend code written on drop
pub fn to_backend_status(board_column: &str) -> &'static str {
    BoardColumn::from_name(board_column)
        .map(status_for)
        .unwrap_or_default()
        .code()
}

/// Typed form of [`to_board_column`]
pub fn column_for(status: BackendStatus) -> BoardColumn {
    match status {
        BackendStatus::New | BackendStatus::Blocked => BoardColumn::Backlog,
        BackendStatus::InProgress | BackendStatus::InReview => BoardColumn::InProgress,
        BackendStatus::Done => BoardColumn::Done,
    }
}

/// Typed form of [`to_backend_status`]
pub fn status_for(column: BoardColumn) -> BackendStatus {
    match column {
        BoardColumn::Backlog | BoardColumn::ToDo => BackendStatus::New,
        BoardColumn::InProgress => BackendStatus::InProgress,
        BoardColumn::Done => BackendStatus::Done,
    }
}

/// Whether a raw status string names one of the backend codes
pub fn is_backend_code(value: &str) -> bool {
    let needle = UniCase::new(value.trim());
    BackendStatus::ALL
        .iter()
        .any(|status| UniCase::new(status.code()) == needle)
}
