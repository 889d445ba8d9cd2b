//! States of a single drag-and-drop operation.
//!
//! ```text
//! Idle -> Validating -> Rejected
//!                    -> Committing -> Confirmed
//!                                  -> RolledBack
//! ```
//!
//! `Abandoned` ends an operation whose board was torn down before it settled.

use serde::Serialize;
use std::fmt;

use crate::error::{Result, SprintboardError};
use crate::types::{BoardColumn, StoryId};

/// Why a drop was refused before anything changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The story id is not on the board
    UnknownStory,
    /// Cross-column move of a story that is not sprint ready
    NotSprintReady,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    Idle,
    Validating,
    Rejected(Rejection),
    Committing,
    Confirmed,
    RolledBack,
    Abandoned,
}

impl DragPhase {
    pub fn name(&self) -> &'static str {
        match self {
            DragPhase::Idle => "idle",
            DragPhase::Validating => "validating",
            DragPhase::Rejected(_) => "rejected",
            DragPhase::Committing => "committing",
            DragPhase::Confirmed => "confirmed",
            DragPhase::RolledBack => "rolled_back",
            DragPhase::Abandoned => "abandoned",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DragPhase::Rejected(_)
                | DragPhase::Confirmed
                | DragPhase::RolledBack
                | DragPhase::Abandoned
        )
    }

    pub fn can_transition_to(&self, next: &DragPhase) -> bool {
        matches!(
            (self, next),
            (DragPhase::Idle, DragPhase::Validating)
                | (DragPhase::Validating, DragPhase::Rejected(_))
                | (DragPhase::Validating, DragPhase::Committing)
                | (DragPhase::Validating, DragPhase::Abandoned)
                | (DragPhase::Committing, DragPhase::Confirmed)
                | (DragPhase::Committing, DragPhase::RolledBack)
                | (DragPhase::Committing, DragPhase::Abandoned)
        )
    }
}

impl fmt::Display for DragPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One drag from a card to a column, and everything learned while running it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragOperation {
    pub story_id: StoryId,
    pub target: BoardColumn,
    pub phase: DragPhase,
    /// Status before the optimistic update, once one was applied
    pub previous: Option<BoardColumn>,
    /// Gateway failure that caused a rollback
    pub error: Option<String>,
}

impl DragOperation {
    pub fn new(story_id: StoryId, target: BoardColumn) -> Self {
        Self {
            story_id,
            target,
            phase: DragPhase::Idle,
            previous: None,
            error: None,
        }
    }

    pub fn advance(&mut self, next: DragPhase) -> Result<()> {
        if !self.phase.can_transition_to(&next) {
            return Err(SprintboardError::InvalidTransition {
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }
        tracing::debug!(
            story = %self.story_id,
            target = %self.target,
            from = %self.phase,
            to = %next,
            "drag transition"
        );
        self.phase = next;
        Ok(())
    }

    pub fn is_settled(&self) -> bool {
        self.phase.is_terminal()
    }
}
