//! Drag-and-drop status changes.
//!
//! A drop is validated against the sprint-ready gate, applied to the store
//! right away, then persisted. A failed write restores the captured status and
//! raises a blocking alert; a gate rejection only shows a toast.
//!
//! The controller holds the store weakly. A write that settles after the board
//! is gone ends as `Abandoned` without touching anything.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::phase::{DragOperation, DragPhase, Rejection};
use super::store::BoardStateStore;
use crate::gateway::StoryGateway;
use crate::notify::{Alert, NotificationChannel, Toast};
use crate::status;
use crate::types::{BoardColumn, Story, StoryId};

/// Text of the toast shown when the sprint-ready gate refuses a drop
pub fn not_sprint_ready_message(story: &Story) -> String {
    format!(
        "#{} {} has not been marked as Sprint Ready.",
        story.id, story.title
    )
}

pub struct DragDropController<G> {
    store: Weak<Mutex<BoardStateStore>>,
    gateway: Arc<G>,
    notifications: NotificationChannel,
}

impl<G> Clone for DragDropController<G> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            gateway: Arc::clone(&self.gateway),
            notifications: self.notifications.clone(),
        }
    }
}

impl<G: StoryGateway> DragDropController<G> {
    pub fn new(
        store: &Arc<Mutex<BoardStateStore>>,
        gateway: Arc<G>,
        notifications: NotificationChannel,
    ) -> Self {
        Self {
            store: Arc::downgrade(store),
            gateway,
            notifications,
        }
    }

    /// Run one drop to completion and report how it ended
    pub async fn drop_story(&self, story_id: StoryId, target: BoardColumn) -> DragOperation {
        let mut op = DragOperation::new(story_id, target);
        step(&mut op, DragPhase::Validating);

        let Some(previous) = self.validate_and_apply(&mut op) else {
            return op;
        };

        let result = self
            .gateway
            .update_status(story_id, status::status_for(target))
            .await;

        match result {
            Ok(()) => {
                if self.store.strong_count() == 0 {
                    step(&mut op, DragPhase::Abandoned);
                } else {
                    step(&mut op, DragPhase::Confirmed);
                }
            }
            Err(error) => self.roll_back(&mut op, previous, error.to_string()),
        }
        op
    }

    /// Run a drop as an independent task.
    ///
    /// Drops on different stories do not wait for each other and may settle in
    /// any order.
    pub fn spawn_drop(&self, story_id: StoryId, target: BoardColumn) -> JoinHandle<DragOperation>
    where
        G: 'static,
    {
        let controller = self.clone();
        tokio::spawn(async move { controller.drop_story(story_id, target).await })
    }

    /// Gate check plus optimistic update; `None` when the drop ends here
    fn validate_and_apply(&self, op: &mut DragOperation) -> Option<BoardColumn> {
        let Some(store) = self.store.upgrade() else {
            step(op, DragPhase::Abandoned);
            return None;
        };
        let mut store = store.lock();

        let Some(story) = store.get(op.story_id) else {
            tracing::warn!(
                story = %op.story_id,
                target = %op.target,
                "dropped story is not on the board, ignoring"
            );
            step(op, DragPhase::Rejected(Rejection::UnknownStory));
            return None;
        };

        if !story.is_sprint_ready && story.status != op.target {
            let message = not_sprint_ready_message(story);
            tracing::debug!(story = %op.story_id, "drop refused by sprint-ready gate");
            self.notifications.show_toast(Toast::warning(message));
            step(op, DragPhase::Rejected(Rejection::NotSprintReady));
            return None;
        }

        step(op, DragPhase::Committing);
        let previous = store.apply_optimistic_status(op.story_id, op.target)?;
        op.previous = Some(previous);
        Some(previous)
    }

    fn roll_back(&self, op: &mut DragOperation, previous: BoardColumn, error: String) {
        tracing::warn!(
            story = %op.story_id,
            target = %op.target,
            %error,
            "status update failed, rolling back"
        );
        op.error = Some(error.clone());

        let Some(store) = self.store.upgrade() else {
            step(op, DragPhase::Abandoned);
            return;
        };
        let title = {
            let mut store = store.lock();
            store.revert_status(op.story_id, previous);
            store
                .get(op.story_id)
                .map(|s| s.title.clone())
                .unwrap_or_default()
        };

        self.notifications.alert(Alert::new(
            "Status update failed",
            format!(
                "Could not move #{} {} to {}: {}",
                op.story_id, title, op.target, error
            ),
        ));
        step(op, DragPhase::RolledBack);
    }
}

fn step(op: &mut DragOperation, next: DragPhase) {
    if let Err(e) = op.advance(next) {
        tracing::error!(story = %op.story_id, error = %e, "drag state machine violated");
    }
}
