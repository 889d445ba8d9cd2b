//! Kanban board state and the drag-and-drop workflow.
//!
//! [`Board`] ties together the shared [`BoardStateStore`], the gateway and the
//! notification channel for one project, and hands out
//! [`DragDropController`]s that operate on them.

pub mod controller;
pub mod filter;
pub mod phase;
pub mod store;

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

pub use controller::{DragDropController, not_sprint_ready_message};
pub use filter::StoryFilter;
pub use phase::{DragOperation, DragPhase, Rejection};
pub use store::{BoardStateStore, ColumnSummary};

use crate::error::{Result, SprintboardError};
use crate::gateway::StoryGateway;
use crate::notify::NotificationChannel;
use crate::types::{ProjectId, Story, StoryId};

/// The board for a single project
pub struct Board<G> {
    store: Arc<Mutex<BoardStateStore>>,
    gateway: Arc<G>,
    notifications: NotificationChannel,
}

impl<G: StoryGateway> Board<G> {
    pub fn new(gateway: Arc<G>, notifications: NotificationChannel) -> Self {
        Self {
            store: Arc::new(Mutex::new(BoardStateStore::new())),
            gateway,
            notifications,
        }
    }

    /// Fetch the project's stories and replace the board contents
    pub async fn load_project(&self, project_id: ProjectId) -> Result<usize> {
        let records = self.gateway.fetch_stories(project_id).await?;
        let stories: Vec<Story> = records.into_iter().map(Story::from).collect();
        let count = stories.len();
        self.store.lock().load(stories);
        tracing::info!(project = %project_id, count, "board loaded");
        Ok(count)
    }

    pub fn controller(&self) -> DragDropController<G> {
        DragDropController::new(
            &self.store,
            Arc::clone(&self.gateway),
            self.notifications.clone(),
        )
    }

    /// Lock the store for reading or direct mutation
    pub fn store(&self) -> MutexGuard<'_, BoardStateStore> {
        self.store.lock()
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    /// Toggle the sprint-ready flag on the backend and take its answer
    pub async fn set_sprint_ready(&self, story_id: StoryId, ready: bool) -> Result<Story> {
        let record = self.gateway.update_sprint_ready(story_id, ready).await?;
        let story = Story::from(record);
        self.store.lock().upsert(story.clone());
        Ok(story)
    }

    /// Record a story point estimate; zero is refused before any request
    pub async fn estimate(&self, story_id: StoryId, points: u32) -> Result<Story> {
        if points == 0 {
            return Err(SprintboardError::Validation(
                "Story points must be greater than zero".to_string(),
            ));
        }
        let record = self.gateway.update_estimate(story_id, points).await?;
        let story = Story::from(record);
        self.store.lock().upsert(story.clone());
        Ok(story)
    }
}
