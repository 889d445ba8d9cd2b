//! Story filtering for board and backlog queries

use crate::types::{BoardColumn, Story, StoryPriority};

/// Filters for [`BoardStateStore::query`](super::BoardStateStore::query).
///
/// All present filters must match. `status` and `priority` are exact;
/// `search_text` is a case-insensitive substring match on title or description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryFilter {
    pub status: Option<BoardColumn>,
    pub priority: Option<StoryPriority>,
    pub search_text: Option<String>,
}

impl StoryFilter {
    pub fn with_status(mut self, status: BoardColumn) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: StoryPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.search_text.is_none()
    }

    pub fn matches(&self, story: &Story) -> bool {
        if let Some(status) = self.status
            && story.status != status
        {
            return false;
        }
        if let Some(priority) = self.priority
            && story.priority != priority
        {
            return false;
        }
        match self.search_text.as_deref() {
            Some(text) => matches_text(story, text),
            None => true,
        }
    }
}

fn matches_text(story: &Story, text: &str) -> bool {
    let needle = text.to_lowercase();
    story.title.to_lowercase().contains(&needle)
        || story.description.to_lowercase().contains(&needle)
}
