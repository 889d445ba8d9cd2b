//! In-memory story collection for the project on screen.
//!
//! Status changes made by a drag are applied here before the backend confirms
//! them. `apply_optimistic_status` hands back the value it replaced so the
//! caller can restore exactly that value if persistence fails.

use std::collections::HashMap;

use serde::Serialize;

use super::filter::StoryFilter;
use crate::types::{BoardColumn, Story, StoryId};

/// One lane of the board with its stories and point total
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub column: BoardColumn,
    pub stories: Vec<Story>,
    pub total_points: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BoardStateStore {
    stories: Vec<Story>,
    index: HashMap<StoryId, usize>,
}

impl BoardStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stories(stories: Vec<Story>) -> Self {
        let mut store = Self::new();
        store.load(stories);
        store
    }

    /// Replace the whole collection.
    ///
    /// Backend order is kept. A repeated id overwrites the earlier record in
    /// place so each id has exactly one status.
    pub fn load(&mut self, stories: Vec<Story>) {
        self.stories.clear();
        self.index.clear();
        for story in stories {
            match self.index.get(&story.id) {
                Some(&pos) => self.stories[pos] = story,
                None => {
                    self.index.insert(story.id, self.stories.len());
                    self.stories.push(story);
                }
            }
        }
        tracing::debug!(count = self.stories.len(), "board store loaded");
    }

    /// Set a story's status, returning the status it had before.
    ///
    /// `None` means the id is not on the board and nothing changed.
    pub fn apply_optimistic_status(
        &mut self,
        story_id: StoryId,
        new_status: BoardColumn,
    ) -> Option<BoardColumn> {
        let story = self.get_mut(story_id)?;
        let previous = story.status;
        story.status = new_status;
        Some(previous)
    }

    /// Restore a status captured by [`Self::apply_optimistic_status`].
    ///
    /// Returns false if the story is no longer on the board.
    pub fn revert_status(&mut self, story_id: StoryId, previous_status: BoardColumn) -> bool {
        match self.get_mut(story_id) {
            Some(story) => {
                story.status = previous_status;
                true
            }
            None => false,
        }
    }

    /// Stories matching every filter that is set, in board order
    pub fn query(&self, filter: &StoryFilter) -> Vec<&Story> {
        self.stories.iter().filter(|s| filter.matches(s)).collect()
    }

    pub fn get(&self, story_id: StoryId) -> Option<&Story> {
        self.index.get(&story_id).map(|&pos| &self.stories[pos])
    }

    fn get_mut(&mut self, story_id: StoryId) -> Option<&mut Story> {
        let pos = *self.index.get(&story_id)?;
        self.stories.get_mut(pos)
    }

    /// Replace a single story with a fresh copy from the backend, or append it
    pub fn upsert(&mut self, story: Story) {
        match self.get_mut(story.id) {
            Some(existing) => *existing = story,
            None => {
                self.index.insert(story.id, self.stories.len());
                self.stories.push(story);
            }
        }
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Group stories into the four board columns, in column order
    pub fn columns(&self) -> Vec<ColumnSummary> {
        BoardColumn::ALL
            .iter()
            .map(|&column| {
                let stories: Vec<Story> = self
                    .stories
                    .iter()
                    .filter(|s| s.status == column)
                    .cloned()
                    .collect();
                let total_points = stories.iter().map(|s| s.points).sum();
                ColumnSummary {
                    column,
                    stories,
                    total_points,
                }
            })
            .collect()
    }
}
