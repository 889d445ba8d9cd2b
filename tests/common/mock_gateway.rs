//! Scripted in-memory gateway.
//!
//! Records every call, can hold status writes until released, and fails
//! writes for chosen stories.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Semaphore;

use sprintboard::error::{Result, SprintboardError};
use sprintboard::gateway::error::ApiError;
use sprintboard::gateway::{SessionGateway, StoryGateway};
use sprintboard::session::CurrentUser;
use sprintboard::types::{
    BackendStatus, ProjectId, ProjectSummary, StoryId, StoryRecord,
};

#[derive(Default)]
pub struct ScriptedGateway {
    stories: Mutex<Vec<StoryRecord>>,
    user: Mutex<Option<CurrentUser>>,
    status_calls: Mutex<Vec<(StoryId, BackendStatus)>>,
    other_calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<StoryId, http::StatusCode>>,
    hold: Mutex<Option<Arc<Semaphore>>>,
}

impl ScriptedGateway {
    pub fn new(stories: Vec<StoryRecord>) -> Arc<Self> {
        let gateway = Self::default();
        *gateway.stories.lock() = stories;
        Arc::new(gateway)
    }

    pub fn set_user(&self, user: Option<CurrentUser>) {
        *self.user.lock() = user;
    }

    /// Status writes for `story_id` answer with `status`
    pub fn fail_status_update(&self, story_id: StoryId, status: http::StatusCode) {
        self.failures.lock().insert(story_id, status);
    }

    /// Park status writes until [`Self::release`] is called once per write
    pub fn hold_status_updates(&self) {
        *self.hold.lock() = Some(Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, writes: usize) {
        if let Some(gate) = self.hold.lock().as_ref() {
            gate.add_permits(writes);
        }
    }

    pub fn status_calls(&self) -> Vec<(StoryId, BackendStatus)> {
        self.status_calls.lock().clone()
    }

    pub fn other_calls(&self) -> Vec<String> {
        self.other_calls.lock().clone()
    }

    /// Wait until `count` status writes have arrived
    pub async fn wait_for_status_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.status_calls.lock().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("status writes did not arrive in time");
    }

    fn record(&self, story_id: StoryId) -> Result<StoryRecord> {
        self.stories
            .lock()
            .iter()
            .find(|r| r.id == story_id.0)
            .cloned()
            .ok_or(SprintboardError::StoryNotFound(story_id))
    }
}

impl StoryGateway for ScriptedGateway {
    async fn fetch_stories(&self, project_id: ProjectId) -> Result<Vec<StoryRecord>> {
        self.other_calls.lock().push(format!("fetch {project_id}"));
        Ok(self.stories.lock().clone())
    }

    async fn update_status(&self, story_id: StoryId, status: BackendStatus) -> Result<()> {
        self.status_calls.lock().push((story_id, status));

        let gate = self.hold.lock().clone();
        if let Some(gate) = gate
            && let Ok(permit) = gate.acquire().await
        {
            permit.forget();
        }

        let failure = self.failures.lock().get(&story_id).copied();
        match failure {
            Some(status) => Err(ApiError::new(status, "boom").into()),
            None => Ok(()),
        }
    }

    async fn update_sprint_ready(&self, story_id: StoryId, sprint_ready: bool) -> Result<StoryRecord> {
        self.other_calls
            .lock()
            .push(format!("sprint-ready {story_id} {sprint_ready}"));
        let mut record = self.record(story_id)?;
        record.sprint_ready = Some(sprint_ready);
        Ok(record)
    }

    async fn update_estimate(&self, story_id: StoryId, story_points: u32) -> Result<StoryRecord> {
        self.other_calls
            .lock()
            .push(format!("estimate {story_id} {story_points}"));
        let mut record = self.record(story_id)?;
        record.story_points = Some(i64::from(story_points));
        Ok(record)
    }
}

impl SessionGateway for ScriptedGateway {
    async fn current_user(&self) -> Result<Option<CurrentUser>> {
        Ok(self.user.lock().clone())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        Ok(vec![])
    }
}
