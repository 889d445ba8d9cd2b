//! Backend gateway.
//!
//! The board talks to the Scrum backend only through the traits in this
//! module, so the drag workflow can be exercised against scripted gateways.

pub mod error;
pub mod rest;

use std::future::Future;

use serde::Serialize;

use crate::error::Result;
use crate::session::CurrentUser;
use crate::types::{BackendStatus, ProjectId, ProjectSummary, StoryId, StoryRecord};

pub use self::rest::HttpGateway;

/// Body of `PUT /api/stories/{id}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: BackendStatus,
}

/// Body of `PUT /api/stories/{id}/sprint-ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintReadyUpdate {
    pub sprint_ready: bool,
}

/// Body of `PUT /api/stories/{id}/estimate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateUpdate {
    pub story_points: u32,
}

/// Story endpoints used by the board
pub trait StoryGateway: Send + Sync {
    /// `GET /api/stories?projectId=<id>`
    fn fetch_stories(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Vec<StoryRecord>>> + Send;

    /// `PUT /api/stories/{id}/status`; any 2xx is success
    fn update_status(
        &self,
        story_id: StoryId,
        status: BackendStatus,
    ) -> impl Future<Output = Result<()>> + Send;

    /// `PUT /api/stories/{id}/sprint-ready`
    fn update_sprint_ready(
        &self,
        story_id: StoryId,
        sprint_ready: bool,
    ) -> impl Future<Output = Result<StoryRecord>> + Send;

    /// `PUT /api/stories/{id}/estimate`
    fn update_estimate(
        &self,
        story_id: StoryId,
        story_points: u32,
    ) -> impl Future<Output = Result<StoryRecord>> + Send;
}

/// Session and project endpoints
pub trait SessionGateway: Send + Sync {
    /// `GET /api/users/me`; `None` when the backend reports no session
    fn current_user(&self) -> impl Future<Output = Result<Option<CurrentUser>>> + Send;

    /// `GET /api/projects`
    fn list_projects(&self) -> impl Future<Output = Result<Vec<ProjectSummary>>> + Send;
}
