//! Builders for backend payloads used across tests.

use serde_json::{Value, json};

use sprintboard::session::CurrentUser;
use sprintboard::types::StoryRecord;

/// Builder for story payloads as the backend sends them
pub struct StoryRecordBuilder {
    record: StoryRecord,
}

impl StoryRecordBuilder {
    pub fn new(id: u64, title: &str) -> Self {
        Self {
            record: StoryRecord {
                id,
                title: title.to_string(),
                status: Some("NEW".to_string()),
                priority: Some("medium".to_string()),
                sprint_ready: Some(true),
                ..Default::default()
            },
        }
    }

    /// Backend status code, e.g. `IN_REVIEW`
    pub fn status(mut self, code: &str) -> Self {
        self.record.status = Some(code.to_string());
        self
    }

    pub fn priority(mut self, priority: &str) -> Self {
        self.record.priority = Some(priority.to_string());
        self
    }

    pub fn points(mut self, points: i64) -> Self {
        self.record.story_points = Some(points);
        self
    }

    pub fn business_value(mut self, value: i64) -> Self {
        self.record.business_value = Some(value);
        self
    }

    pub fn sprint_ready(mut self, ready: bool) -> Self {
        self.record.sprint_ready = Some(ready);
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.record.description = Some(text.to_string());
        self
    }

    pub fn build(self) -> StoryRecord {
        self.record
    }
}

/// A sprint-ready story in `NEW`
pub fn mock_story(id: u64, title: &str) -> StoryRecord {
    StoryRecordBuilder::new(id, title).build()
}

pub fn mock_user(username: &str, roles: &[&str]) -> CurrentUser {
    CurrentUser {
        id: 1,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        full_name: None,
        roles: roles.iter().map(|r| r.to_string()).collect(),
        active: true,
    }
}

/// JSON body of `GET /api/users/me`
pub fn user_json(username: &str, roles: &[&str]) -> Value {
    json!({
        "id": 1,
        "username": username,
        "email": format!("{username}@example.com"),
        "fullName": null,
        "roles": roles,
        "active": true,
    })
}

/// JSON body of `GET /api/stories`
pub fn stories_json(records: &[StoryRecord]) -> Value {
    serde_json::to_value(records).expect("story records serialize")
}
