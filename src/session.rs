//! Explicit session context.
//!
//! Components that need to know who is logged in receive a `SessionState`
//! instead of consulting ambient flags.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SprintboardError};
use crate::gateway::SessionGateway;
use crate::roles;

/// The authenticated user as returned by `GET /api/users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(CurrentUser),
}

impl SessionState {
    /// Ask the backend who the session belongs to
    pub async fn resolve<G: SessionGateway>(gateway: &G) -> Result<Self> {
        match gateway.current_user().await {
            Ok(Some(user)) => Ok(SessionState::Authenticated(user)),
            Ok(None) => Ok(SessionState::Unauthenticated),
            Err(e) if e.is_unauthorized() => Ok(SessionState::Unauthenticated),
            Err(e) => Err(e),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Role codes of the current user; empty unless authenticated
    pub fn roles(&self) -> &[String] {
        self.user().map(|u| u.roles.as_slice()).unwrap_or(&[])
    }

    /// Fail unless authenticated and `allowed` accepts the role list
    pub fn require(&self, action: &str, allowed: fn(&[String]) -> bool) -> Result<&CurrentUser> {
        let user = self.user().ok_or(SprintboardError::NotAuthenticated)?;
        if allowed(&user.roles) {
            Ok(user)
        } else {
            Err(SprintboardError::Forbidden(format!(
                "{} is not allowed to {}",
                user.username, action
            )))
        }
    }

    pub fn can_move_stories(&self) -> bool {
        roles::can_update_story_status(self.roles())
    }

    pub fn can_mark_sprint_ready(&self) -> bool {
        roles::can_mark_sprint_ready(self.roles())
    }

    pub fn can_estimate(&self) -> bool {
        roles::can_estimate_stories(self.roles())
    }
}
