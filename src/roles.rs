//! Role-based permission checks.
//!
//! Each predicate returns true when the caller's role list contains at least
//! one role from that action's allow-list. Role strings are matched exactly
//! against the backend codes (`PRODUCT_OWNER`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use unicase::UniCase;

use crate::error::SprintboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    ProductOwner,
    ScrumMaster,
    Developer,
    SystemAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::ProductOwner,
        Role::ScrumMaster,
        Role::Developer,
        Role::SystemAdmin,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Role::ProductOwner => "PRODUCT_OWNER",
            Role::ScrumMaster => "SCRUM_MASTER",
            Role::Developer => "DEVELOPER",
            Role::SystemAdmin => "SYSTEM_ADMIN",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::ProductOwner => "Product Owner",
            Role::ScrumMaster => "Scrum Master",
            Role::Developer => "Developer",
            Role::SystemAdmin => "System Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Role {
    type Err = SprintboardError;

    /// Accepts the backend code or the display name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = UniCase::new(s.trim());
        Role::ALL
            .into_iter()
            .find(|role| {
                UniCase::new(role.code()) == needle || UniCase::new(role.display_name()) == needle
            })
            .ok_or_else(|| SprintboardError::InvalidRole(s.to_string()))
    }
}

const STORY_MANAGERS: &[Role] = &[Role::ProductOwner, Role::SystemAdmin];
const ESTIMATORS: &[Role] = &[
    Role::Developer,
    Role::ScrumMaster,
    Role::ProductOwner,
    Role::SystemAdmin,
];
const STATUS_UPDATERS: &[Role] = ESTIMATORS;
const SPRINT_READY_MARKERS: &[Role] = &[Role::ProductOwner, Role::ScrumMaster, Role::SystemAdmin];
const RELEASE_LINKERS: &[Role] = &[Role::ProductOwner, Role::SystemAdmin];

/// True if `user_roles` contains any of `allowed` (empty list is never allowed)
pub fn has_any_role<S: AsRef<str>>(user_roles: &[S], allowed: &[Role]) -> bool {
    allowed
        .iter()
        .any(|role| user_roles.iter().any(|r| r.as_ref() == role.code()))
}

/// Create, edit or delete stories
pub fn can_manage_stories<S: AsRef<str>>(user_roles: &[S]) -> bool {
    has_any_role(user_roles, STORY_MANAGERS)
}

pub fn can_estimate_stories<S: AsRef<str>>(user_roles: &[S]) -> bool {
    has_any_role(user_roles, ESTIMATORS)
}

/// Move stories between board columns
pub fn can_update_story_status<S: AsRef<str>>(user_roles: &[S]) -> bool {
    has_any_role(user_roles, STATUS_UPDATERS)
}

pub fn can_mark_sprint_ready<S: AsRef<str>>(user_roles: &[S]) -> bool {
    has_any_role(user_roles, SPRINT_READY_MARKERS)
}

pub fn can_link_to_release_plan<S: AsRef<str>>(user_roles: &[S]) -> bool {
    has_any_role(user_roles, RELEASE_LINKERS)
}
