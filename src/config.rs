//! Client configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory (or `$SPRINTBOARD_CONFIG_DIR`) and includes:
//! - The backend base URL
//! - The default project shown by board commands
//! - The session cookie used to authenticate
//! - Notification and request timing

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SprintboardError};
use crate::types::ProjectId;

pub const CONFIG_DIR_ENV: &str = "SPRINTBOARD_CONFIG_DIR";
pub const SERVER_URL_ENV: &str = "SPRINTBOARD_SERVER_URL";
pub const SESSION_ENV: &str = "SPRINTBOARD_SESSION";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Keys accepted by `config get` / `config set`
pub const VALID_KEYS: &[&str] = &[
    "server.url",
    "project.default",
    "session.cookie",
    "toast.seconds",
    "remote.timeout",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL (default: http://localhost:8080)
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Project used when a command is not given `--project`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<ProjectId>,

    #[serde(default)]
    pub auth: AuthConfig,

    /// How long toasts stay visible, in seconds (default: 3)
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: u64,

    /// Request timeout in seconds; unset leaves requests without a deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_timeout: Option<u64>,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_toast_seconds() -> u64 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            default_project: None,
            auth: AuthConfig::default(),
            toast_seconds: default_toast_seconds(),
            remote_timeout: None,
        }
    }
}

/// Authentication configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Config {
    /// Directory holding `config.yaml`
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        ProjectDirs::from("", "", "sprintboard")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                SprintboardError::Config(format!(
                    "could not determine a config directory; set {CONFIG_DIR_ENV}"
                ))
            })
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            SprintboardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SprintboardError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            SprintboardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only: the file may hold a session cookie
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&path, permissions).map_err(|e| {
                SprintboardError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to set permissions on config at {}: {}",
                        path.display(),
                        e
                    ),
                ))
            })?;
        }

        Ok(())
    }

    /// Server URL from environment variable or config file
    pub fn server_url(&self) -> String {
        if let Ok(url) = env::var(SERVER_URL_ENV)
            && !url.is_empty()
        {
            return url;
        }
        self.server_url.clone()
    }

    /// Session cookie from environment variable or config file
    pub fn session_cookie(&self) -> Option<String> {
        if let Ok(session) = env::var(SESSION_ENV)
            && !session.is_empty()
        {
            return Some(session);
        }
        self.auth.session_cookie.clone()
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }

    pub fn remote_timeout(&self) -> Option<Duration> {
        self.remote_timeout.map(Duration::from_secs)
    }

    /// Resolve the project for a command, preferring the explicit argument
    pub fn project_or_default(&self, explicit: Option<u64>) -> Result<ProjectId> {
        explicit
            .map(ProjectId)
            .or(self.default_project)
            .ok_or_else(|| {
                SprintboardError::Config(
                    "no project given. Pass --project <id> or run: sprintboard config set project.default <id>"
                        .to_string(),
                )
            })
    }

    /// Read a value by dotted key; `None` when unset
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "server.url" => Ok(Some(self.server_url.clone())),
            "project.default" => Ok(self.default_project.map(|p| p.to_string())),
            "session.cookie" => Ok(self
                .auth
                .session_cookie
                .as_ref()
                .map(|_| "[REDACTED]".to_string())),
            "toast.seconds" => Ok(Some(self.toast_seconds.to_string())),
            "remote.timeout" => Ok(self.remote_timeout.map(|s| s.to_string())),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server.url" => {
                url::Url::parse(value)?;
                self.server_url = value.trim_end_matches('/').to_string();
            }
            "project.default" => {
                self.default_project = Some(ProjectId(parse_number(key, value)?));
            }
            "session.cookie" => {
                self.auth.session_cookie = Some(value.to_string());
            }
            "toast.seconds" => {
                self.toast_seconds = parse_number(key, value)?;
            }
            "remote.timeout" => {
                let seconds = parse_number(key, value)?;
                if seconds == 0 {
                    return Err(SprintboardError::Config(
                        "remote.timeout must be at least 1 second".to_string(),
                    ));
                }
                self.remote_timeout = Some(seconds);
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|_| {
        SprintboardError::Config(format!("{key} expects a non-negative number, got '{value}'"))
    })
}

fn unknown_key(key: &str) -> SprintboardError {
    SprintboardError::Config(format!(
        "unknown config key '{}'. Valid keys: {}",
        key,
        VALID_KEYS.join(", ")
    ))
}
