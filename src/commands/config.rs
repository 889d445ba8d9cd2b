//! Configuration commands for managing sprintboard settings.
//!
//! - `config set`: Set a configuration value
//! - `config get`: Read a single value
//! - `config show`: Display current configuration

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{Config, VALID_KEYS};
use crate::error::{Result, SprintboardError};

/// Reject underscore spellings with a dot notation suggestion
fn validate_config_key(key: &str) -> Result<&str> {
    if VALID_KEYS.contains(&key) {
        return Ok(key);
    }

    // Only the first underscore maps to a dot (server_url -> server.url)
    if let Some(pos) = key.find('_') {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        if VALID_KEYS.contains(&dot_version.as_str()) {
            return Err(SprintboardError::Config(format!(
                "invalid config key '{key}'. Use dot notation: '{dot_version}'"
            )));
        }
    }
    Ok(key)
}

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;
    let session_configured = config.session_cookie().is_some();

    let json_output = json!({
        "server_url": config.server_url(),
        "default_project": config.default_project,
        "auth": {
            "session_configured": session_configured,
        },
        "toast_seconds": config.toast_seconds,
        "remote_timeout": config.remote_timeout,
        "config_file": config_path.to_string_lossy(),
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text_output.push_str(&format!("{}: {}\n", "server.url".cyan(), config.server_url()));
    match config.default_project {
        Some(project) => {
            text_output.push_str(&format!("{}: {}\n", "project.default".cyan(), project))
        }
        None => text_output.push_str(&format!(
            "{}: {}\n",
            "project.default".cyan(),
            "not configured".dimmed()
        )),
    }

    // Never print the cookie itself
    let session_status = match config.session_cookie() {
        Some(cookie) => format!("{} ({})", "configured".green(), mask_sensitive_value(&cookie)),
        None => "not configured".dimmed().to_string(),
    };
    text_output.push_str(&format!("{}: {}\n", "session.cookie".cyan(), session_status));

    text_output.push_str(&format!(
        "{}: {}\n",
        "toast.seconds".cyan(),
        config.toast_seconds
    ));
    let timeout = match config.remote_timeout {
        Some(seconds) => format!("{seconds}s"),
        None => "none".dimmed().to_string(),
    };
    text_output.push_str(&format!("{}: {}\n", "remote.timeout".cyan(), timeout));

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", config_path.display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output_json)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output_json: bool) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    tracing::debug!(key, "config updated");

    let shown = if key == "session.cookie" {
        mask_sensitive_value(value)
    } else {
        value.to_string()
    };

    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": shown,
        "success": true,
    }))
    .with_text(format!("Set {} = {}", key.cyan(), shown))
    .print(output_json)
}

/// Get a configuration value
pub fn cmd_config_get(key: &str, output_json: bool) -> Result<()> {
    validate_config_key(key)?;

    let config = Config::load()?;
    let value = match key {
        "session.cookie" => config.session_cookie().map(|c| mask_sensitive_value(&c)),
        _ => config.get(key)?,
    }
    .ok_or_else(|| SprintboardError::Config(format!("{key} not set")))?;

    CommandOutput::new(json!({
        "key": key,
        "value": value,
    }))
    .with_text(value.clone())
    .print(output_json)
}
