#![allow(dead_code)]

pub mod mock_data;
pub mod mock_gateway;
pub mod mock_server;

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

use sprintboard::config::{CONFIG_DIR_ENV, SERVER_URL_ENV, SESSION_ENV};

/// Helper struct to run sprintboard commands against an isolated config directory
pub struct SprintboardTest {
    pub temp_dir: TempDir,
    binary_path: String,
    server_url: Option<String>,
}

impl SprintboardTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        SprintboardTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_sprintboard").to_string(),
            server_url: None,
        }
    }

    /// Point every command at `url` through the environment override
    pub fn with_server(mut self, url: &str) -> Self {
        self.server_url = Some(url.to_string());
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env(CONFIG_DIR_ENV, self.temp_dir.path())
            .env_remove(SESSION_ENV)
            .env_remove(SERVER_URL_ENV)
            .env_remove("RUST_LOG");
        if let Some(url) = &self.server_url {
            command.env(SERVER_URL_ENV, url);
        }
        command.output().expect("Failed to execute sprintboard command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded\nstdout: {}",
            args,
            String::from_utf8_lossy(&output.stdout)
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        let path = self.temp_dir.path().join("config.yaml");
        fs::write(path, content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> String {
        let path = self.temp_dir.path().join("config.yaml");
        fs::read_to_string(path).expect("Failed to read config file")
    }
}
