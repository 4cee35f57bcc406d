//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers that isolate configuration
//! - Fixture builders for files, directories and links

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables that would leak host configuration into a test.
const CAMINHO_ENV_VARS: [&str; 8] = [
    "CAMINHO_CONFIG_DIR",
    "CAMINHO_PLATFORM",
    "CAMINHO_EXPAND_HOME",
    "CAMINHO_ALLOW_MISSING",
    "CAMINHO_LINK_MODE",
    "CAMINHO_ALLOWED_SCHEMES",
    "CAMINHO_OUTPUT_FORMAT",
    "CAMINHO_LOG_MODE",
];

/// Test environment with an isolated configuration directory.
///
/// This struct provides:
/// - A temporary working directory (links resolved) for fixtures
/// - A separate, empty user configuration directory
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the user configuration directory
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to resolve temp dir");
        let config_dir = temp_path.join(".caminho-config");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Get a command builder with no host configuration.
    ///
    /// The command runs in the temp directory with every `CAMINHO_*`
    /// variable cleared.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("caminho").expect("Failed to find caminho binary");
        for var in CAMINHO_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// Get a command builder with the config directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Absolute path of `name` inside the environment, as a string.
    pub fn path_str(&self, name: &str) -> String {
        self.temp_path.join(name).to_string_lossy().into_owned()
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Create a file in the test environment.
    pub fn create_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Create a symbolic link named `link` pointing at `target`.
    #[cfg(unix)]
    pub fn create_symlink(&self, target: &str, link: &str) -> PathBuf {
        let path = self.temp_path.join(link);
        std::os::unix::fs::symlink(self.temp_path.join(target), &path)
            .expect("Failed to create symlink");
        path
    }

    /// Write the user configuration file.
    pub fn write_user_config(&self, contents: &str) {
        std::fs::write(self.config_dir.join("config.yaml"), contents)
            .expect("Failed to write user config");
    }
}
