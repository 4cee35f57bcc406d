//! Layered configuration assembly.

use std::env;
use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from files, environment and overrides.
///
/// # Examples
///
/// ```
/// use caminho::config::{Config, ConfigBuilder};
/// use caminho::path::LinkMode;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         link_mode: Some(LinkMode::NoFollow),
///         ..Config::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.link_mode, Some(LinkMode::NoFollow));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_dir: Option<PathBuf>,
    overrides: Vec<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Create a builder that loads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the project config search from `dir` instead of the current
    /// directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Read the user config from `dir/config.yaml` instead of
    /// `~/.caminho/config.yaml`.
    #[must_use]
    pub fn with_config_dir(mut self, dir: &Path) -> Self {
        self.config_dir = Some(dir.to_path_buf());
        self
    }

    /// Apply `config` on top of every other source. Later overrides win.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Do not read configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not read CAMINHO_* environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Load, merge and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is invalid, or the merged configuration fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.config_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config)?;
            }
            ConfigMerger::merge(sources)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for custom in &self.overrides {
            ConfigMerger::merge_into(&mut config, custom);
        }

        ConfigValidator::validate(&config)?;
        log::debug!("effective configuration: {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::PROJECT_CONFIG_FILE;
    use crate::config::PlatformSetting;
    use crate::error::Error;
    use crate::output::OutputFormat;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_build_layers_files() {
        let config_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            config_dir.path().join("config.yaml"),
            "output_format: human\nexpand_home: false\nallowed_schemes: [smb]\n",
        )
        .unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "expand_home: true\nallowed_schemes: [nfs]\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_config_dir(config_dir.path())
            .with_working_dir(project.path())
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.output_format, Some(OutputFormat::Human));
        assert_eq!(config.expand_home, Some(true));
        assert_eq!(
            config.allowed_schemes,
            Some(vec!["smb".to_string(), "nfs".to_string()])
        );
    }

    #[test]
    fn test_overrides_win() {
        let config = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                platform: Some(PlatformSetting::Posix),
                ..Config::default()
            })
            .with_config(Config {
                platform: Some(PlatformSetting::Windows),
                ..Config::default()
            })
            .build()
            .unwrap();

        assert_eq!(config.platform, Some(PlatformSetting::Windows));
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let config_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(config_dir.path().join("config.yaml"), "allowed_schemes: []\n").unwrap();

        let err = ConfigBuilder::new()
            .with_config_dir(config_dir.path())
            .with_working_dir(project.path())
            .skip_env()
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_invalid_override_is_reported() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                allowed_schemes: Some(vec!["?".to_string()]),
                ..Config::default()
            })
            .build();
        assert!(result.is_err());
    }
}
