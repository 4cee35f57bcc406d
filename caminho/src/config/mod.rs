//! Configuration system for caminho.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `caminho.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of values the schema types cannot constrain
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (CAMINHO_*)
//! 3. Project config (nearest `caminho.yaml`)
//! 4. User config (`~/.caminho/config.yaml`)
//! 5. Built-in defaults
//!
//! `allowed_schemes` is the exception: lists from every source are combined.
//!
//! # Examples
//!
//! Basic usage with defaults:
//!
//! ```no_run
//! use caminho::config::ConfigBuilder;
//! use caminho::path::PathValidator;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let validator = PathValidator::from_config(&config).unwrap();
//! ```
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use caminho::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, PlatformSetting};
pub use validator::ConfigValidator;
