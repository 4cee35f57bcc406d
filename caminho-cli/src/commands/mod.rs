//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `check`: Validate paths and print their mappings
//! - `normalize`: Print normalized forms
//! - `classify`: Print the kind of a path
//! - `check_json`: Validate JSON values read from standard input
//! - `validate_config`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod check_json;
pub mod classify;
pub mod completions;
pub mod normalize;
pub mod validate_config;

pub use check::CheckCommand;
pub use check_json::CheckJsonCommand;
pub use classify::ClassifyCommand;
pub use completions::CompletionsCommand;
pub use normalize::NormalizeCommand;
pub use validate_config::ValidateConfigCommand;
