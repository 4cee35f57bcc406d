//! Command to print the kind of a path.

use crate::error::CliError;
use crate::utils::{build_validator, load_configuration, GlobalOptions};
use caminho::config::Config;
use caminho::path::{LinkMode, PermissionChecker};
use caminho::RawInput;
use clap::Args;

/// Print the kind label of a path.
///
/// A path that fails validation prints `inválido` and exits with status 1.
#[derive(Args)]
pub struct ClassifyCommand {
    /// Path to classify
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Report symbolic links instead of following them
    #[arg(long)]
    pub no_follow: bool,
}

impl ClassifyCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(
            global,
            Config {
                link_mode: self.no_follow.then_some(LinkMode::NoFollow),
                ..Config::default()
            },
        )?;
        let validator = build_validator(&config)?;

        let run = validator.run(&RawInput::from(self.path.as_str()), &mut PermissionChecker::new());
        println!("{}", run.kind());

        match run.error() {
            Some(e) => Err(CliError::SemanticFailure(format!("{}: {e}", self.path))),
            None => Ok(()),
        }
    }
}
