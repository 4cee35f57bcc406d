//! Check command implementation.
//!
//! This module implements the `check` command, which runs every argument
//! through the validation pipeline and prints the resulting mapping.

use crate::error::CliError;
use crate::utils::{build_validator, check_failures, load_configuration, FormatArg, GlobalOptions};
use caminho::config::Config;
use caminho::output::OutputFormatter;
use caminho::path::LinkMode;
use clap::Args;

/// Validate paths and print what was observed.
#[derive(Args)]
pub struct CheckCommand {
    /// Paths to validate
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,

    /// Report symbolic links instead of following them
    #[arg(long)]
    pub no_follow: bool,

    /// Report missing paths instead of rejecting them
    #[arg(long)]
    pub allow_missing: bool,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(
            global,
            Config {
                link_mode: self.no_follow.then_some(LinkMode::NoFollow),
                allow_missing: self.allow_missing.then_some(true),
                output_format: self.format.map(Into::into),
                ..Config::default()
            },
        )?;
        let validator = build_validator(&config)?;
        let formatter = config.output_format.unwrap_or_default().create_formatter();

        let mut failed = 0;
        for raw in &self.paths {
            match validator.validate(raw.as_str()) {
                Ok(path) => println!("{}", formatter.format(&path.to_mapping())?),
                Err(e) => {
                    failed += 1;
                    eprintln!("{raw}: {e}");
                }
            }
        }

        check_failures(failed, self.paths.len())
    }
}
