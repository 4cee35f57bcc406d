//! Command to print normalized paths.

use crate::error::CliError;
use crate::utils::{build_validator, check_failures, load_configuration, GlobalOptions};
use caminho::config::Config;
use clap::Args;

/// Print normalized forms without touching the filesystem.
#[derive(Args)]
pub struct NormalizeCommand {
    /// Paths to normalize
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

impl NormalizeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, Config::default())?;
        let validator = build_validator(&config)?;

        let mut failed = 0;
        for raw in &self.paths {
            match validator.normalizer().normalize_str(raw) {
                Ok(normalized) => println!("{normalized}"),
                Err(e) => {
                    failed += 1;
                    eprintln!("{raw}: {e}");
                }
            }
        }

        check_failures(failed, self.paths.len())
    }
}
