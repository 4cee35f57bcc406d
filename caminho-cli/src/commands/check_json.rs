//! Command to validate JSON values read from standard input.
//!
//! Each non-blank line holds one JSON value. Strings are validated as paths;
//! every other value fails with a wrong-type error, which is how callers that
//! pass dynamically-typed data reach the typed pipeline. One compact line is
//! printed per input line: the mapping on success, an error object otherwise.

use crate::error::CliError;
use crate::utils::{build_validator, check_failures, load_configuration, GlobalOptions};
use caminho::config::Config;
use caminho::output::PathSerializer;
use caminho::path::{MetadataProbe, PathValidator};
use caminho::RawInput;
use clap::Args;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

/// Validate one JSON value per line of standard input.
#[derive(Args)]
pub struct CheckJsonCommand {
    /// Report missing paths instead of rejecting them
    #[arg(long)]
    pub allow_missing: bool,
}

impl CheckJsonCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(
            global,
            Config {
                allow_missing: self.allow_missing.then_some(true),
                ..Config::default()
            },
        )?;
        let validator = build_validator(&config)?;

        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut out = stdout.lock();

        let mut total = 0;
        let mut failed = 0;
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            total += 1;

            let (text, ok) = check_line(&validator, &line)?;
            if !ok {
                failed += 1;
            }
            writeln!(out, "{text}")?;
        }
        out.flush()?;

        check_failures(failed, total)
    }
}

/// Validate one input line, returning the line to print and whether the
/// value was valid.
pub fn check_line<P: MetadataProbe + Clone>(
    validator: &PathValidator<P>,
    line: &str,
) -> Result<(String, bool), CliError> {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("rejecting malformed JSON line: {e}");
            let error = json!({
                "entrada": line,
                "erro": "invalid_json",
                "mensagem": e.to_string(),
            });
            return Ok((error.to_string(), false));
        }
    };

    match validator.validate(RawInput::from(&value)) {
        Ok(path) => Ok((PathSerializer::mapping_to_compact(&path.to_mapping())?, true)),
        Err(e) => {
            let error = json!({
                "entrada": value,
                "erro": e.code(),
                "mensagem": e.to_string(),
            });
            Ok((error.to_string(), false))
        }
    }
}
