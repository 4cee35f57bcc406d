//! Build script for caminho-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep this structure synchronized with src/cli.rs.
fn build_cli() -> Command {
    Command::new("caminho")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Validate, normalize and classify paths")
        .long_about(
            "Command-line tool that validates filesystem paths and network locations, \
             normalizes them and reports kind, existence and permissions",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Read the user configuration from this directory")
                .value_name("PATH")
                .global(true)
                .env("CAMINHO_CONFIG_DIR"),
        )
        .arg(
            Arg::new("platform")
                .long("platform")
                .help("Path syntax rules to apply")
                .value_parser(["auto", "posix", "windows"])
                .global(true),
        )
        .subcommands(vec![
            Command::new("check")
                .about("Validate paths and print what was observed")
                .long_about(
                    "Run each path through normalization, existence, permission and \
                     classification checks and print its mapping",
                ),
            Command::new("normalize")
                .about("Print normalized forms without touching the filesystem")
                .long_about("Print the absolute, separator-canonical form of each path"),
            Command::new("classify")
                .about("Print the kind of a path")
                .long_about("Print the kind label: arquivo, diretório, link simbólico, ..."),
            Command::new("check-json")
                .about("Validate one JSON value per line of standard input")
                .long_about("Print one compact mapping or error object per input line"),
            Command::new("validate-config")
                .about("Validate a configuration file")
                .long_about("Check a caminho configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("caminho.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
