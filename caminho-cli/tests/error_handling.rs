//! Integration tests for error handling and exit codes.
//!
//! These tests verify that caminho returns appropriate exit codes:
//! - Exit code 0: Success
//! - Exit code 1: Validation failure
//! - Exit code 4: Invalid arguments
//! - Exit code 7: Configuration error
//!
//! Each test documents the expected error scenario and verifies both the
//! exit code and the error message.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// ============================================================================
// Success Cases (Exit Code 0)
// ============================================================================

/// Successful commands exit cleanly.
#[test]
fn test_success_exit_code() {
    let env = TestEnv::new();
    env.create_dir("projeto");

    env.command().args(["check", "projeto"]).assert().code(0);
    env.command().args(["normalize", "projeto"]).assert().code(0);
    env.command().args(["classify", "projeto"]).assert().code(0);
}

// ============================================================================
// Validation Failures (Exit Code 1)
// ============================================================================

/// Blank input is a validation failure, not an argument error.
#[test]
fn test_empty_path_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["check", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("path is empty"));
}

/// Escaping the root with `..` is invalid syntax.
#[test]
fn test_invalid_syntax_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["--platform", "posix", "check", "/../etc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid path syntax"));
}

/// Windows rules reject reserved characters.
#[test]
fn test_windows_reserved_character_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["--platform", "windows", "normalize", r"C:\dados\a|b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid path syntax"));
}

/// `~user` is rejected with guidance.
#[test]
fn test_tilde_user_exit_code() {
    let env = TestEnv::new();

    env.command()
        .args(["normalize", "~alguem/docs"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("~user syntax is not supported"));
}

// ============================================================================
// Invalid Arguments (Exit Code 4)
// ============================================================================

/// Validating a config file that does not exist is an argument error.
#[test]
fn test_validate_config_missing_file() {
    let env = TestEnv::new();

    env.command()
        .args(["validate-config", "nao-existe.yaml"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("File not found"));
}

/// Unknown flags are rejected by the parser.
#[test]
fn test_unknown_flag() {
    let env = TestEnv::new();

    env.command()
        .args(["check", "--bogus", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}

// ============================================================================
// Configuration Errors (Exit Code 7)
// ============================================================================

/// A malformed user config stops every command that loads configuration.
#[test]
fn test_malformed_user_config() {
    let env = TestEnv::new();
    env.write_user_config("platform: [unclosed\n");

    env.command()
        .args(["check", "."])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Configuration error"));
}

/// Unknown keys in a project config are rejected.
#[test]
fn test_unknown_project_config_key() {
    let env = TestEnv::new();
    env.create_file("caminho.yaml", "seguir_links: true\n");

    env.command()
        .args(["normalize", "x"])
        .assert()
        .code(7);
}

/// An invalid environment override is a configuration error.
#[test]
fn test_invalid_environment_value() {
    let env = TestEnv::new();

    env.command()
        .env("CAMINHO_LINK_MODE", "talvez")
        .args(["check", "."])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("CAMINHO_LINK_MODE"));
}

/// validate-config accepts a good file and rejects a bad one.
#[test]
fn test_validate_config() {
    let env = TestEnv::new();
    let good = env.create_file("bom.yaml", "platform: posix\nallowed_schemes: [smb, nfs]\n");
    let bad = env.create_file("ruim.yaml", "allowed_schemes: []\n");

    env.command()
        .arg("validate-config")
        .arg(&good)
        .assert()
        .success()
        .stdout("Configuration is valid\n");

    env.command()
        .arg("validate-config")
        .arg(&bad)
        .assert()
        .code(7)
        .stderr(predicate::str::contains("allowed_schemes"));
}
