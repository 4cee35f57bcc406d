//! Integration tests for path validation against a real filesystem.
//!
//! These tests exercise the whole pipeline (normalization, existence,
//! permission and classification) on fixtures created in a temporary
//! directory.

mod common;

use caminho::path::{LinkMode, PathNormalizer, PathValidator, SystemMetadataProbe, ValidationState};
use caminho::{Existence, PathError, PathKind, Platform, RawInput, ValidatedPath};
use common::Sandbox;

// ============================================================================
// Existing entities
// ============================================================================

#[test]
fn test_regular_file() {
    let sandbox = Sandbox::new();
    let file = sandbox.file("relatorio.txt");

    let path = sandbox.validator().validate(file.as_str()).unwrap();

    assert_eq!(path.normalized().as_str(), file);
    assert_eq!(path.kind(), PathKind::File);
    assert_eq!(path.existence(), Existence::Present);
    assert!(path.exists());
    assert_eq!(path.canonical(), file);
    assert_eq!(path.file_name(), Some("relatorio.txt"));
    assert_eq!(path.extension(), Some("txt"));
}

#[test]
fn test_directory() {
    let sandbox = Sandbox::new();
    let dir = sandbox.dir("projetos");

    let path = sandbox.validator().validate(dir.as_str()).unwrap();

    assert_eq!(path.kind(), PathKind::Directory);
    assert!(path.exists());
    assert_eq!(path.parent().as_deref(), sandbox.root().to_str());
}

#[test]
fn test_relative_input_resolves_against_working_dir() {
    let sandbox = Sandbox::new();
    let file = sandbox.file("docs/guia.md");
    sandbox.dir("outro");

    let path = sandbox
        .validator()
        .validate("outro/../docs/./guia.md")
        .unwrap();

    assert_eq!(path.normalized().as_str(), file);
    assert_eq!(path.kind(), PathKind::File);
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let sandbox = Sandbox::new();
    let file = sandbox.file("espacos.txt");

    let path = sandbox
        .validator()
        .validate(format!("  {file}\t\n"))
        .unwrap();

    assert_eq!(path.normalized().as_str(), file);
}

#[cfg(unix)]
#[test]
fn test_home_expansion() {
    let sandbox = Sandbox::new();
    let file = sandbox.file("notas/hoje.md");

    let path = sandbox.validator().validate("~/notas/hoje.md").unwrap();
    assert_eq!(path.normalized().as_str(), file);
}

#[test]
fn test_pipeline_states_for_existing_path() {
    let sandbox = Sandbox::new();
    let dir = sandbox.dir("estados");

    let run = sandbox
        .validator()
        .run(&RawInput::from(dir.as_str()), &mut Default::default());

    assert_eq!(
        run.states(),
        &[
            ValidationState::Unvalidated,
            ValidationState::Normalizing,
            ValidationState::CheckingExistence,
            ValidationState::CheckingPermission,
            ValidationState::Classifying,
            ValidationState::Valid,
        ]
    );
}

// ============================================================================
// Missing paths
// ============================================================================

#[test]
fn test_missing_path_is_rejected() {
    let sandbox = Sandbox::new();
    let missing = sandbox.path("nao/existe.txt");

    let err = sandbox.validator().validate(missing.as_str()).unwrap_err();
    assert_eq!(err, PathError::NotFound { path: missing });
}

#[test]
fn test_missing_path_allowed() {
    let sandbox = Sandbox::new();
    let missing = sandbox.path("futuro.log");

    let mut path = sandbox
        .validator()
        .with_missing_allowed(true)
        .validate(missing.as_str())
        .unwrap();

    assert_eq!(path.existence(), Existence::Absent);
    assert!(!path.exists());
    assert_eq!(path.kind(), PathKind::Unknown);
    assert!(!path.permissions().any());
    assert_eq!(path.canonical(), missing);
}

#[test]
fn test_missing_path_appears_after_revalidate() {
    let sandbox = Sandbox::new();
    let missing = sandbox.path("depois.txt");

    let mut path = sandbox
        .validator()
        .with_missing_allowed(true)
        .validate(missing.as_str())
        .unwrap();
    assert!(!path.exists());

    sandbox.file("depois.txt");
    path.revalidate().unwrap();
    assert!(path.exists());
    assert_eq!(path.kind(), PathKind::File);
}

#[test]
fn test_failed_reassignment_keeps_previous_state() {
    let sandbox = Sandbox::new();
    let dir = sandbox.dir("fica");

    let mut path = sandbox.validator().validate(dir.as_str()).unwrap();
    let err = path.set_raw(sandbox.path("sumiu")).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(path.last_error(), Some(&err));
    assert_eq!(path.normalized().as_str(), dir);
    assert_eq!(path.kind(), PathKind::Directory);
}

// ============================================================================
// Symbolic links
// ============================================================================

#[cfg(unix)]
#[test]
fn test_symlink_followed_by_default() {
    let sandbox = Sandbox::new();
    let target = sandbox.file("alvo.txt");
    let link = sandbox.symlink("alvo.txt", "atalho");

    let path = sandbox.validator().validate(link.as_str()).unwrap();

    assert_eq!(path.normalized().as_str(), link);
    assert_eq!(path.kind(), PathKind::File);
    assert_eq!(path.canonical(), target);
    assert_eq!(path.classify(LinkMode::NoFollow), PathKind::Symlink);
}

#[cfg(unix)]
#[test]
fn test_symlink_without_following() {
    let sandbox = Sandbox::new();
    sandbox.dir("pasta");
    let link = sandbox.symlink("pasta", "link-pasta");

    let path = sandbox
        .validator()
        .with_link_mode(LinkMode::NoFollow)
        .validate(link.as_str())
        .unwrap();

    assert_eq!(path.kind(), PathKind::Symlink);
    assert_eq!(path.classify(LinkMode::Follow), PathKind::Directory);
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_not_found() {
    let sandbox = Sandbox::new();
    let link = sandbox.symlink("ninguem", "quebrado");

    let err = sandbox.validator().validate(link.as_str()).unwrap_err();
    assert!(err.is_not_found());
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_is_not_found() {
    let sandbox = Sandbox::new();
    sandbox.symlink("b", "a");
    let a = sandbox.symlink("a", "b");

    let err = sandbox.validator().validate(a.as_str()).unwrap_err();
    assert!(err.is_not_found());
}

#[cfg(unix)]
#[test]
fn test_dot_dot_is_lexical() {
    let sandbox = Sandbox::new();
    sandbox.dir("real/fundo");
    sandbox.symlink("real/fundo", "atalho");
    let sibling = sandbox.file("irmao.txt");

    // `atalho/..` is resolved before the filesystem is asked, so it names the
    // sandbox root, not `real`.
    let path = sandbox
        .validator()
        .validate(format!("{}/atalho/../irmao.txt", sandbox.root().display()))
        .unwrap();

    assert_eq!(path.normalized().as_str(), sibling);
}

// ============================================================================
// Permissions
// ============================================================================

#[cfg(unix)]
#[test]
fn test_unreadable_unwritable_file_is_rejected() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    if common::running_as_root() {
        eprintln!("skipping: root bypasses permission bits");
        return;
    }

    let sandbox = Sandbox::new();
    let file = sandbox.file("trancado.txt");
    fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();

    let validator = sandbox.validator();
    let run = validator.run(&RawInput::from(file.as_str()), &mut Default::default());

    assert_eq!(
        run.error(),
        Some(&PathError::PermissionDenied { path: file.clone() })
    );
    assert_eq!(
        run.states()[run.states().len() - 2],
        ValidationState::CheckingPermission
    );

    fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_read_only_file_is_valid_without_full_permission() {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    if common::running_as_root() {
        eprintln!("skipping: root bypasses permission bits");
        return;
    }

    let sandbox = Sandbox::new();
    let file = sandbox.file("leitura.txt");
    fs::set_permissions(&file, fs::Permissions::from_mode(0o444)).unwrap();

    let mut path = sandbox.validator().validate(file.as_str()).unwrap();
    let permissions = path.permissions();

    assert!(permissions.readable);
    assert!(!permissions.writable);
    assert!(!path.to_mapping().permissao);
}

#[test]
fn test_writable_file_has_full_permission() {
    let sandbox = Sandbox::new();
    let file = sandbox.file("livre.txt");

    let mut path = sandbox.validator().validate(file.as_str()).unwrap();
    assert!(path.permissions().granted());
    assert_eq!(path.permission_cache().queries(), 1);
}

// ============================================================================
// Rejected input
// ============================================================================

#[test]
fn test_blank_input() {
    let sandbox = Sandbox::new();
    for input in ["", "   ", "\t\n"] {
        let err = sandbox.validator().validate(input).unwrap_err();
        assert_eq!(err, PathError::Empty, "input {input:?}");
    }
}

#[test]
fn test_non_text_input() {
    let sandbox = Sandbox::new();
    let cases = [
        (serde_json::json!(12345), "number"),
        (serde_json::json!(null), "null"),
        (serde_json::json!(["/tmp"]), "array"),
        (serde_json::json!({"caminho": "/tmp"}), "object"),
        (serde_json::json!(true), "boolean"),
    ];

    for (value, found) in cases {
        let err = sandbox.validator().validate(&value).unwrap_err();
        assert_eq!(
            err,
            PathError::WrongType {
                found: found.to_string()
            }
        );
    }
}

#[test]
fn test_nul_byte_is_invalid_syntax() {
    let sandbox = Sandbox::new();
    let err = sandbox.validator().validate("/tmp/a\0b").unwrap_err();
    assert_eq!(err.code(), "invalid_syntax");
}

// ============================================================================
// Network locations
// ============================================================================

#[test]
fn test_network_locations_skip_the_filesystem() {
    let validator = PathValidator::with_parts(
        PathNormalizer::new(Platform::Windows).with_working_dir(r"C:\Users\ana"),
        SystemMetadataProbe,
    );

    let unc = validator.validate(r"\\servidor\publico\docs").unwrap();
    assert_eq!(unc.kind(), PathKind::NetworkShare);
    assert_eq!(unc.existence(), Existence::Unknown);
    assert!(!unc.exists());

    let uri = validator.validate("smb://servidor/publico").unwrap();
    assert_eq!(uri.kind(), PathKind::NetworkShare);
    assert_eq!(uri.to_mapping().normalizado, uri.normalized().as_str());
}

// ============================================================================
// Convenience entry point
// ============================================================================

#[test]
fn test_validate_with_host_defaults() {
    let sandbox = Sandbox::new();
    let file = sandbox.file("atalho.txt");

    let path = caminho::validate(file.as_str()).unwrap();
    let same = ValidatedPath::new(file.as_str()).unwrap();

    assert_eq!(path, same);
    assert_eq!(path.kind(), PathKind::File);
}
