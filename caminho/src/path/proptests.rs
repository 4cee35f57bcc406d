//! Property-based tests for path handling.
//!
//! Note: The normalize module already has POSIX property tests. This module
//! covers the other families and the validation pipeline.

use std::sync::Arc;

use proptest::prelude::*;

use super::normalize::PathNormalizer;
use super::permission::PermissionChecker;
use super::platform::Platform;
use super::probe::MockMetadataProbe;
use super::types::{PathKind, PermissionState, RawInput};
use super::validator::PathValidator;
use crate::error::PathError;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-zA-Z0-9_-]{1,12}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
        1 => Just(String::new()),
    ]
}

fn windows_path_strategy() -> impl Strategy<Value = String> {
    (
        "[a-zA-Z]",
        prop::collection::vec(segment_strategy(), 0..6),
        prop::bool::ANY,
    )
        .prop_map(|(drive, parts, forward)| {
            let sep = if forward { "/" } else { "\\" };
            format!("{drive}:{sep}{}", parts.join(sep))
        })
}

fn verbatim_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![
            Just(r"\\?\"),
            Just(r"\\.\"),
            Just("//?/"),
            Just("//./"),
            Just("//?/UNC/"),
            Just(r"\\?\UNC\"),
        ],
        prop_oneof![windows_path_strategy(), unc_strategy().prop_map(|p| p[2..].to_string())],
    )
        .prop_map(|(prefix, rest)| format!("{prefix}{rest}"))
}

fn unc_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z]{1,8}",
        "[a-z]{1,8}",
        prop::collection::vec(segment_strategy(), 0..5),
    )
        .prop_map(|(host, share, parts)| format!(r"\\{host}\{share}\{}", parts.join("\\")))
}

fn uri_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("smb"), Just("nfs"), Just("https")],
        "[a-z]{1,8}(\\.[a-z]{2,3})?",
        prop::collection::vec(segment_strategy(), 0..5),
    )
        .prop_map(|(scheme, host, parts)| format!("{scheme}://{host}/{}", parts.join("/")))
}

fn whitespace_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n'), Just('\r')], 0..10)
        .prop_map(|chars| chars.into_iter().collect())
}

fn posix() -> PathNormalizer {
    PathNormalizer::new(Platform::Posix)
        .with_working_dir("/base")
        .with_home_dir("/home/u")
}

fn windows() -> PathNormalizer {
    PathNormalizer::new(Platform::Windows)
        .with_working_dir(r"C:\base")
        .with_home_dir(r"C:\Users\u")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Normalization is idempotent: normalize(normalize(p)) == normalize(p)
    #[test]
    fn windows_normalization_idempotent(path in windows_path_strategy()) {
        if let Ok(once) = windows().normalize_str(&path) {
            let twice = windows().normalize_str(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn windows_verbatim_normalization_idempotent(path in verbatim_strategy()) {
        if let Ok(once) = windows().normalize_str(&path) {
            let twice = windows().normalize_str(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    // Normalized Windows paths use one separator and an upper-case drive
    #[test]
    fn windows_normalized_form(path in windows_path_strategy()) {
        if let Ok(normalized) = windows().normalize_str(&path) {
            let text = normalized.as_str();
            prop_assert!(!text.contains('/'));
            prop_assert!(text.starts_with(|c: char| c.is_ascii_uppercase()));
            prop_assert!(!text[2..].contains(r"\\"));
        }
    }

    #[test]
    fn unc_normalization_idempotent(path in unc_strategy()) {
        for normalizer in [posix(), windows()] {
            let once = normalizer.normalize_str(&path).unwrap();
            let twice = normalizer.normalize_str(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn uri_normalization_idempotent(path in uri_strategy()) {
        let once = posix().normalize_str(&path).unwrap();
        let twice = posix().normalize_str(once.as_str()).unwrap();
        prop_assert!(!once.as_str().ends_with('/'));
        prop_assert_eq!(once, twice);
    }

    // Network paths never reach the filesystem
    #[test]
    fn network_paths_never_probed(path in prop_oneof![unc_strategy(), uri_strategy()]) {
        let probe = Arc::new(MockMetadataProbe::new());
        let validator = PathValidator::with_parts(posix(), Arc::clone(&probe));
        let run = validator.run(&RawInput::from(path.as_str()), &mut PermissionChecker::new());

        prop_assert_eq!(run.kind(), PathKind::NetworkShare);
        prop_assert_eq!(probe.total_queries(), 0);
    }

    // Blank input is Empty and never reaches the filesystem
    #[test]
    fn blank_input_is_empty(blank in whitespace_strategy()) {
        let probe = Arc::new(MockMetadataProbe::new());
        let validator = PathValidator::with_parts(posix(), Arc::clone(&probe));
        let run = validator.run(&RawInput::from(blank.as_str()), &mut PermissionChecker::new());

        prop_assert_eq!(run.error(), Some(&PathError::Empty));
        prop_assert_eq!(probe.total_queries(), 0);
    }

    // Registered files classify as files whatever the spelling of the input
    #[test]
    fn files_classify_as_files(name in "[a-z]{1,10}", dots in 0usize..3) {
        let file = format!("/base/{name}.txt");
        let probe = Arc::new(MockMetadataProbe::new().with_file(file.as_str(), PermissionState::FULL));
        let validator = PathValidator::with_parts(posix(), Arc::clone(&probe));

        let input = format!("{}{name}.txt", "./".repeat(dots));
        let path = validator.validate(input).unwrap();
        prop_assert_eq!(path.kind(), PathKind::File);
        prop_assert_eq!(path.normalized().as_str(), file.as_str());
    }
}
