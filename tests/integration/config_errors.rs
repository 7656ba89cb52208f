use std::fs;

use tempfile::TempDir;
use ttmaker::error::ApiError;
use ttmaker::tooling::cli::Commands;

use crate::integration::support::{context, generate, write_config};

fn config_error(yaml: &str) -> String {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "bad.yaml", yaml);
    let root = temp.path().join("out");

    match generate(vec![config], Some(root.clone()), 1, "text") {
        Err(ApiError::ConfigError(msg)) => {
            assert!(!root.exists(), "output root created for a bad config");
            msg
        }
        other => panic!("expected a configuration error, got {:?}", other.map(|r| r.1)),
    }
}

#[test]
fn missing_size_is_rejected() {
    let msg = config_error("nosize:\n  number: 2\n");
    assert!(msg.contains("nosize"), "{}", msg);
    assert!(msg.contains("size"), "{}", msg);
}

#[test]
fn bad_size_string_is_rejected() {
    let msg = config_error("a:\n  size: 12q\n");
    assert!(msg.contains("[a]"), "{}", msg);
}

#[test]
fn unknown_field_is_rejected() {
    config_error("a:\n  size: 1\n  colour: blue\n");
}

#[test]
fn empty_configuration_is_rejected() {
    config_error("");
}

#[test]
fn duplicate_subdirectory_across_files_is_rejected() {
    let temp = TempDir::new().unwrap();
    let first = write_config(temp.path(), "first.yaml", "same:\n  size: 1\n");
    let second = write_config(temp.path(), "second.yaml", "same:\n  size: 2\n");

    let err = generate(vec![first, second], None, 1, "text").unwrap_err();
    match err {
        ApiError::ConfigError(msg) => assert!(msg.contains("same"), "{}", msg),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn missing_config_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let err = generate(vec![temp.path().join("absent.yaml")], None, 1, "text").unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn existing_output_root_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "c.yaml", "a:\n  size: 1\n");
    let root = temp.path().join("out");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("keep"), b"keep").unwrap();

    let err = generate(vec![config], Some(root.clone()), 1, "text").unwrap_err();
    assert!(matches!(err, ApiError::OutputConflict(_)));
    assert_eq!(fs::read_dir(&root).unwrap().count(), 1);
}

#[test]
fn totals_past_u64_rejected_by_validate() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "big.yaml", "big:\n  size: 16000000T\n  number: 2\n");

    let err = context()
        .execute(
            &Commands::Validate {
                configs: vec![config],
                format: "json".to_string(),
            },
            &mut Vec::new(),
        )
        .unwrap_err();
    match err {
        ApiError::ConfigError(msg) => assert!(msg.contains("Total size too large"), "{}", msg),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn totals_past_u64_rejected_by_dry_run() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "big.yaml", "big:\n  size: 16000000T\n  number: 2\n");

    let err = generate(vec![config], None, 1, "text").unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn equivalent_subdir_spellings_collide() {
    let msg = config_error("a:\n  size: 1\na/:\n  size: 1\n");
    assert!(msg.contains("Duplicate key"), "{}", msg);
}
