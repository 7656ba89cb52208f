use std::fs;

use tempfile::TempDir;
use ttmaker::tooling::cli::Commands;

use crate::integration::support::{context, generate, list_files, write_config};

const MIXED: &str = "\
small:
  size: [1k, 10]
  number: [2, 3]
texty:
  size: 100
  base64: true
  pathdepth: 3
  pathnamelen: 20
";

#[test]
fn generate_writes_every_reported_file_with_its_size() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "mixed.yaml", MIXED);
    let root = temp.path().join("out");

    let (report, _) = generate(vec![config], Some(root.clone()), 4, "text").unwrap();

    let reported: Vec<&str> = report.lines().collect();
    assert_eq!(reported.len(), 2 * (2 + 3) + 1);

    let files = list_files(&root);
    assert_eq!(files.len(), reported.len());
    for (path, size) in &files {
        assert!(reported.contains(&path.as_str()), "unreported file {}", path);
        let expected = if path.contains("size_1k_") {
            1024
        } else if path.contains("size_10_") {
            10
        } else {
            100
        };
        assert_eq!(*size, expected, "{}", path);
    }
}

#[test]
fn report_follows_configuration_order() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "mixed.yaml", MIXED);

    let (report, _) = generate(vec![config], None, 1, "text").unwrap();
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines[0], "small/size_1k_files_2/size_1k_0000.dat");
    assert_eq!(lines[1], "small/size_1k_files_2/size_1k_0001.dat");
    assert_eq!(lines[2], "small/size_1k_files_3/size_1k_0000.dat");
    assert_eq!(lines[5], "small/size_10_files_2/size_10_0000.dat");
    assert_eq!(
        lines[10],
        "texty/size_100_files_1/subdir_1_paddingPADD/subdir_2_paddingPADD/size_100_0000_pa.txt"
    );
}

#[test]
fn text_mode_files_are_base64_lines() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        "text.yaml",
        "lines:\n  size: 1000\n  base64: true\n",
    );
    let root = temp.path().join("out");
    generate(vec![config], Some(root.clone()), 1, "text").unwrap();

    let body = fs::read_to_string(root.join("lines/size_1000_files_1/size_1000_0000.txt")).unwrap();
    assert_eq!(body.len(), 1000);
    assert!(body.ends_with('\n'));
    for line in body.lines() {
        assert!(line.len() <= 32);
        assert!(line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/'));
    }
}

#[test]
fn dry_run_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "mixed.yaml", MIXED);

    let (report, summary) = generate(vec![config], None, 2, "json").unwrap();
    assert_eq!(report.lines().count(), 11);
    assert_eq!(list_files(temp.path()).len(), 1);

    let parsed: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(parsed["written"].as_bool(), Some(false));
    assert!(parsed["output_root"].is_null());
}

#[test]
fn generate_json_summary_has_totals() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "mixed.yaml", MIXED);
    let root = temp.path().join("out");

    let (_, summary) = generate(vec![config], Some(root), 2, "json").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&summary).unwrap();

    assert_eq!(parsed["total_files"].as_u64(), Some(11));
    assert_eq!(parsed["total_bytes"].as_u64(), Some(5 * 1024 + 5 * 10 + 100));
    assert_eq!(parsed["written"].as_bool(), Some(true));
    assert_eq!(parsed["cancelled"].as_bool(), Some(false));
    let subdirs = parsed["subdirs"].as_array().unwrap();
    assert_eq!(subdirs[0]["subdir"].as_str(), Some("small"));
    assert_eq!(subdirs[1]["subdir"].as_str(), Some("texty"));
}

#[test]
fn quiet_generate_reports_nothing_per_file() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "q.yaml", "q:\n  size: 1\n  number: 4\n");
    let root = temp.path().join("out");

    let mut report = Vec::new();
    let summary = context()
        .execute(
            &Commands::Generate {
                configs: vec![config],
                outdir: Some(root.clone()),
                jobs: Some(2),
                quiet: true,
                format: "text".to_string(),
            },
            &mut report,
        )
        .unwrap();

    assert!(report.is_empty());
    assert!(summary.contains("total"));
    assert_eq!(list_files(&root).len(), 4);
}

#[test]
fn validate_reports_planned_totals_without_touching_disk() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "mixed.yaml", MIXED);

    let output = context()
        .execute(
            &Commands::Validate {
                configs: vec![config],
                format: "json".to_string(),
            },
            &mut Vec::new(),
        )
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["total_files"].as_u64(), Some(11));
    assert_eq!(list_files(temp.path()).len(), 1);
}
