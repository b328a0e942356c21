use std::fs;

use super::helpers::{stderr, stdout, TestWorkspace};

fn lint_one(ws: &TestWorkspace, package: &std::path::Path) -> String {
    let output = ws.run(&["lint", "--package", package.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    stdout(&output)
}

#[test]
fn test_valid_package() {
    let ws = TestWorkspace::new();
    let pkg = ws.package("batch", "ACQ_1234_123456");

    let out = lint_one(&ws, &pkg);
    assert!(out.contains("Total packages ran: 1"));
    assert!(out.contains("The following 1 packages are valid: ['ACQ_1234_123456']"));
    assert!(!out.contains("invalid"));
    assert!(ws.lint_log().is_empty());
}

#[test]
fn test_wrong_case_name_is_invalid() {
    let ws = TestWorkspace::new();
    let pkg = ws.package("batch", "acq_1234_123456");

    let out = lint_one(&ws, &pkg);
    assert!(out.contains("The following 1 packages are invalid: ['acq_1234_123456']"));

    let log = ws.lint_log();
    assert!(log.contains("ERROR"));
    assert!(log.contains("acq_1234_123456 does not conform to ACQ_####_######"));
}

#[test]
fn test_nested_metadata_is_invalid() {
    let ws = TestWorkspace::new();
    let pkg = ws.package("batch", "ACQ_1234_123456");
    fs::create_dir(pkg.join("metadata/sub")).unwrap();

    let out = lint_one(&ws, &pkg);
    assert!(out.contains("packages are invalid: ['ACQ_1234_123456']"));
    assert!(ws.lint_log().contains("unexpected directory"));
}

#[test]
fn test_empty_data_folder_is_invalid() {
    let ws = TestWorkspace::new();
    let pkg = ws.package("batch", "ACQ_1234_123456");
    fs::create_dir(pkg.join("objects/data/empty_dir")).unwrap();

    let out = lint_one(&ws, &pkg);
    assert!(out.contains("packages are invalid: ['ACQ_1234_123456']"));
    assert!(ws.lint_log().contains("empty folder"));
}

#[test]
fn test_zero_byte_file_needs_review() {
    let ws = TestWorkspace::new();
    let pkg = ws.package("batch", "ACQ_1234_123456");
    fs::write(pkg.join("objects/data/file.txt"), b"").unwrap();

    let out = lint_one(&ws, &pkg);
    assert!(out.contains("The following 1 packages need review."));
    assert!(out.contains("They may be passed without change after review: ['ACQ_1234_123456']"));

    let log = ws.lint_log();
    assert!(log.contains("WARN"));
    assert!(!log.contains("ERROR"));
}

#[test]
fn test_empty_metadata_needs_review() {
    let ws = TestWorkspace::new();
    let pkg = ws.package("batch", "ACQ_1234_123456");
    fs::remove_file(pkg.join("metadata/rclone.log")).unwrap();

    let out = lint_one(&ws, &pkg);
    assert!(out.contains("packages need review."));
    assert!(ws.lint_log().contains("metadata folder does not have any files"));
}

#[test]
fn test_directory_batch_with_json_output() {
    let ws = TestWorkspace::new();
    ws.package("batch", "ACQ_0001_000001");
    let review = ws.package("batch", "ACQ_0002_000002");
    ws.write("batch/ACQ_0002_000002/objects/data/.DS_Store", b"junk");
    let invalid = ws.package("batch", "ACQ_0003_000003");
    fs::remove_file(invalid.join("objects/bagit.txt")).unwrap();
    assert!(review.is_dir());

    let output = ws.run(&["lint", "--directory", "batch", "--format", "json", "--parallel"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["valid"], serde_json::json!(["ACQ_0001_000001"]));
    assert_eq!(summary["needs_review"], serde_json::json!(["ACQ_0002_000002"]));
    assert_eq!(summary["invalid"], serde_json::json!(["ACQ_0003_000003"]));
    assert_eq!(summary["reports"][2]["verdict"], "invalid");
    assert_eq!(
        summary["reports"][2]["diagnostics"][0]["check"],
        "objects_structure"
    );
}

#[test]
fn test_log_folder_option() {
    let ws = TestWorkspace::new();
    let pkg = ws.package("batch", "bad");
    fs::create_dir(ws.path().join("logs")).unwrap();

    let output = ws.run(&["lint", "--package", pkg.to_str().unwrap(), "--log_folder", "logs"]);
    assert!(output.status.success());

    let logs: Vec<_> = fs::read_dir(ws.path().join("logs")).unwrap().collect();
    assert_eq!(logs.len(), 1);
    assert!(ws.lint_log().is_empty());
}

#[test]
fn test_fail_on_invalid_from_config() {
    let ws = TestWorkspace::new();
    let pkg = ws.package("batch", "bad");
    ws.write("package-cloud.toml", b"fail_on_invalid = true\n");

    let output = ws.run(&["lint", "--package", pkg.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("packages are invalid: ['bad']"));

    let output = ws.run(&["lint", "--package", pkg.to_str().unwrap(), "--exit-zero"]);
    assert!(output.status.success());
}

#[test]
fn test_package_then_lint() {
    let ws = TestWorkspace::new();
    ws.write("transfer/rclone_files/a.txt", b"a");
    ws.write("transfer/rclone_files/sub/b.txt", b"b");
    ws.write("transfer/rclone.log", b"transfer log");
    ws.write(
        "transfer/rclone.md5",
        b"0cc175b9c0f1b6a831c399e269772661  a.txt\n92eb5ffee6ae2fec3ad71c777531578f  sub/b.txt\n",
    );
    fs::create_dir(ws.path().join("dest")).unwrap();

    let output = ws.run(&[
        "package",
        "--payload",
        "transfer/rclone_files",
        "--md5",
        "transfer/rclone.md5",
        "--log",
        "transfer/rclone.log",
        "--dest",
        "dest",
        "--id",
        "ACQ_1234_123456",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("ACQ_1234_123456 is valid"));

    let base = ws.path().join("dest/ACQ_1234/ACQ_1234_123456");
    assert!(base.join("objects/data/sub/b.txt").is_file());
    assert!(base.join("metadata/rclone.log").is_file());
    assert!(!ws.path().join("transfer/rclone.log").exists());

    let out = lint_one(&ws, &base);
    assert!(out.contains("packages are valid: ['ACQ_1234_123456']"));
}
