use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a plain-output command bound to a session file
fn fieldmaps_cmd(dir: &TempDir) -> Command {
    let session = dir.path().join("session.json");
    let mut cmd = Command::cargo_bin("fieldmaps").expect("Failed to find fieldmaps binary");
    cmd.arg("--no-color")
        .arg("--session-file")
        .arg(session)
        .args(["--settle-ms", "0", "--viewport", "160x120"]);
    cmd
}

fn mark(dir: &TempDir, lat: &str, lng: &str) {
    fieldmaps_cmd(dir)
        .args(["mark", &format!("--lat={lat}"), &format!("--lng={lng}"), "--zoom", "13"])
        .assert()
        .success();
}

fn pdf_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".pdf"))
        .collect()
}

#[test]
fn test_cli_list_empty() {
    let temp_dir = create_cli_test_environment();

    fieldmaps_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No locations marked yet"))
        .stdout(predicate::str::contains("- **LINZ Topo** (active)"));
}

#[test]
fn test_cli_mark_then_list() {
    let temp_dir = create_cli_test_environment();

    fieldmaps_cmd(&temp_dir)
        .args(["mark", "--lat=-41.2", "--lng=174.8", "--zoom", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked location with ID: 1"))
        .stdout(predicate::str::contains("### Location 1"));

    fieldmaps_cmd(&temp_dir)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Location 1 (ID: 1)"))
        .stdout(predicate::str::contains("-41.200000, 174.800000 (Zoom: 12)"))
        .stdout(predicate::str::contains("- [ ] Include field notes"));
}

#[test]
fn test_cli_mark_with_name() {
    let temp_dir = create_cli_test_environment();

    fieldmaps_cmd(&temp_dir)
        .args(["mark", "--name", "Hut Junction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Hut Junction"));
}

#[test]
fn test_cli_rename() {
    let temp_dir = create_cli_test_environment();
    mark(&temp_dir, "-41.2", "174.8");

    fieldmaps_cmd(&temp_dir)
        .args(["rename", "1", "Summit Camp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed from 'Location 1' to 'Summit Camp'"));

    fieldmaps_cmd(&temp_dir)
        .args(["rename", "1", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made."))
        .stdout(predicate::str::contains("### Summit Camp"));
}

#[test]
fn test_cli_move_reorders_list() {
    let temp_dir = create_cli_test_environment();
    mark(&temp_dir, "-41.0", "174.0");
    mark(&temp_dir, "-42.0", "174.0");
    mark(&temp_dir, "-43.0", "174.0");

    fieldmaps_cmd(&temp_dir)
        .args(["move", "1", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("### 1. Location 2 (ID: 2)"))
        .stdout(predicate::str::contains("### 3. Location 1 (ID: 1)"));
}

#[test]
fn test_cli_move_missing_location() {
    let temp_dir = create_cli_test_environment();
    mark(&temp_dir, "-41.0", "174.0");

    fieldmaps_cmd(&temp_dir)
        .args(["move", "1", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Location with ID 7 not found"));
}

#[test]
fn test_cli_notes_and_export() {
    let temp_dir = create_cli_test_environment();
    let out_dir = temp_dir.path().join("out");
    mark(&temp_dir, "-41.0", "174.0");
    mark(&temp_dir, "-42.0", "174.0");

    fieldmaps_cmd(&temp_dir)
        .args(["notes", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Field notes page included"));

    fieldmaps_cmd(&temp_dir)
        .args(["export", "--output-dir"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Exported 2 location(s) as 3 page(s)",
        ))
        .stderr(predicate::str::contains("Generating page 1/3"));

    let files = pdf_files(&out_dir);
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("field-maps-Location 1-Location 2-"));
}

#[test]
fn test_cli_notes_off() {
    let temp_dir = create_cli_test_environment();
    mark(&temp_dir, "-41.0", "174.0");

    fieldmaps_cmd(&temp_dir).args(["notes", "1"]).assert().success();
    fieldmaps_cmd(&temp_dir)
        .args(["notes", "1", "--off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Field notes page excluded"))
        .stdout(predicate::str::contains("- Field notes: not included"));
}

#[test]
fn test_cli_export_empty_list() {
    let temp_dir = create_cli_test_environment();

    fieldmaps_cmd(&temp_dir)
        .args(["export", "--output-dir"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Please mark at least one location before exporting.",
        ));

    assert!(pdf_files(temp_dir.path()).is_empty());
}

#[test]
fn test_cli_clear_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    mark(&temp_dir, "-41.0", "174.0");

    fieldmaps_cmd(&temp_dir)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    fieldmaps_cmd(&temp_dir)
        .args(["clear", "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 location(s):"));

    fieldmaps_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No locations marked yet"));
}

#[test]
fn test_cli_clear_empty_list() {
    let temp_dir = create_cli_test_environment();

    fieldmaps_cmd(&temp_dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("No locations to clear."));
}

#[test]
fn test_cli_basemap_switch() {
    let temp_dir = create_cli_test_environment();

    fieldmaps_cmd(&temp_dir)
        .args(["basemap", "aerial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Basemap switched to LINZ Aerial"));

    fieldmaps_cmd(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("- **LINZ Aerial** (active)"));
}

#[test]
fn test_cli_basemap_invalid() {
    let temp_dir = create_cli_test_environment();

    fieldmaps_cmd(&temp_dir)
        .args(["basemap", "satellite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid basemap"));
}

#[test]
fn test_cli_delete() {
    let temp_dir = create_cli_test_environment();
    mark(&temp_dir, "-41.0", "174.0");

    fieldmaps_cmd(&temp_dir)
        .args(["rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted location 'Location 1' (ID: 1)"));

    fieldmaps_cmd(&temp_dir)
        .args(["delete", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Location with ID 9 not found"));
}

#[test]
fn test_cli_goto_moves_map() {
    let temp_dir = create_cli_test_environment();
    mark(&temp_dir, "-41.0", "174.0");

    fieldmaps_cmd(&temp_dir)
        .args(["view", "--lat=-45.0", "--lng=168.5", "--zoom", "9"])
        .assert()
        .success();

    fieldmaps_cmd(&temp_dir)
        .args(["goto", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Map centred on -41.000000, 174.000000 (Zoom: 13)",
        ));
}

#[test]
fn test_cli_view_rejects_invalid_zoom() {
    let temp_dir = create_cli_test_environment();

    fieldmaps_cmd(&temp_dir)
        .args(["view", "--lat=-41.0", "--lng=174.0", "--zoom", "25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zoom"));
}

#[test]
fn test_cli_invalid_viewport() {
    let temp_dir = create_cli_test_environment();

    Command::cargo_bin("fieldmaps")
        .expect("Failed to find fieldmaps binary")
        .arg("--session-file")
        .arg(temp_dir.path().join("session.json"))
        .args(["--viewport", "0x100", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--viewport"));
}

#[test]
fn test_cli_oversized_viewport_is_rejected() {
    let temp_dir = create_cli_test_environment();

    Command::cargo_bin("fieldmaps")
        .expect("Failed to find fieldmaps binary")
        .arg("--session-file")
        .arg(temp_dir.path().join("session.json"))
        .args(["--viewport", "50000x50000", "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 1-4096"));
}
