use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_schedule-pdf"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

#[test]
fn test_basic_export() {
    setup();
    let output_file = "test-basic.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/project.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("Days: 10"), "Unexpected summary: {}", stdout);
    assert!(stdout.contains("Scenes: 7"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_dense_weeks_spill_onto_two_pages() {
    setup();
    let output_file = "test-multiweek.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/multiweek.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("Pages: 2"), "Unexpected summary: {}", stdout);
    assert!(
        stdout.contains("Unscheduled: 2 scenes"),
        "Unexpected summary: {}",
        stdout
    );
}

#[test]
fn test_single_page_flag_pulls_rows_onto_one_page() {
    setup();
    let output_file = "test-single-page.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/multiweek.json",
            "--single-page",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("Pages: 1"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_legacy_project_file_still_loads() {
    setup();
    let output_file = "test-legacy.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/legacy.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("Title: Old Short"), "Unexpected summary: {}", stdout);
    assert!(stdout.contains("Scenes: 3"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_empty_project_exports_header_sheet() {
    setup();
    let output_file = "test-empty.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/empty.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("Pages: 1"), "Unexpected summary: {}", stdout);
    assert!(stdout.contains("Days: 0"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_title_override() {
    setup();
    let output_file = "test-title-override.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/project.json",
            "-t", "Directors Cut",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("Title: Directors Cut"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_range_edit_shifts_and_saves() {
    setup();
    let output_file = "test-range.pdf";
    let saved_file = "test-range-saved.json";
    cleanup_file(output_file);
    cleanup_file(saved_file);

    // Shrink the ten-day schedule to five days; in shift mode the five
    // trailing days fall off and their scenes return to the pool.
    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/project.json",
            "--start", "2026-03-04",
            "--end", "2026-03-08",
            "--save", &format!("tests/output/{}", saved_file),
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(stdout.contains("Days: 5"), "Unexpected summary: {}", stdout);
    assert!(stdout.contains("Scenes: 2"), "Unexpected summary: {}", stdout);
    assert!(
        stdout.contains("Unscheduled: 5 scenes"),
        "Unexpected summary: {}",
        stdout
    );

    // The saved project reloads with the new range intact.
    let saved_path = output_dir().join(saved_file);
    assert!(saved_path.exists(), "Project file was not saved");

    let reexport = cargo_bin()
        .args([
            "-p", &format!("tests/output/{}", saved_file),
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");
    assert!(reexport.status.success(), "Command failed: {:?}", reexport);
    let stdout = String::from_utf8_lossy(&reexport.stdout).to_string();
    assert!(stdout.contains("Days: 5"), "Unexpected summary: {}", stdout);
}

#[test]
fn test_rejects_invalid_range_date() {
    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/project.json",
            "--start", "not-a-date",
            "--end", "2026-03-08",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for invalid date");
}

#[test]
fn test_invalid_project_file() {
    let output = cargo_bin()
        .args([
            "-p", "tests/fixtures/invalid.json",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for invalid project");
}

#[test]
fn test_missing_project_file() {
    let output = cargo_bin()
        .args([
            "-p", "nonexistent.json",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing project");
}
