//! CLI command tests

mod common;

use common::{cdt, write_clip_scene};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    cdt()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clip Design Toolkit"));
}

#[test]
fn test_version_displays() {
    cdt()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cdt"));
}

#[test]
fn test_unknown_command_fails() {
    cdt()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Inspect Command Tests
// ============================================================================

#[test]
fn test_inspect_lists_parts_and_faces() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    cdt()
        .arg("inspect")
        .arg(&scene)
        .assert()
        .success()
        .stdout(predicate::str::contains("clip, housing"))
        .stdout(predicate::str::contains("F0"));
}

#[test]
fn test_inspect_part_filter() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    cdt()
        .args(["inspect", "--part", "housing", "--format", "json"])
        .arg(&scene)
        .assert()
        .success();

    let output = cdt()
        .args(["inspect", "--part", "housing", "--format", "json"])
        .arg(&scene)
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["face_count"], 11);
    assert_eq!(report["faces"].as_array().unwrap().len(), 6);
    for face in report["faces"].as_array().unwrap() {
        assert_eq!(face["part"], "housing");
    }
}

#[test]
fn test_inspect_missing_file_fails() {
    cdt()
        .args(["inspect", "no-such-scene.yaml"])
        .assert()
        .failure();
}

// ============================================================================
// Solve Command Tests
// ============================================================================

#[test]
fn test_solve_prints_stop_table() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("z_up"))
        .stdout(predicate::str::contains("3.50"))
        .stdout(predicate::str::contains("Solved clip on part 'clip'"));
}

#[test]
fn test_solve_json_report() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    let output = cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "0", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["variant"], "standard");
    assert_eq!(report["clip"]["part"], "clip");
    assert!(report["mirrored"].is_null());
    assert_eq!(report["warnings"].as_array().unwrap().len(), 0);

    let stops = report["clip"]["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 6);
    let z_up = stops.iter().find(|s| s["axis"] == "z_up").unwrap();
    assert_eq!(z_up["value"], 3.5);
    assert_eq!(z_up["solved"], true);
}

#[test]
fn test_solve_with_mirror() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    let output = cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "0", "--mirror", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let mirrored = &report["mirrored"];
    assert!(!mirrored.is_null());
    let stops = mirrored["stops"].as_array().unwrap();
    let x_up = stops.iter().find(|s| s["axis"] == "x_up").unwrap();
    assert_eq!(x_up["value"], 3.0);
}

#[test]
fn test_solve_reversed_variant() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    let output = cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "0", "--variant", "reversed", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["variant"], "reversed");
    assert_eq!(report["clip"]["axis_z"][2], -1.0);
}

#[test]
fn test_solve_invalid_variant_fails() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "0", "--variant", "sideways"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid geometry variant"));
}

#[test]
fn test_solve_boundary_seed_fails() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    // E1 has a single adjacent face
    cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid seed"));
}

#[test]
fn test_solve_out_of_range_seed_fails() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);

    cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_solve_with_config_file() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);
    let config = tmp.path().join("solver.yaml");
    std::fs::write(&config, "connector_length: 2.0\n").unwrap();

    let output = cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "0", "--format", "json"])
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    // z limits shift with the connector length: zUp = 2 + 2.5
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let stops = report["clip"]["stops"].as_array().unwrap();
    let z_up = stops.iter().find(|s| s["axis"] == "z_up").unwrap();
    assert_eq!(z_up["value"], 4.5);
}

#[test]
fn test_solve_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    let scene = write_clip_scene(&tmp);
    let config = tmp.path().join("solver.yaml");
    std::fs::write(&config, "hop_limit: 0\n").unwrap();

    cdt()
        .arg("solve")
        .arg(&scene)
        .args(["--seed", "0"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure();
}
