//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a cdt command
pub fn cdt() -> Command {
    Command::new(cargo::cargo_bin!("cdt"))
}

/// Hook-shaped clip sitting inside a housing cavity.
///
/// The clip is a base plate with a button wall rising from its y = 0 edge
/// (the seed edge, always E0), a flange, a drop wall and a hook plate
/// passing back under the seed. The housing provides one mating face per
/// axis direction at known clearances:
///
///   z up   ceiling 2.5 above the base        -> limit  1 + 2.5 = 3.5
///   z low  shelf 1.5 below the flange        -> limit  1 - 1.5 = -0.5
///   x up   wall 2.0 beyond the clip at x=12  -> limit  2.0
///   x low  wall 3.0 behind the clip at x=-3  -> limit -3.0
///   y up   wall 0.5 outside the drop         -> limit  0.5
///   y low  wall 2.0 beyond the base at y=12  -> limit -2.0
pub const CLIP_IN_HOUSING: &str = r#"
parts: [clip, housing]
faces:
  # clip: base plate, area 100, normal +z
  - part: clip
    polygon: [[0, 0, 0], [10, 0, 0], [10, 10, 0], [0, 10, 0]]
  # clip: button wall, area 30, normal -y
  - part: clip
    polygon: [[0, 0, 0], [10, 0, 0], [10, 0, 3], [0, 0, 3]]
  # clip: flange, normal -z
  - part: clip
    polygon: [[0, 0, 3], [10, 0, 3], [10, -2, 3], [0, -2, 3]]
  # clip: drop wall, normal -y
  - part: clip
    polygon: [[0, -2, -1], [10, -2, -1], [10, -2, 3], [0, -2, 3]]
  # clip: hook plate under the seed, normal +z
  - part: clip
    polygon: [[0, -2, -1], [10, -2, -1], [10, 0.5, -1], [0, 0.5, -1]]
  # housing: ceiling at z = 2.5, normal -z
  - part: housing
    polygon: [[-1, -4, 2.5], [-1, 11, 2.5], [11, 11, 2.5], [11, -4, 2.5]]
  # housing: shelf at z = 1.5 under the flange, normal +z
  - part: housing
    polygon: [[-1, -4, 1.5], [11, -4, 1.5], [11, 1, 1.5], [-1, 1, 1.5]]
  # housing: wall at x = 12, normal -x
  - part: housing
    polygon: [[12, -4, -2], [12, -4, 4], [12, 11, 4], [12, 11, -2]]
  # housing: wall at x = -3, normal +x
  - part: housing
    polygon: [[-3, -4, -2], [-3, 11, -2], [-3, 11, 4], [-3, -4, 4]]
  # housing: wall at y = -2.5, normal +y
  - part: housing
    polygon: [[-1, -2.5, 4], [11, -2.5, 4], [11, -2.5, -2], [-1, -2.5, -2]]
  # housing: wall at y = 12, normal -y
  - part: housing
    polygon: [[-1, 12, -2], [11, 12, -2], [11, 12, 4], [-1, 12, 4]]
"#;

/// Write the clip-in-housing scene into a temp dir, returning its path.
pub fn write_clip_scene(tmp: &TempDir) -> PathBuf {
    let path = tmp.path().join("clip_in_housing.yaml");
    std::fs::write(&path, CLIP_IN_HOUSING).unwrap();
    path
}
