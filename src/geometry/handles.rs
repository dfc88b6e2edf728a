//! Opaque entity handles
//!
//! Faces and edges are owned by the host model; the solver only looks them
//! up and compares them. Handles are plain ids with no geometric payload.

use serde::{Deserialize, Serialize};

/// Handle to a face of the host model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FaceId(pub u32);

impl std::fmt::Display for FaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// Handle to a boundary edge of the host model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EdgeId(pub u32);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Owning part/property key of a face.
///
/// Compared only for equality: "does this face belong to the clip part or
/// the mating part". The contents carry no other meaning to the solver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartKey(pub String);

impl std::fmt::Display for PartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PartKey {
    fn from(s: &str) -> Self {
        PartKey(s.to_string())
    }
}
