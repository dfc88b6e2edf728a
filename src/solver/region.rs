//! Clip region growth
//!
//! Starting from a user-picked seed boundary edge, classifies the two
//! adjacent faces by area (small = button/top face, large = base face) and
//! grows the connected set of clip faces by bounded breadth-first edge
//! traversal from the edge opposite the seed.

use std::collections::BTreeSet;

use crate::core::{ClipError, Result, SolverConfig};
use crate::geometry::{EdgeId, FaceId, GeometryQuery, PartKey};

/// Edges within this length difference count as tied for "longest".
const LENGTH_TIE_TOL: f64 = 1e-9;

/// The face neighbourhood anchoring one clip definition.
#[derive(Debug, Clone)]
pub struct ClipRegion {
    pub seed_edge: EdgeId,
    /// Boundary edge of the small face opposite the seed.
    pub opposite_edge: EdgeId,
    /// Smaller of the two seed-adjacent faces.
    pub small_face: FaceId,
    /// Larger of the two seed-adjacent faces (the base/mounting face).
    pub large_face: FaceId,
    /// Grown clip body faces; never contains `small_face` or `large_face`.
    pub clip_faces: BTreeSet<FaceId>,
    /// Owning part of the clip, taken from the seed faces.
    pub part: PartKey,
}

/// Sort the two faces adjacent to the seed edge by area ascending.
///
/// Swapping the adjacency order never changes the result; ties keep the
/// lower face id first for determinism.
pub fn classify_seed_faces(
    query: &impl GeometryQuery,
    seed: EdgeId,
) -> Result<(FaceId, FaceId)> {
    let faces = query.faces_of_edges(&[seed]);
    if faces.len() < 2 {
        return Err(ClipError::InvalidSeed {
            reason: format!(
                "seed edge {seed} has {} adjacent face(s), expected 2",
                faces.len()
            ),
        });
    }
    let (a, b) = (faces[0], faces[1]);
    let (area_a, area_b) = (query.face_area(a), query.face_area(b));
    if area_a < area_b || (area_a == area_b && a < b) {
        Ok((a, b))
    } else {
        Ok((b, a))
    }
}

/// Pick the edge of the small face opposite the seed: the longest of its
/// remaining edges. Among edges tied for the maximum length the first in
/// traversal order wins; the tie is inherent to the part geometry.
pub fn find_opposite_edge(
    query: &impl GeometryQuery,
    small_face: FaceId,
    seed: EdgeId,
) -> Result<EdgeId> {
    let mut edges = query.edges_of_faces(&[small_face]);
    edges.retain(|e| *e != seed);
    let mut best = match edges.first() {
        Some(e) => *e,
        None => {
            return Err(ClipError::InvalidSeed {
                reason: format!("small face {small_face} has no edge besides the seed"),
            })
        }
    };
    let mut best_len = query.edge_length(best);
    for &edge in &edges[1..] {
        let len = query.edge_length(edge);
        if len > best_len + LENGTH_TIE_TOL {
            best = edge;
            best_len = len;
        }
    }
    Ok(best)
}

/// Breadth-first expansion from the opposite edge, bounded by `hop_limit`.
///
/// Each hop collects the faces adjacent to the current edge frontier,
/// discards the two seed faces, then re-derives the frontier as all edges
/// bounding the collected face set. The hop bound is intentional: very
/// large or topologically unusual parts may yield an incomplete region,
/// which is accepted behavior rather than an error.
pub fn grow_region(
    query: &impl GeometryQuery,
    small_face: FaceId,
    large_face: FaceId,
    opposite_edge: EdgeId,
    hop_limit: u32,
) -> BTreeSet<FaceId> {
    let mut clip_faces: BTreeSet<FaceId> = BTreeSet::new();
    let mut frontier = vec![opposite_edge];
    for _ in 0..hop_limit {
        let mut faces = query.faces_of_edges(&frontier);
        faces.retain(|f| *f != small_face && *f != large_face);
        let before = clip_faces.len();
        clip_faces.extend(faces);
        if clip_faces.len() == before {
            // no new faces this hop; traversal has converged
            break;
        }
        let all: Vec<FaceId> = clip_faces.iter().copied().collect();
        frontier = query.edges_of_faces(&all);
    }
    clip_faces
}

/// Run the full region pipeline for a seed edge.
pub fn build_region(
    query: &impl GeometryQuery,
    seed: EdgeId,
    config: &SolverConfig,
) -> Result<ClipRegion> {
    let (small_face, large_face) = classify_seed_faces(query, seed)?;
    let opposite_edge = find_opposite_edge(query, small_face, seed)?;
    let clip_faces = grow_region(query, small_face, large_face, opposite_edge, config.hop_limit);
    let part = query.face_owner(small_face);
    Ok(ClipRegion {
        seed_edge: seed,
        opposite_edge,
        small_face,
        large_face,
        clip_faces,
        part,
    })
}
