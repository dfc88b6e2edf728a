//! Local reference frame construction
//!
//! The frame carries the connector's orientation and anchors all six
//! directional stop searches. Z follows the large (base) face normal, X is
//! the side direction from the cross product of the two seed-face normals,
//! and Y is derived, landing on the small (button) face normal.

use nalgebra::{Point3, Unit, Vector3};

use crate::core::math::{median_point, rotate_about, try_unit};
use crate::core::{ClipError, Result, SolverConfig};
use crate::geometry::GeometryQuery;
use crate::solver::region::ClipRegion;
use crate::solver::variant::GeomVariant;

/// Axis selector for manual frame rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAxis {
    X,
    Y,
    Z,
}

/// Orthonormal local coordinate frame of a clip.
///
/// Immutable once built except through [`LocalFrame::rotate`], which moves
/// both stored axes together; the axes can never drift independently.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFrame {
    origin: Point3<f64>,
    axis_x: Unit<Vector3<f64>>,
    axis_z: Unit<Vector3<f64>>,
}

impl LocalFrame {
    pub fn new(
        origin: Point3<f64>,
        axis_x: Unit<Vector3<f64>>,
        axis_z: Unit<Vector3<f64>>,
    ) -> Self {
        Self {
            origin,
            axis_x,
            axis_z,
        }
    }

    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    pub fn axis_x(&self) -> Unit<Vector3<f64>> {
        self.axis_x
    }

    pub fn axis_z(&self) -> Unit<Vector3<f64>> {
        self.axis_z
    }

    /// Derived third axis, X × Z. Recomputed after every rotation.
    pub fn axis_y(&self) -> Unit<Vector3<f64>> {
        Unit::new_normalize(self.axis_x.cross(&self.axis_z))
    }

    /// Manual correction: rotate the frame about one of its own axes
    /// through the origin by an angle in degrees (right-hand rule).
    pub fn rotate(&mut self, about: FrameAxis, degrees: f64) {
        let axis = match about {
            FrameAxis::X => self.axis_x,
            FrameAxis::Y => self.axis_y(),
            FrameAxis::Z => self.axis_z,
        };
        self.axis_x = Unit::new_normalize(rotate_about(&axis, degrees, &self.axis_x));
        self.axis_z = Unit::new_normalize(rotate_about(&axis, degrees, &self.axis_z));
    }

    /// Mutual orthogonality of the three axes within floating tolerance.
    pub fn is_orthogonal(&self) -> bool {
        let y = self.axis_y();
        self.axis_x.dot(&self.axis_z).abs() < 1e-9
            && self.axis_x.dot(&y).abs() < 1e-9
            && self.axis_z.dot(&y).abs() < 1e-9
    }
}

/// Build the local frame of a clip region.
///
/// Fails with `DegenerateGeometry` when the two seed-face normals are
/// parallel, and with `NoProjectionFound` when the Standard/Flat origin
/// projection hits no clip face.
pub fn build_frame(
    query: &impl GeometryQuery,
    region: &ClipRegion,
    variant: GeomVariant,
    config: &SolverConfig,
) -> Result<LocalFrame> {
    let large_normal = query.face_normal(region.large_face);
    let small_normal = query.face_normal(region.small_face);

    let axis_x = try_unit(large_normal.cross(&small_normal), "side axis")?;
    let mut axis_z = try_unit(large_normal, "large face normal")?;
    if variant.flips_axis_z() {
        axis_z = -axis_z;
    }

    let seed_mid = query.edge_midpoint(region.seed_edge);
    let origin = if variant.offsets_origin() {
        // one unit along the (possibly flipped) Z axis
        seed_mid + axis_z.into_inner()
    } else {
        let opposite_point = opposite_projection_point(query, region, &seed_mid, config)?;
        median_point(&[seed_mid, opposite_point])
    };

    Ok(LocalFrame::new(origin, axis_x, axis_z))
}

/// Project the seed midpoint through the clip body along the direction from
/// the opposite edge toward the seed; the hit on a clip face marks the far
/// side of the clip.
fn opposite_projection_point(
    query: &impl GeometryQuery,
    region: &ClipRegion,
    seed_mid: &Point3<f64>,
    config: &SolverConfig,
) -> Result<Point3<f64>> {
    let opposite_mid = query.edge_midpoint(region.opposite_edge);
    let direction = seed_mid - opposite_mid;
    for &face in &region.clip_faces {
        if let Some(hit) =
            query.project_along_direction(face, seed_mid, &direction, config.projection_tolerance)
        {
            return Ok(hit);
        }
    }
    Err(ClipError::NoProjectionFound {
        context: "opposite clip face".to_string(),
        retries: 0,
    })
}
