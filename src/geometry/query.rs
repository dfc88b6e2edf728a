//! Host geometry query contract
//!
//! The solver's only interface to the surrounding CAE system. Everything the
//! core needs is expressed as a call/return pair on this trait: boundary
//! topology lookups, directional point projection, mesh-node harvesting and
//! the connector/beam entity sinks. Menu surfaces, wizard dialogs and file
//! formats of the host stay behind it.

use nalgebra::{Point3, Vector3};
use serde::Serialize;

use crate::geometry::{EdgeId, FaceId, PartKey};

/// Handle to a measurement record in the host model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MeasurementId(pub u32);

/// Handle to a created connector/beam entity in the host model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntityId(pub u32);

/// Opaque saved display preference of the host session.
///
/// Acquired at session start and restored on every exit path, so a clip
/// definition never leaks a changed display mode into the host UI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayState(pub u32);

/// Parameters of a connector element: two nodes, the orientation frame it
/// carries, and the six stop limits (x low/up, y low/up, z low/up).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorSpec {
    pub node_a: Point3<f64>,
    pub node_b: Point3<f64>,
    pub origin: Point3<f64>,
    pub axis_x: Vector3<f64>,
    pub axis_z: Vector3<f64>,
    pub stop_limits: [f64; 6],
}

/// Parameters of a rigid beam element between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeamSpec {
    pub node_a: Point3<f64>,
    pub node_b: Point3<f64>,
    pub section_radius: f64,
}

/// The geometric primitives the clip solver needs from the host model.
///
/// Query methods take `&self`; the measurement and entity sinks mutate the
/// host model and take `&mut self`. Handles passed in must originate from
/// the same implementation instance.
pub trait GeometryQuery {
    /// Faces adjacent to any of the given edges, deduplicated.
    fn faces_of_edges(&self, edges: &[EdgeId]) -> Vec<FaceId>;

    /// Edges bounding any of the given faces, deduplicated.
    fn edges_of_faces(&self, faces: &[FaceId]) -> Vec<EdgeId>;

    /// Every face of the model. Used to enumerate mating-candidate faces
    /// (those whose owner differs from the clip part).
    fn all_faces(&self) -> Vec<FaceId>;

    fn face_area(&self, face: FaceId) -> f64;

    /// Unit normal of a planar face.
    fn face_normal(&self, face: FaceId) -> Vector3<f64>;

    fn face_owner(&self, face: FaceId) -> PartKey;

    fn edge_length(&self, edge: EdgeId) -> f64;

    /// Midpoint of an edge as the component-wise median of its polyline
    /// sample points (not the two-endpoint average).
    fn edge_midpoint(&self, edge: EdgeId) -> Point3<f64>;

    /// Project a point along a direction onto one face. Returns the hit
    /// coordinates, or `None` when the ray misses the face or travels
    /// farther than `tolerance`.
    fn project_along_direction(
        &self,
        face: FaceId,
        point: &Point3<f64>,
        direction: &Vector3<f64>,
        tolerance: f64,
    ) -> Option<Point3<f64>>;

    /// Mesh node coordinates lying on the given faces.
    fn nodes_near_faces(&self, faces: &[FaceId]) -> Vec<Point3<f64>>;

    /// Record a straight-line distance measurement between two points.
    fn create_measurement(&mut self, a: &Point3<f64>, b: &Point3<f64>) -> MeasurementId;

    fn delete_measurement(&mut self, measurement: MeasurementId);

    fn create_connector(&mut self, spec: &ConnectorSpec) -> EntityId;

    fn create_beam(&mut self, spec: &BeamSpec) -> EntityId;

    /// Save the host display preference at session start. Default is a
    /// no-op for hosts without a display state.
    fn save_display_state(&mut self) -> DisplayState {
        DisplayState::default()
    }

    /// Restore a previously saved display preference.
    fn restore_display_state(&mut self, _state: DisplayState) {}
}
