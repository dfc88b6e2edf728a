//! Planar scene - a self-contained `GeometryQuery` backend
//!
//! Scenes are plain-text YAML documents describing planar convex polygon
//! faces grouped into named parts:
//!
//! ```yaml
//! parts: [clip, housing]
//! faces:
//!   - part: clip
//!     polygon: [[0, 0, 0], [10, 0, 0], [10, 5, 0], [0, 5, 0]]
//! ```
//!
//! Edges are derived from consecutive polygon vertex pairs; an edge shared
//! by two faces (same endpoints after quantization) is unified, which gives
//! the two-adjacent-faces topology the region grower expects. Mesh nodes
//! are approximated by polygon vertices, edge midpoints and centroids.
//! Created connectors/beams land in an in-memory ledger instead of a CAE
//! database, so tests and the CLI can observe them.

use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;

use crate::geometry::{
    BeamSpec, ConnectorSpec, EdgeId, EntityId, FaceId, GeometryQuery, MeasurementId, PartKey,
};

const QUANT: f64 = 1e6;
const CONTAIN_EPS: f64 = 1e-9;
const EDGE_SAMPLES: usize = 9;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to parse scene YAML: {message}")]
    Yaml { message: String },

    #[error("Face {index} references unknown part '{part}'")]
    UnknownPart { index: usize, part: String },

    #[error("Face {index} has {count} vertices, need at least 3")]
    TooFewVertices { index: usize, count: usize },

    #[error("Face {index} is degenerate (zero area)")]
    DegenerateFace { index: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct SceneDoc {
    #[serde(default)]
    parts: Vec<String>,
    faces: Vec<FaceDoc>,
}

#[derive(Debug, Deserialize)]
struct FaceDoc {
    part: String,
    polygon: Vec<[f64; 3]>,
}

#[derive(Debug, Clone)]
struct PlanarFace {
    owner: PartKey,
    polygon: Vec<Point3<f64>>,
    normal: Vector3<f64>,
    area: f64,
    edges: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
struct SceneEdge {
    a: Point3<f64>,
    b: Point3<f64>,
    faces: Vec<FaceId>,
}

/// Entity created through the sink side of [`GeometryQuery`].
#[derive(Debug, Clone, PartialEq)]
pub enum CreatedEntity {
    Connector(ConnectorSpec),
    Beam(BeamSpec),
}

/// In-memory scene of planar polygon faces.
#[derive(Debug, Default)]
pub struct PlanarScene {
    parts: Vec<String>,
    faces: Vec<PlanarFace>,
    edges: Vec<SceneEdge>,
    edge_index: HashMap<([i64; 3], [i64; 3]), EdgeId>,
    created: Vec<CreatedEntity>,
    active_measurements: BTreeSet<u32>,
    next_measurement: u32,
    next_entity: u32,
    projection_calls: Cell<u64>,
}

fn quantize(p: &Point3<f64>) -> [i64; 3] {
    [
        (p.x * QUANT).round() as i64,
        (p.y * QUANT).round() as i64,
        (p.z * QUANT).round() as i64,
    ]
}

fn edge_key(a: &Point3<f64>, b: &Point3<f64>) -> ([i64; 3], [i64; 3]) {
    let qa = quantize(a);
    let qb = quantize(b);
    if qa <= qb {
        (qa, qb)
    } else {
        (qb, qa)
    }
}

impl PlanarScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a scene from YAML text.
    pub fn from_yaml_str(s: &str) -> Result<Self, SceneError> {
        let doc: SceneDoc = serde_yml::from_str(s).map_err(|e| SceneError::Yaml {
            message: e.to_string(),
        })?;

        let mut scene = PlanarScene::new();
        scene.parts = doc.parts.clone();
        for (index, face) in doc.faces.iter().enumerate() {
            if !doc.parts.is_empty() && !doc.parts.contains(&face.part) {
                return Err(SceneError::UnknownPart {
                    index,
                    part: face.part.clone(),
                });
            }
            scene.add_face(&face.part, &face.polygon)?;
        }
        Ok(scene)
    }

    /// Load a scene file from disk.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Add one planar convex polygon face belonging to the named part.
    ///
    /// Shared edges with previously added faces are detected and unified.
    pub fn add_face(&mut self, part: &str, polygon: &[[f64; 3]]) -> Result<FaceId, SceneError> {
        let index = self.faces.len();
        if polygon.len() < 3 {
            return Err(SceneError::TooFewVertices {
                index,
                count: polygon.len(),
            });
        }

        let vertices: Vec<Point3<f64>> = polygon
            .iter()
            .map(|[x, y, z]| Point3::new(*x, *y, *z))
            .collect();

        // Newell's method: robust normal and area for any planar polygon.
        let mut n = Vector3::zeros();
        for i in 0..vertices.len() {
            let a = vertices[i].coords;
            let b = vertices[(i + 1) % vertices.len()].coords;
            n += a.cross(&b);
        }
        let double_area = n.norm();
        if double_area < 1e-12 {
            return Err(SceneError::DegenerateFace { index });
        }
        let normal = n / double_area;
        let area = double_area / 2.0;

        let face_id = FaceId(index as u32);
        let mut edges = Vec::with_capacity(vertices.len());
        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            let key = edge_key(&a, &b);
            let edge_id = *self.edge_index.entry(key).or_insert_with(|| {
                let id = EdgeId(self.edges.len() as u32);
                self.edges.push(SceneEdge {
                    a,
                    b,
                    faces: Vec::new(),
                });
                id
            });
            self.edges[edge_id.0 as usize].faces.push(face_id);
            edges.push(edge_id);
        }

        if !self.parts.iter().any(|p| p == part) {
            self.parts.push(part.to_string());
        }

        self.faces.push(PlanarFace {
            owner: PartKey(part.to_string()),
            polygon: vertices,
            normal,
            area,
            edges,
        });
        Ok(face_id)
    }

    pub fn part_names(&self) -> &[String] {
        &self.parts
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Faces adjacent to an edge, in insertion order.
    pub fn edge_faces(&self, edge: EdgeId) -> &[FaceId] {
        &self.edges[edge.0 as usize].faces
    }

    /// Entities emitted through the sink side of the query contract.
    pub fn created_entities(&self) -> &[CreatedEntity] {
        &self.created
    }

    /// Measurement records currently alive.
    pub fn active_measurement_count(&self) -> usize {
        self.active_measurements.len()
    }

    /// Number of directional projections performed so far. Lets tests
    /// assert that closed-form operations stay off the geometry.
    pub fn projection_call_count(&self) -> u64 {
        self.projection_calls.get()
    }

    fn contains(&self, face: &PlanarFace, p: &Point3<f64>) -> bool {
        // Convex containment: the cross products of each boundary edge with
        // the point must all agree in sign along the face normal.
        let mut positive = false;
        let mut negative = false;
        for i in 0..face.polygon.len() {
            let a = face.polygon[i];
            let b = face.polygon[(i + 1) % face.polygon.len()];
            let side = (b - a).cross(&(p - a)).dot(&face.normal);
            if side > CONTAIN_EPS {
                positive = true;
            } else if side < -CONTAIN_EPS {
                negative = true;
            }
        }
        !(positive && negative)
    }
}

impl GeometryQuery for PlanarScene {
    fn faces_of_edges(&self, edges: &[EdgeId]) -> Vec<FaceId> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for edge in edges {
            for face in &self.edges[edge.0 as usize].faces {
                if seen.insert(*face) {
                    out.push(*face);
                }
            }
        }
        out
    }

    fn edges_of_faces(&self, faces: &[FaceId]) -> Vec<EdgeId> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for face in faces {
            for edge in &self.faces[face.0 as usize].edges {
                if seen.insert(*edge) {
                    out.push(*edge);
                }
            }
        }
        out
    }

    fn all_faces(&self) -> Vec<FaceId> {
        (0..self.faces.len() as u32).map(FaceId).collect()
    }

    fn face_area(&self, face: FaceId) -> f64 {
        self.faces[face.0 as usize].area
    }

    fn face_normal(&self, face: FaceId) -> Vector3<f64> {
        self.faces[face.0 as usize].normal
    }

    fn face_owner(&self, face: FaceId) -> PartKey {
        self.faces[face.0 as usize].owner.clone()
    }

    fn edge_length(&self, edge: EdgeId) -> f64 {
        let e = &self.edges[edge.0 as usize];
        (e.b - e.a).norm()
    }

    fn edge_midpoint(&self, edge: EdgeId) -> Point3<f64> {
        let e = &self.edges[edge.0 as usize];
        let samples: Vec<Point3<f64>> = (0..EDGE_SAMPLES)
            .map(|i| {
                let t = i as f64 / (EDGE_SAMPLES - 1) as f64;
                e.a + t * (e.b - e.a)
            })
            .collect();
        crate::core::math::median_point(&samples)
    }

    fn project_along_direction(
        &self,
        face: FaceId,
        point: &Point3<f64>,
        direction: &Vector3<f64>,
        tolerance: f64,
    ) -> Option<Point3<f64>> {
        self.projection_calls.set(self.projection_calls.get() + 1);

        let f = &self.faces[face.0 as usize];
        let norm = direction.norm();
        if norm < 1e-12 {
            return None;
        }
        let d = direction / norm;
        let denom = d.dot(&f.normal);
        if denom.abs() < 1e-12 {
            return None;
        }
        let t = (f.polygon[0] - point).dot(&f.normal) / denom;
        if t <= 1e-9 || t > tolerance {
            return None;
        }
        let hit = point + t * d;
        if self.contains(f, &hit) {
            Some(hit)
        } else {
            None
        }
    }

    fn nodes_near_faces(&self, faces: &[FaceId]) -> Vec<Point3<f64>> {
        let mut out = Vec::new();
        for face in faces {
            let f = &self.faces[face.0 as usize];
            out.extend(f.polygon.iter().copied());
            for i in 0..f.polygon.len() {
                let a = f.polygon[i];
                let b = f.polygon[(i + 1) % f.polygon.len()];
                out.push(a + 0.5 * (b - a));
            }
            let centroid = f
                .polygon
                .iter()
                .fold(Vector3::zeros(), |acc, p| acc + p.coords)
                / f.polygon.len() as f64;
            out.push(Point3::from(centroid));
        }
        out
    }

    fn create_measurement(&mut self, _a: &Point3<f64>, _b: &Point3<f64>) -> MeasurementId {
        let id = self.next_measurement;
        self.next_measurement += 1;
        self.active_measurements.insert(id);
        MeasurementId(id)
    }

    fn delete_measurement(&mut self, measurement: MeasurementId) {
        self.active_measurements.remove(&measurement.0);
    }

    fn create_connector(&mut self, spec: &ConnectorSpec) -> EntityId {
        self.created.push(CreatedEntity::Connector(spec.clone()));
        let id = self.next_entity;
        self.next_entity += 1;
        EntityId(id)
    }

    fn create_beam(&mut self, spec: &BeamSpec) -> EntityId {
        self.created.push(CreatedEntity::Beam(spec.clone()));
        let id = self.next_entity;
        self.next_entity += 1;
        EntityId(id)
    }
}
