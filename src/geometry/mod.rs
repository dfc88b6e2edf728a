//! Geometry module - opaque handles and the host-geometry query contract

pub mod handles;
pub mod query;

pub use handles::{EdgeId, FaceId, PartKey};
pub use query::{BeamSpec, ConnectorSpec, DisplayState, EntityId, GeometryQuery, MeasurementId};
