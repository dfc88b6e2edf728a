//! Solver module - region growth, frame building, stop distances, variants

pub mod frame;
pub mod instance;
pub mod region;
pub mod stops;
pub mod variant;

pub use frame::{FrameAxis, LocalFrame};
pub use instance::{ClipInstance, ClipSession};
pub use region::{build_region, ClipRegion};
pub use stops::{Axis, MatePair, SolveWarning, StopDistanceSet, StopEntry, StopSolver};
pub use variant::{
    beam_variant, geom_variant, BeamVariant, GeomVariant, NodePlacement, NodeRole,
};
