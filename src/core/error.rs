//! Error types for clip definition
//!
//! Every error here is recoverable at the interaction step that raised it:
//! a failed axis solve leaves that axis at its default, a rejected manual
//! selection keeps the previous value, and only a bad seed pick restarts
//! region growth.

use thiserror::Error;

/// Convenience alias used throughout the solver modules.
pub type Result<T> = std::result::Result<T, ClipError>;

/// Errors raised while defining a clip
#[derive(Debug, Error)]
pub enum ClipError {
    /// The seed edge cannot anchor a clip definition (e.g. fewer than two
    /// adjacent faces). The user must pick a different edge.
    #[error("Invalid seed selection: {reason}")]
    InvalidSeed { reason: String },

    /// Face normals or edges are degenerate for frame-building purposes.
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    /// A directional search exhausted its angle-widening retries without a
    /// single successful projection. The affected axis keeps its default.
    #[error("No projection found for {context} after {retries} angle-widening retries")]
    NoProjectionFound { context: String, retries: u32 },

    /// A manual face-pair override violated the two-different-parts rule.
    #[error("Invalid face selection: {reason}")]
    InvalidSelection { reason: String },

    /// Beam attachment node picking produced an unusable node set.
    #[error("Invalid node selection: {reason}")]
    NodeSelection { reason: String },

    /// The caller aborted a multi-axis solve between axis solves.
    #[error("Solve cancelled")]
    Cancelled,

    #[error("Scene error: {message}")]
    Scene { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
