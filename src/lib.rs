//! CDT: Clip Design Toolkit
//!
//! Solves the local reference frame and directional travel-stop distances of
//! a clip fastener from surrounding boundary geometry, and emits connector
//! and beam entities into a host CAE model through a narrow query interface.

pub mod cli;
pub mod core;
pub mod geometry;
pub mod scene;
pub mod solver;
