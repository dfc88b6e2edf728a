//! Core module - configuration, errors and vector math helpers

pub mod config;
pub mod error;
pub mod math;

pub use config::SolverConfig;
pub use error::{ClipError, Result};
