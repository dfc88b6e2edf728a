//! Solver configuration
//!
//! The numeric constants of the search (node-distance radius, angle limits,
//! retry caps) are tuned empirically per part family, so they are carried as
//! configuration rather than hard-coded.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },

    #[error("Failed to parse config YAML: {message}")]
    Yaml { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunable constants of the clip solver.
///
/// All fields have defaults, so a config file only needs to list overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Maximum breadth-first hops when growing the clip face region.
    pub hop_limit: u32,

    /// Clip-side mesh nodes farther than this from the frame origin are
    /// ignored; rejects nodes of unrelated geometry sharing a property.
    pub clip_node_dist: f64,

    /// Starting half-angle (degrees) of the face-alignment filter.
    pub face_angle_limit_deg: f64,

    /// Degrees added to the alignment filter per failed search pass.
    pub angle_widen_step_deg: f64,

    /// Widening passes allowed before a search reports no projection.
    pub max_angle_retries: u32,

    /// Directional projection tolerance (maximum ray travel).
    pub projection_tolerance: f64,

    /// Connector element length along the local Z axis.
    pub connector_length: f64,

    /// Lateral offset of the rigid-link pairs of a triple-connector clip.
    pub connector_distance: f64,

    /// Magnitude reported for an axis with no mate found.
    pub unconstrained: f64,

    /// Decimal places kept on solved stop distances.
    pub round_decimals: u32,

    /// Smallest reportable stop distance; smaller magnitudes clamp to this.
    pub min_stop_distance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            hop_limit: 8,
            clip_node_dist: 30.0,
            face_angle_limit_deg: 30.0,
            angle_widen_step_deg: 10.0,
            max_angle_retries: 15,
            projection_tolerance: 50.0,
            connector_length: 1.0,
            connector_distance: 2.0,
            unconstrained: 1000.0,
            round_decimals: 2,
            min_stop_distance: 0.01,
        }
    }
}

impl SolverConfig {
    /// Parse a config from YAML text and validate it.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = serde_yml::from_str(s).map_err(|e| ConfigError::Yaml {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check that every constant is in a usable range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue { field, value })
            }
        }

        if self.hop_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "hop_limit",
                value: 0.0,
            });
        }
        positive("clip_node_dist", self.clip_node_dist)?;
        positive("face_angle_limit_deg", self.face_angle_limit_deg)?;
        positive("angle_widen_step_deg", self.angle_widen_step_deg)?;
        positive("projection_tolerance", self.projection_tolerance)?;
        positive("connector_length", self.connector_length)?;
        positive("connector_distance", self.connector_distance)?;
        positive("unconstrained", self.unconstrained)?;
        positive("min_stop_distance", self.min_stop_distance)?;
        Ok(())
    }
}
