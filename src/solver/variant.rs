//! Geometry and beam-topology variants
//!
//! A clip is parameterized by two independent variant choices: the geometry
//! variant changes how the frame is oriented and which axes get solved, and
//! the beam variant changes how many connector segments are laid out from
//! the solved frame. Variants are plain enums behind a static registry
//! table; lookup by tag replaces any runtime class discovery.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::core::SolverConfig;
use crate::solver::frame::LocalFrame;
use crate::solver::stops::Axis;

/// Geometric clip variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeomVariant {
    /// Upright clip: Z follows the base face normal.
    #[default]
    Standard,
    /// Clip mounted from the far side: Z is negated, origin offset.
    Reversed,
    /// Locking clip: same orientation handling as Reversed.
    Lock,
    /// Flat clip with no body of its own; the "small face" is a picked
    /// top face and the +Y direction is always unconstrained.
    Flat,
}

impl GeomVariant {
    /// Whether the Z axis is negated after frame building, presenting a
    /// consistent external sign convention for far-side mounting.
    pub fn flips_axis_z(self) -> bool {
        matches!(self, GeomVariant::Reversed | GeomVariant::Lock)
    }

    /// Whether the origin is the seed midpoint offset one unit along Z
    /// instead of the midpoint between seed and opposite-face projection.
    pub fn offsets_origin(self) -> bool {
        matches!(self, GeomVariant::Reversed | GeomVariant::Lock)
    }

    /// Whether an axis participates in the automatic solve.
    pub fn solves_axis(self, axis: Axis) -> bool {
        !(self == GeomVariant::Flat && axis == Axis::YUp)
    }
}

impl std::fmt::Display for GeomVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeomVariant::Standard => write!(f, "standard"),
            GeomVariant::Reversed => write!(f, "reversed"),
            GeomVariant::Lock => write!(f, "lock"),
            GeomVariant::Flat => write!(f, "flat"),
        }
    }
}

/// Beam-topology variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BeamVariant {
    /// One connector spanning two nodes along Z.
    #[default]
    Single,
    /// Three parallel rigid-link pairs around a shared center pair.
    Triple,
}

impl std::fmt::Display for BeamVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BeamVariant::Single => write!(f, "single"),
            BeamVariant::Triple => write!(f, "triple"),
        }
    }
}

/// Static variant registry: tag to variant, built at compile time.
pub const GEOM_VARIANTS: &[(&str, GeomVariant)] = &[
    ("standard", GeomVariant::Standard),
    ("reversed", GeomVariant::Reversed),
    ("lock", GeomVariant::Lock),
    ("flat", GeomVariant::Flat),
];

pub const BEAM_VARIANTS: &[(&str, BeamVariant)] = &[
    ("single", BeamVariant::Single),
    ("triple", BeamVariant::Triple),
];

/// Look up a geometry variant by its tag.
pub fn geom_variant(tag: &str) -> Option<GeomVariant> {
    GEOM_VARIANTS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, v)| *v)
}

/// Look up a beam variant by its tag.
pub fn beam_variant(tag: &str) -> Option<BeamVariant> {
    BEAM_VARIANTS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, v)| *v)
}

impl std::str::FromStr for GeomVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        geom_variant(&s.to_lowercase()).ok_or_else(|| {
            format!(
                "Invalid geometry variant: '{}'. Use 'standard', 'reversed', 'lock', or 'flat'",
                s
            )
        })
    }
}

impl std::str::FromStr for BeamVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        beam_variant(&s.to_lowercase())
            .ok_or_else(|| format!("Invalid beam variant: '{}'. Use 'single' or 'triple'", s))
    }
}

/// Role of one placed connector/beam node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Connector node at the frame origin.
    CenterA,
    /// Connector node one connector-length along Z.
    CenterB,
    /// Origin-side node of rigid-link pair `i`.
    LinkA(u8),
    /// Tip-side node of rigid-link pair `i`.
    LinkB(u8),
}

/// One node of the connector/beam layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePlacement {
    pub role: NodeRole,
    pub at: Point3<f64>,
}

impl BeamVariant {
    /// Lay out the connector nodes for a solved frame.
    pub fn place_connector_nodes(
        self,
        frame: &LocalFrame,
        config: &SolverConfig,
    ) -> Vec<NodePlacement> {
        let origin = frame.origin();
        let z = frame.axis_z().into_inner();
        let tip = origin + config.connector_length * z;

        let mut placements = vec![
            NodePlacement {
                role: NodeRole::CenterA,
                at: origin,
            },
            NodePlacement {
                role: NodeRole::CenterB,
                at: tip,
            },
        ];

        if self == BeamVariant::Triple {
            let x = frame.axis_x().into_inner();
            let y = frame.axis_y().into_inner();
            let d = config.connector_distance;
            for (i, offset) in [d * x, -d * x, d * y].into_iter().enumerate() {
                placements.push(NodePlacement {
                    role: NodeRole::LinkA(i as u8),
                    at: origin + offset,
                });
                placements.push(NodePlacement {
                    role: NodeRole::LinkB(i as u8),
                    at: tip + offset,
                });
            }
        }
        placements
    }
}

/// Reflect a point across the plane y = 0.
pub fn mirror_point(p: &Point3<f64>) -> Point3<f64> {
    Point3::new(p.x, -p.y, p.z)
}

/// Reflect a direction across the plane y = 0.
pub fn mirror_vector(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, -v.y, v.z)
}
