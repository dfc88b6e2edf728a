//! Clip instance and definition session
//!
//! A `ClipInstance` aggregates everything solved for one clip: the face
//! region, local frame, stop distances, variant choices, node layout and
//! the entities created in the host model. A `ClipSession` drives the
//! pipeline seed -> region -> frame -> stop solve -> entity creation, and
//! restores the host display preference on every exit path.

use nalgebra::{Point3, Unit};

use crate::core::{ClipError, Result, SolverConfig};
use crate::geometry::{
    BeamSpec, ConnectorSpec, EdgeId, EntityId, FaceId, GeometryQuery,
};
use crate::solver::frame::{self, LocalFrame};
use crate::solver::region::{self, ClipRegion};
use crate::solver::stops::{Axis, SolveWarning, StopDistanceSet, StopSolver};
use crate::solver::variant::{
    mirror_point, mirror_vector, BeamVariant, GeomVariant, NodePlacement, NodeRole,
};

/// Beam section radius used for rigid-link and attachment beams.
const BEAM_SECTION_RADIUS: f64 = 5.0;

/// Coordinates closer than this count as the same node.
const NODE_MATCH_TOL: f64 = 1e-9;

/// One fully or partially solved clip definition.
#[derive(Debug, Clone)]
pub struct ClipInstance {
    pub region: ClipRegion,
    pub frame: LocalFrame,
    pub stops: StopDistanceSet,
    pub geom_variant: GeomVariant,
    pub beam_variant: BeamVariant,
    /// Connector/beam node layout, kept for mirroring.
    pub placements: Vec<NodePlacement>,
    /// Entities created in the host model for this clip.
    pub entities: Vec<EntityId>,
}

impl ClipInstance {
    /// Mirror the solved clip across the plane y = 0.
    ///
    /// A pure transform of stored data: frame, stop limits and node
    /// placements are reflected without a single geometric query. The
    /// mirrored instance carries no created entities until realized.
    pub fn mirrored(&self) -> ClipInstance {
        // X is negated on top of the reflection so the derived Y axis
        // comes out reflected as well; the frame then agrees with the
        // swapped-and-negated X limits of the mirrored stop set.
        let frame = LocalFrame::new(
            mirror_point(&self.frame.origin()),
            Unit::new_normalize(-mirror_vector(&self.frame.axis_x().into_inner())),
            Unit::new_normalize(mirror_vector(&self.frame.axis_z().into_inner())),
        );
        let placements = self
            .placements
            .iter()
            .map(|p| NodePlacement {
                role: p.role,
                at: mirror_point(&p.at),
            })
            .collect();
        ClipInstance {
            region: self.region.clone(),
            frame,
            stops: self.stops.mirrored(),
            geom_variant: self.geom_variant,
            beam_variant: self.beam_variant,
            placements,
            entities: Vec::new(),
        }
    }

    fn placement(&self, role: NodeRole) -> Result<Point3<f64>> {
        self.placements
            .iter()
            .find(|p| p.role == role)
            .map(|p| p.at)
            .ok_or_else(|| ClipError::NodeSelection {
                reason: format!("connector node {role:?} missing from layout"),
            })
    }
}

/// One interactive clip-definition session against a host model.
///
/// Owns the solver configuration; the geometry query is borrowed for the
/// session lifetime. Each instance is owned by exactly one session, so no
/// state is shared across concurrent solves.
pub struct ClipSession<'a, Q: GeometryQuery> {
    query: &'a mut Q,
    config: SolverConfig,
}

impl<'a, Q: GeometryQuery> ClipSession<'a, Q> {
    pub fn new(query: &'a mut Q, config: SolverConfig) -> Self {
        Self { query, config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Define a clip from a seed edge: grow the region, build the frame,
    /// solve all six stop distances and create the connector entities.
    ///
    /// Per-axis solve failures come back as warnings with the instance;
    /// only region/frame failures abort the definition.
    pub fn define_clip(
        &mut self,
        seed: EdgeId,
        geom: GeomVariant,
        beam: BeamVariant,
    ) -> Result<(ClipInstance, Vec<SolveWarning>)> {
        self.define_clip_with_cancel(seed, geom, beam, &mut || false)
    }

    /// As [`define_clip`](Self::define_clip), with a cancellation hook
    /// polled between axis solves.
    pub fn define_clip_with_cancel(
        &mut self,
        seed: EdgeId,
        geom: GeomVariant,
        beam: BeamVariant,
        cancel: &mut dyn FnMut() -> bool,
    ) -> Result<(ClipInstance, Vec<SolveWarning>)> {
        // display preference is restored on success and on every error path
        let saved = self.query.save_display_state();
        let result = self.run_define(seed, geom, beam, cancel);
        self.query.restore_display_state(saved);
        result
    }

    fn run_define(
        &mut self,
        seed: EdgeId,
        geom: GeomVariant,
        beam: BeamVariant,
        cancel: &mut dyn FnMut() -> bool,
    ) -> Result<(ClipInstance, Vec<SolveWarning>)> {
        let config = self.config.clone();
        let region = region::build_region(self.query, seed, &config)?;
        let frame = frame::build_frame(self.query, &region, geom, &config)?;

        let (stops, warnings) = {
            let mut solver = StopSolver::new(self.query, &config);
            solver.solve_all(&region, &frame, geom, cancel)
        };

        let placements = beam.place_connector_nodes(&frame, &config);
        let mut instance = ClipInstance {
            region,
            frame,
            stops,
            geom_variant: geom,
            beam_variant: beam,
            placements,
            entities: Vec::new(),
        };
        self.realize(&mut instance)?;
        Ok((instance, warnings))
    }

    /// Create the connector and rigid-link beams of an instance in the
    /// host model, recording the entity handles on the instance.
    pub fn realize(&mut self, instance: &mut ClipInstance) -> Result<()> {
        let center_a = instance.placement(NodeRole::CenterA)?;
        let center_b = instance.placement(NodeRole::CenterB)?;

        let connector = ConnectorSpec {
            node_a: center_a,
            node_b: center_b,
            origin: instance.frame.origin(),
            axis_x: instance.frame.axis_x().into_inner(),
            axis_z: instance.frame.axis_z().into_inner(),
            stop_limits: instance.stops.limits(),
        };
        instance.entities.push(self.query.create_connector(&connector));

        if instance.beam_variant == BeamVariant::Triple {
            for i in 0..3u8 {
                let link_a = instance.placement(NodeRole::LinkA(i))?;
                let link_b = instance.placement(NodeRole::LinkB(i))?;
                // the parallel rigid link, then the body beams joining the
                // pair back to the shared center nodes
                for (a, b) in [(link_a, link_b), (center_a, link_a), (center_b, link_b)] {
                    instance.entities.push(self.query.create_beam(&BeamSpec {
                        node_a: a,
                        node_b: b,
                        section_radius: BEAM_SECTION_RADIUS,
                    }));
                }
            }
        }
        Ok(())
    }

    /// Create a mirrored clip from a fully solved instance.
    ///
    /// Mirroring is a closed-form transform of already-solved data; no
    /// geometric search is re-run.
    pub fn mirror(&mut self, solved: &ClipInstance) -> Result<ClipInstance> {
        let mut mirrored = solved.mirrored();
        self.realize(&mut mirrored)?;
        Ok(mirrored)
    }

    /// Manual override of one stop axis with an explicit face pair.
    pub fn redefine_axis(
        &mut self,
        instance: &mut ClipInstance,
        axis: Axis,
        face_a: FaceId,
        face_b: FaceId,
    ) -> Result<()> {
        let config = self.config.clone();
        let mut solver = StopSolver::new(self.query, &config);
        solver.redefine(
            &mut instance.stops,
            &instance.region,
            &instance.frame,
            axis,
            face_a,
            face_b,
        )
    }

    /// Weld the connector ends into the surrounding mesh with beams.
    ///
    /// `tip_nodes` attach to the connector tip, `base_nodes` to the origin
    /// node. Either selection being empty, or the two selections sharing a
    /// node, is rejected; a shared node would produce a self-referential
    /// or zero-length beam.
    pub fn attach_beams(
        &mut self,
        instance: &mut ClipInstance,
        tip_nodes: &[Point3<f64>],
        base_nodes: &[Point3<f64>],
    ) -> Result<()> {
        if tip_nodes.is_empty() || base_nodes.is_empty() {
            return Err(ClipError::NodeSelection {
                reason: "node picking produced zero nodes".to_string(),
            });
        }
        for tip in tip_nodes {
            for base in base_nodes {
                if (tip - base).norm() < NODE_MATCH_TOL {
                    return Err(ClipError::NodeSelection {
                        reason: "tip and base selections share a node".to_string(),
                    });
                }
            }
        }
        let center_a = instance.placement(NodeRole::CenterA)?;
        let center_b = instance.placement(NodeRole::CenterB)?;
        // all nodes are validated before any beam is created, so a
        // rejected selection leaves the model untouched
        for node in tip_nodes.iter().chain(base_nodes) {
            if (node - center_a).norm() < NODE_MATCH_TOL
                || (node - center_b).norm() < NODE_MATCH_TOL
            {
                return Err(ClipError::NodeSelection {
                    reason: "selected node coincides with a connector node".to_string(),
                });
            }
        }
        for (anchor, nodes) in [(center_b, tip_nodes), (center_a, base_nodes)] {
            for node in nodes {
                instance.entities.push(self.query.create_beam(&BeamSpec {
                    node_a: anchor,
                    node_b: *node,
                    section_radius: BEAM_SECTION_RADIUS,
                }));
            }
        }
        Ok(())
    }
}
