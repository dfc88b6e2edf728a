//! Directional stop-distance solving
//!
//! For each of the six signed axis directions of the local frame, finds the
//! nearest mating face by a two-stage directional search: clip-side faces
//! are filtered by normal alignment, their mesh nodes are projected along
//! the axis onto alignment-filtered neighbour faces, and the globally
//! nearest projection wins. Failing searches widen the alignment filter in
//! steps until a retry cap, so an open clip side degrades to "unconstrained"
//! instead of aborting the whole solve.

use nalgebra::{Point3, Vector3};
use serde::Serialize;

use crate::core::math::{angle_deg, round_to};
use crate::core::{ClipError, Result, SolverConfig};
use crate::geometry::{FaceId, GeometryQuery, MeasurementId};
use crate::solver::frame::LocalFrame;
use crate::solver::region::ClipRegion;
use crate::solver::variant::GeomVariant;

/// One of the six signed stop-limit directions in the local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    XLow,
    XUp,
    YLow,
    YUp,
    ZLow,
    ZUp,
}

impl Axis {
    /// Solve order. Z first, matching the interactive flow where the
    /// engagement direction is reviewed before the side clearances.
    pub const ALL: [Axis; 6] = [
        Axis::ZUp,
        Axis::ZLow,
        Axis::XUp,
        Axis::XLow,
        Axis::YUp,
        Axis::YLow,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Axis::XLow => "x_low",
            Axis::XUp => "x_up",
            Axis::YLow => "y_low",
            Axis::YUp => "y_up",
            Axis::ZLow => "z_low",
            Axis::ZUp => "z_up",
        }
    }

    pub fn is_low(self) -> bool {
        matches!(self, Axis::XLow | Axis::YLow | Axis::ZLow)
    }

    fn index(self) -> usize {
        match self {
            Axis::XLow => 0,
            Axis::XUp => 1,
            Axis::YLow => 2,
            Axis::YUp => 3,
            Axis::ZLow => 4,
            Axis::ZUp => 5,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One solved (or defaulted) stop limit.
#[derive(Debug, Clone, Default)]
pub struct StopEntry {
    /// Signed limit in the frame's local axes.
    pub value: f64,
    /// The (clip face, mate face) pair the value was measured between.
    pub provenance: Option<(FaceId, FaceId)>,
    /// Host measurement record, kept for later redefinition.
    pub measurement: Option<MeasurementId>,
    /// False while the axis still carries its unconstrained default.
    pub solved: bool,
}

/// The six named signed stop limits of one clip.
///
/// Entries start at the unconstrained defaults (low = -1000, up = +1000 by
/// default config) and are set independently; a failed axis search leaves
/// the prior value untouched.
#[derive(Debug, Clone)]
pub struct StopDistanceSet {
    entries: [StopEntry; 6],
}

impl StopDistanceSet {
    pub fn new(unconstrained: f64) -> Self {
        let mut entries: [StopEntry; 6] = Default::default();
        for axis in Axis::ALL {
            entries[axis.index()].value = if axis.is_low() {
                -unconstrained
            } else {
                unconstrained
            };
        }
        Self { entries }
    }

    pub fn entry(&self, axis: Axis) -> &StopEntry {
        &self.entries[axis.index()]
    }

    pub fn value(&self, axis: Axis) -> f64 {
        self.entries[axis.index()].value
    }

    pub fn set(
        &mut self,
        axis: Axis,
        value: f64,
        provenance: Option<(FaceId, FaceId)>,
        measurement: Option<MeasurementId>,
    ) {
        self.entries[axis.index()] = StopEntry {
            value,
            provenance,
            measurement,
            solved: true,
        };
    }

    /// Detach the measurement handle of an axis, if any.
    pub fn take_measurement(&mut self, axis: Axis) -> Option<MeasurementId> {
        self.entries[axis.index()].measurement.take()
    }

    /// Closed-form mirror across y = 0: swaps and negates the X limits,
    /// keeps Y and Z as-is. Provenance and measurement handles do not
    /// carry over; the mirrored faces are different entities.
    pub fn mirrored(&self) -> StopDistanceSet {
        let mut out = self.clone();
        for axis in Axis::ALL {
            let source = match axis {
                Axis::XLow => Axis::XUp,
                Axis::XUp => Axis::XLow,
                other => other,
            };
            let negate = matches!(axis, Axis::XLow | Axis::XUp);
            let src = self.entry(source);
            out.entries[axis.index()] = StopEntry {
                value: if negate { -src.value } else { src.value },
                provenance: None,
                measurement: None,
                solved: src.solved,
            };
        }
        out
    }

    /// Limits in connector order: x low/up, y low/up, z low/up.
    pub fn limits(&self) -> [f64; 6] {
        [
            self.value(Axis::XLow),
            self.value(Axis::XUp),
            self.value(Axis::YLow),
            self.value(Axis::YUp),
            self.value(Axis::ZLow),
            self.value(Axis::ZUp),
        ]
    }
}

/// A non-fatal per-axis solve failure; the axis keeps its prior value.
#[derive(Debug, Clone, Serialize)]
pub struct SolveWarning {
    pub axis: Axis,
    pub message: String,
}

/// Winning point pair of a directional mate search.
#[derive(Debug, Clone)]
pub struct MatePair {
    pub clip_point: Point3<f64>,
    pub mate_point: Point3<f64>,
    pub clip_face: FaceId,
    pub mate_face: FaceId,
}

/// Stop-distance solver bound to one geometry query and config.
pub struct StopSolver<'a, Q: GeometryQuery> {
    query: &'a mut Q,
    config: &'a SolverConfig,
}

impl<'a, Q: GeometryQuery> StopSolver<'a, Q> {
    pub fn new(query: &'a mut Q, config: &'a SolverConfig) -> Self {
        Self { query, config }
    }

    /// Signed search direction of an axis in the given frame.
    pub fn axis_direction(frame: &LocalFrame, axis: Axis) -> Vector3<f64> {
        match axis {
            Axis::XUp => frame.axis_x().into_inner(),
            Axis::XLow => -frame.axis_x().into_inner(),
            Axis::YUp => frame.axis_y().into_inner(),
            Axis::YLow => -frame.axis_y().into_inner(),
            Axis::ZUp => frame.axis_z().into_inner(),
            Axis::ZLow => -frame.axis_z().into_inner(),
        }
    }

    /// The clip-side search pool: the two seed faces plus the grown region.
    fn clip_pool(region: &ClipRegion) -> Vec<FaceId> {
        let mut pool = vec![region.small_face, region.large_face];
        pool.extend(region.clip_faces.iter().copied());
        pool
    }

    /// Every face owned by a part other than the clip's.
    fn neighbour_faces(&self, region: &ClipRegion) -> Vec<FaceId> {
        self.query
            .all_faces()
            .into_iter()
            .filter(|f| self.query.face_owner(*f) != region.part)
            .collect()
    }

    /// Two-stage directional search for the nearest mating face.
    ///
    /// Starts at the configured alignment angle and widens by
    /// `angle_widen_step_deg` whenever the filters leave nothing to search
    /// or every projection misses, up to `max_angle_retries` passes.
    pub fn find_directional_mate(
        &self,
        clip_faces: &[FaceId],
        neighbour_faces: &[FaceId],
        clip_direction: &Vector3<f64>,
        mate_direction: &Vector3<f64>,
        center: &Point3<f64>,
        context: &str,
    ) -> Result<MatePair> {
        self.find_mate_from(
            clip_faces,
            neighbour_faces,
            clip_direction,
            mate_direction,
            center,
            self.config.face_angle_limit_deg,
            context,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn find_mate_from(
        &self,
        clip_faces: &[FaceId],
        neighbour_faces: &[FaceId],
        clip_direction: &Vector3<f64>,
        mate_direction: &Vector3<f64>,
        center: &Point3<f64>,
        start_angle_deg: f64,
        context: &str,
    ) -> Result<MatePair> {
        let mut angle_limit = start_angle_deg;
        for _ in 0..=self.config.max_angle_retries {
            let clip_filtered: Vec<FaceId> = clip_faces
                .iter()
                .copied()
                .filter(|f| {
                    angle_deg(&self.query.face_normal(*f), clip_direction) <= angle_limit
                })
                .collect();
            let mate_filtered: Vec<FaceId> = neighbour_faces
                .iter()
                .copied()
                .filter(|f| {
                    angle_deg(&self.query.face_normal(*f), mate_direction) <= angle_limit
                })
                .collect();

            if !clip_filtered.is_empty() && !mate_filtered.is_empty() {
                if let Some(pair) =
                    self.nearest_projection(&clip_filtered, &mate_filtered, clip_direction, center)
                {
                    return Ok(pair);
                }
            }
            angle_limit += self.config.angle_widen_step_deg;
        }
        Err(ClipError::NoProjectionFound {
            context: context.to_string(),
            retries: self.config.max_angle_retries,
        })
    }

    /// Globally nearest (clip node, projected point) pair over all
    /// clip-face nodes within `clip_node_dist` of the region center.
    fn nearest_projection(
        &self,
        clip_faces: &[FaceId],
        mate_faces: &[FaceId],
        direction: &Vector3<f64>,
        center: &Point3<f64>,
    ) -> Option<MatePair> {
        let mut best: Option<(f64, MatePair)> = None;
        for &clip_face in clip_faces {
            for node in self.query.nodes_near_faces(&[clip_face]) {
                if (node - center).norm() > self.config.clip_node_dist {
                    continue;
                }
                for &mate_face in mate_faces {
                    let hit = self.query.project_along_direction(
                        mate_face,
                        &node,
                        direction,
                        self.config.projection_tolerance,
                    );
                    if let Some(hit) = hit {
                        let dist = (hit - node).norm();
                        if best.as_ref().map_or(true, |(d, _)| dist < *d) {
                            best = Some((
                                dist,
                                MatePair {
                                    clip_point: node,
                                    mate_point: hit,
                                    clip_face,
                                    mate_face,
                                },
                            ));
                        }
                    }
                }
            }
        }
        best.map(|(_, pair)| pair)
    }

    /// Measure a point pair and derive the signed limit for an axis.
    ///
    /// Penetration check: along Z, a mate point landing in the wrong
    /// halfspace (judged by the angle between clip-to-mate and the frame's
    /// opposite direction) collapses the raw distance to the minimum.
    /// Magnitudes below the minimum clamp to it; everything else rounds to
    /// the configured number of decimals. The sign convention is then
    /// applied per axis: zUp = L + d, zLow = L - d, x/y low = -d, up = d.
    pub fn signed_stop_distance(
        &mut self,
        pair: &MatePair,
        axis: Axis,
        frame: &LocalFrame,
    ) -> (f64, MeasurementId) {
        let measurement = self
            .query
            .create_measurement(&pair.clip_point, &pair.mate_point);

        let mut magnitude = (pair.mate_point - pair.clip_point).norm();

        let toward_mate = pair.mate_point - pair.clip_point;
        let opposite = -frame.axis_z().into_inner();
        let angle = angle_deg(&toward_mate, &opposite);
        let penetrated = match axis {
            Axis::ZUp => angle < 90.0,
            Axis::ZLow => angle > 90.0,
            _ => false,
        };
        if penetrated {
            magnitude = self.config.min_stop_distance;
        }

        if magnitude.abs() < self.config.min_stop_distance {
            magnitude = self.config.min_stop_distance;
        } else {
            magnitude = round_to(magnitude, self.config.round_decimals);
        }

        let value = match axis {
            Axis::ZUp => self.config.connector_length + magnitude,
            Axis::ZLow => self.config.connector_length - magnitude,
            Axis::XUp | Axis::YUp => magnitude,
            Axis::XLow | Axis::YLow => -magnitude,
        };
        (value, measurement)
    }

    /// Solve all six axes. A failure on one axis becomes a warning and
    /// leaves that entry at its default; the rest still solve. The cancel
    /// hook is checked between axes, keeping already-solved entries.
    pub fn solve_all(
        &mut self,
        region: &ClipRegion,
        frame: &LocalFrame,
        variant: GeomVariant,
        cancel: &mut dyn FnMut() -> bool,
    ) -> (StopDistanceSet, Vec<SolveWarning>) {
        let mut set = StopDistanceSet::new(self.config.unconstrained);
        let mut warnings = Vec::new();
        let clip_pool = Self::clip_pool(region);
        let neighbours = self.neighbour_faces(region);

        for axis in Axis::ALL {
            if cancel() {
                warnings.push(SolveWarning {
                    axis,
                    message: ClipError::Cancelled.to_string(),
                });
                break;
            }
            if !variant.solves_axis(axis) {
                continue;
            }
            if let Err(e) = self.solve_axis(frame, axis, &clip_pool, &neighbours, &mut set) {
                warnings.push(SolveWarning {
                    axis,
                    message: e.to_string(),
                });
            }
        }
        (set, warnings)
    }

    fn solve_axis(
        &mut self,
        frame: &LocalFrame,
        axis: Axis,
        clip_pool: &[FaceId],
        neighbours: &[FaceId],
        set: &mut StopDistanceSet,
    ) -> Result<()> {
        let direction = Self::axis_direction(frame, axis);
        let pair = self.find_directional_mate(
            clip_pool,
            neighbours,
            &direction,
            &-direction,
            &frame.origin(),
            axis.tag(),
        )?;
        let (value, measurement) = self.signed_stop_distance(&pair, axis, frame);
        set.set(
            axis,
            value,
            Some((pair.clip_face, pair.mate_face)),
            Some(measurement),
        );
        Ok(())
    }

    /// Manual override of one axis with an explicit face pair.
    ///
    /// Exactly one of the two faces must belong to the clip part; the
    /// explicit pair bypasses the alignment filter. On success the previous
    /// measurement for the axis is discarded; on failure the previous value
    /// is retained untouched.
    pub fn redefine(
        &mut self,
        set: &mut StopDistanceSet,
        region: &ClipRegion,
        frame: &LocalFrame,
        axis: Axis,
        face_a: FaceId,
        face_b: FaceId,
    ) -> Result<()> {
        let a_is_clip = self.query.face_owner(face_a) == region.part;
        let b_is_clip = self.query.face_owner(face_b) == region.part;
        if a_is_clip == b_is_clip {
            let reason = if a_is_clip {
                "both selected faces belong to the clip part"
            } else {
                "neither selected face belongs to the clip part"
            };
            return Err(ClipError::InvalidSelection {
                reason: reason.to_string(),
            });
        }
        let (clip_face, mate_face) = if a_is_clip {
            (face_a, face_b)
        } else {
            (face_b, face_a)
        };

        let direction = Self::axis_direction(frame, axis);
        let pair = self.find_mate_from(
            &[clip_face],
            &[mate_face],
            &direction,
            &-direction,
            &frame.origin(),
            180.0,
            axis.tag(),
        )?;
        if let Some(old) = set.take_measurement(axis) {
            self.query.delete_measurement(old);
        }
        let (value, measurement) = self.signed_stop_distance(&pair, axis, frame);
        set.set(axis, value, Some((clip_face, mate_face)), Some(measurement));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::EdgeId;
    use crate::scene::PlanarScene;
    use nalgebra::Unit;
    use std::collections::BTreeSet;

    fn unit_frame() -> LocalFrame {
        LocalFrame::new(
            Point3::new(0.0, 0.0, 0.0),
            Unit::new_normalize(Vector3::new(1.0, 0.0, 0.0)),
            Unit::new_normalize(Vector3::new(0.0, 0.0, 1.0)),
        )
    }

    fn pair_between(clip: [f64; 3], mate: [f64; 3]) -> MatePair {
        MatePair {
            clip_point: Point3::new(clip[0], clip[1], clip[2]),
            mate_point: Point3::new(mate[0], mate[1], mate[2]),
            clip_face: FaceId(0),
            mate_face: FaceId(1),
        }
    }

    #[test]
    fn test_default_set_is_unconstrained() {
        let set = StopDistanceSet::new(1000.0);
        assert_eq!(set.value(Axis::XLow), -1000.0);
        assert_eq!(set.value(Axis::XUp), 1000.0);
        assert_eq!(set.value(Axis::ZLow), -1000.0);
        assert_eq!(set.value(Axis::ZUp), 1000.0);
        assert!(!set.entry(Axis::YUp).solved);
        // low <= up on every axis
        let [xl, xu, yl, yu, zl, zu] = set.limits();
        assert!(xl <= xu && yl <= yu && zl <= zu);
    }

    #[test]
    fn test_mirrored_set_swaps_x_limits() {
        let mut set = StopDistanceSet::new(1000.0);
        set.set(Axis::XLow, -3.0, Some((FaceId(0), FaceId(1))), None);
        set.set(Axis::XUp, 2.0, None, None);
        set.set(Axis::ZUp, 3.5, None, None);

        let mirrored = set.mirrored();
        assert_eq!(mirrored.value(Axis::XLow), -2.0);
        assert_eq!(mirrored.value(Axis::XUp), 3.0);
        assert_eq!(mirrored.value(Axis::ZUp), 3.5);
        // unsolved axes stay at their defaults
        assert_eq!(mirrored.value(Axis::YLow), -1000.0);
        assert!(!mirrored.entry(Axis::YLow).solved);
        // provenance refers to unmirrored faces and is dropped
        assert!(mirrored.entry(Axis::XUp).provenance.is_none());
    }

    #[test]
    fn test_sign_conventions() {
        let mut scene = PlanarScene::new();
        let config = SolverConfig::default();
        let frame = unit_frame();
        let mut solver = StopSolver::new(&mut scene, &config);

        let (z_up, _) =
            solver.signed_stop_distance(&pair_between([0.0; 3], [0.0, 0.0, 2.5]), Axis::ZUp, &frame);
        assert!((z_up - 3.5).abs() < 1e-10);

        let (z_low, _) = solver.signed_stop_distance(
            &pair_between([0.0; 3], [0.0, 0.0, -2.5]),
            Axis::ZLow,
            &frame,
        );
        assert!((z_low - (-1.5)).abs() < 1e-10);

        let (x_up, _) =
            solver.signed_stop_distance(&pair_between([0.0; 3], [3.0, 0.0, 0.0]), Axis::XUp, &frame);
        assert!((x_up - 3.0).abs() < 1e-10);

        let (x_low, _) = solver.signed_stop_distance(
            &pair_between([0.0; 3], [-3.0, 0.0, 0.0]),
            Axis::XLow,
            &frame,
        );
        assert!((x_low - (-3.0)).abs() < 1e-10);

        let (y_low, _) = solver.signed_stop_distance(
            &pair_between([0.0; 3], [0.0, -2.0, 0.0]),
            Axis::YLow,
            &frame,
        );
        assert!((y_low - (-2.0)).abs() < 1e-10);
    }

    #[test]
    fn test_penetration_override_z_up() {
        let mut scene = PlanarScene::new();
        let config = SolverConfig::default();
        let frame = unit_frame();
        let mut solver = StopSolver::new(&mut scene, &config);

        // mate point on the near side of the clip: raw distance 0.5 must
        // collapse to the minimum before the sign convention applies
        let (z_up, _) = solver.signed_stop_distance(
            &pair_between([0.0; 3], [0.0, 0.0, -0.5]),
            Axis::ZUp,
            &frame,
        );
        assert!((z_up - 1.01).abs() < 1e-10);
    }

    #[test]
    fn test_penetration_override_z_low() {
        let mut scene = PlanarScene::new();
        let config = SolverConfig::default();
        let frame = unit_frame();
        let mut solver = StopSolver::new(&mut scene, &config);

        let (z_low, _) = solver.signed_stop_distance(
            &pair_between([0.0; 3], [0.0, 0.0, 0.5]),
            Axis::ZLow,
            &frame,
        );
        assert!((z_low - 0.99).abs() < 1e-10);
    }

    #[test]
    fn test_clamp_and_rounding() {
        let mut scene = PlanarScene::new();
        let config = SolverConfig::default();
        let frame = unit_frame();
        let mut solver = StopSolver::new(&mut scene, &config);

        // below the minimum: clamps to exactly 0.01, never 0 or negative
        let (tiny, _) = solver.signed_stop_distance(
            &pair_between([0.0; 3], [0.004, 0.0, 0.0]),
            Axis::XUp,
            &frame,
        );
        assert_eq!(tiny, 0.01);

        let (tiny_low, _) = solver.signed_stop_distance(
            &pair_between([0.0; 3], [-0.004, 0.0, 0.0]),
            Axis::XLow,
            &frame,
        );
        assert_eq!(tiny_low, -0.01);

        // everything else rounds to two decimals
        let (rounded, _) = solver.signed_stop_distance(
            &pair_between([0.0; 3], [2.5049, 0.0, 0.0]),
            Axis::XUp,
            &frame,
        );
        assert!((rounded - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_angle_widening_terminates_without_candidates() {
        let mut scene = PlanarScene::new();
        scene
            .add_face(
                "clip",
                &[
                    [0.0, 0.0, 0.0],
                    [2.0, 0.0, 0.0],
                    [2.0, 2.0, 0.0],
                    [0.0, 2.0, 0.0],
                ],
            )
            .unwrap();
        let config = SolverConfig::default();
        let solver = StopSolver::new(&mut scene, &config);
        let result = solver.find_directional_mate(
            &[FaceId(0)],
            &[],
            &Vector3::new(0.0, 0.0, 1.0),
            &Vector3::new(0.0, 0.0, -1.0),
            &Point3::new(1.0, 1.0, 0.0),
            "z_up",
        );
        match result {
            Err(ClipError::NoProjectionFound { retries, .. }) => {
                assert_eq!(retries, config.max_angle_retries)
            }
            other => panic!("expected NoProjectionFound, got {other:?}"),
        }
    }

    fn two_part_scene() -> (PlanarScene, ClipRegion, LocalFrame) {
        let mut scene = PlanarScene::new();
        scene
            .add_face(
                "clip",
                &[
                    [0.0, 0.0, 0.0],
                    [2.0, 0.0, 0.0],
                    [2.0, 2.0, 0.0],
                    [0.0, 2.0, 0.0],
                ],
            )
            .unwrap();
        // housing face two units above, normal facing down toward the clip
        scene
            .add_face(
                "housing",
                &[
                    [0.0, 2.0, 2.0],
                    [2.0, 2.0, 2.0],
                    [2.0, 0.0, 2.0],
                    [0.0, 0.0, 2.0],
                ],
            )
            .unwrap();
        let region = ClipRegion {
            seed_edge: EdgeId(0),
            opposite_edge: EdgeId(0),
            small_face: FaceId(0),
            large_face: FaceId(0),
            clip_faces: BTreeSet::new(),
            part: crate::geometry::PartKey::from("clip"),
        };
        let frame = LocalFrame::new(
            Point3::new(1.0, 1.0, 0.0),
            Unit::new_normalize(Vector3::new(1.0, 0.0, 0.0)),
            Unit::new_normalize(Vector3::new(0.0, 0.0, 1.0)),
        );
        (scene, region, frame)
    }

    #[test]
    fn test_redefine_rejects_same_part_pair() {
        let (mut scene, region, frame) = two_part_scene();
        let config = SolverConfig::default();
        let mut set = StopDistanceSet::new(config.unconstrained);
        let mut solver = StopSolver::new(&mut scene, &config);

        let result = solver.redefine(&mut set, &region, &frame, Axis::ZUp, FaceId(0), FaceId(0));
        assert!(matches!(result, Err(ClipError::InvalidSelection { .. })));
        // previous (default) value retained
        assert_eq!(set.value(Axis::ZUp), config.unconstrained);
    }

    #[test]
    fn test_redefine_overrides_axis_and_replaces_measurement() {
        let (mut scene, region, frame) = two_part_scene();
        let config = SolverConfig::default();
        let mut set = StopDistanceSet::new(config.unconstrained);

        {
            let mut solver = StopSolver::new(&mut scene, &config);
            // face order reversed on purpose: the solver sorts out which
            // face is the clip-side one
            solver
                .redefine(&mut set, &region, &frame, Axis::ZUp, FaceId(1), FaceId(0))
                .unwrap();
        }
        assert!((set.value(Axis::ZUp) - 3.0).abs() < 1e-10);
        assert_eq!(set.entry(Axis::ZUp).provenance, Some((FaceId(0), FaceId(1))));
        assert_eq!(scene.active_measurement_count(), 1);

        {
            let mut solver = StopSolver::new(&mut scene, &config);
            solver
                .redefine(&mut set, &region, &frame, Axis::ZUp, FaceId(0), FaceId(1))
                .unwrap();
        }
        // the old measurement was discarded, not leaked
        assert_eq!(scene.active_measurement_count(), 1);
    }
}
