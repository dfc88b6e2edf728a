//! Vector math helpers shared by the frame builder and stop-distance solver

use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::core::error::ClipError;

/// Below this norm a vector is treated as zero-length.
pub const UNIT_EPS: f64 = 1e-9;

/// Angle between two vectors in degrees, computed as atan2(|a × b|, a · b).
///
/// Numerically stable for near-parallel and near-antiparallel vectors, which
/// is where the face-alignment filters operate.
pub fn angle_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    let cross = a.cross(b).norm();
    let dot = a.dot(b);
    cross.atan2(dot).to_degrees()
}

/// Normalize a vector, failing on near-zero input instead of producing NaN.
pub fn try_unit(v: Vector3<f64>, what: &str) -> Result<Unit<Vector3<f64>>, ClipError> {
    Unit::try_new(v, UNIT_EPS).ok_or_else(|| ClipError::DegenerateGeometry {
        reason: format!("{what} is near zero-length"),
    })
}

/// Component-wise median of a set of sample points.
///
/// Edge midpoints use the median of polyline samples rather than the
/// two-endpoint average, which matters for curved edges.
pub fn median_point(samples: &[Point3<f64>]) -> Point3<f64> {
    debug_assert!(!samples.is_empty());
    let mut out = [0.0f64; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        let mut values: Vec<f64> = samples.iter().map(|p| p[i]).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        let n = values.len();
        *slot = if n % 2 == 1 {
            values[n / 2]
        } else {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        };
    }
    Point3::new(out[0], out[1], out[2])
}

/// Rotate a vector about an axis by an angle in degrees (right-hand rule).
pub fn rotate_about(axis: &Unit<Vector3<f64>>, degrees: f64, v: &Vector3<f64>) -> Vector3<f64> {
    Rotation3::from_axis_angle(axis, degrees.to_radians()) * v
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
