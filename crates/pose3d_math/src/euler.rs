//! Euler angles bound to an axis sequence
//!
//! Angles are stored in radians and indexed by axis, not by position in the
//! sequence: `x` is always the rotation about X, whatever the sequence. The
//! sequence decides the order of composition (see [`AxisSequence`]).

use serde::{Deserialize, Serialize};

use crate::axis_sequence::{Axis, AxisSequence};
use crate::error::Result;
use crate::htm::Htm;
use crate::mat3;
use crate::{Quaternion, Vector3};

/// Three rotation angles (radians) and the sequence they are composed in
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about X
    pub x: f64,
    /// Rotation about Y
    pub y: f64,
    /// Rotation about Z
    pub z: f64,
    pub sequence: AxisSequence,
}

impl EulerAngles {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, sequence: AxisSequence) -> Self {
        Self { x, y, z, sequence }
    }

    /// Construct from a sequence tag such as `"ZYX"`
    ///
    /// An unsupported tag is a configuration error.
    pub fn parse_new(x: f64, y: f64, z: f64, sequence: &str) -> Result<Self> {
        Ok(Self::new(x, y, z, sequence.parse()?))
    }

    /// From `[x, y, z]` in radians
    #[inline]
    pub const fn from_array(angles: [f64; 3], sequence: AxisSequence) -> Self {
        Self::new(angles[0], angles[1], angles[2], sequence)
    }

    /// From `[x, y, z]` in degrees
    pub fn from_degrees(degrees: [f64; 3], sequence: AxisSequence) -> Self {
        Self::new(
            degrees[0].to_radians(),
            degrees[1].to_radians(),
            degrees[2].to_radians(),
            sequence,
        )
    }

    /// `[x, y, z]` in radians
    #[inline]
    pub fn angles(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// `[x, y, z]` in degrees
    pub fn to_degrees(&self) -> [f64; 3] {
        [self.x.to_degrees(), self.y.to_degrees(), self.z.to_degrees()]
    }

    /// Angle about a given axis
    #[inline]
    pub fn angle(&self, axis: Axis) -> f64 {
        self.angles()[axis.index()]
    }

    /// Rotation block `R_a(θ_a) · R_b(θ_b) · R_c(θ_c)` for sequence "abc"
    pub fn rotation_matrix(&self) -> mat3::Mat3 {
        self.sequence
            .axes()
            .iter()
            .fold(mat3::IDENTITY, |acc, &axis| {
                mat3::mul(acc, mat3::rotation_about(axis, self.angle(axis)))
            })
    }

    /// Homogeneous transformation matrix with zero translation
    pub fn to_htm(&self) -> Htm {
        Htm::from_rotation_translation(self.rotation_matrix(), Vector3::ZERO)
    }

    /// Unit quaternion `q_a ⊗ q_b ⊗ q_c`, in the same order as the matrix product
    pub fn to_quaternion(&self) -> Quaternion {
        self.sequence
            .axes()
            .iter()
            .fold(Quaternion::IDENTITY, |acc, &axis| {
                acc * Quaternion::about_axis(axis, self.angle(axis))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::tolerance::QuaternionMatrixMethod;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn mat_approx_eq(a: mat3::Mat3, b: mat3::Mat3) -> bool {
        (0..3).all(|i| (0..3).all(|j| approx_eq(a[i][j], b[i][j])))
    }

    #[test]
    fn test_zero_angles_are_identity() {
        let euler = EulerAngles::new(0.0, 0.0, 0.0, AxisSequence::ZYX);
        assert!(mat_approx_eq(euler.rotation_matrix(), mat3::IDENTITY));
        assert_eq!(euler.to_quaternion(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_zyx_quarter_turn_about_z() {
        let euler = EulerAngles::new(0.0, 0.0, FRAC_PI_2, AxisSequence::ZYX);

        let q = euler.to_quaternion();
        assert!(approx_eq(q.w, FRAC_1_SQRT_2));
        assert!(approx_eq(q.x, 0.0));
        assert!(approx_eq(q.y, 0.0));
        assert!(approx_eq(q.z, FRAC_1_SQRT_2));

        let v = mat3::transform(euler.rotation_matrix(), Vector3::X);
        assert!(approx_eq(v.x, 0.0) && approx_eq(v.y, 1.0) && approx_eq(v.z, 0.0), "got {:?}", v);
    }

    #[test]
    fn test_zyx_composition_order() {
        let euler = EulerAngles::new(0.3, -0.4, 1.1, AxisSequence::ZYX);
        let expected = mat3::mul(
            mat3::rotation_z(1.1),
            mat3::mul(mat3::rotation_y(-0.4), mat3::rotation_x(0.3)),
        );
        assert!(mat_approx_eq(euler.rotation_matrix(), expected));
    }

    #[test]
    fn test_xyz_composition_order() {
        let euler = EulerAngles::new(0.3, -0.4, 1.1, AxisSequence::XYZ);
        let expected = mat3::mul(
            mat3::rotation_x(0.3),
            mat3::mul(mat3::rotation_y(-0.4), mat3::rotation_z(1.1)),
        );
        assert!(mat_approx_eq(euler.rotation_matrix(), expected));
    }

    #[test]
    fn test_sequence_changes_rotation() {
        let a = EulerAngles::new(0.3, -0.4, 1.1, AxisSequence::XYZ);
        let b = EulerAngles { sequence: AxisSequence::ZYX, ..a };
        assert!(!mat_approx_eq(a.rotation_matrix(), b.rotation_matrix()));
    }

    #[test]
    fn test_quaternion_agrees_with_matrix() {
        for seq in AxisSequence::ALL {
            let euler = EulerAngles::new(0.7, -0.2, 2.4, seq);
            let from_q = euler.to_quaternion().rotation_matrix(QuaternionMatrixMethod::Homogeneous);
            assert!(mat_approx_eq(from_q, euler.rotation_matrix()), "mismatch for {}", seq);
        }
    }

    #[test]
    fn test_degrees_view() {
        let euler = EulerAngles::new(FRAC_PI_2, -FRAC_PI_4, 0.0, AxisSequence::YXZ);
        let deg = euler.to_degrees();
        assert!(approx_eq(deg[0], 90.0));
        assert!(approx_eq(deg[1], -45.0));
        assert_eq!(deg[2], 0.0);

        let back = EulerAngles::from_degrees(deg, AxisSequence::YXZ);
        assert!(approx_eq(back.x, euler.x) && approx_eq(back.y, euler.y));
    }

    #[test]
    fn test_parse_new() {
        let euler = EulerAngles::parse_new(0.1, 0.2, 0.3, "YZX").unwrap();
        assert_eq!(euler.sequence, AxisSequence::YZX);
        assert_eq!(euler.angles(), [0.1, 0.2, 0.3]);

        let err = EulerAngles::parse_new(0.1, 0.2, 0.3, "ZXZ").unwrap_err();
        assert!(matches!(err, TransformError::Configuration(_)));
    }

    #[test]
    fn test_angle_by_axis() {
        let euler = EulerAngles::from_array([1.0, 2.0, 3.0], AxisSequence::ZXY);
        assert_eq!(euler.angle(Axis::X), 1.0);
        assert_eq!(euler.angle(Axis::Y), 2.0);
        assert_eq!(euler.angle(Axis::Z), 3.0);
    }
}
