//! 3x3 Matrix utilities for rotation blocks
//!
//! Matrices are row-major: `m[row][col]`. Elementary rotations follow the
//! right-hand rule, so `rotation_z(θ)` maps X towards Y.

use crate::axis_sequence::Axis;
use crate::Vector3;

/// 3x3 matrix type (row-major)
pub type Mat3 = [[f64; 3]; 3];

/// Identity matrix
pub const IDENTITY: Mat3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Rotation by `angle` radians about the X axis
///
/// ```text
/// [1,  0,   0 ]
/// [0,  c,  -s ]
/// [0,  s,   c ]
/// ```
pub fn rotation_x(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [
        [1.0, 0.0, 0.0],
        [0.0, c, -s],
        [0.0, s, c],
    ]
}

/// Rotation by `angle` radians about the Y axis
///
/// ```text
/// [ c,  0,  s ]
/// [ 0,  1,  0 ]
/// [-s,  0,  c ]
/// ```
pub fn rotation_y(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [
        [c, 0.0, s],
        [0.0, 1.0, 0.0],
        [-s, 0.0, c],
    ]
}

/// Rotation by `angle` radians about the Z axis
///
/// ```text
/// [c, -s,  0 ]
/// [s,  c,  0 ]
/// [0,  0,  1 ]
/// ```
pub fn rotation_z(angle: f64) -> Mat3 {
    let (s, c) = angle.sin_cos();
    [
        [c, -s, 0.0],
        [s, c, 0.0],
        [0.0, 0.0, 1.0],
    ]
}

/// Elementary rotation about a coordinate axis
pub fn rotation_about(axis: Axis, angle: f64) -> Mat3 {
    match axis {
        Axis::X => rotation_x(angle),
        Axis::Y => rotation_y(angle),
        Axis::Z => rotation_z(angle),
    }
}

/// Multiply two 3x3 matrices: result = a * b
///
/// Applied to a column vector, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat3, b: Mat3) -> Mat3 {
    let mut result = [[0.0f64; 3]; 3];

    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }

    result
}

/// Transform a vector: result = M * v
pub fn transform(m: Mat3, v: Vector3) -> Vector3 {
    Vector3::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}

/// Transpose a matrix
pub fn transpose(m: Mat3) -> Mat3 {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Determinant
pub fn determinant(m: Mat3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Largest absolute entry of `RᵀR - I`
///
/// Zero for an exactly orthogonal matrix.
#[allow(clippy::needless_range_loop)]
pub fn orthogonality_error(m: Mat3) -> f64 {
    let gram = mul(transpose(m), m);
    let mut worst = 0.0f64;

    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            worst = worst.max((gram[i][j] - expected).abs());
        }
    }

    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vector3, b: Vector3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat_approx_eq(a: Mat3, b: Mat3) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if !approx_eq(a[i][j], b[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform(IDENTITY, v), v));
        assert_eq!(determinant(IDENTITY), 1.0);
        assert_eq!(orthogonality_error(IDENTITY), 0.0);
    }

    #[test]
    fn test_rotation_z_90() {
        let m = rotation_z(FRAC_PI_2);

        // X should go to Y
        let result = transform(m, Vector3::X);
        assert!(vec_approx_eq(result, Vector3::Y), "X should become Y, got {:?}", result);

        // Y should go to -X
        let result = transform(m, Vector3::Y);
        assert!(vec_approx_eq(result, -Vector3::X), "Y should become -X, got {:?}", result);
    }

    #[test]
    fn test_rotation_x_90() {
        let m = rotation_x(FRAC_PI_2);
        let result = transform(m, Vector3::Y);
        assert!(vec_approx_eq(result, Vector3::Z), "Y should become Z, got {:?}", result);
    }

    #[test]
    fn test_rotation_y_90() {
        let m = rotation_y(FRAC_PI_2);
        let result = transform(m, Vector3::Z);
        assert!(vec_approx_eq(result, Vector3::X), "Z should become X, got {:?}", result);
    }

    #[test]
    fn test_mul_composition() {
        // Two 45° rotations equal one 90° rotation
        let r45 = rotation_about(Axis::Z, FRAC_PI_2 / 2.0);
        let composed = mul(r45, r45);
        assert!(mat_approx_eq(composed, rotation_z(FRAC_PI_2)));
    }

    #[test]
    fn test_mul_order() {
        // a * b applies b first
        let a = rotation_x(FRAC_PI_2);
        let b = rotation_z(FRAC_PI_2);
        let result = transform(mul(a, b), Vector3::X);
        // Z takes X to Y, then X takes Y to Z
        assert!(vec_approx_eq(result, Vector3::Z), "got {:?}", result);
    }

    #[test]
    fn test_transpose_is_inverse_for_rotation() {
        let r = mul(rotation_x(0.3), mul(rotation_y(-1.1), rotation_z(2.0)));
        assert!(mat_approx_eq(mul(transpose(r), r), IDENTITY));
        assert!(approx_eq(determinant(r), 1.0));
        assert!(orthogonality_error(r) < 1e-14);
    }

    #[test]
    fn test_orthogonality_error_detects_scale() {
        let mut m = IDENTITY;
        m[0][0] = 2.0;
        assert!(approx_eq(orthogonality_error(m), 3.0));
    }
}
