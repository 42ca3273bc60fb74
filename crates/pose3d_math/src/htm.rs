//! Homogeneous transformation matrix
//!
//! A 4x4 row-major pose matrix `[[R, p], [0ᵀ, 1]]`: R is the 3x3 rotation
//! block and p the translation. The bottom row is exactly `(0, 0, 0, 1)`;
//! every constructor guarantees it.

use serde::{Deserialize, Serialize};

use crate::axis_sequence::AxisSequence;
use crate::error::{Result, TransformError};
use crate::mat3::{self, Mat3};
use crate::tolerance::Tolerances;
use crate::{EulerAngles, Quaternion, Vector3};

/// 4x4 matrix type (row-major)
pub type Mat4 = [[f64; 4]; 4];

const BOTTOM_ROW: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

/// Homogeneous transformation matrix
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Mat4", into = "Mat4")]
pub struct Htm {
    m: Mat4,
}

impl Default for Htm {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Htm {
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            BOTTOM_ROW,
        ],
    };

    /// From a full 4x4 array
    ///
    /// Fails with a configuration error unless the bottom row is exactly
    /// `(0, 0, 0, 1)`. The rotation block is not checked here; see
    /// [`Htm::validate`].
    pub fn from_array(m: Mat4) -> Result<Self> {
        if m[3] != BOTTOM_ROW {
            return Err(TransformError::Configuration(format!(
                "bottom row of a homogeneous transformation matrix must be [0, 0, 0, 1], got {:?}",
                m[3]
            )));
        }
        Ok(Self { m })
    }

    /// Assemble from a rotation block and a translation
    pub fn from_rotation_translation(r: Mat3, p: Vector3) -> Self {
        Self {
            m: [
                [r[0][0], r[0][1], r[0][2], p.x],
                [r[1][0], r[1][1], r[1][2], p.y],
                [r[2][0], r[2][1], r[2][2], p.z],
                BOTTOM_ROW,
            ],
        }
    }

    /// Copy with the translation replaced
    pub fn with_translation(&self, p: Vector3) -> Self {
        Self::from_rotation_translation(self.rotation(), p)
    }

    /// The full 4x4 array
    #[inline]
    pub fn to_array(&self) -> Mat4 {
        self.m
    }

    /// Rotation block R (top-left 3x3)
    pub fn rotation(&self) -> Mat3 {
        let m = &self.m;
        [
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ]
    }

    /// Translation p (top-right 3x1)
    #[inline]
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }

    /// Sum of all four diagonal entries
    pub fn trace(&self) -> f64 {
        self.diagonal().iter().sum()
    }

    pub fn diagonal(&self) -> [f64; 4] {
        [self.m[0][0], self.m[1][1], self.m[2][2], self.m[3][3]]
    }

    /// Determinant of the rotation block (+1 for a proper rotation)
    pub fn rotation_determinant(&self) -> f64 {
        mat3::determinant(self.rotation())
    }

    /// True when RᵀR ≈ I and det R ≈ +1 within `tol.orthogonality_tolerance`
    pub fn is_orthogonal(&self, tol: &Tolerances) -> bool {
        let r = self.rotation();
        mat3::orthogonality_error(r) <= tol.orthogonality_tolerance
            && (mat3::determinant(r) - 1.0).abs() <= tol.orthogonality_tolerance
    }

    /// Check the rotation-block precondition, reporting what is wrong
    pub fn validate(&self, tol: &Tolerances) -> Result<()> {
        let r = self.rotation();
        let err = mat3::orthogonality_error(r);
        if err > tol.orthogonality_tolerance {
            return Err(TransformError::PreconditionViolation(format!(
                "rotation block is not orthogonal (max |RᵀR - I| = {:e})",
                err
            )));
        }
        let det = mat3::determinant(r);
        if (det - 1.0).abs() > tol.orthogonality_tolerance {
            return Err(TransformError::PreconditionViolation(format!(
                "rotation block has determinant {}, expected +1",
                det
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&Tolerances::DEFAULT)
    }

    /// Inverse using R⁻¹ = Rᵀ: `[[Rᵀ, -Rᵀp], [0ᵀ, 1]]`
    ///
    /// Fails with a precondition violation when R is not a rotation.
    pub fn inverse_with(&self, tol: &Tolerances) -> Result<Self> {
        self.validate(tol)?;
        let rt = mat3::transpose(self.rotation());
        let p = mat3::transform(rt, self.translation());
        Ok(Self::from_rotation_translation(rt, -p))
    }

    /// Compose two transforms: result = self * other
    ///
    /// The composed transform applies `other` first, then `self`.
    #[allow(clippy::needless_range_loop)]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0f64; 4]; 4];

        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result[i][j] += self.m[i][k] * other.m[k][j];
                }
            }
        }
        // Products of valid matrices keep the exact bottom row
        result[3] = BOTTOM_ROW;

        Self { m: result }
    }

    /// Apply rotation then translation to a point
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        mat3::transform(self.rotation(), p) + self.translation()
    }

    /// Apply only the rotation to a direction
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        mat3::transform(self.rotation(), v)
    }

    #[inline]
    pub fn get_rotation(&self, sequence: AxisSequence) -> EulerAngles {
        self.get_rotation_with(sequence, &Tolerances::DEFAULT)
    }

    /// Extract Euler angles for `sequence` from the rotation block
    ///
    /// For letters (a, b, c) and parity s (see [`AxisSequence::parity`]),
    /// `R[a][c] = s·sin β` and `hypot(R[b][c], R[c][c]) = cos β`:
    ///
    /// ```text
    /// β = atan2(s·R[a][c], hypot(R[b][c], R[c][c]))
    /// α = atan2(-s·R[b][c], R[c][c])
    /// γ = atan2(-s·R[a][b], R[a][a])
    /// ```
    ///
    /// (equal to asin(s·R[a][c]), but accurate next to ±π/2).
    ///
    /// Away from gimbal lock the angles are recovered exactly (middle angle in
    /// [-π/2, π/2], the others in (-π, π]). Gimbal lock is declared when
    /// cos β < `gimbal_lock_epsilon`, i.e. the middle angle is within about
    /// epsilon radians of ±π/2. There the third-letter angle is set to zero and
    /// the first-letter angle absorbs the indeterminacy: `α = atan2(s·R[c][b], R[b][b])`.
    ///
    /// | seq | middle          | first                | third                | first at lock        |
    /// |-----|-----------------|----------------------|----------------------|----------------------|
    /// | XYZ | y = asin(R02)   | x = atan2(-R12, R22) | z = atan2(-R01, R00) | x = atan2(R21, R11)  |
    /// | XZY | z = asin(-R01)  | x = atan2(R21, R11)  | y = atan2(R02, R00)  | x = atan2(-R12, R22) |
    /// | YXZ | x = asin(-R12)  | y = atan2(R02, R22)  | z = atan2(R10, R11)  | y = atan2(-R20, R00) |
    /// | YZX | z = asin(R10)   | y = atan2(-R20, R00) | x = atan2(-R12, R11) | y = atan2(R02, R22)  |
    /// | ZXY | x = asin(R21)   | z = atan2(-R01, R11) | y = atan2(-R20, R22) | z = atan2(R10, R00)  |
    /// | ZYX | y = asin(-R20)  | z = atan2(R10, R00)  | x = atan2(R21, R22)  | z = atan2(-R01, R11) |
    pub fn get_rotation_with(&self, sequence: AxisSequence, tol: &Tolerances) -> EulerAngles {
        let r = self.rotation();
        let [a, b, c] = sequence.axes().map(|axis| axis.index());
        let s = sequence.parity();

        let sin_middle = s * r[a][c];
        let cos_middle = r[b][c].hypot(r[c][c]);

        let mut angles = [0.0f64; 3];
        angles[b] = sin_middle.atan2(cos_middle);

        if cos_middle < tol.gimbal_lock_epsilon {
            log::debug!(
                "Gimbal lock extracting {} (cos of middle angle = {:e}); {:?} angle set to zero",
                sequence,
                cos_middle,
                sequence.locked_axis()
            );
            angles[a] = (s * r[c][b]).atan2(r[b][b]);
            angles[c] = 0.0;
        } else {
            angles[a] = (-s * r[b][c]).atan2(r[c][c]);
            angles[c] = (-s * r[a][b]).atan2(r[a][a]);
        }

        EulerAngles::from_array(angles, sequence)
    }

    /// Unit quaternion of the rotation block (Shepperd's method)
    ///
    /// Of the two quaternions q and -q, the one with w >= 0 is returned.
    pub fn get_quaternion(&self) -> Quaternion {
        let m = self.rotation();
        let trace = m[0][0] + m[1][1] + m[2][2];

        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new(
                0.25 * s,
                (m[2][1] - m[1][2]) / s,
                (m[0][2] - m[2][0]) / s,
                (m[1][0] - m[0][1]) / s,
            )
        } else if m[0][0] >= m[1][1] && m[0][0] >= m[2][2] {
            let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
            Quaternion::new(
                (m[2][1] - m[1][2]) / s,
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
            )
        } else if m[1][1] >= m[2][2] {
            let s = (1.0 - m[0][0] + m[1][1] - m[2][2]).sqrt() * 2.0;
            Quaternion::new(
                (m[0][2] - m[2][0]) / s,
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
            )
        } else {
            let s = (1.0 - m[0][0] - m[1][1] + m[2][2]).sqrt() * 2.0;
            Quaternion::new(
                (m[1][0] - m[0][1]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
            )
        };

        if q.w < 0.0 {
            -q
        } else {
            q
        }
    }
}

impl std::ops::Mul for Htm {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.multiply(&other)
    }
}

impl TryFrom<Mat4> for Htm {
    type Error = TransformError;

    fn try_from(m: Mat4) -> Result<Self> {
        Self::from_array(m)
    }
}

impl From<Htm> for Mat4 {
    fn from(htm: Htm) -> Self {
        htm.m
    }
}

impl std::ops::Index<(usize, usize)> for Htm {
    type Output = f64;
    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.m[row][col]
    }
}
