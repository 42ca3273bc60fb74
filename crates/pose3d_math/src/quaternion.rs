//! Quaternion for representing 3D rotations
//!
//! Scalar-first `(w, x, y, z)`. Raw algebra works for any quaternion; rotation
//! use assumes a unit quaternion, and conversion to a matrix applies a
//! [`QuaternionPolicy`] when that assumption does not hold.
//!
//! Composition convention: `a.multiply(&b)` (or `a * b`) is the Hamilton
//! product a ⊗ b, which applies rotation `b` first, then `a`. It matches the
//! matrix product: `R(a ⊗ b) = R(a) · R(b)`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::axis_sequence::{Axis, AxisSequence};
use crate::error::{Result, TransformError};
use crate::htm::Htm;
use crate::mat3::Mat3;
use crate::tolerance::{ConversionOptions, QuaternionMatrixMethod, QuaternionPolicy, Tolerances};
use crate::{EulerAngles, Vector3};

/// Quaternion with scalar part `w` and vector part `(x, y, z)`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar component
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// From `[w, x, y, z]`
    #[inline]
    pub const fn from_array(q: [f64; 4]) -> Self {
        Self { w: q[0], x: q[1], y: q[2], z: q[3] }
    }

    /// Components as `[w, x, y, z]`
    #[inline]
    pub fn to_array(&self) -> [f64; 4] {
        *self.as_array()
    }

    /// Borrow the components as `[w, x, y, z]` without copying
    #[inline]
    pub fn as_array(&self) -> &[f64; 4] {
        bytemuck::cast_ref(self)
    }

    /// View a slice of quaternions as a flat `[w0, x0, y0, z0, w1, ...]` buffer
    #[inline]
    pub fn flatten(quaternions: &[Quaternion]) -> &[f64] {
        bytemuck::cast_slice(quaternions)
    }

    /// Pure quaternion `(0, v)`
    #[inline]
    pub const fn from_vector_part(v: Vector3) -> Self {
        Self { w: 0.0, x: v.x, y: v.y, z: v.z }
    }

    #[inline]
    pub fn vector_part(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Rotation by `angle` radians about a coordinate axis
    pub fn about_axis(axis: Axis, angle: f64) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        match axis {
            Axis::X => Self::new(c, s, 0.0, 0.0),
            Axis::Y => Self::new(c, 0.0, s, 0.0),
            Axis::Z => Self::new(c, 0.0, 0.0, s),
        }
    }

    /// Rotation by `angle` radians about an arbitrary axis
    ///
    /// The axis is normalized first; a zero axis is degenerate.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Result<Self> {
        let unit = axis.normalize()?;
        let (s, c) = (angle * 0.5).sin_cos();
        Ok(Self::new(c, unit.x * s, unit.y * s, unit.z * s))
    }

    /// Four-dimensional dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// √(w²+x²+y²+z²)
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// True when |‖q‖ - 1| is within `tol.unit_tolerance`
    #[inline]
    pub fn is_unit(&self, tol: &Tolerances) -> bool {
        (self.norm() - 1.0).abs() <= tol.unit_tolerance
    }

    #[inline]
    pub fn normalize(&self) -> Result<Self> {
        self.normalize_with(&Tolerances::DEFAULT)
    }

    /// Divide every component by the norm
    pub fn normalize_with(&self, tol: &Tolerances) -> Result<Self> {
        let n = self.norm();
        if n < tol.norm_epsilon {
            return Err(TransformError::DegenerateInput {
                operation: "Quaternion::normalize",
                norm: n,
            });
        }
        Ok(self.scale(1.0 / n))
    }

    /// `(w, -x, -y, -z)`
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    #[inline]
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&Tolerances::DEFAULT)
    }

    /// Conjugate divided by ‖q‖²; equals the conjugate for unit quaternions
    pub fn inverse_with(&self, tol: &Tolerances) -> Result<Self> {
        let n = self.norm();
        if n < tol.norm_epsilon {
            return Err(TransformError::DegenerateInput {
                operation: "Quaternion::inverse",
                norm: n,
            });
        }
        Ok(self.conjugate().scale(1.0 / (n * n)))
    }

    /// Hamilton product `self ⊗ other` (applies `other` first, then `self`)
    pub fn multiply(&self, other: &Self) -> Self {
        let a = self;
        let b = other;

        Self {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
        }
    }

    #[inline]
    pub fn logarithm(&self) -> Result<Self> {
        self.logarithm_with(&Tolerances::DEFAULT)
    }

    /// Quaternion logarithm `(ln‖q‖, v̂·atan2(‖v‖, w))`
    ///
    /// When the vector part is below epsilon no axis is defined and the
    /// vector part of the result is zero. The zero quaternion has no
    /// logarithm.
    pub fn logarithm_with(&self, tol: &Tolerances) -> Result<Self> {
        let n = self.norm();
        if n < tol.norm_epsilon {
            return Err(TransformError::DegenerateInput {
                operation: "Quaternion::logarithm",
                norm: n,
            });
        }

        let v = self.vector_part();
        let s = v.norm();
        if s < tol.norm_epsilon {
            return Ok(Self::new(n.ln(), 0.0, 0.0, 0.0));
        }

        let theta = s.atan2(self.w);
        let axis = v * (theta / s);
        Ok(Self::new(n.ln(), axis.x, axis.y, axis.z))
    }

    #[inline]
    pub fn exponential(&self) -> Self {
        self.exponential_with(&Tolerances::DEFAULT)
    }

    /// Quaternion exponential `eʷ·(cos‖v‖, v̂·sin‖v‖)`
    ///
    /// For a pure quaternion (w = 0) this is the inverse of [`Self::logarithm`]
    /// on unit quaternions. A vector part below epsilon maps to `(eʷ, 0, 0, 0)`.
    pub fn exponential_with(&self, tol: &Tolerances) -> Self {
        let scale = self.w.exp();
        let v = self.vector_part();
        let s = v.norm();
        if s <= tol.norm_epsilon {
            return Self::new(scale, 0.0, 0.0, 0.0);
        }

        let (sin_s, cos_s) = s.sin_cos();
        let axis = v * (scale * sin_s / s);
        Self::new(scale * cos_s, axis.x, axis.y, axis.z)
    }

    /// Rotate a vector by this (unit) quaternion: `q v q*`
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        let u = self.vector_part();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Rotation block from the closed form selected by `method`
    ///
    /// No unit check: a non-unit quaternion produces a scaled (homogeneous)
    /// or distorted (inhomogeneous) block.
    pub fn rotation_matrix(&self, method: QuaternionMatrixMethod) -> Mat3 {
        let Self { w, x, y, z } = *self;

        match method {
            QuaternionMatrixMethod::Homogeneous => [
                [w * w + x * x - y * y - z * z, 2.0 * (x * y - w * z), 2.0 * (x * z + w * y)],
                [2.0 * (x * y + w * z), w * w - x * x + y * y - z * z, 2.0 * (y * z - w * x)],
                [2.0 * (x * z - w * y), 2.0 * (y * z + w * x), w * w - x * x - y * y + z * z],
            ],
            QuaternionMatrixMethod::Inhomogeneous => [
                [1.0 - 2.0 * (y * y + z * z), 2.0 * (x * y - z * w), 2.0 * (x * z + y * w)],
                [2.0 * (x * y + z * w), 1.0 - 2.0 * (x * x + z * z), 2.0 * (y * z - x * w)],
                [2.0 * (x * z - y * w), 2.0 * (y * z + x * w), 1.0 - 2.0 * (x * x + y * y)],
            ],
        }
    }

    /// Homogeneous transformation matrix with default [`ConversionOptions`]
    #[inline]
    pub fn to_htm(&self) -> Result<Htm> {
        self.to_htm_with(&ConversionOptions::default())
    }

    /// Homogeneous transformation matrix (zero translation)
    ///
    /// The non-unit case is resolved by `options.policy`.
    pub fn to_htm_with(&self, options: &ConversionOptions) -> Result<Htm> {
        let tol = &options.tolerances;
        let q = if self.is_unit(tol) {
            *self
        } else {
            match options.policy {
                QuaternionPolicy::Normalize => {
                    log::debug!("Normalizing quaternion with norm {} before conversion", self.norm());
                    self.normalize_with(tol)?
                }
                QuaternionPolicy::Reject => {
                    return Err(TransformError::PreconditionViolation(format!(
                        "quaternion norm {} is not within {:e} of 1",
                        self.norm(),
                        tol.unit_tolerance
                    )));
                }
                QuaternionPolicy::Preserve => {
                    log::warn!(
                        "Converting non-unit quaternion (norm {}); rotation block will be scaled",
                        self.norm()
                    );
                    *self
                }
            }
        };

        Ok(Htm::from_rotation_translation(q.rotation_matrix(options.method), Vector3::ZERO))
    }

    /// Euler angles for `sequence`, extracted through the rotation matrix
    pub fn to_euler(&self, sequence: AxisSequence, options: &ConversionOptions) -> Result<EulerAngles> {
        Ok(self.to_htm_with(options)?.get_rotation_with(sequence, &options.tolerances))
    }

    #[inline]
    fn scale(&self, k: f64) -> Self {
        Self::new(self.w * k, self.x * k, self.y * k, self.z * k)
    }
}

impl std::ops::Mul for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.multiply(&other)
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.scale(-1.0)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(q: [f64; 4]) -> Self {
        Self::from_array(q)
    }
}
