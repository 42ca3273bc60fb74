//! 3D Rotation and Pose Mathematics
//!
//! This crate converts between the standard parameterizations of a 3D rigid-body
//! rotation or pose, and provides the algebra native to each.
//!
//! ## Core Types
//!
//! - [`Vector3`] - 3D vector with x, y, z components
//! - [`Quaternion`] - scalar-first `(w, x, y, z)` quaternion with full algebra
//! - [`EulerAngles`] - three angles (radians) bound to an [`AxisSequence`]
//! - [`Htm`] - 4x4 homogeneous transformation matrix `[[R, p], [0, 1]]`
//!
//! ## Conventions
//!
//! - Angles are radians; degrees only through explicit `*_degrees` views.
//! - Sequence "abc" composes `R = R_a · R_b · R_c`, so `ZYX` is
//!   `Rz(θz) · Ry(θy) · Rx(θx)`.
//! - `a * b` for quaternions and matrices applies `b` first, then `a`.
//!
//! ## Example
//! ```
//! use pose3d_math::{AxisSequence, EulerAngles};
//! use std::f64::consts::FRAC_PI_2;
//!
//! let euler = EulerAngles::new(0.0, 0.0, FRAC_PI_2, AxisSequence::ZYX);
//! let q = euler.to_quaternion();
//! assert!((q.w - q.z).abs() < 1e-12);
//!
//! let back = euler.to_htm().get_rotation(AxisSequence::ZYX);
//! assert!((back.z - FRAC_PI_2).abs() < 1e-12);
//! ```

mod error;
mod vec3;
mod quaternion;
mod euler;
pub mod axis_sequence;
pub mod mat3;
pub mod htm;
pub mod tolerance;

pub use error::{Result, TransformError};
pub use vec3::Vector3;
pub use quaternion::Quaternion;
pub use euler::EulerAngles;
pub use axis_sequence::{Axis, AxisSequence};
pub use mat3::Mat3;
pub use htm::{Htm, Mat4};
pub use tolerance::{ConversionOptions, QuaternionMatrixMethod, QuaternionPolicy, Tolerances};
