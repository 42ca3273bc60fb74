//! Numeric tolerances and conversion policies
//!
//! Every epsilon used for degeneracy or singularity detection lives in
//! [`Tolerances`] so callers (and the configuration layer) can override it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

/// Epsilon constants for degeneracy and singularity detection
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Norms below this are treated as zero (normalize, inverse, log/exp branches)
    pub norm_epsilon: f64,
    /// Gimbal lock when cos(middle angle) < gimbal_lock_epsilon (radians from ±π/2)
    pub gimbal_lock_epsilon: f64,
    /// Allowed deviation of a quaternion's norm from 1
    pub unit_tolerance: f64,
    /// Allowed max-abs deviation of RᵀR from identity (and of det R from 1)
    pub orthogonality_tolerance: f64,
}

impl Tolerances {
    pub const DEFAULT: Self = Self {
        norm_epsilon: 1e-12,
        gimbal_lock_epsilon: 1e-7,
        unit_tolerance: 1e-9,
        orthogonality_tolerance: 1e-6,
    };
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What a quaternion-to-matrix conversion does with a non-unit quaternion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuaternionPolicy {
    /// Normalize first, then convert
    Normalize,
    /// Fail with a precondition violation
    #[default]
    Reject,
    /// Convert as-is; the rotation block carries the ‖q‖² scale
    Preserve,
}

impl QuaternionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuaternionPolicy::Normalize => "Normalize",
            QuaternionPolicy::Reject => "Reject",
            QuaternionPolicy::Preserve => "Preserve",
        }
    }
}

impl fmt::Display for QuaternionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuaternionPolicy {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Normalize" => Ok(QuaternionPolicy::Normalize),
            "Reject" => Ok(QuaternionPolicy::Reject),
            "Preserve" => Ok(QuaternionPolicy::Preserve),
            other => Err(TransformError::Configuration(format!(
                "unsupported quaternion policy '{}'",
                other
            ))),
        }
    }
}

/// Closed form used to build a rotation block from a quaternion
///
/// Both agree for unit quaternions. They differ for non-unit input: the
/// homogeneous form scales R by ‖q‖², the inhomogeneous form does not stay
/// a pure scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuaternionMatrixMethod {
    /// R from the quaternion matrix product (Q̄ᵀQ), diagonal w²+x²−y²−z²
    #[default]
    Homogeneous,
    /// R from the polynomial form, diagonal 1 − 2(y²+z²)
    Inhomogeneous,
}

impl QuaternionMatrixMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuaternionMatrixMethod::Homogeneous => "Homogeneous",
            QuaternionMatrixMethod::Inhomogeneous => "Inhomogeneous",
        }
    }
}

impl fmt::Display for QuaternionMatrixMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuaternionMatrixMethod {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Homogeneous" => Ok(QuaternionMatrixMethod::Homogeneous),
            "Inhomogeneous" => Ok(QuaternionMatrixMethod::Inhomogeneous),
            other => Err(TransformError::Configuration(format!(
                "unsupported quaternion matrix method '{}'",
                other
            ))),
        }
    }
}

/// Options for quaternion-to-matrix conversion
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub method: QuaternionMatrixMethod,
    pub policy: QuaternionPolicy,
    pub tolerances: Tolerances,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tolerances() {
        let tol = Tolerances::default();
        assert_eq!(tol.norm_epsilon, 1e-12);
        assert!(tol.gimbal_lock_epsilon >= 1e-8 && tol.gimbal_lock_epsilon <= 1e-6);
        // Orthogonality checks are looser than norm checks
        assert!(tol.orthogonality_tolerance > tol.norm_epsilon);
        assert!(tol.orthogonality_tolerance > tol.unit_tolerance);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Normalize".parse::<QuaternionPolicy>().unwrap(), QuaternionPolicy::Normalize);
        assert_eq!("Reject".parse::<QuaternionPolicy>().unwrap(), QuaternionPolicy::Reject);
        assert_eq!("Preserve".parse::<QuaternionPolicy>().unwrap(), QuaternionPolicy::Preserve);
        assert!(matches!(
            "Ignore".parse::<QuaternionPolicy>(),
            Err(TransformError::Configuration(_))
        ));
    }

    #[test]
    fn test_method_parse() {
        assert_eq!(
            "Homogeneous".parse::<QuaternionMatrixMethod>().unwrap(),
            QuaternionMatrixMethod::Homogeneous
        );
        assert_eq!(
            "Inhomogeneous".parse::<QuaternionMatrixMethod>().unwrap(),
            QuaternionMatrixMethod::Inhomogeneous
        );
        assert!("homogeneous".parse::<QuaternionMatrixMethod>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for policy in [QuaternionPolicy::Normalize, QuaternionPolicy::Reject, QuaternionPolicy::Preserve] {
            assert_eq!(policy.to_string().parse::<QuaternionPolicy>().unwrap(), policy);
        }
    }
}
