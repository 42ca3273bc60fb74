//! Axis sequences for Euler angles
//!
//! The six Tait-Bryan orderings. For a sequence with letters (a, b, c) the
//! rotation block is composed as
//!
//! ```text
//! R = R_a(θ_a) · R_b(θ_b) · R_c(θ_c)
//! ```
//!
//! i.e. intrinsic rotations about a, then b′, then c″ (equivalently extrinsic
//! rotations about c, b, a). With parity s = +1 for the cyclic orders XYZ, YZX,
//! ZXY and s = -1 for XZY, YXZ, ZYX the middle angle satisfies
//! `R[a][c] = s·sin(θ_b)`. Extraction lives in [`crate::htm`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TransformError};

/// A coordinate axis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index (X=0, Y=1, Z=2)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// The six supported Euler axis sequences
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AxisSequence {
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    #[default]
    ZYX,
}

impl AxisSequence {
    pub const ALL: [AxisSequence; 6] = [
        AxisSequence::XYZ,
        AxisSequence::XZY,
        AxisSequence::YXZ,
        AxisSequence::YZX,
        AxisSequence::ZXY,
        AxisSequence::ZYX,
    ];

    /// Axes in composition order (left to right in the matrix product)
    pub const fn axes(self) -> [Axis; 3] {
        match self {
            AxisSequence::XYZ => [Axis::X, Axis::Y, Axis::Z],
            AxisSequence::XZY => [Axis::X, Axis::Z, Axis::Y],
            AxisSequence::YXZ => [Axis::Y, Axis::X, Axis::Z],
            AxisSequence::YZX => [Axis::Y, Axis::Z, Axis::X],
            AxisSequence::ZXY => [Axis::Z, Axis::X, Axis::Y],
            AxisSequence::ZYX => [Axis::Z, Axis::Y, Axis::X],
        }
    }

    /// +1 for cyclic orders, -1 otherwise
    pub const fn parity(self) -> f64 {
        match self {
            AxisSequence::XYZ | AxisSequence::YZX | AxisSequence::ZXY => 1.0,
            AxisSequence::XZY | AxisSequence::YXZ | AxisSequence::ZYX => -1.0,
        }
    }

    /// The axis whose angle is undetermined-by-convention at gimbal lock
    ///
    /// The third letter; its angle is set to zero in the singular branch.
    pub const fn locked_axis(self) -> Axis {
        self.axes()[2]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AxisSequence::XYZ => "XYZ",
            AxisSequence::XZY => "XZY",
            AxisSequence::YXZ => "YXZ",
            AxisSequence::YZX => "YZX",
            AxisSequence::ZXY => "ZXY",
            AxisSequence::ZYX => "ZYX",
        }
    }
}

impl fmt::Display for AxisSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AxisSequence {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self> {
        AxisSequence::ALL
            .into_iter()
            .find(|seq| seq.as_str() == s)
            .ok_or_else(|| {
                TransformError::Configuration(format!("unsupported axis sequence '{}'", s))
            })
    }
}

impl TryFrom<String> for AxisSequence {
    type Error = TransformError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<AxisSequence> for String {
    fn from(seq: AxisSequence) -> Self {
        seq.as_str().to_string()
    }
}
