//! pose3d - Rotation and pose conversions
//!
//! Re-exports the algebra from [`pose3d_math`] and adds a layered
//! configuration loader for the numeric tolerances and conversion policies.

pub mod config;

pub use config::{AppConfig, ConfigError, ConversionConfig};
pub use pose3d_math::*;
