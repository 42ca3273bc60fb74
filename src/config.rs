//! Library configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`P3D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;

use pose3d_math::{
    AxisSequence, ConversionOptions, EulerAngles, Htm, Quaternion, QuaternionMatrixMethod,
    QuaternionPolicy, Tolerances,
};

/// Main library configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Degeneracy and singularity thresholds
    #[serde(default)]
    pub tolerances: Tolerances,
    /// Conversion policies
    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`P3D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // P3D_TOLERANCES__GIMBAL_LOCK_EPSILON=1e-8 -> tolerances.gimbal_lock_epsilon
        figment = figment.merge(Env::prefixed("P3D_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reject epsilons that are non-finite, non-positive, or not below 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tol = &self.tolerances;
        let fields = [
            ("norm_epsilon", tol.norm_epsilon),
            ("gimbal_lock_epsilon", tol.gimbal_lock_epsilon),
            ("unit_tolerance", tol.unit_tolerance),
            ("orthogonality_tolerance", tol.orthogonality_tolerance),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 || value >= 1.0 {
                return Err(ConfigError::Invalid(format!(
                    "tolerances.{} must be in (0, 1), got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Options for quaternion-to-matrix conversion
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            method: self.conversion.quaternion_method,
            policy: self.conversion.quaternion_policy,
            tolerances: self.tolerances,
        }
    }

    /// Euler angles (radians, indexed by axis) in the configured default sequence
    pub fn euler(&self, x: f64, y: f64, z: f64) -> EulerAngles {
        EulerAngles::new(x, y, z, self.conversion.default_sequence)
    }

    /// Extract Euler angles in the configured default sequence
    ///
    /// Gimbal lock is judged against the configured `gimbal_lock_epsilon`.
    pub fn get_rotation(&self, htm: &Htm) -> EulerAngles {
        htm.get_rotation_with(self.conversion.default_sequence, &self.tolerances)
    }

    /// Quaternion to Euler angles in the configured default sequence,
    /// applying the configured non-unit policy
    pub fn quaternion_to_euler(&self, q: &Quaternion) -> pose3d_math::Result<EulerAngles> {
        q.to_euler(self.conversion.default_sequence, &self.conversion_options())
    }

    /// Quaternion to HTM with the configured method and policy
    pub fn quaternion_to_htm(&self, q: &Quaternion) -> pose3d_math::Result<Htm> {
        q.to_htm_with(&self.conversion_options())
    }
}

/// Conversion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// What to do with non-unit quaternions when building a matrix
    pub quaternion_policy: QuaternionPolicy,
    /// Closed form for quaternion-to-matrix
    pub quaternion_method: QuaternionMatrixMethod,
    /// Sequence used when the caller does not name one
    pub default_sequence: AxisSequence,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            quaternion_policy: QuaternionPolicy::Reject,
            quaternion_method: QuaternionMatrixMethod::Homogeneous,
            default_sequence: AxisSequence::ZYX,
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Load(#[from] figment::Error),
    /// Values were read but are out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
