//! Vibrator configuration
//!
//! Where every control point lives, where the calibration file is, and an
//! optional effect-catalog descriptor.  Sources, lowest precedence first:
//! compiled-in defaults from [`crate::paths`], a JSON file, then per-path
//! environment variables.

use core::fmt;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::app::ports::ControlPoint;
use crate::paths;

/// Environment variable overriding the calibration file location.
pub const CALIBRATION_ENV: &str = "CALIBRATION_FILEPATH";

/// Environment variable pointing at a JSON catalog descriptor.
pub const CATALOG_ENV: &str = "EFFECT_CATALOG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VibratorConfig {
    /// Path of each driver control point.  Points missing from a config
    /// file keep their default path.
    pub control_points: BTreeMap<ControlPoint, PathBuf>,
    /// Persisted `key: value` calibration file.
    pub calibration_path: PathBuf,
    /// JSON effect catalog; the built-in catalog is used when unset.
    pub catalog_path: Option<PathBuf>,
}

impl Default for VibratorConfig {
    fn default() -> Self {
        Self {
            control_points: ControlPoint::ALL
                .iter()
                .map(|&p| (p, PathBuf::from(default_path(p))))
                .collect(),
            calibration_path: PathBuf::from(paths::CALIBRATION_FILEPATH),
            catalog_path: None,
        }
    }
}

impl VibratorConfig {
    /// Parse a JSON config.  Omitted fields and control points keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut cfg: Self = serde_json::from_str(json).map_err(|e| {
            warn!("config: malformed JSON ({})", e);
            ConfigError::Malformed
        })?;
        for p in ControlPoint::ALL {
            cfg.control_points
                .entry(p)
                .or_insert_with(|| PathBuf::from(default_path(p)));
        }
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            warn!("config: failed to read {}: {}", path.display(), e);
            ConfigError::Io(e.kind())
        })?;
        let cfg = Self::from_json(&text)?;
        info!("config: loaded {}", path.display());
        Ok(cfg)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var_os(key));
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<OsString>) {
        for p in ControlPoint::ALL {
            if let Some(value) = lookup(env_var(p)) {
                debug!("config: {} from ${}", p, env_var(p));
                self.control_points.insert(p, PathBuf::from(value));
            }
        }
        if let Some(value) = lookup(CALIBRATION_ENV) {
            self.calibration_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(CATALOG_ENV) {
            self.catalog_path = Some(PathBuf::from(value));
        }
    }

    /// Path configured for a control point.
    pub fn path(&self, point: ControlPoint) -> &Path {
        self.control_points
            .get(&point)
            .map_or_else(|| Path::new(default_path(point)), PathBuf::as_path)
    }

    /// Reject empty paths before any adapter tries to open them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for p in ControlPoint::ALL {
            if self.path(p).as_os_str().is_empty() {
                return Err(ConfigError::ValidationFailed(p.name()));
            }
        }
        if self.calibration_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed("calibration_path"));
        }
        if self
            .catalog_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::ValidationFailed("catalog_path"));
        }
        Ok(())
    }
}

/// Compiled-in location of a control point.
pub const fn default_path(point: ControlPoint) -> &'static str {
    match point {
        ControlPoint::Activate => paths::ACTIVATE_PATH,
        ControlPoint::Duration => paths::DURATION_PATH,
        ControlPoint::State => paths::STATE_PATH,
        ControlPoint::EffectDuration => paths::EFFECT_DURATION_PATH,
        ControlPoint::EffectIndex => paths::EFFECT_INDEX_PATH,
        ControlPoint::EffectQueue => paths::EFFECT_QUEUE_PATH,
        ControlPoint::EffectScale => paths::EFFECT_SCALE_PATH,
        ControlPoint::GlobalScale => paths::GLOBAL_SCALE_PATH,
        ControlPoint::AspEnable => paths::ASP_ENABLE_PATH,
        ControlPoint::GpioFallIndex => paths::GPIO_FALL_INDEX_PATH,
        ControlPoint::GpioFallScale => paths::GPIO_FALL_SCALE_PATH,
        ControlPoint::GpioRiseIndex => paths::GPIO_RISE_INDEX_PATH,
        ControlPoint::GpioRiseScale => paths::GPIO_RISE_SCALE_PATH,
        ControlPoint::F0 => paths::F0_PATH,
        ControlPoint::Redc => paths::REDC_PATH,
        ControlPoint::Q => paths::Q_PATH,
    }
}

/// Environment variable overriding a control point's path.
pub const fn env_var(point: ControlPoint) -> &'static str {
    match point {
        ControlPoint::Activate => "ACTIVATE_PATH",
        ControlPoint::Duration => "DURATION_PATH",
        ControlPoint::State => "STATE_PATH",
        ControlPoint::EffectDuration => "EFFECT_DURATION_PATH",
        ControlPoint::EffectIndex => "EFFECT_INDEX_PATH",
        ControlPoint::EffectQueue => "EFFECT_QUEUE_PATH",
        ControlPoint::EffectScale => "EFFECT_SCALE_PATH",
        ControlPoint::GlobalScale => "GLOBAL_SCALE_PATH",
        ControlPoint::AspEnable => "ASP_ENABLE_PATH",
        ControlPoint::GpioFallIndex => "GPIO_FALL_INDEX",
        ControlPoint::GpioFallScale => "GPIO_FALL_SCALE",
        ControlPoint::GpioRiseIndex => "GPIO_RISE_INDEX",
        ControlPoint::GpioRiseScale => "GPIO_RISE_SCALE",
        ControlPoint::F0 => "F0_FILEPATH",
        ControlPoint::Redc => "REDC_FILEPATH",
        ControlPoint::Q => "Q_FILEPATH",
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    Io(std::io::ErrorKind),
    Malformed,
    /// Names the offending field.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "config unreadable ({kind})"),
            Self::Malformed => write!(f, "malformed config"),
            Self::ValidationFailed(field) => write!(f, "validation failed: {field} path is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
