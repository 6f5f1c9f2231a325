//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ActuatorController (domain)
//! ```
//!
//! Driven adapters (sysfs control files, in-memory backends, calibration
//! sources) implement these traits.  The
//! [`ActuatorController`](super::controller::ActuatorController) consumes
//! them via generics, so the domain core never touches a file descriptor.
//!
//! Every hardware call returns an explicit [`Result`]; a failed write leaves
//! the channel usable for the next call.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::levels::VoltageLevels;

// ───────────────────────────────────────────────────────────────
// Control points
// ───────────────────────────────────────────────────────────────

/// A named register exposed by the actuator driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlPoint {
    Activate,
    Duration,
    State,
    EffectDuration,
    EffectIndex,
    EffectQueue,
    EffectScale,
    GlobalScale,
    AspEnable,
    GpioFallIndex,
    GpioFallScale,
    GpioRiseIndex,
    GpioRiseScale,
    F0,
    Redc,
    Q,
}

impl ControlPoint {
    /// Every control point, in the order the adapters open them.
    pub const ALL: [ControlPoint; 16] = [
        Self::F0,
        Self::Redc,
        Self::Q,
        Self::Activate,
        Self::Duration,
        Self::State,
        Self::EffectDuration,
        Self::EffectIndex,
        Self::EffectQueue,
        Self::EffectScale,
        Self::GlobalScale,
        Self::AspEnable,
        Self::GpioFallIndex,
        Self::GpioFallScale,
        Self::GpioRiseIndex,
        Self::GpioRiseScale,
    ];

    /// Short name used in log lines and config files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Duration => "duration",
            Self::State => "state",
            Self::EffectDuration => "effect_duration",
            Self::EffectIndex => "effect_index",
            Self::EffectQueue => "effect_queue",
            Self::EffectScale => "effect_scale",
            Self::GlobalScale => "global_scale",
            Self::AspEnable => "asp_enable",
            Self::GpioFallIndex => "gpio_fall_index",
            Self::GpioFallScale => "gpio_fall_scale",
            Self::GpioRiseIndex => "gpio_rise_index",
            Self::GpioRiseScale => "gpio_rise_scale",
            Self::F0 => "f0",
            Self::Redc => "redc",
            Self::Q => "q",
        }
    }
}

impl fmt::Display for ControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ───────────────────────────────────────────────────────────────
// Hardware port (driven adapter: domain ↔ driver registers)
// ───────────────────────────────────────────────────────────────

/// Scalar and string access to the driver's control points.
///
/// Implementations must keep a channel writable after a rejected value:
/// one malformed write never poisons later writes to the same point.
pub trait HardwarePort {
    /// Capability check: was the control point opened successfully?
    fn has(&self, point: ControlPoint) -> bool;

    /// Write a raw value (the adapter appends any line terminator).
    fn write(&mut self, point: ControlPoint, value: &str) -> Result<(), ChannelError>;

    /// Read the current raw contents of a control point.
    fn read(&mut self, point: ControlPoint) -> Result<String, ChannelError>;

    fn write_u32(&mut self, point: ControlPoint, value: u32) -> Result<(), ChannelError> {
        self.write(point, &value.to_string())
    }

    fn write_bool(&mut self, point: ControlPoint, value: bool) -> Result<(), ChannelError> {
        self.write(point, if value { "1" } else { "0" })
    }

    fn read_u32(&mut self, point: ControlPoint) -> Result<u32, ChannelError> {
        let raw = self.read(point)?;
        raw.trim().parse().map_err(|_| ChannelError::Parse(point))
    }

    fn read_bool(&mut self, point: ControlPoint) -> Result<bool, ChannelError> {
        Ok(self.read_u32(point)? != 0)
    }
}

// ───────────────────────────────────────────────────────────────
// Calibration port (driven adapter: persisted calibration → domain)
// ───────────────────────────────────────────────────────────────

/// Typed view of the per-unit calibration data.
///
/// Getters apply per-field fallback: a missing or malformed value never
/// affects any other field.
pub trait CalibrationPort {
    /// Measured resonant frequency, if present and parsable.
    fn f0(&self) -> Option<u32>;

    /// Measured DC resistance, if present and parsable.
    fn redc(&self) -> Option<u32>;

    /// Quality factor in Q16.16; always yields a value (measured, derived
    /// from the quantised index, or the compiled-in default).
    fn q(&self) -> u32;

    /// The calibrated voltage table, or `None` when absent or rejected.
    fn voltage_levels(&self) -> Option<VoltageLevels>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`HardwarePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The control point could not be opened at startup.
    Unavailable(ControlPoint),
    /// The driver rejected the read or write.
    Io(ControlPoint, std::io::ErrorKind),
    /// The read value is not a valid number.
    Parse(ControlPoint),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(p) => write!(f, "{p}: channel unavailable"),
            Self::Io(p, kind) => write!(f, "{p}: I/O error ({kind})"),
            Self::Parse(p) => write!(f, "{p}: unparsable value"),
        }
    }
}

impl std::error::Error for ChannelError {}
