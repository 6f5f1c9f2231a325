//! Inbound commands to the actuator controller.
//!
//! These represent actions requested by the outside world (the service
//! binding, the `vibratorctl` front end, tests) that the
//! [`ActuatorController`](super::controller::ActuatorController) interprets
//! and acts upon.

use serde::{Deserialize, Serialize};

use super::effect::{Effect, EffectStrength};
use crate::error::{Result, Status};

/// Commands that front ends can send into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum VibratorCommand {
    /// Vibrate on the long-vibration waveform for `duration_ms`.
    On { duration_ms: u32 },

    /// Stop playback.
    Off,

    /// Set the effect amplitude, `1..=255`.
    SetAmplitude { amplitude: u8 },

    /// Hand the actuator to (or take it back from) the audio path.
    SetExternalControl { enabled: bool },

    /// Play a catalog effect.
    Perform {
        effect: Effect,
        strength: EffectStrength,
    },

    /// Report which optional controls the hardware exposes.
    QueryCapabilities,
}

/// Result of a dispatched [`VibratorCommand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Status { status: Status },
    Performed { status: Status, duration_ms: u32 },
    Capabilities {
        amplitude_control: bool,
        external_control: bool,
    },
}

impl CommandOutcome {
    pub fn status<T>(result: &Result<T>) -> Self {
        Self::Status {
            status: Status::from_result(result),
        }
    }

    /// `Ok` for capability queries, which cannot fail.
    pub fn status_code(&self) -> Status {
        match *self {
            Self::Status { status } | Self::Performed { status, .. } => status,
            Self::Capabilities { .. } => Status::Ok,
        }
    }
}
