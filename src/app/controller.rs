//! Actuator controller: the hexagonal core.
//!
//! [`ActuatorController`] owns the hardware port and the effect composer.
//! It exposes the actuation API the service layer publishes and is the only
//! place that decides in which order registers are written.
//!
//! ```text
//!  CalibrationPort ──▶ ┌────────────────────────┐
//!                      │  ActuatorController     │ ──▶ HardwarePort
//!  EffectCatalog ────▶ │  composer · write order │
//!                      └────────────────────────┘
//! ```
//!
//! ## Write order
//!
//! | Operation        | Registers, in order                                   |
//! |------------------|-------------------------------------------------------|
//! | `activate`       | global scale → effect index → duration → activate=1  |
//! | `deactivate`     | global scale → activate=0                             |
//! | `perform_effect` | [queue] → effect scale → effect index → duration → activate=1 |
//!
//! Playback is fire-and-forget: the driver clears `activate` itself once the
//! duration elapses, so the controller never tracks completion.

use log::{debug, error, info, warn};

use super::amplitude::amplitude_to_scale;
use super::catalog::{
    EffectCatalog, MAX_COLD_START_LATENCY_MS, WAVEFORM_LONG_VIBRATION_EFFECT_INDEX,
    WAVEFORM_SIMPLE_EFFECT_INDEX,
};
use super::commands::{CommandOutcome, VibratorCommand};
use super::composer::{EffectComposer, EffectQueue};
use super::effect::{Effect, EffectStrength};
use super::levels::{VOLTAGE_SCALE_MAX, VolumeLevel, VoltageLevels};
use super::ports::{CalibrationPort, ChannelError, ControlPoint, HardwarePort};
use crate::error::{Result, Status, VibratorError};

/// Reference maximum for the caller-facing amplitude control.
pub const AMPLITUDE_MAX: u32 = u8::MAX as u32;

// ───────────────────────────────────────────────────────────────
// ActuatorController
// ───────────────────────────────────────────────────────────────

pub struct ActuatorController<H: HardwarePort> {
    hw: H,
    composer: EffectComposer,
}

impl<H: HardwarePort> ActuatorController<H> {
    /// Bring the driver up and push calibration.
    ///
    /// Never fails: missing control points and bad calibration degrade the
    /// corresponding capability and are logged.
    pub fn new(mut hw: H, calibration: &impl CalibrationPort, catalog: EffectCatalog) -> Self {
        if let Err(e) = hw.write_bool(ControlPoint::State, true) {
            error!("Failed to set state: {}", e);
        }

        push_calibration(&mut hw, calibration);

        let levels = calibration.voltage_levels().unwrap_or_else(|| {
            info!("controller: using default voltage levels");
            VoltageLevels::default()
        });

        log_write(
            hw.write_u32(ControlPoint::EffectIndex, WAVEFORM_SIMPLE_EFFECT_INDEX),
            "effect index",
        );

        let catalog = match hw.read_u32(ControlPoint::EffectDuration) {
            Ok(samples) if samples > 0 => catalog.with_measured_simple_duration(samples),
            Ok(_) => catalog,
            Err(e) => {
                debug!("controller: effect duration unavailable ({}), keeping catalog lengths", e);
                catalog
            }
        };

        setup_edge_triggers(&mut hw, &levels);

        info!(
            "controller: ready, levels={:?}, {} effects",
            levels.as_array(),
            catalog.len()
        );

        Self {
            hw,
            composer: EffectComposer::new(catalog, levels),
        }
    }

    // ── Timed activation ─────────────────────────────────────

    /// Vibrate for `duration_ms` on the long-vibration waveform.
    ///
    /// Best effort: every write is attempted even if an earlier one failed.
    pub fn activate(&mut self, duration_ms: u32) -> Result<()> {
        let duration_ms = duration_ms.saturating_add(MAX_COLD_START_LATENCY_MS);
        if let Err(e) = self.set_global_amplitude(true) {
            debug!("activate: global amplitude not applied ({})", e);
        }
        self.trigger(duration_ms, WAVEFORM_LONG_VIBRATION_EFFECT_INDEX);
        Ok(())
    }

    /// Stop playback.  Idempotent; a failed write is reported.
    pub fn deactivate(&mut self) -> Result<()> {
        if let Err(e) = self.set_global_amplitude(false) {
            debug!("deactivate: global amplitude not reset ({})", e);
        }
        self.hw.write_bool(ControlPoint::Activate, false).map_err(|e| {
            error!("Failed to turn vibrator off: {}", e);
            VibratorError::UnknownError
        })
    }

    // ── Amplitude ────────────────────────────────────────────

    pub fn supports_amplitude_control(&mut self) -> bool {
        self.hw.has(ControlPoint::EffectScale) && !self.is_under_external_control()
    }

    /// Set the effect amplitude, `1..=255`.
    pub fn set_amplitude(&mut self, amplitude: u8) -> Result<()> {
        if amplitude == 0 {
            return Err(VibratorError::BadValue);
        }
        if self.is_under_external_control() {
            return Err(VibratorError::UnsupportedOperation);
        }
        self.set_effect_amplitude(u32::from(amplitude), AMPLITUDE_MAX)
    }

    // ── External control ─────────────────────────────────────

    /// Capability check: the enable control point exists.
    pub fn supports_external_control(&self) -> bool {
        self.hw.has(ControlPoint::AspEnable)
    }

    pub fn set_external_control(&mut self, enabled: bool) -> Result<()> {
        if let Err(e) = self.set_global_amplitude(enabled) {
            debug!("external control: global amplitude not applied ({})", e);
        }
        self.hw
            .write_bool(ControlPoint::AspEnable, enabled)
            .map_err(|e| {
                error!("Failed to set external control: {}", e);
                VibratorError::UnknownError
            })
    }

    /// Current external-control flag; unreadable counts as disabled.
    pub fn is_under_external_control(&mut self) -> bool {
        self.hw.read_bool(ControlPoint::AspEnable).unwrap_or(false)
    }

    // ── Effects ──────────────────────────────────────────────

    /// Play a catalog effect and return its estimated duration.
    ///
    /// Resolution happens before any write: an unsupported request touches
    /// no register.
    pub fn perform_effect(&mut self, effect: Effect, strength: EffectStrength) -> Result<u32> {
        let spec = self.composer.resolve(effect, strength).map_err(|e| {
            debug!("perform: {} at {} unsupported", effect, strength);
            e
        })?;

        if let Some(queue) = &spec.queue {
            self.set_effect_queue(queue)?;
        }

        if let Err(e) = self.set_effect_amplitude(spec.volume_level, VOLTAGE_SCALE_MAX) {
            warn!("perform: {} scale not applied ({})", effect, e);
        }

        self.trigger(spec.duration_ms, spec.waveform_slot());
        debug!(
            "perform: {} at {} -> {} ms, slot {}",
            effect,
            strength,
            spec.duration_ms,
            spec.waveform_slot()
        );
        Ok(spec.duration_ms)
    }

    /// Service-facing form of [`perform_effect`](Self::perform_effect):
    /// failures report a zero duration.
    pub fn perform(&mut self, effect: Effect, strength: EffectStrength) -> (Status, u32) {
        match self.perform_effect(effect, strength) {
            Ok(ms) => (Status::Ok, ms),
            Err(e) => (Status::from(e), 0),
        }
    }

    // ── Command dispatch ─────────────────────────────────────

    /// Single entry point for front ends.
    pub fn handle_command(&mut self, cmd: VibratorCommand) -> CommandOutcome {
        match cmd {
            VibratorCommand::On { duration_ms } => {
                CommandOutcome::status(&self.activate(duration_ms))
            }
            VibratorCommand::Off => CommandOutcome::status(&self.deactivate()),
            VibratorCommand::SetAmplitude { amplitude } => {
                CommandOutcome::status(&self.set_amplitude(amplitude))
            }
            VibratorCommand::SetExternalControl { enabled } => {
                CommandOutcome::status(&self.set_external_control(enabled))
            }
            VibratorCommand::Perform { effect, strength } => {
                let (status, duration_ms) = self.perform(effect, strength);
                CommandOutcome::Performed {
                    status,
                    duration_ms,
                }
            }
            VibratorCommand::QueryCapabilities => CommandOutcome::Capabilities {
                amplitude_control: self.supports_amplitude_control(),
                external_control: self.supports_external_control(),
            },
        }
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn voltage_levels(&self) -> &VoltageLevels {
        self.composer.levels()
    }

    pub fn catalog(&self) -> &EffectCatalog {
        self.composer.catalog()
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    // ── Internal ─────────────────────────────────────────────

    /// Slot, duration, then activate.  Failures are logged and the
    /// sequence continues.
    fn trigger(&mut self, duration_ms: u32, slot: u32) {
        log_write(self.hw.write_u32(ControlPoint::EffectIndex, slot), "effect index");
        log_write(self.hw.write_u32(ControlPoint::Duration, duration_ms), "duration");
        log_write(self.hw.write_bool(ControlPoint::Activate, true), "activate");
    }

    fn set_effect_queue(&mut self, queue: &EffectQueue) -> Result<()> {
        self.hw
            .write(ControlPoint::EffectQueue, queue.as_str())
            .map_err(|e| {
                error!("Failed to write \"{}\" to effect queue: {}", queue, e);
                VibratorError::UnknownError
            })
    }

    fn set_effect_amplitude(&mut self, amplitude: u32, maximum: u32) -> Result<()> {
        let scale = amplitude_to_scale(amplitude, maximum)?;
        self.hw
            .write_u32(ControlPoint::EffectScale, scale)
            .map_err(|e| {
                error!("Failed to set effect amplitude: {}", e);
                VibratorError::UnknownError
            })
    }

    /// Calibrated global level while set, full scale otherwise.
    fn set_global_amplitude(&mut self, set: bool) -> Result<()> {
        let amplitude = if set {
            self.composer.levels().global()
        } else {
            VOLTAGE_SCALE_MAX
        };
        let scale = amplitude_to_scale(amplitude, VOLTAGE_SCALE_MAX)?;
        self.hw
            .write_u32(ControlPoint::GlobalScale, scale)
            .map_err(|e| {
                error!("Failed to set global amplitude: {}", e);
                VibratorError::UnknownError
            })
    }
}

// ───────────────────────────────────────────────────────────────
// Startup helpers
// ───────────────────────────────────────────────────────────────

/// One-time push of f0 / redc / q into the stored-calibration registers.
fn push_calibration(hw: &mut impl HardwarePort, calibration: &impl CalibrationPort) {
    if let Some(f0) = calibration.f0() {
        log_write(hw.write_u32(ControlPoint::F0, f0), "f0");
    }
    if let Some(redc) = calibration.redc() {
        log_write(hw.write_u32(ControlPoint::Redc, redc), "redc");
    }
    log_write(hw.write_u32(ControlPoint::Q, calibration.q()), "q");
}

/// GPIO edges play the simple waveform at click (fall) and heavy-click
/// (rise) levels.
fn setup_edge_triggers(hw: &mut impl HardwarePort, levels: &VoltageLevels) {
    let fall = amplitude_to_scale(levels.level(VolumeLevel::Click), VOLTAGE_SCALE_MAX);
    let rise = amplitude_to_scale(levels.level(VolumeLevel::HeavyClick), VOLTAGE_SCALE_MAX);

    log_write(
        hw.write_u32(ControlPoint::GpioFallIndex, WAVEFORM_SIMPLE_EFFECT_INDEX),
        "gpio fall index",
    );
    match fall {
        Ok(scale) => log_write(hw.write_u32(ControlPoint::GpioFallScale, scale), "gpio fall scale"),
        Err(_) => warn!("controller: click level out of range, gpio fall scale not set"),
    }
    log_write(
        hw.write_u32(ControlPoint::GpioRiseIndex, WAVEFORM_SIMPLE_EFFECT_INDEX),
        "gpio rise index",
    );
    match rise {
        Ok(scale) => log_write(hw.write_u32(ControlPoint::GpioRiseScale, scale), "gpio rise scale"),
        Err(_) => warn!("controller: heavy-click level out of range, gpio rise scale not set"),
    }
}

fn log_write(result: core::result::Result<(), ChannelError>, what: &str) {
    if let Err(e) = result {
        error!("Failed to set {}: {}", what, e);
    }
}
