//! Control-point paths and calibration file keys for the CS40L25 vibrator.
//!
//! Single source of truth: the config defaults and the sysfs adapter
//! reference this module rather than hard-coding paths.  Each path can be
//! overridden at runtime through the environment variable named next to it
//! (see [`crate::config::VibratorConfig::apply_env`]).

// ---------------------------------------------------------------------------
// LED-class activation interface
// ---------------------------------------------------------------------------

/// Write `1` to start playback, `0` to stop.  Env: `ACTIVATE_PATH`.
pub const ACTIVATE_PATH: &str = "/sys/class/leds/vibrator/activate";
/// Playback duration in milliseconds.  Env: `DURATION_PATH`.
pub const DURATION_PATH: &str = "/sys/class/leds/vibrator/duration";
/// Driver power state; written `1` once at startup.  Env: `STATE_PATH`.
pub const STATE_PATH: &str = "/sys/class/leds/vibrator/state";

// ---------------------------------------------------------------------------
// Control-port (cp_*) trigger interface
// ---------------------------------------------------------------------------

/// Length of the selected waveform, in samples at 48 kHz.
/// Env: `EFFECT_DURATION_PATH`.
pub const EFFECT_DURATION_PATH: &str = "/sys/class/leds/vibrator/device/cp_trigger_duration";
/// Waveform slot played on the next activation.  Env: `EFFECT_INDEX_PATH`.
pub const EFFECT_INDEX_PATH: &str = "/sys/class/leds/vibrator/device/cp_trigger_index";
/// Segment queue consumed by the reserved trigger-queue slot.
/// Env: `EFFECT_QUEUE_PATH`.
pub const EFFECT_QUEUE_PATH: &str = "/sys/class/leds/vibrator/device/cp_trigger_queue";
/// Per-effect attenuation (0.125 dB steps).  Env: `EFFECT_SCALE_PATH`.
pub const EFFECT_SCALE_PATH: &str = "/sys/class/leds/vibrator/device/cp_dig_scale";
/// Global attenuation applied on top of every effect.
/// Env: `GLOBAL_SCALE_PATH`.
pub const GLOBAL_SCALE_PATH: &str = "/sys/class/leds/vibrator/device/dig_scale";

// ---------------------------------------------------------------------------
// External (audio-stream) control
// ---------------------------------------------------------------------------

/// Audio serial port enable.  Env: `ASP_ENABLE_PATH`.
pub const ASP_ENABLE_PATH: &str = "/sys/class/leds/vibrator/device/asp_enable";

// ---------------------------------------------------------------------------
// GPIO edge triggers
// ---------------------------------------------------------------------------

/// Env: `GPIO_FALL_INDEX` (and `GPIO_FALL_SCALE`, `GPIO_RISE_INDEX`,
/// `GPIO_RISE_SCALE` for the three below).
pub const GPIO_FALL_INDEX_PATH: &str = "/sys/class/leds/vibrator/device/gpio1_fall_index";
pub const GPIO_FALL_SCALE_PATH: &str = "/sys/class/leds/vibrator/device/gpio1_fall_dig_scale";
pub const GPIO_RISE_INDEX_PATH: &str = "/sys/class/leds/vibrator/device/gpio1_rise_index";
pub const GPIO_RISE_SCALE_PATH: &str = "/sys/class/leds/vibrator/device/gpio1_rise_dig_scale";

// ---------------------------------------------------------------------------
// Stored calibration registers
// ---------------------------------------------------------------------------

/// Resonant frequency.  Env: `F0_FILEPATH`.
pub const F0_PATH: &str = "/sys/class/leds/vibrator/device/f0_stored";
/// DC resistance.  Env: `REDC_FILEPATH`.
pub const REDC_PATH: &str = "/sys/class/leds/vibrator/device/redc_stored";
/// Quality factor (Q16.16 fixed point).  Env: `Q_FILEPATH`.
pub const Q_PATH: &str = "/sys/class/leds/vibrator/device/q_stored";

// ---------------------------------------------------------------------------
// Persisted calibration file
// ---------------------------------------------------------------------------

/// Factory calibration written by the manufacturing line.
/// Env: `CALIBRATION_FILEPATH`.
pub const CALIBRATION_FILEPATH: &str = "/mnt/vendor/persist/haptics/cs40l25a.cal";

/// Calibration file keys.
pub const F0_CONFIG: &str = "f0_measured";
pub const REDC_CONFIG: &str = "redc_measured";
pub const Q_CONFIG: &str = "q_measured";
pub const Q_INDEX: &str = "q_index";
pub const VOLTAGES_CONFIG: &str = "v_levels";
