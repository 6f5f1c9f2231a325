//! Linear amplitude → attenuation-scale conversion.
//!
//! The DSP attenuates in fixed 0.125 dB steps, so a linear amplitude
//! relative to `maximum` maps to
//!
//! ```text
//! scale = round(-20 · log10(amplitude / maximum) / 0.125)
//! ```
//!
//! `maximum` is the caller's reference: [`VOLTAGE_SCALE_MAX`](super::levels::VOLTAGE_SCALE_MAX)
//! for calibrated levels, `u8::MAX` for the public amplitude control.
//! The result is never clamped; the hardware saturates large attenuations.

use crate::error::{Result, VibratorError};

/// Attenuation per register unit, in dB.
pub const AMP_ATTENUATE_STEP_SIZE: f64 = 0.125;

/// Convert `amplitude` (in `1..=maximum`) to attenuation units.
///
/// Returns [`VibratorError::BadValue`] for a zero amplitude, a zero maximum,
/// or an amplitude above the maximum (which would need a negative scale).
pub fn amplitude_to_scale(amplitude: u32, maximum: u32) -> Result<u32> {
    if amplitude == 0 || maximum == 0 || amplitude > maximum {
        return Err(VibratorError::BadValue);
    }
    let ratio = f64::from(amplitude) / f64::from(maximum);
    let scale = (-20.0 * ratio.log10() / AMP_ATTENUATE_STEP_SIZE).round();
    Ok(scale as u32)
}
