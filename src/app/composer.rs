//! Effect composer: turns an (effect, strength) request into an
//! [`EffectSpec`]: how long it plays, how loud, and what (if anything) goes
//! into the trigger queue.
//!
//! Resolution is pure: it reads the injected catalog and voltage table and
//! never touches hardware, so a failed lookup can never leave a partial
//! register update behind.

use core::fmt;

use super::catalog::{
    CatalogEntry, CompoundSegment, EffectCatalog, MAX_COLD_START_LATENCY_MS,
    MAX_PAUSE_TIMING_ERROR_MS, WAVEFORM_SIMPLE_EFFECT_INDEX, WAVEFORM_TRIGGER_QUEUE_INDEX,
    WAVEFORM_TRIGGER_QUEUE_SCALE,
};
use super::effect::{Effect, EffectStrength};
use super::levels::{VOLTAGE_SCALE_MAX, VoltageLevels};
use crate::error::{Result, VibratorError};

// ───────────────────────────────────────────────────────────────
// Effect queue
// ───────────────────────────────────────────────────────────────

/// Comma-separated trigger-queue string.
///
/// Composed queues hold `slot.volume` and bare-millisecond silence tokens;
/// ringtone queues are stored strings passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectQueue(String);

impl EffectQueue {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Wrap a stored queue string verbatim.
    pub fn from_raw(raw: &str) -> Self {
        Self(raw.to_owned())
    }

    pub fn push_segment(&mut self, slot: u32, volume: u32) {
        self.push_token(&format!("{slot}.{volume}"));
    }

    pub fn push_silence(&mut self, ms: u32) {
        self.push_token(&ms.to_string());
    }

    fn push_token(&mut self, token: &str) {
        if !self.0.is_empty() {
            self.0.push(',');
        }
        self.0.push_str(token);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EffectQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Resolved effect
// ───────────────────────────────────────────────────────────────

/// Everything the controller needs to play one effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectSpec {
    /// Estimated play time, cold-start latency included.
    pub duration_ms: u32,
    /// Output level on the 0–100 scale.
    pub volume_level: u32,
    /// `None` plays the simple waveform slot directly.
    pub queue: Option<EffectQueue>,
}

impl EffectSpec {
    /// Slot to trigger: the reserved queue slot whenever a queue is present.
    pub fn waveform_slot(&self) -> u32 {
        if self.queue.is_some() {
            WAVEFORM_TRIGGER_QUEUE_INDEX
        } else {
            WAVEFORM_SIMPLE_EFFECT_INDEX
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Composer
// ───────────────────────────────────────────────────────────────

pub struct EffectComposer {
    catalog: EffectCatalog,
    levels: VoltageLevels,
}

impl EffectComposer {
    pub fn new(catalog: EffectCatalog, levels: VoltageLevels) -> Self {
        Self { catalog, levels }
    }

    /// Resolve a request, or [`VibratorError::UnsupportedOperation`] when
    /// the catalog has no mapping for it.
    pub fn resolve(&self, effect: Effect, strength: EffectStrength) -> Result<EffectSpec> {
        match self.catalog.get(effect) {
            Some(CatalogEntry::Simple { .. }) => {
                let (duration_ms, volume_level) = self.resolve_simple(effect, strength)?;
                Ok(EffectSpec {
                    duration_ms,
                    volume_level,
                    queue: None,
                })
            }
            Some(CatalogEntry::Compound { segments }) => self.resolve_compound(segments, strength),
            Some(CatalogEntry::Ringtone { queue, duration_ms }) => Ok(EffectSpec {
                duration_ms: *duration_ms,
                volume_level: ringtone_volume(strength),
                queue: Some(EffectQueue::from_raw(queue)),
            }),
            None => Err(VibratorError::UnsupportedOperation),
        }
    }

    /// `(duration_ms, volume_level)` of a simple effect.
    fn resolve_simple(&self, effect: Effect, strength: EffectStrength) -> Result<(u32, u32)> {
        let Some(CatalogEntry::Simple {
            level,
            base_duration_ms,
        }) = self.catalog.get(effect)
        else {
            return Err(VibratorError::UnsupportedOperation);
        };
        let volume = self
            .levels
            .for_strength(*level, strength)
            .ok_or(VibratorError::UnsupportedOperation)?;
        let base = base_duration_ms[strength.index()];
        Ok((base.saturating_add(MAX_COLD_START_LATENCY_MS), volume))
    }

    fn resolve_compound(
        &self,
        segments: &[CompoundSegment],
        strength: EffectStrength,
    ) -> Result<EffectSpec> {
        let mut queue = EffectQueue::new();
        let mut duration_ms: u32 = 0;

        for segment in segments {
            match *segment {
                CompoundSegment::Effect(inner) => {
                    let (ms, volume) = self.resolve_simple(inner, strength)?;
                    queue.push_segment(WAVEFORM_SIMPLE_EFFECT_INDEX, volume);
                    duration_ms = duration_ms.saturating_add(ms);
                }
                CompoundSegment::Silence(ms) => {
                    queue.push_silence(ms);
                    duration_ms = duration_ms
                        .saturating_add(ms)
                        .saturating_add(MAX_PAUSE_TIMING_ERROR_MS);
                }
            }
        }

        Ok(EffectSpec {
            duration_ms,
            volume_level: WAVEFORM_TRIGGER_QUEUE_SCALE,
            queue: Some(queue),
        })
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    pub fn levels(&self) -> &VoltageLevels {
        &self.levels
    }
}

/// Ringtones ignore the calibrated table and scale with strength alone.
pub fn ringtone_volume(strength: EffectStrength) -> u32 {
    match strength {
        EffectStrength::Light => VOLTAGE_SCALE_MAX / 3,
        EffectStrength::Medium => VOLTAGE_SCALE_MAX / 2,
        EffectStrength::Strong => VOLTAGE_SCALE_MAX,
    }
}
