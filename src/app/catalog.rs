//! Effect catalog: the immutable table behind effect resolution.
//!
//! Every supported [`Effect`] maps to exactly one tagged [`CatalogEntry`]:
//!
//! | Variant    | Plays                          | Volume from            |
//! |------------|--------------------------------|------------------------|
//! | `Simple`   | one precompiled waveform slot  | calibrated table       |
//! | `Compound` | a queue of simple segments     | fixed trigger scale    |
//! | `Ringtone` | a stored queue string verbatim | strength alone         |
//!
//! The catalog is built once (compiled-in default or a JSON descriptor),
//! validated, and injected into the
//! [`EffectComposer`](super::composer::EffectComposer).  Effects without an
//! entry are unsupported.

use core::fmt;
use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::effect::{Effect, EffectStrength};
use super::levels::{VOLTAGE_LEVEL_COUNT, VolumeLevel};

// ---------------------------------------------------------------------------
// Waveform slots and timing constants
// ---------------------------------------------------------------------------

/// Slot holding the short click waveform shared by all simple effects.
pub const WAVEFORM_SIMPLE_EFFECT_INDEX: u32 = 2;
/// Slot played by plain timed activations.
pub const WAVEFORM_LONG_VIBRATION_EFFECT_INDEX: u32 = 0;
/// Reserved slot that plays whatever is in the effect queue.
pub const WAVEFORM_TRIGGER_QUEUE_INDEX: u32 = 65534;
/// Volume applied when the trigger queue carries its own per-segment levels.
pub const WAVEFORM_TRIGGER_QUEUE_SCALE: u32 = 100;

/// Gap between the two halves of a double click.
pub const WAVEFORM_DOUBLE_CLICK_SILENCE_MS: u32 = 100;

/// I2C transaction plus DSP return-from-standby.
pub const MAX_COLD_START_LATENCY_MS: u32 = 6;
/// ALERT interrupt handling at each queued pause.
pub const MAX_PAUSE_TIMING_ERROR_MS: u32 = 1;

/// Sample rate of the effect-duration register.
pub const EFFECT_FREQUENCY_KHZ: u32 = 48;

/// Length of the stock simple waveform (576 samples at 48 kHz).
pub const DEFAULT_SIMPLE_EFFECT_DURATION_MS: u32 = 12;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One segment of a compound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundSegment {
    /// A simple effect, resolved at the compound's strength.
    Effect(Effect),
    /// A pause in milliseconds.
    Silence(u32),
}

/// How an effect is played, with the parameters its category needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEntry {
    Simple {
        level: VolumeLevel,
        /// Waveform length per strength (light, medium, strong), before
        /// cold-start latency.
        base_duration_ms: [u32; 3],
    },
    Compound {
        segments: Vec<CompoundSegment>,
    },
    Ringtone {
        /// Hardware queue string, written byte-for-byte.
        queue: String,
        duration_ms: u32,
    },
}

impl CatalogEntry {
    /// Simple entry with the same waveform length at every strength.
    pub const fn simple(level: VolumeLevel, base_duration_ms: u32) -> Self {
        Self::Simple {
            level,
            base_duration_ms: [base_duration_ms; 3],
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectCatalog {
    entries: BTreeMap<Effect, CatalogEntry>,
}

impl EffectCatalog {
    /// Build and validate a catalog.
    pub fn new(
        entries: impl IntoIterator<Item = (Effect, CatalogEntry)>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            entries: entries.into_iter().collect(),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a JSON descriptor: an object keyed by effect name.
    ///
    /// ```json
    /// { "tick": { "kind": "simple", "level": "tick", "base_duration_ms": [12, 12, 12] } }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<Effect, CatalogEntry> = serde_json::from_str(json).map_err(|e| {
            warn!("catalog: malformed descriptor: {}", e);
            CatalogError::Malformed
        })?;
        let catalog = Self::new(entries)?;
        info!("catalog: loaded {} effects from descriptor", catalog.len());
        Ok(catalog)
    }

    pub fn get(&self, effect: Effect) -> Option<&CatalogEntry> {
        self.entries.get(&effect)
    }

    pub fn contains(&self, effect: Effect) -> bool {
        self.entries.contains_key(&effect)
    }

    /// Supported effects in id order.
    pub fn effects(&self) -> impl Iterator<Item = Effect> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every simple waveform length with one measured by the
    /// driver (`samples` at 48 kHz, rounded up to whole milliseconds).
    pub fn with_measured_simple_duration(mut self, samples: u32) -> Self {
        if samples == 0 {
            return self;
        }
        let ms = samples.div_ceil(EFFECT_FREQUENCY_KHZ);
        for entry in self.entries.values_mut() {
            if let CatalogEntry::Simple {
                base_duration_ms, ..
            } = entry
            {
                *base_duration_ms = [ms; 3];
            }
        }
        info!("catalog: simple waveform length {} ms ({} samples)", ms, samples);
        self
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for (&effect, entry) in &self.entries {
            match entry {
                CatalogEntry::Simple { level, .. } => {
                    let in_table = |s: EffectStrength| {
                        level
                            .index_for(s)
                            .is_some_and(|i| i < VOLTAGE_LEVEL_COUNT)
                    };
                    if !EffectStrength::ALL.into_iter().all(in_table) {
                        return Err(CatalogError::LevelOutOfRange(effect));
                    }
                }
                CatalogEntry::Compound { segments } => {
                    let waveforms = segments
                        .iter()
                        .filter(|s| matches!(s, CompoundSegment::Effect(_)))
                        .count();
                    if waveforms < 2 {
                        return Err(CatalogError::CompoundTooShort(effect));
                    }
                    for segment in segments {
                        let CompoundSegment::Effect(inner) = *segment else {
                            continue;
                        };
                        if !matches!(self.get(inner), Some(CatalogEntry::Simple { .. })) {
                            return Err(CatalogError::CompoundSegmentNotSimple { effect, inner });
                        }
                    }
                }
                CatalogEntry::Ringtone { queue, duration_ms } => {
                    if queue.is_empty() || queue.contains(char::is_whitespace) {
                        return Err(CatalogError::InvalidQueue(effect));
                    }
                    if *duration_ms <= MAX_COLD_START_LATENCY_MS {
                        return Err(CatalogError::DurationTooShort(effect));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for EffectCatalog {
    /// The stock effect set: four simple clicks, one compound and five
    /// ringtones.
    fn default() -> Self {
        let simple = DEFAULT_SIMPLE_EFFECT_DURATION_MS;
        let ringtone = |queue: &str, duration_ms: u32| CatalogEntry::Ringtone {
            queue: queue.to_owned(),
            duration_ms,
        };

        let entries = [
            (Effect::Tick, CatalogEntry::simple(VolumeLevel::Tick, simple)),
            (Effect::TextureTick, CatalogEntry::simple(VolumeLevel::Tick, simple)),
            (Effect::Click, CatalogEntry::simple(VolumeLevel::Click, simple)),
            (Effect::HeavyClick, CatalogEntry::simple(VolumeLevel::HeavyClick, simple)),
            (
                Effect::DoubleClick,
                CatalogEntry::Compound {
                    segments: vec![
                        CompoundSegment::Effect(Effect::Tick),
                        CompoundSegment::Silence(WAVEFORM_DOUBLE_CLICK_SILENCE_MS),
                        CompoundSegment::Effect(Effect::Click),
                    ],
                },
            ),
            (Effect::Ringtone1, ringtone("!!2.100,100,2.100,800!!4!", 3696)),
            (Effect::Ringtone2, ringtone("!!2.100,80,2.80,80,2.100,700!!3!", 2688)),
            (Effect::Ringtone3, ringtone("!!2.60,40,2.80,40,2.100,1000!!3!", 3348)),
            (Effect::Ringtone4, ringtone("!!2.100,200,2.100,200,2.100,1200!!2!", 3272)),
            (Effect::Ringtone5, ringtone("!!2.100,1000!!4!", 4048)),
        ];

        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a catalog is refused at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// The descriptor is not valid JSON for the catalog schema.
    Malformed,
    /// A simple entry's level would index outside the voltage table.
    LevelOutOfRange(Effect),
    /// A compound entry needs at least two effect segments.
    CompoundTooShort(Effect),
    /// A compound segment names an effect that is not a simple entry.
    CompoundSegmentNotSimple { effect: Effect, inner: Effect },
    /// A ringtone queue is empty or contains whitespace.
    InvalidQueue(Effect),
    /// A ringtone duration does not exceed the cold-start latency.
    DurationTooShort(Effect),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed catalog descriptor"),
            Self::LevelOutOfRange(e) => write!(f, "{e}: voltage level out of range"),
            Self::CompoundTooShort(e) => write!(f, "{e}: compound needs at least two effect segments"),
            Self::CompoundSegmentNotSimple { effect, inner } => {
                write!(f, "{effect}: segment {inner} is not a simple effect")
            }
            Self::InvalidQueue(e) => write!(f, "{e}: invalid ringtone queue"),
            Self::DurationTooShort(e) => {
                write!(f, "{e}: ringtone duration must exceed {MAX_COLD_START_LATENCY_MS} ms")
            }
        }
    }
}

impl std::error::Error for CatalogError {}
