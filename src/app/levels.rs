//! Calibrated voltage-level table.
//!
//! Six entries, installed once at startup (from calibration or the
//! compiled-in default) and never mutated afterwards.  Simple effects index
//! it by their [`VolumeLevel`] shifted by the requested strength; the last
//! entry drives the global scale during long vibrations and external
//! control.

use serde::{Deserialize, Serialize};

use super::effect::EffectStrength;

/// Number of entries in the voltage table.
pub const VOLTAGE_LEVEL_COUNT: usize = 6;

/// Table used when calibration is absent or rejected.
pub const V_LEVELS_DEFAULT: [u32; VOLTAGE_LEVEL_COUNT] = [60, 70, 80, 90, 100, 76];

/// Index of the global (long-vibration) level.
pub const VOLTAGE_GLOBAL_SCALE_LEVEL: usize = 5;

/// Reference maximum for voltage levels and composed volumes.
pub const VOLTAGE_SCALE_MAX: u32 = 100;

/// Base table index of a simple effect, before the strength offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeLevel {
    Tick = 1,
    Click = 2,
    HeavyClick = 3,
}

impl VolumeLevel {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Table index after applying `strength`'s offset.
    pub fn index_for(self, strength: EffectStrength) -> Option<usize> {
        self.index().checked_add_signed(strength.level_offset())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoltageLevels([u32; VOLTAGE_LEVEL_COUNT]);

impl VoltageLevels {
    pub const fn new(levels: [u32; VOLTAGE_LEVEL_COUNT]) -> Self {
        Self(levels)
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.0.get(index).copied()
    }

    /// Level for a simple effect at the given strength.
    pub fn for_strength(&self, level: VolumeLevel, strength: EffectStrength) -> Option<u32> {
        level.index_for(strength).and_then(|i| self.get(i))
    }

    pub fn level(&self, level: VolumeLevel) -> u32 {
        self.0[level.index()]
    }

    pub fn global(&self) -> u32 {
        self.0[VOLTAGE_GLOBAL_SCALE_LEVEL]
    }

    pub fn as_array(&self) -> &[u32; VOLTAGE_LEVEL_COUNT] {
        &self.0
    }
}

impl Default for VoltageLevels {
    fn default() -> Self {
        Self(V_LEVELS_DEFAULT)
    }
}

impl TryFrom<&[u32]> for VoltageLevels {
    type Error = usize;

    /// Rejects any slice that is not exactly six entries, returning its length.
    fn try_from(levels: &[u32]) -> Result<Self, Self::Error> {
        <[u32; VOLTAGE_LEVEL_COUNT]>::try_from(levels)
            .map(Self)
            .map_err(|_| levels.len())
    }
}
