//! Effect and strength identifiers accepted by the actuation API.
//!
//! Numeric ids follow the platform vibrator effect enumeration so the
//! service layer can forward raw values through [`TryFrom`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// An abstract, named vibration pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum Effect {
    Click = 0,
    DoubleClick = 1,
    Tick = 2,
    Thud = 3,
    Pop = 4,
    HeavyClick = 5,
    Ringtone1 = 6,
    Ringtone2 = 7,
    Ringtone3 = 8,
    Ringtone4 = 9,
    Ringtone5 = 10,
    Ringtone6 = 11,
    Ringtone7 = 12,
    Ringtone8 = 13,
    Ringtone9 = 14,
    Ringtone10 = 15,
    Ringtone11 = 16,
    Ringtone12 = 17,
    Ringtone13 = 18,
    Ringtone14 = 19,
    Ringtone15 = 20,
    TextureTick = 21,
}

impl Effect {
    pub const ALL: [Effect; 22] = [
        Self::Click,
        Self::DoubleClick,
        Self::Tick,
        Self::Thud,
        Self::Pop,
        Self::HeavyClick,
        Self::Ringtone1,
        Self::Ringtone2,
        Self::Ringtone3,
        Self::Ringtone4,
        Self::Ringtone5,
        Self::Ringtone6,
        Self::Ringtone7,
        Self::Ringtone8,
        Self::Ringtone9,
        Self::Ringtone10,
        Self::Ringtone11,
        Self::Ringtone12,
        Self::Ringtone13,
        Self::Ringtone14,
        Self::Ringtone15,
        Self::TextureTick,
    ];

    pub const fn id(self) -> u32 {
        self as u32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DoubleClick => "double_click",
            Self::Tick => "tick",
            Self::Thud => "thud",
            Self::Pop => "pop",
            Self::HeavyClick => "heavy_click",
            Self::Ringtone1 => "ringtone1",
            Self::Ringtone2 => "ringtone2",
            Self::Ringtone3 => "ringtone3",
            Self::Ringtone4 => "ringtone4",
            Self::Ringtone5 => "ringtone5",
            Self::Ringtone6 => "ringtone6",
            Self::Ringtone7 => "ringtone7",
            Self::Ringtone8 => "ringtone8",
            Self::Ringtone9 => "ringtone9",
            Self::Ringtone10 => "ringtone10",
            Self::Ringtone11 => "ringtone11",
            Self::Ringtone12 => "ringtone12",
            Self::Ringtone13 => "ringtone13",
            Self::Ringtone14 => "ringtone14",
            Self::Ringtone15 => "ringtone15",
            Self::TextureTick => "texture_tick",
        }
    }
}

impl TryFrom<u32> for Effect {
    type Error = u32;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::ALL.iter().copied().find(|e| e.id() == id).ok_or(id)
    }
}

impl FromStr for Effect {
    type Err = ();

    /// Accepts the name (case, `-` and `_` ignored) or the numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u32>() {
            return Self::try_from(id).map_err(|_| ());
        }
        let squash = |name: &str| name.replace(['-', '_'], "").to_ascii_lowercase();
        let wanted = squash(s);
        Self::ALL
            .iter()
            .copied()
            .find(|e| squash(e.name()) == wanted)
            .ok_or(())
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Intensity qualifier for an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum EffectStrength {
    Light = 0,
    Medium = 1,
    Strong = 2,
}

impl EffectStrength {
    pub const ALL: [EffectStrength; 3] = [Self::Light, Self::Medium, Self::Strong];

    /// Position in per-strength tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Offset applied to a simple effect's voltage-table index.
    pub const fn level_offset(self) -> isize {
        match self {
            Self::Light => -1,
            Self::Medium => 0,
            Self::Strong => 1,
        }
    }
}

impl TryFrom<u8> for EffectStrength {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Light),
            1 => Ok(Self::Medium),
            2 => Ok(Self::Strong),
            other => Err(other),
        }
    }
}

impl FromStr for EffectStrength {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "0" => Ok(Self::Light),
            "medium" | "1" => Ok(Self::Medium),
            "strong" | "2" => Ok(Self::Strong),
            _ => Err(()),
        }
    }
}

impl fmt::Display for EffectStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Medium => write!(f, "medium"),
            Self::Strong => write!(f, "strong"),
        }
    }
}
