//! Calibration store: parses the persisted `key: value` calibration file.
//!
//! ```text
//! # cs40l25a factory calibration
//! f0_measured: 2408448
//! redc_measured: 0x1b6f
//! q_index: 10
//! v_levels: 60 70 80 90 100 76
//! ```
//!
//! Lines starting with `#` and blank lines are skipped; key and value are
//! trimmed of spaces and tabs.  Every getter falls back independently: a
//! malformed `v_levels` never affects `f0`, and so on.  A `v_levels` list
//! that is not exactly six integers in `1..=100` is rejected whole.

use core::fmt;
use std::collections::HashMap;
use std::path::Path;

use heapless::Vec as BoundedVec;
use log::{info, warn};

use super::levels::{VOLTAGE_LEVEL_COUNT, VOLTAGE_SCALE_MAX, VoltageLevels};
use super::ports::CalibrationPort;
use crate::paths::{F0_CONFIG, Q_CONFIG, Q_INDEX, REDC_CONFIG, VOLTAGES_CONFIG};

// ---------------------------------------------------------------------------
// Quality-factor fixed-point constants
// ---------------------------------------------------------------------------

/// Q16.16 scale.
pub const Q_FLOAT_TO_FIXED: u32 = 1 << 16;
/// One `q_index` step is 1.5 in Q16.16.
pub const Q_INDEX_TO_FIXED: u32 = Q_FLOAT_TO_FIXED * 3 / 2;
/// `q_index` 0 corresponds to Q = 2.0.
pub const Q_INDEX_OFFSET: u32 = 2 * Q_FLOAT_TO_FIXED;
/// Q = 15.5 when neither `q_measured` nor `q_index` is usable.
pub const Q_DEFAULT: u32 = Q_FLOAT_TO_FIXED * 31 / 2;

const WHITESPACE: [char; 2] = [' ', '\t'];

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalibrationStore {
    record: HashMap<String, String>,
}

impl CalibrationStore {
    /// Parse calibration text.  Never fails; unrecognised lines are ignored.
    pub fn parse(text: &str) -> Self {
        let mut record = HashMap::new();
        for line in text.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            record.insert(
                key.trim_matches(WHITESPACE).to_owned(),
                value.trim_matches(WHITESPACE).to_owned(),
            );
        }
        Self { record }
    }

    /// Read and parse the calibration file.
    pub fn load(path: &Path) -> Result<Self, CalibrationError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            warn!("calibration: failed to open {}: {}", path.display(), e);
            CalibrationError::Unreadable(e.kind())
        })?;
        let store = Self::parse(&text);
        info!(
            "calibration: {} keys from {}",
            store.record.len(),
            path.display()
        );
        Ok(store)
    }

    /// Like [`load`](Self::load), but an unreadable file yields an empty
    /// store so every field takes its default.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Raw trimmed value of a key, if present.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.record.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Numeric value of a key; present-but-unparsable counts as missing.
    fn number(&self, key: &str) -> Option<u32> {
        let raw = self.raw(key)?;
        let parsed = parse_u32(raw);
        if parsed.is_none() {
            warn!("calibration: invalid {} value '{}'", key, raw);
        }
        parsed
    }

    /// Parsed voltage table with the reason for rejection.
    pub fn try_voltage_levels(&self) -> Result<VoltageLevels, CalibrationError> {
        let raw = self.raw(VOLTAGES_CONFIG).ok_or(CalibrationError::Missing)?;
        let mut levels: BoundedVec<u32, VOLTAGE_LEVEL_COUNT> = BoundedVec::new();
        for token in raw.split_whitespace() {
            let v = parse_u32(token).ok_or(CalibrationError::InvalidToken)?;
            if v == 0 || v > VOLTAGE_SCALE_MAX {
                return Err(CalibrationError::LevelOutOfRange(v));
            }
            levels
                .push(v)
                .map_err(|_| CalibrationError::WrongCount(VOLTAGE_LEVEL_COUNT + 1))?;
        }
        VoltageLevels::try_from(levels.as_slice()).map_err(CalibrationError::WrongCount)
    }
}

impl CalibrationPort for CalibrationStore {
    fn f0(&self) -> Option<u32> {
        self.number(F0_CONFIG)
    }

    fn redc(&self) -> Option<u32> {
        self.number(REDC_CONFIG)
    }

    fn q(&self) -> u32 {
        if let Some(q) = self.number(Q_CONFIG) {
            return q;
        }
        let from_index = self.number(Q_INDEX).and_then(|index| {
            index
                .checked_mul(Q_INDEX_TO_FIXED)
                .and_then(|q| q.checked_add(Q_INDEX_OFFSET))
        });
        match from_index {
            Some(q) => q,
            None => {
                if self.raw(Q_INDEX).is_some() {
                    warn!("calibration: q_index out of range, using default Q");
                }
                Q_DEFAULT
            }
        }
    }

    fn voltage_levels(&self) -> Option<VoltageLevels> {
        match self.try_voltage_levels() {
            Ok(levels) => Some(levels),
            Err(CalibrationError::Missing) => None,
            Err(e) => {
                warn!("calibration: invalid v_levels config ({}), keeping defaults", e);
                None
            }
        }
    }
}

/// Decimal or `0x`-prefixed hexadecimal `u32`.
fn parse_u32(raw: &str) -> Option<u32> {
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// The calibration file could not be read.
    Unreadable(std::io::ErrorKind),
    /// The key is not present.
    Missing,
    /// A token is not an unsigned integer.
    InvalidToken,
    /// The list has the wrong number of entries (more than six reports 7).
    WrongCount(usize),
    /// A level is 0 or above the 0–100 volume scale.
    LevelOutOfRange(u32),
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(kind) => write!(f, "calibration file unreadable ({kind})"),
            Self::Missing => write!(f, "key missing"),
            Self::InvalidToken => write!(f, "invalid token"),
            Self::LevelOutOfRange(v) => {
                write!(f, "level {} outside 1..={}", v, VOLTAGE_SCALE_MAX)
            }
            Self::WrongCount(n) => {
                write!(f, "expected {} levels, got {}", VOLTAGE_LEVEL_COUNT, n)
            }
        }
    }
}

impl std::error::Error for CalibrationError {}
