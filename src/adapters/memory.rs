//! In-memory hardware backend.
//!
//! Implements [`HardwarePort`] over a map of control-point values so the
//! controller can run without a driver (`vibratorctl --dry-run`, host
//! tests).  Every write is also appended to a journal, which is how dry
//! runs show the register sequence they would have produced.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::app::ports::{ChannelError, ControlPoint, HardwarePort};

pub struct MemoryHardware {
    values: BTreeMap<ControlPoint, String>,
    absent: BTreeSet<ControlPoint>,
    journal: Vec<(ControlPoint, String)>,
}

impl MemoryHardware {
    /// Every control point present, reading `0`.
    pub fn new() -> Self {
        Self {
            values: ControlPoint::ALL.iter().map(|&p| (p, "0".to_owned())).collect(),
            absent: BTreeSet::new(),
            journal: Vec::new(),
        }
    }

    /// Same as [`new`](Self::new) with `points` reported missing.
    pub fn without(points: &[ControlPoint]) -> Self {
        let mut hw = Self::new();
        for &p in points {
            hw.values.remove(&p);
            hw.absent.insert(p);
        }
        hw
    }

    /// Preset the value a later read returns.
    pub fn set(&mut self, point: ControlPoint, value: &str) {
        if !self.absent.contains(&point) {
            self.values.insert(point, value.to_owned());
        }
    }

    /// Last value written or preset.
    pub fn value(&self, point: ControlPoint) -> Option<&str> {
        self.values.get(&point).map(String::as_str)
    }

    /// Every successful write, in order.
    pub fn journal(&self) -> &[(ControlPoint, String)] {
        &self.journal
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }
}

impl Default for MemoryHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwarePort for MemoryHardware {
    fn has(&self, point: ControlPoint) -> bool {
        !self.absent.contains(&point)
    }

    fn write(&mut self, point: ControlPoint, value: &str) -> Result<(), ChannelError> {
        if self.absent.contains(&point) {
            return Err(ChannelError::Unavailable(point));
        }
        debug!("MemoryHardware: {} <- {}", point, value);
        self.values.insert(point, value.to_owned());
        self.journal.push((point, value.to_owned()));
        Ok(())
    }

    fn read(&mut self, point: ControlPoint) -> Result<String, ChannelError> {
        self.values
            .get(&point)
            .cloned()
            .ok_or(ChannelError::Unavailable(point))
    }
}
