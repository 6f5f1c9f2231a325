//! Mock hardware adapter for integration tests.
//!
//! Records every write so tests can assert on the exact register sequence
//! without touching a real driver.  Individual control points can be made
//! absent or made to reject writes.

use std::collections::{HashMap, HashSet};

use vibrator::app::levels::VoltageLevels;
use vibrator::app::ports::{CalibrationPort, ChannelError, ControlPoint, HardwarePort};

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub writes: Vec<(ControlPoint, String)>,
    values: HashMap<ControlPoint, String>,
    absent: HashSet<ControlPoint>,
    failing: HashSet<ControlPoint>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            values: HashMap::new(),
            absent: HashSet::new(),
            failing: HashSet::new(),
        }
    }

    pub fn without(mut self, point: ControlPoint) -> Self {
        self.absent.insert(point);
        self
    }

    pub fn failing(mut self, point: ControlPoint) -> Self {
        self.failing.insert(point);
        self
    }

    pub fn with_value(mut self, point: ControlPoint, value: &str) -> Self {
        self.values.insert(point, value.to_owned());
        self
    }

    pub fn set_failing(&mut self, point: ControlPoint, failing: bool) {
        if failing {
            self.failing.insert(point);
        } else {
            self.failing.remove(&point);
        }
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Control points written, in order.
    pub fn points(&self) -> Vec<ControlPoint> {
        self.writes.iter().map(|(p, _)| *p).collect()
    }

    /// Last value written to `point`.
    pub fn last(&self, point: ControlPoint) -> Option<&str> {
        self.writes
            .iter()
            .rev()
            .find(|(p, _)| *p == point)
            .map(|(_, v)| v.as_str())
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwarePort for MockHardware {
    fn has(&self, point: ControlPoint) -> bool {
        !self.absent.contains(&point)
    }

    fn write(&mut self, point: ControlPoint, value: &str) -> Result<(), ChannelError> {
        if self.absent.contains(&point) {
            return Err(ChannelError::Unavailable(point));
        }
        if self.failing.contains(&point) {
            return Err(ChannelError::Io(point, std::io::ErrorKind::InvalidInput));
        }
        self.writes.push((point, value.to_owned()));
        self.values.insert(point, value.to_owned());
        Ok(())
    }

    fn read(&mut self, point: ControlPoint) -> Result<String, ChannelError> {
        if self.absent.contains(&point) {
            return Err(ChannelError::Unavailable(point));
        }
        self.values
            .get(&point)
            .cloned()
            .ok_or(ChannelError::Io(point, std::io::ErrorKind::UnexpectedEof))
    }
}

// ── MockCalibration ───────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MockCalibration {
    pub f0: Option<u32>,
    pub redc: Option<u32>,
    pub q: u32,
    pub levels: Option<VoltageLevels>,
}

impl CalibrationPort for MockCalibration {
    fn f0(&self) -> Option<u32> {
        self.f0
    }

    fn redc(&self) -> Option<u32> {
        self.redc
    }

    fn q(&self) -> u32 {
        self.q
    }

    fn voltage_levels(&self) -> Option<VoltageLevels> {
        self.levels
    }
}
