//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter   | Implements     | Connects to                      |
//! |-----------|----------------|----------------------------------|
//! | `sysfs`   | HardwarePort   | LED-class vibrator control files |
//! | `memory`  | HardwarePort   | In-memory map (dry runs, tests)  |
//!
//! The calibration side ([`CalibrationPort`](crate::app::ports::CalibrationPort))
//! is implemented by [`CalibrationStore`](crate::app::calibration::CalibrationStore)
//! directly, since parsing the file is domain logic.

pub mod memory;
pub mod sysfs;
