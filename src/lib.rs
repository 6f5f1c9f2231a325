//! LRA vibrator control library.
//!
//! Drives a CS40L25-class haptic actuator through its LED-class control
//! files: effect composition, amplitude transform, calibration push and
//! register write ordering.  The domain core in [`app`] only talks to
//! hardware through the port traits in [`app::ports`]; [`adapters`] holds
//! the concrete sysfs and in-memory backends.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod paths;

pub use app::controller::ActuatorController;
pub use error::{Result, Status, VibratorError};
