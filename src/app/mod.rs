//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules for driving the LRA actuator: effect
//! catalog and composition, the amplitude transform, calibration parsing,
//! and the register write ordering in [`controller`].  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without a real driver.

pub mod amplitude;
pub mod calibration;
pub mod catalog;
pub mod commands;
pub mod composer;
pub mod controller;
pub mod effect;
pub mod levels;
pub mod ports;
