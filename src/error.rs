//! Unified error types for the vibrator control layer.
//!
//! A single `VibratorError` enum that every actuation path funnels into,
//! mirroring the status codes the service layer reports to its callers.
//! All variants are `Copy` so they can be returned from the controller
//! without allocation.  Subsystem errors (channel I/O, calibration parsing,
//! catalog validation, config) live next to their subsystems and are mapped
//! into this type at the controller boundary.

use core::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Actuation error
// ---------------------------------------------------------------------------

/// Every fallible actuation request ends in one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibratorError {
    /// A caller-supplied argument is outside its domain (e.g. amplitude 0).
    BadValue,
    /// The effect/strength pair has no catalog entry, or the operation is
    /// not available in the current mode.
    UnsupportedOperation,
    /// A hardware control point rejected a write.
    UnknownError,
}

impl fmt::Display for VibratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadValue => write!(f, "bad value"),
            Self::UnsupportedOperation => write!(f, "unsupported operation"),
            Self::UnknownError => write!(f, "hardware write failed"),
        }
    }
}

impl std::error::Error for VibratorError {}

// ---------------------------------------------------------------------------
// Service-facing status
// ---------------------------------------------------------------------------

/// Flat status code handed to the owning service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Ok,
    BadValue,
    UnsupportedOperation,
    UnknownError,
}

impl Status {
    /// Collapse a controller result into a status code.
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(e) => Self::from(*e),
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl From<VibratorError> for Status {
    fn from(e: VibratorError) -> Self {
        match e {
            VibratorError::BadValue => Self::BadValue,
            VibratorError::UnsupportedOperation => Self::UnsupportedOperation,
            VibratorError::UnknownError => Self::UnknownError,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::BadValue => write!(f, "BAD_VALUE"),
            Self::UnsupportedOperation => write!(f, "UNSUPPORTED_OPERATION"),
            Self::UnknownError => write!(f, "UNKNOWN_ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, VibratorError>;
