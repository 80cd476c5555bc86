//! Error types for the physics kernel
//!
//! Only construction and configuration can fail. Stepping a world is total:
//! degenerate geometry is guarded in place instead of being reported.

use std::fmt;

use glam::Vec2;

/// Top-level error enum for the kernel
#[derive(Debug)]
pub enum SimError {
    /// A body was constructed with a non-positive or non-finite radius or mass
    InvalidBody {
        /// Which quantity was rejected ("position", "velocity", "radius" or "mass")
        field: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Boundary corners are not strictly ordered on both axes
    InvalidBoundary { min: Vec2, max: Vec2 },

    /// Rejection sampling ran out of attempts before every body was placed
    PlacementFailed {
        /// Bodies placed before giving up
        placed: usize,
        /// Bodies requested
        requested: usize,
        /// Boundary width
        width: f32,
        /// Boundary height
        height: f32,
    },

    /// A fixed timestep that is not positive and finite
    InvalidTimestep { dt: f32 },

    /// A settings value is outside its valid range
    Settings(String),

    /// Settings file could not be read
    Io(std::io::Error),

    /// Settings JSON could not be parsed
    Json(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidBody { field, value } => {
                write!(f, "invalid body {field}: {value}")
            }
            SimError::InvalidBoundary { min, max } => write!(
                f,
                "invalid boundary: min ({}, {}) must be finite and strictly below max ({}, {})",
                min.x, min.y, max.x, max.y
            ),
            SimError::PlacementFailed {
                placed,
                requested,
                width,
                height,
            } => write!(
                f,
                "could not place {requested} non-overlapping bodies in boundary of size \
                 {width}x{height} (placed {placed})"
            ),
            SimError::InvalidTimestep { dt } => {
                write!(f, "invalid timestep: {dt} (must be positive and finite)")
            }
            SimError::Settings(reason) => write!(f, "invalid settings: {reason}"),
            SimError::Io(err) => write!(f, "failed to read settings: {err}"),
            SimError::Json(err) => write!(f, "failed to parse settings: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            SimError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Json(err)
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;
