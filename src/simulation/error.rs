//! Simulation error type.
//!
//! Every failure the core can report happens at construction time. Once a
//! `Simulation` exists, `step()` cannot fail.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    #[error("{what} must be positive and finite, got {value}")]
    InvalidDimension { what: &'static str, value: f32 },

    #[error("{what} must be finite, got {value}")]
    InvalidParameter { what: &'static str, value: f32 },

    #[error("lane {0} is not part of the road")]
    UnknownLane(usize),

    #[error("{what} speed must be non-negative and finite, got {value}")]
    InvalidSpeed { what: &'static str, value: f32 },

    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Shorthand result type for the simulation core.
pub type SimResult<T> = Result<T, SimError>;

pub(crate) fn positive(what: &'static str, value: f32) -> SimResult<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidDimension { what, value })
    }
}

pub(crate) fn finite(what: &'static str, value: f32) -> SimResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::InvalidParameter { what, value })
    }
}

pub(crate) fn speed(what: &'static str, value: f32) -> SimResult<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimError::InvalidSpeed { what, value })
    }
}
