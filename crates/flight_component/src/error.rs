//! Component-level error types.

/// Errors raised by component construction and per-tick updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComponentError {
    /// `update` was called with a non-positive (or NaN) timestep.
    #[error("invalid timestep: dt must be > 0, got {dt}")]
    InvalidTimestep {
        /// The rejected timestep, in seconds.
        dt: f64,
    },

    /// A component was built from values that can never be simulated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Rejects timesteps that are not strictly positive.
///
/// NaN fails the comparison and is rejected too.
pub(crate) fn check_timestep(dt: f64) -> Result<(), ComponentError> {
    if dt > 0.0 {
        Ok(())
    } else {
        Err(ComponentError::InvalidTimestep { dt })
    }
}
