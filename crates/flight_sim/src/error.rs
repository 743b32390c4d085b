//! Simulation-layer error types.

use flight_component::{ComponentError, Entity};

/// Errors raised by the world, its systems and the tick driver.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The target entity was never created in this world.
    #[error("entity {0} not found")]
    UnknownEntity(Entity),

    /// A component rejected an update or could not be constructed.
    #[error(transparent)]
    Component(#[from] ComponentError),

    /// A system returned an error; the rest of the tick was skipped.
    #[error("system '{system}' failed: {source}")]
    SystemUpdateFailed {
        /// Name of the failing system.
        system: String,
        /// The error the system returned.
        #[source]
        source: Box<SimError>,
    },

    /// The tick driver was configured with values it cannot run.
    #[error("invalid tick configuration: {0}")]
    InvalidTickConfig(String),
}

impl SimError {
    /// Follows [`SimError::SystemUpdateFailed`] wrappers down to the error the
    /// failing system actually returned.
    #[must_use]
    pub fn root(&self) -> &SimError {
        match self {
            SimError::SystemUpdateFailed { source, .. } => source.root(),
            other => other,
        }
    }
}
