//! The [`System`] trait.

use crate::error::SimError;
use crate::world::World;

/// A unit of per-tick logic.
///
/// Systems hold no per-entity state: everything they mutate lives in
/// components owned by the [`World`]. Component handles obtained during
/// `update` must not be kept past the call.
pub trait System: Send + Sync {
    /// Human-readable name, used in logs and in
    /// [`SimError::SystemUpdateFailed`].
    fn name(&self) -> &str;

    /// Execution order within a tick. Lower runs first.
    fn priority(&self) -> i32 {
        0
    }

    /// Runs the system once for a tick of `dt` seconds.
    ///
    /// # Errors
    ///
    /// Component errors are returned unchanged; the world wraps them with the
    /// system's name.
    fn update(&self, world: &World, dt: f64) -> Result<(), SimError>;
}
