//! Parallel physics integration system.
//!
//! The queried entity batch is split into contiguous, disjoint index ranges,
//! one per worker. Each worker integrates only the bodies in its range, and
//! the system joins every worker before returning.

use std::ops::Range;

use tracing::{debug, warn};

use flight_component::{Component, ComponentKind, Entity, Physics};

use crate::error::SimError;
use crate::system::System;
use crate::world::{Shared, World};

/// Splits `len` items into `workers` contiguous ranges.
///
/// Every range is `ceil(len / workers)` long except for a shorter tail;
/// workers past the end of the batch get empty ranges. The ranges cover
/// `0..len` exactly once, in order. `workers == 0` is treated as one worker.
#[must_use]
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk = len.div_ceil(workers);
    (0..workers)
        .map(|w| {
            let start = (w * chunk).min(len);
            let end = (start + chunk).min(len);
            start..end
        })
        .collect()
}

/// Integrates every [`Physics`] component once per tick, across `workers`
/// scoped threads.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsSystem {
    workers: usize,
}

impl PhysicsSystem {
    /// Creates the system. Zero workers is treated as one.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Number of worker threads used per tick.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Integrates one worker's bodies, stopping at the first failure.
fn integrate(batch: &[(Entity, Shared<Physics>)], dt: f64) -> Result<(), SimError> {
    for (entity, physics) in batch {
        if let Err(err) = physics.lock().update(dt) {
            warn!(%entity, error = %err, "physics update failed");
            return Err(err.into());
        }
    }
    Ok(())
}

impl System for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn priority(&self) -> i32 {
        super::PHYSICS_PRIORITY
    }

    fn update(&self, world: &World, dt: f64) -> Result<(), SimError> {
        let bodies: Vec<(Entity, Shared<Physics>)> = world
            .query(&[ComponentKind::Physics])
            .into_iter()
            .filter_map(|entity| world.get::<Physics>(entity).map(|p| (entity, p)))
            .collect();

        let ranges: Vec<Range<usize>> = partition(bodies.len(), self.workers)
            .into_iter()
            .filter(|r| !r.is_empty())
            .collect();

        debug!(
            bodies = bodies.len(),
            workers = ranges.len(),
            "integrating physics"
        );

        if ranges.len() <= 1 {
            return integrate(&bodies, dt);
        }

        let results: Vec<Result<(), SimError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = ranges
                .into_iter()
                .map(|range| {
                    let batch = &bodies[range];
                    scope.spawn(move || integrate(batch, dt))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(payload) => std::panic::resume_unwind(payload),
                })
                .collect()
        });

        // First error in worker order.
        results.into_iter().collect()
    }
}
