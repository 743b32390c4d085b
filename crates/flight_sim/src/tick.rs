//! Fixed-timestep tick loop.
//!
//! Each tick runs every scheduled system once through [`World::update`] with
//! the configured step, then advances the tick counter. Simulated time is
//! derived from the counter rather than accumulated, so it never drifts.
//!
//! A failed tick ends the run: the loop does not skip ahead.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use flight_component::{Entity, Motor, Physics};

use crate::error::SimError;
use crate::sample::FlightSample;
use crate::world::World;

/// Configuration for the tick loop.
#[derive(Debug, Clone, PartialEq)]
pub struct TickConfig {
    /// Simulated seconds per tick.
    pub step: f64,
    /// Simulated seconds to run for.
    pub max_time: f64,
    /// Pace ticks against the wall clock.
    pub realtime: bool,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            step: 0.01,
            max_time: 60.0,
            realtime: false,
        }
    }
}

impl TickConfig {
    /// Number of ticks needed to cover `max_time`.
    #[must_use]
    pub fn tick_budget(&self) -> u64 {
        let ticks = (self.max_time / self.step - 1e-9).ceil();
        if ticks > 0.0 { ticks as u64 } else { 0 }
    }

    fn validate(&self) -> Result<(), SimError> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SimError::InvalidTickConfig(format!(
                "step must be positive and finite, got {}",
                self.step
            )));
        }
        if !(self.max_time.is_finite() && self.max_time >= 0.0) {
            return Err(SimError::InvalidTickConfig(format!(
                "max_time must be non-negative and finite, got {}",
                self.max_time
            )));
        }
        Ok(())
    }
}

/// Drives a [`World`] forward in fixed steps.
#[derive(Debug)]
pub struct TickLoop {
    tick_id: u64,
    config: TickConfig,
    /// Wall-clock length of one tick; set only when pacing.
    pace: Option<Duration>,
    world: World,
}

impl TickLoop {
    /// Creates a tick loop over `world`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTickConfig`] for a non-positive step, a
    /// negative run time, or a realtime step too long to sleep for.
    pub fn new(world: World, config: TickConfig) -> Result<Self, SimError> {
        config.validate()?;
        let pace = if config.realtime {
            let duration = Duration::try_from_secs_f64(config.step).map_err(|err| {
                SimError::InvalidTickConfig(format!(
                    "step {} cannot be paced in real time: {err}",
                    config.step
                ))
            })?;
            Some(duration)
        } else {
            None
        };
        Ok(Self {
            tick_id: 0,
            config,
            pace,
            world,
        })
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub fn tick_id(&self) -> u64 {
        self.tick_id
    }

    /// Simulated seconds elapsed.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.tick_id as f64 * self.config.step
    }

    /// Returns the configuration the loop was built with.
    #[must_use]
    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Returns the world being driven.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Runs one tick.
    ///
    /// # Errors
    ///
    /// Propagates the first system failure. The tick counter is not advanced
    /// in that case.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.world.update(self.config.step)?;
        self.tick_id += 1;
        debug!(tick_id = self.tick_id, time = self.time(), "tick complete");
        Ok(())
    }

    /// Snapshot of `entity` at the current tick, if it has a physics body.
    #[must_use]
    pub fn sample(&self, entity: Entity) -> Option<FlightSample> {
        let physics = self.world.get::<Physics>(entity)?;
        let motor = self.world.get::<Motor>(entity);
        let physics = physics.lock();
        let motor = motor.as_ref().map(|m| m.lock());
        Some(FlightSample::capture(
            self.tick_id,
            self.time(),
            &physics,
            motor.as_deref(),
        ))
    }

    /// Ticks until `max_time` is reached. Returns the number of ticks run.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first failed tick.
    pub fn run(&mut self) -> Result<u64, SimError> {
        self.run_with(|_| ControlFlow::Continue(()))
    }

    /// Like [`run`](Self::run), calling `observer` after every tick. The run
    /// stops early when the observer breaks.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first failed tick.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<u64, SimError>
    where
        F: FnMut(&TickLoop) -> ControlFlow<()>,
    {
        let budget = self.config.tick_budget();
        let mut ticks = 0u64;

        info!(
            step = self.config.step,
            max_time = self.config.max_time,
            realtime = self.config.realtime,
            systems = self.world.system_count(),
            "starting tick loop"
        );

        while ticks < budget {
            let start = Instant::now();

            if let Err(err) = self.tick() {
                warn!(
                    tick_id = self.tick_id,
                    cause = %err.root(),
                    "tick failed, stopping"
                );
                return Err(err);
            }
            ticks += 1;

            if observer(self).is_break() {
                info!(ticks, time = self.time(), "tick loop stopped by observer");
                return Ok(ticks);
            }

            if let Some(tick_duration) = self.pace {
                let elapsed = start.elapsed();
                if elapsed < tick_duration {
                    std::thread::sleep(tick_duration - elapsed);
                } else {
                    warn!(
                        tick_id = self.tick_id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        budget_ms = tick_duration.as_millis() as u64,
                        "tick exceeded time budget"
                    );
                }
            }
        }

        info!(ticks, time = self.time(), "tick loop complete");
        Ok(ticks)
    }
}

#[cfg(test)]
mod tests {
    use flight_component::ComponentKind;
    use flight_math::Vector3;

    use super::*;
    use crate::system::System;
    use crate::systems::PhysicsSystem;

    struct Push(Vector3);

    impl System for Push {
        fn name(&self) -> &str {
            "push"
        }

        fn update(&self, world: &World, _dt: f64) -> Result<(), SimError> {
            for entity in world.query(&[ComponentKind::Physics]) {
                if let Some(physics) = world.get::<Physics>(entity) {
                    physics.lock().add_force(self.0);
                }
            }
            Ok(())
        }
    }

    struct Broken;

    impl System for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn update(&self, _world: &World, _dt: f64) -> Result<(), SimError> {
            Err(SimError::InvalidTickConfig("boom".to_string()))
        }
    }

    fn config(step: f64, max_time: f64) -> TickConfig {
        TickConfig {
            step,
            max_time,
            realtime: false,
        }
    }

    #[test]
    fn test_rejects_bad_step() {
        for step in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let result = TickLoop::new(World::new(), config(step, 1.0));
            assert!(matches!(result, Err(SimError::InvalidTickConfig(_))));
        }
        assert!(TickLoop::new(World::new(), config(0.1, -1.0)).is_err());
    }

    #[test]
    fn test_huge_step_runs_unpaced() {
        let mut tick_loop = TickLoop::new(World::new(), config(1e20, 1e21)).unwrap();
        assert_eq!(tick_loop.run().unwrap(), 10);
        assert_eq!(tick_loop.config().step, 1e20);
    }

    #[test]
    fn test_huge_step_cannot_be_paced() {
        let paced = TickConfig {
            realtime: true,
            ..config(1e20, 1e21)
        };
        assert!(matches!(
            TickLoop::new(World::new(), paced),
            Err(SimError::InvalidTickConfig(_))
        ));
    }

    #[test]
    fn test_realtime_run_paces_ticks() {
        let paced = TickConfig {
            realtime: true,
            ..config(0.005, 0.02)
        };
        let mut tick_loop = TickLoop::new(World::new(), paced).unwrap();
        let start = Instant::now();
        assert_eq!(tick_loop.run().unwrap(), 4);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_tick_advances_counter_and_time() {
        let mut tick_loop = TickLoop::new(World::new(), config(0.25, 1.0)).unwrap();
        assert_eq!(tick_loop.tick_id(), 0);
        tick_loop.tick().unwrap();
        tick_loop.tick().unwrap();
        assert_eq!(tick_loop.tick_id(), 2);
        assert_eq!(tick_loop.time(), 0.5);
    }

    #[test]
    fn test_tick_budget() {
        assert_eq!(config(0.1, 1.0).tick_budget(), 10);
        assert_eq!(config(0.3, 1.0).tick_budget(), 4);
        assert_eq!(config(1.0, 0.0).tick_budget(), 0);
    }

    #[test]
    fn test_run_stops_at_max_time() {
        let mut tick_loop = TickLoop::new(World::new(), config(0.1, 1.0)).unwrap();
        assert_eq!(tick_loop.run().unwrap(), 10);
        assert_eq!(tick_loop.tick_id(), 10);
    }

    #[test]
    fn test_failed_tick_ends_run() {
        let world = World::new();
        world.add_system(Broken);
        let mut tick_loop = TickLoop::new(world, config(0.1, 1.0)).unwrap();

        let err = tick_loop.run().unwrap_err();
        assert!(matches!(err, SimError::SystemUpdateFailed { ref system, .. } if system == "broken"));
        assert_eq!(tick_loop.tick_id(), 0);
    }

    #[test]
    fn test_observer_can_stop_run() {
        let mut tick_loop = TickLoop::new(World::new(), config(0.1, 10.0)).unwrap();
        let ticks = tick_loop
            .run_with(|tl| {
                if tl.tick_id() >= 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(ticks, 3);
    }

    #[test]
    fn test_one_second_push_against_gravity() {
        let world = World::new();
        let body = world.create_entity();
        world
            .add_component(body, Physics::new(10.0, 9.8).unwrap())
            .unwrap();
        world.add_system(Push(Vector3::new(10.0, 0.0, 0.0)));
        world.add_system(PhysicsSystem::new(1));

        let mut tick_loop = TickLoop::new(world, config(1.0, 1.0)).unwrap();
        tick_loop.run().unwrap();

        let sample = tick_loop.sample(body).unwrap();
        assert!((sample.velocity.x - 1.0).abs() < 1e-12);
        assert!((sample.velocity.y + 0.98).abs() < 1e-12);
        assert_eq!(sample.velocity.z, 0.0);
        assert_eq!(sample.time, 1.0);
    }

    #[test]
    fn test_sample_requires_physics() {
        let world = World::new();
        let entity = world.create_entity();
        let tick_loop = TickLoop::new(world, TickConfig::default()).unwrap();
        assert!(tick_loop.sample(entity).is_none());
        assert!(tick_loop.world().contains(entity));
    }
}
