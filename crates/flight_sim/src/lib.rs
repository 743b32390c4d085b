//! # flight_sim
//!
//! The "S" in ECS for the flight simulator, plus the store that ties it
//! together.
//!
//! This crate provides:
//!
//! - [`World`]: the concurrent entity/component store and system schedule.
//! - [`System`]: the per-tick behaviour contract, run in priority order.
//! - [`MotorSystem`], [`RocketSystem`], [`PhysicsSystem`]: the flight systems.
//! - [`spawn_rocket`]: assembles a rocket entity from a [`RocketSpec`].
//! - [`TickLoop`]: the fixed-timestep driver, with [`FlightSample`] snapshots.

pub mod assembly;
pub mod error;
pub mod sample;
pub mod scheduler;
pub mod system;
pub mod systems;
pub mod tick;
pub mod world;

pub use assembly::{RocketSpec, STANDARD_GRAVITY, spawn_rocket};
pub use error::SimError;
pub use sample::FlightSample;
pub use scheduler::SystemSchedule;
pub use system::System;
pub use systems::{
    MOTOR_PRIORITY, MotorSystem, PHYSICS_PRIORITY, PhysicsSystem, ROCKET_PRIORITY, RocketSystem,
};
pub use tick::{TickConfig, TickLoop};
pub use world::{ComponentRef, Shared, StoredComponent, World};
