//! The flight systems, in the order they run each tick:
//!
//! 1. [`MotorSystem`] advances every motor's burn.
//! 2. [`RocketSystem`] turns thrust and drag into forces on the body.
//! 3. [`PhysicsSystem`] integrates every body, fanned out over workers.

pub mod motor;
pub mod physics;
pub mod rocket;

pub use motor::MotorSystem;
pub use physics::{PhysicsSystem, partition};
pub use rocket::RocketSystem;

/// Priority of [`MotorSystem`].
pub const MOTOR_PRIORITY: i32 = -10;
/// Priority of [`RocketSystem`].
pub const ROCKET_PRIORITY: i32 = 0;
/// Priority of [`PhysicsSystem`].
pub const PHYSICS_PRIORITY: i32 = 100;
