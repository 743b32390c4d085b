//! # flight_component
//!
//! The "E" and "C" in ECS for the flight simulator: entity identity, the
//! component contract and the three concrete components whose update
//! equations define simulated flight.
//!
//! This crate provides:
//!
//! - [`Entity`]: lightweight `u64` entity identifiers.
//! - [`EntityAllocator`]: thread-safe, monotonically increasing ID allocator.
//! - [`Component`] trait and the closed [`ComponentKind`] / [`AnyComponent`] pair.
//! - [`ComponentSet`]: kind sets used to match queries.
//! - [`Physics`]: force accumulation and semi-implicit Euler integration.
//! - [`Motor`]: thrust-curve replay with an Idle/Burning state machine.
//! - [`Aerodynamics`]: quadratic drag.

pub mod aerodynamics;
pub mod burn;
pub mod component;
pub mod entity;
pub mod error;
pub mod motor;
pub mod physics;
pub mod query;
pub mod thrust_curve;

pub use aerodynamics::{AIR_DENSITY, Aerodynamics};
pub use burn::{BurnState, BurnTransition, next_state};
pub use component::{AnyComponent, Component, ComponentKind};
pub use entity::{Entity, EntityAllocator};
pub use error::ComponentError;
pub use motor::{Motor, MotorData};
pub use physics::Physics;
pub use query::ComponentSet;
pub use thrust_curve::{ThrustCurve, ThrustSample};
