//! Vehicle assembly.
//!
//! Builds the Motor + Aerodynamics + Physics aggregate of a single-stage
//! rocket and registers it with a [`World`]. All components are constructed
//! before the entity is created, so an invalid vehicle never leaves a
//! half-built entity behind.

use serde::{Deserialize, Serialize};
use tracing::info;

use flight_component::{Aerodynamics, Entity, Motor, MotorData, Physics};
use flight_math::Vector3;

use crate::error::SimError;
use crate::world::World;

/// Standard gravity in m/s².
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Everything needed to put a rocket on the pad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketSpec {
    /// Lift-off mass of the vehicle in kilograms.
    pub mass: f64,
    /// Drag coefficient of the whole vehicle.
    pub drag_coefficient: f64,
    /// Nose cone aft radius in metres; sets the reference area.
    pub nose_radius: f64,
    /// Launch position.
    #[serde(default)]
    pub position: Vector3,
    /// The motor and its thrust curve.
    pub motor: MotorData,
}

/// Creates a rocket entity in `world`.
///
/// # Errors
///
/// Returns [`SimError::Component`] if any component rejects its values; no
/// entity is created in that case.
pub fn spawn_rocket(world: &World, spec: &RocketSpec, gravity: f64) -> Result<Entity, SimError> {
    let motor = Motor::new(spec.motor.clone())?;
    let aero = Aerodynamics::from_radius(spec.drag_coefficient, spec.nose_radius)?;
    let physics = Physics::new(spec.mass, gravity)?.with_position(spec.position);

    let entity = world.create_entity();
    world.add_component(entity, motor)?;
    world.add_component(entity, aero)?;
    world.add_component(entity, physics)?;

    info!(
        %entity,
        mass = spec.mass,
        motor = spec.motor.designation,
        area = aero.area(),
        "rocket assembled"
    );
    Ok(entity)
}
