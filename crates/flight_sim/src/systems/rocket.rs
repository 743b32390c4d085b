//! Thrust and drag force system.

use flight_component::{Aerodynamics, ComponentKind, Motor, Physics};
use flight_math::Vector3;

use crate::error::SimError;
use crate::system::System;
use crate::world::World;

/// Applies motor thrust and aerodynamic drag to every entity that has a
/// [`Motor`], a [`Physics`] and an [`Aerodynamics`] component.
///
/// This system only queues forces; [`PhysicsSystem`](super::PhysicsSystem)
/// integrates them later in the same tick. Entities with a partial component
/// set are skipped.
#[derive(Debug, Clone, Copy)]
pub struct RocketSystem {
    /// Unit vector thrust acts along.
    axis: Vector3,
}

impl RocketSystem {
    /// Thrust along +Y, the vehicle's long axis on the pad.
    #[must_use]
    pub fn new() -> Self {
        Self { axis: Vector3::Y }
    }

    /// Thrust along `axis`. The axis is normalised; a zero axis falls back
    /// to +Y.
    #[must_use]
    pub fn with_axis(axis: Vector3) -> Self {
        Self {
            axis: axis.try_normalize().unwrap_or(Vector3::Y),
        }
    }

    /// The unit vector thrust is applied along.
    #[must_use]
    pub fn axis(&self) -> Vector3 {
        self.axis
    }
}

impl Default for RocketSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for RocketSystem {
    fn name(&self) -> &str {
        "rocket"
    }

    fn priority(&self) -> i32 {
        super::ROCKET_PRIORITY
    }

    fn update(&self, world: &World, _dt: f64) -> Result<(), SimError> {
        let entities = world.query(&[
            ComponentKind::Motor,
            ComponentKind::Physics,
            ComponentKind::Aerodynamics,
        ]);

        for entity in entities {
            let (Some(motor), Some(physics), Some(aero)) = (
                world.get::<Motor>(entity),
                world.get::<Physics>(entity),
                world.get::<Aerodynamics>(entity),
            ) else {
                continue;
            };

            let thrust = motor.lock().thrust();
            let aero = *aero.lock();
            let mut physics = physics.lock();

            physics.add_force(self.axis * thrust);
            let drag = aero.calculate_drag(physics.velocity());
            physics.add_force(drag);
        }
        Ok(())
    }
}
