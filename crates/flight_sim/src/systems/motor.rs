//! Motor burn system.

use tracing::info;

use flight_component::{BurnTransition, ComponentKind, Motor};

use crate::error::SimError;
use crate::system::System;
use crate::world::World;

/// Advances the burn of every [`Motor`] and logs ignition and burnout.
#[derive(Debug, Default, Clone, Copy)]
pub struct MotorSystem;

impl MotorSystem {
    /// Creates the motor system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl System for MotorSystem {
    fn name(&self) -> &str {
        "motor"
    }

    fn priority(&self) -> i32 {
        super::MOTOR_PRIORITY
    }

    fn update(&self, world: &World, dt: f64) -> Result<(), SimError> {
        for entity in world.query(&[ComponentKind::Motor]) {
            let Some(motor) = world.get::<Motor>(entity) else {
                continue;
            };
            let mut motor = motor.lock();

            match motor.step(dt)? {
                Some(BurnTransition::Ignite) => info!(
                    %entity,
                    designation = motor.designation(),
                    thrust = motor.thrust(),
                    "motor ignited"
                ),
                Some(BurnTransition::Extinguish) => info!(
                    %entity,
                    designation = motor.designation(),
                    elapsed = motor.elapsed(),
                    burn_time = motor.burn_time(),
                    consumed_mass = motor.consumed_mass(),
                    remaining_mass = motor.mass(),
                    "motor burnout"
                ),
                None => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use flight_component::{BurnState, ComponentError, MotorData, Physics, ThrustCurve};

    use super::*;

    fn motor() -> Motor {
        Motor::new(MotorData {
            designation: "test".to_string(),
            thrust: ThrustCurve::try_from(vec![[0.0, 100.0], [1.0, 200.0], [2.0, 300.0]]).unwrap(),
            total_mass: 50.0,
            burn_time: 2.0,
            avg_thrust: 200.0,
        })
        .unwrap()
    }

    #[test]
    fn test_updates_every_motor() {
        let world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        world.add_component(a, motor()).unwrap();
        world.add_component(b, motor()).unwrap();
        world.add_component(b, Physics::new(1.0, 9.81).unwrap()).unwrap();

        MotorSystem.update(&world, 0.5).unwrap();

        for entity in [a, b] {
            let motor = world.get::<Motor>(entity).unwrap();
            let motor = motor.lock();
            assert_eq!(motor.state(), BurnState::Burning);
            assert_eq!(motor.thrust(), 150.0);
        }
    }

    #[test]
    fn test_propagates_component_error() {
        let world = World::new();
        let e = world.create_entity();
        world.add_component(e, motor()).unwrap();

        let err = MotorSystem.update(&world, 0.0).unwrap_err();
        assert!(matches!(
            err,
            SimError::Component(ComponentError::InvalidTimestep { .. })
        ));
    }

    #[test]
    fn test_no_motors_is_ok() {
        let world = World::new();
        world.create_entity();
        MotorSystem.update(&world, 0.1).unwrap();
    }
}
