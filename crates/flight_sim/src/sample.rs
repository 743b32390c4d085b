//! Per-tick flight snapshots.

use serde::Serialize;

use flight_component::{BurnState, Motor, Physics};
use flight_math::Vector3;

/// The observable state of one vehicle at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightSample {
    /// Ticks completed when the sample was taken.
    pub tick: u64,
    /// Simulated seconds since the start of the run.
    pub time: f64,
    /// Position in metres; `y` is altitude.
    pub position: Vector3,
    /// Velocity in m/s.
    pub velocity: Vector3,
    /// Acceleration of the last integration step.
    pub acceleration: Vector3,
    /// Thrust in newtons; zero for vehicles without a motor.
    pub thrust: f64,
    /// Remaining motor mass; zero without a motor.
    pub motor_mass: f64,
    /// Motor burn state; `Idle` without a motor.
    pub burn_state: BurnState,
}

impl FlightSample {
    /// Reads a sample from an entity's components.
    #[must_use]
    pub fn capture(tick: u64, time: f64, physics: &Physics, motor: Option<&Motor>) -> Self {
        Self {
            tick,
            time,
            position: physics.position(),
            velocity: physics.velocity(),
            acceleration: physics.acceleration(),
            thrust: motor.map_or(0.0, Motor::thrust),
            motor_mass: motor.map_or(0.0, Motor::mass),
            burn_state: motor.map_or(BurnState::Idle, Motor::state),
        }
    }

    /// Altitude above the launch plane.
    #[must_use]
    pub fn altitude(&self) -> f64 {
        self.position.y
    }
}
