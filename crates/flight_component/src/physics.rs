//! Point-mass kinematics component.
//!
//! [`Physics`] accumulates forces during a tick and integrates them once in
//! [`Physics::update`] with semi-implicit Euler: the new acceleration feeds
//! the velocity, and the new velocity feeds the position.

use flight_math::{Vector3, sum_forces};
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind};
use crate::error::{ComponentError, check_timestep};

/// Kinematic state of a point mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    mass: f64,
    position: Vector3,
    velocity: Vector3,
    acceleration: Vector3,
    /// Forces added since the last integration step. Cleared every update.
    forces: Vec<Vector3>,
    gravity: Vector3,
}

impl Physics {
    /// Creates a body at rest at the origin.
    ///
    /// `gravity` is the magnitude of gravitational acceleration; the stored
    /// gravity vector points down the Y axis. It is added to the net force
    /// as-is on every update.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidConfiguration`] unless `mass` is
    /// finite and strictly positive, or if `gravity` is not finite.
    pub fn new(mass: f64, gravity: f64) -> Result<Self, ComponentError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(ComponentError::InvalidConfiguration(format!(
                "mass must be greater than zero, got {mass}"
            )));
        }
        if !gravity.is_finite() {
            return Err(ComponentError::InvalidConfiguration(format!(
                "gravity must be finite, got {gravity}"
            )));
        }
        Ok(Self {
            mass,
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
            acceleration: Vector3::ZERO,
            forces: Vec::new(),
            gravity: Vector3::new(0.0, -gravity, 0.0),
        })
    }

    /// Sets the initial position.
    #[must_use]
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// Sets the initial velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Queues a force for the next integration step.
    pub fn add_force(&mut self, force: Vector3) {
        self.forces.push(force);
    }

    /// Mass in kilograms.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Position in metres.
    #[must_use]
    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Velocity in m/s.
    #[must_use]
    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Acceleration computed by the most recent update.
    #[must_use]
    pub fn acceleration(&self) -> Vector3 {
        self.acceleration
    }

    /// The gravity term added to every update, `(0, -g, 0)`.
    #[must_use]
    pub fn gravity(&self) -> Vector3 {
        self.gravity
    }

    /// Forces queued since the last update, in the order they were added.
    #[must_use]
    pub fn pending_forces(&self) -> &[Vector3] {
        &self.forces
    }
}

impl Component for Physics {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Physics
    }

    /// Integrates one step. On error nothing is modified, including the
    /// pending forces.
    fn update(&mut self, dt: f64) -> Result<(), ComponentError> {
        check_timestep(dt)?;

        let net_force = sum_forces(self.gravity, &self.forces);
        self.acceleration = net_force / self.mass;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;

        self.forces.clear();
        Ok(())
    }
}
