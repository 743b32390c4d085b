//! Quadratic drag component.

use std::f64::consts::PI;

use flight_math::{Vector3, VectorExt};
use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind};
use crate::error::ComponentError;

/// Sea-level air density in kg/m³.
pub const AIR_DENSITY: f64 = 1.225;

/// Below this speed (m/s) drag is treated as zero.
pub const MIN_DRAG_SPEED: f64 = 1e-10;

/// Drag coefficient and reference area of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aerodynamics {
    drag_coefficient: f64,
    area: f64,
}

impl Aerodynamics {
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidConfiguration`] unless both values
    /// are finite and non-negative.
    pub fn new(drag_coefficient: f64, area: f64) -> Result<Self, ComponentError> {
        if !(drag_coefficient.is_finite() && drag_coefficient >= 0.0) {
            return Err(ComponentError::InvalidConfiguration(format!(
                "drag coefficient must be finite and >= 0, got {drag_coefficient}"
            )));
        }
        if !(area.is_finite() && area >= 0.0) {
            return Err(ComponentError::InvalidConfiguration(format!(
                "reference area must be finite and >= 0, got {area}"
            )));
        }
        Ok(Self {
            drag_coefficient,
            area,
        })
    }

    /// Uses the circular cross-section of the given radius as reference area.
    ///
    /// # Errors
    ///
    /// Same as [`Aerodynamics::new`].
    pub fn from_radius(drag_coefficient: f64, radius: f64) -> Result<Self, ComponentError> {
        Self::new(drag_coefficient, PI * (radius * radius))
    }

    /// Dimensionless drag coefficient.
    #[must_use]
    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    /// Reference cross-sectional area in m².
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Drag force for a body moving at `velocity`.
    ///
    /// `|F| = 0.5 * Cd * rho * A * |v|²`, directed against the velocity.
    /// Returns zero below [`MIN_DRAG_SPEED`].
    #[must_use]
    pub fn calculate_drag(&self, velocity: Vector3) -> Vector3 {
        let Some(direction) = velocity.direction(MIN_DRAG_SPEED) else {
            return Vector3::ZERO;
        };
        let speed = velocity.length();
        let magnitude = 0.5 * self.drag_coefficient * AIR_DENSITY * self.area * speed * speed;
        direction * -magnitude
    }
}

impl Component for Aerodynamics {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Aerodynamics
    }

    /// Aerodynamic properties are constant; nothing to advance.
    fn update(&mut self, _dt: f64) -> Result<(), ComponentError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_velocity_has_no_drag() {
        let aero = Aerodynamics::new(0.75, 0.01).unwrap();
        assert_eq!(aero.calculate_drag(Vector3::ZERO), Vector3::ZERO);
        assert_eq!(
            aero.calculate_drag(Vector3::new(1e-12, 0.0, 0.0)),
            Vector3::ZERO
        );
    }

    #[test]
    fn test_drag_magnitude_and_direction() {
        let aero = Aerodynamics::new(0.5, 0.02).unwrap();
        let velocities = [
            Vector3::new(0.0, 50.0, 0.0),
            Vector3::new(3.0, -4.0, 12.0),
            Vector3::new(-100.0, 20.0, 0.5),
        ];
        for v in velocities {
            let drag = aero.calculate_drag(v);
            let expected = 0.5 * 0.5 * AIR_DENSITY * 0.02 * v.length_squared();
            assert!(
                (drag.length() - expected).abs() <= expected * 1e-12,
                "drag {drag} for velocity {v}"
            );
            assert!(drag.dot(v) <= 0.0);
        }
    }

    #[test]
    fn test_drag_opposes_vertical_motion() {
        let aero = Aerodynamics::new(1.0, 1.0).unwrap();
        let drag = aero.calculate_drag(Vector3::new(0.0, 10.0, 0.0));
        assert_eq!(drag.x, 0.0);
        assert_eq!(drag.z, 0.0);
        assert!((drag.y + 61.25).abs() < 1e-9);
    }

    #[test]
    fn test_from_radius() {
        let aero = Aerodynamics::from_radius(0.5, 0.1).unwrap();
        assert!((aero.area() - PI * 0.01).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Aerodynamics::new(-0.1, 1.0).is_err());
        assert!(Aerodynamics::new(0.5, f64::NAN).is_err());
    }

    #[test]
    fn test_update_is_noop() {
        let mut aero = Aerodynamics::new(0.5, 0.02).unwrap();
        aero.update(0.01).unwrap();
        assert_eq!(aero, Aerodynamics::new(0.5, 0.02).unwrap());
    }
}
