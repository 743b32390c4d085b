//! 3D vector helpers.
//!
//! [`Vector3`] provides addition, scaling, magnitude and normalisation
//! directly through glam. [`VectorExt`] adds the few operations the flight
//! components need that glam does not phrase the same way.

use glam::DVec3;

/// A 3D vector in SI units (metres, m/s, newtons, ...).
pub type Vector3 = DVec3;

/// Extension methods for [`Vector3`].
pub trait VectorExt {
    /// Returns the unit vector pointing along `self`, or `None` when the
    /// magnitude is below `min_length`.
    ///
    /// The division is by the magnitude itself, so the result is bit-identical
    /// to `self / self.length()`.
    fn direction(self, min_length: f64) -> Option<Vector3>;

    /// Rounds every component to `decimals` decimal places.
    #[must_use]
    fn rounded(self, decimals: u32) -> Vector3;
}

impl VectorExt for Vector3 {
    fn direction(self, min_length: f64) -> Option<Vector3> {
        let length = self.length();
        if length < min_length {
            return None;
        }
        Some(self / length)
    }

    fn rounded(self, decimals: u32) -> Vector3 {
        let scale = 10f64.powi(decimals as i32);
        (self * scale).round() / scale
    }
}

/// Sums `forces` onto `base`, strictly left to right.
#[must_use]
pub fn sum_forces(base: Vector3, forces: &[Vector3]) -> Vector3 {
    forces.iter().fold(base, |acc, force| acc + *force)
}
