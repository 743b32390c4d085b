//! # flight_math
//!
//! Math types for the flight simulator. Re-exports [`glam`] for linear
//! algebra and defines the helpers the components need on top of it.
//!
//! All simulation math is done in `f64`; [`Vector3`] is an alias for
//! [`glam::DVec3`].

pub mod vector;

pub use vector::{Vector3, VectorExt, sum_forces};
