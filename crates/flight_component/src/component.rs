//! Core [`Component`] trait and component identity.
//!
//! The set of component kinds is closed: [`ComponentKind`] names every kind
//! the simulator knows, and [`AnyComponent`] carries one value of any of
//! them. Lookups are keyed by the enum rather than by free-form strings, so an
//! unknown kind is a compile error rather than a silent miss.

use serde::{Deserialize, Serialize};

use crate::aerodynamics::Aerodynamics;
use crate::error::ComponentError;
use crate::motor::Motor;
use crate::physics::Physics;

/// Identifies a component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Kinematics and force accumulation.
    Physics,
    /// Thrust-curve driven solid motor.
    Motor,
    /// Quadratic drag model.
    Aerodynamics,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 3] = [
        ComponentKind::Physics,
        ComponentKind::Motor,
        ComponentKind::Aerodynamics,
    ];

    /// The human-readable name of this kind (e.g. `"Physics"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Physics => "Physics",
            ComponentKind::Motor => "Motor",
            ComponentKind::Aerodynamics => "Aerodynamics",
        }
    }

    /// The bit this kind occupies in a [`ComponentSet`](crate::ComponentSet).
    #[must_use]
    pub(crate) const fn bit(self) -> u8 {
        match self {
            ComponentKind::Physics => 1 << 0,
            ComponentKind::Motor => 1 << 1,
            ComponentKind::Aerodynamics => 1 << 2,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The core component trait.
///
/// Every piece of per-entity state implements this trait. Components must be
/// `Send` so systems can update disjoint entities from worker threads.
pub trait Component: Send + 'static {
    /// The kind this component is stored under. An entity holds at most one
    /// component of each kind.
    fn kind(&self) -> ComponentKind;

    /// Advances the component by `dt` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidTimestep`] when `dt <= 0` for
    /// components whose update depends on time.
    fn update(&mut self, dt: f64) -> Result<(), ComponentError>;
}

/// One component of any kind, used when attaching components to entities.
#[derive(Debug, Clone)]
pub enum AnyComponent {
    /// A [`Physics`] component.
    Physics(Physics),
    /// A [`Motor`] component.
    Motor(Motor),
    /// An [`Aerodynamics`] component.
    Aerodynamics(Aerodynamics),
}

impl Component for AnyComponent {
    fn kind(&self) -> ComponentKind {
        match self {
            AnyComponent::Physics(c) => c.kind(),
            AnyComponent::Motor(c) => c.kind(),
            AnyComponent::Aerodynamics(c) => c.kind(),
        }
    }

    fn update(&mut self, dt: f64) -> Result<(), ComponentError> {
        match self {
            AnyComponent::Physics(c) => c.update(dt),
            AnyComponent::Motor(c) => c.update(dt),
            AnyComponent::Aerodynamics(c) => c.update(dt),
        }
    }
}

impl From<Physics> for AnyComponent {
    fn from(value: Physics) -> Self {
        AnyComponent::Physics(value)
    }
}

impl From<Motor> for AnyComponent {
    fn from(value: Motor) -> Self {
        AnyComponent::Motor(value)
    }
}

impl From<Aerodynamics> for AnyComponent {
    fn from(value: Aerodynamics) -> Self {
        AnyComponent::Aerodynamics(value)
    }
}
