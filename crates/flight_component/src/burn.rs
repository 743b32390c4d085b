//! Motor burn state machine.
//!
//! Two states, no hysteresis. The target state is a pure function of the
//! remaining propellant mass and the elapsed burn time.

use serde::{Deserialize, Serialize};

/// Whether a motor is producing thrust.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BurnState {
    #[default]
    Idle,
    Burning,
}

/// A state change reported by [`Motor::step`](crate::Motor::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BurnTransition {
    /// Idle -> Burning.
    Ignite,
    /// Burning -> Idle.
    Extinguish,
}

/// Computes the next burn state.
///
/// The motor burns while it has mass left and `elapsed <= burn_time`;
/// otherwise it is idle. The current state only matters for the transition
/// that [`transition`] reports.
#[must_use]
pub fn next_state(_state: BurnState, mass: f64, elapsed: f64, burn_time: f64) -> BurnState {
    if mass > 0.0 && elapsed <= burn_time {
        BurnState::Burning
    } else {
        BurnState::Idle
    }
}

/// The transition taken when moving from `from` to `to`, if any.
#[must_use]
pub fn transition(from: BurnState, to: BurnState) -> Option<BurnTransition> {
    match (from, to) {
        (BurnState::Idle, BurnState::Burning) => Some(BurnTransition::Ignite),
        (BurnState::Burning, BurnState::Idle) => Some(BurnTransition::Extinguish),
        _ => None,
    }
}
