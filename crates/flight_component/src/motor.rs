//! Solid rocket motor component.
//!
//! A [`Motor`] replays a thrust curve while it burns and depletes its
//! propellant mass in proportion to the instantaneous thrust. Burn state is
//! tracked by the two-state machine in [`crate::burn`].

use serde::{Deserialize, Serialize};

use crate::burn::{self, BurnState, BurnTransition};
use crate::component::{Component, ComponentKind};
use crate::error::{ComponentError, check_timestep};
use crate::thrust_curve::ThrustCurve;

/// Parsed motor properties, as delivered by a thrust-curve source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorData {
    /// Motor designation, e.g. `"269H110-14A"`.
    #[serde(default)]
    pub designation: String,
    /// Thrust samples as `[seconds, newtons]` pairs.
    pub thrust: ThrustCurve,
    /// Total wet mass in kilograms.
    pub total_mass: f64,
    /// Nominal burn time in seconds.
    pub burn_time: f64,
    /// Average thrust over the burn, in newtons.
    pub avg_thrust: f64,
}

/// A thrust-curve driven motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motor {
    designation: String,
    curve: ThrustCurve,
    total_mass: f64,
    burn_time: f64,
    avg_thrust: f64,

    thrust: f64,
    mass: f64,
    elapsed: f64,
    state: BurnState,
}

impl Motor {
    /// Creates an idle motor with full wet mass. Its thrust starts at the
    /// first curve sample.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidConfiguration`] if the total mass or
    /// burn time is negative or non-finite, or if the average thrust is not
    /// strictly positive.
    pub fn new(data: MotorData) -> Result<Self, ComponentError> {
        let MotorData {
            designation,
            thrust,
            total_mass,
            burn_time,
            avg_thrust,
        } = data;

        if !(total_mass.is_finite() && total_mass >= 0.0) {
            return Err(ComponentError::InvalidConfiguration(format!(
                "motor {designation}: total mass must be finite and >= 0, got {total_mass}"
            )));
        }
        if !(burn_time.is_finite() && burn_time >= 0.0) {
            return Err(ComponentError::InvalidConfiguration(format!(
                "motor {designation}: burn time must be finite and >= 0, got {burn_time}"
            )));
        }
        if !(avg_thrust.is_finite() && avg_thrust > 0.0) {
            return Err(ComponentError::InvalidConfiguration(format!(
                "motor {designation}: average thrust must be greater than zero, got {avg_thrust}"
            )));
        }

        Ok(Self {
            designation,
            thrust: thrust.initial_thrust(),
            curve: thrust,
            total_mass,
            burn_time,
            avg_thrust,
            mass: total_mass,
            elapsed: 0.0,
            state: BurnState::Idle,
        })
    }

    /// Advances the burn by `dt` seconds and reports the state transition
    /// taken, if any.
    ///
    /// Elapsed time accumulates first, then the state machine is evaluated,
    /// then thrust and mass are recomputed for the new state.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidTimestep`] if `dt <= 0`; the motor is
    /// left untouched.
    pub fn step(&mut self, dt: f64) -> Result<Option<BurnTransition>, ComponentError> {
        check_timestep(dt)?;

        self.elapsed += dt;

        let previous = self.state;
        self.state = burn::next_state(previous, self.mass, self.elapsed, self.burn_time);

        match self.state {
            BurnState::Burning => {
                self.thrust = self.curve.interpolate(self.elapsed);
                if self.mass > 0.0 && self.thrust > 0.0 {
                    let mass_loss = self.thrust * dt / self.avg_thrust;
                    self.mass = (self.mass - mass_loss).max(0.0);
                }
            }
            BurnState::Idle => self.thrust = 0.0,
        }

        Ok(burn::transition(previous, self.state))
    }

    /// Current thrust in newtons.
    #[must_use]
    pub fn thrust(&self) -> f64 {
        self.thrust
    }

    /// Remaining mass in kilograms.
    #[must_use]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Mass burned so far, in kilograms.
    #[must_use]
    pub fn consumed_mass(&self) -> f64 {
        self.total_mass - self.mass
    }

    /// Seconds since the motor was first updated.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Nominal burn time in seconds; the motor goes idle once exceeded.
    #[must_use]
    pub fn burn_time(&self) -> f64 {
        self.burn_time
    }

    /// Whether the motor is currently burning.
    #[must_use]
    pub fn state(&self) -> BurnState {
        self.state
    }

    /// Motor designation, empty when the source gave none.
    #[must_use]
    pub fn designation(&self) -> &str {
        &self.designation
    }
}

impl Component for Motor {
    fn kind(&self) -> ComponentKind {
        ComponentKind::Motor
    }

    fn update(&mut self, dt: f64) -> Result<(), ComponentError> {
        self.step(dt).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motor_data() -> MotorData {
        MotorData {
            designation: "test".to_string(),
            thrust: ThrustCurve::try_from(vec![[0.0, 100.0], [1.0, 200.0], [2.0, 300.0]]).unwrap(),
            total_mass: 50.0,
            burn_time: 2.0,
            avg_thrust: 200.0,
        }
    }

    #[test]
    fn test_new_motor_is_idle_with_full_mass() {
        let m = Motor::new(motor_data()).unwrap();
        assert_eq!(m.state(), BurnState::Idle);
        assert_eq!(m.mass(), 50.0);
        assert_eq!(m.consumed_mass(), 0.0);
        assert_eq!(m.thrust(), 100.0);
        assert_eq!(m.elapsed(), 0.0);
    }

    #[test]
    fn test_new_rejects_invalid_data() {
        let mut data = motor_data();
        data.avg_thrust = 0.0;
        assert!(Motor::new(data).is_err());

        let mut data = motor_data();
        data.total_mass = -1.0;
        assert!(Motor::new(data).is_err());

        let mut data = motor_data();
        data.burn_time = f64::NAN;
        assert!(Motor::new(data).is_err());
    }

    #[test]
    fn test_ignites_and_interpolates() {
        let mut m = Motor::new(motor_data()).unwrap();
        let transition = m.step(0.5).unwrap();

        assert_eq!(transition, Some(BurnTransition::Ignite));
        assert_eq!(m.state(), BurnState::Burning);
        assert_eq!(m.thrust(), 150.0);
        // 150 N * 0.5 s / 200 N
        assert_eq!(m.mass(), 50.0 - 0.375);
    }

    #[test]
    fn test_extinguishes_after_burn_time() {
        let mut m = Motor::new(motor_data()).unwrap();
        m.step(0.5).unwrap();
        assert_eq!(m.step(1.0).unwrap(), None);
        assert_eq!(m.thrust(), 250.0);

        let mass_at_burnout = m.mass();
        assert_eq!(m.step(0.6).unwrap(), Some(BurnTransition::Extinguish));
        assert_eq!(m.state(), BurnState::Idle);
        assert_eq!(m.thrust(), 0.0);
        assert_eq!(m.mass(), mass_at_burnout);

        // Stays idle, no further depletion.
        assert_eq!(m.step(1.0).unwrap(), None);
        assert_eq!(m.thrust(), 0.0);
        assert_eq!(m.mass(), mass_at_burnout);
    }

    #[test]
    fn test_mass_never_rises_and_never_goes_negative() {
        let mut data = motor_data();
        data.total_mass = 1.0;
        data.burn_time = 10.0;
        let mut m = Motor::new(data).unwrap();

        let mut last = m.mass();
        for _ in 0..100 {
            m.update(0.05).unwrap();
            assert!(m.mass() <= last);
            assert!(m.mass() >= 0.0);
            last = m.mass();
        }
        assert_eq!(m.mass(), 0.0);
        assert_eq!(m.state(), BurnState::Idle);
        assert_eq!(m.thrust(), 0.0);
    }

    #[test]
    fn test_invalid_timestep() {
        let mut m = Motor::new(motor_data()).unwrap();
        let before = m.clone();
        assert_eq!(
            m.update(-0.1),
            Err(ComponentError::InvalidTimestep { dt: -0.1 })
        );
        assert_eq!(m, before);
    }

    #[test]
    fn test_zero_mass_motor_never_ignites() {
        let mut data = motor_data();
        data.total_mass = 0.0;
        let mut m = Motor::new(data).unwrap();
        assert_eq!(m.step(0.1).unwrap(), None);
        assert_eq!(m.state(), BurnState::Idle);
        assert_eq!(m.thrust(), 0.0);
    }

    #[test]
    fn test_motor_data_from_json() {
        let json = r#"{
            "designation": "H110",
            "thrust": [[0.0, 100.0], [1.0, 200.0]],
            "total_mass": 0.3,
            "burn_time": 1.0,
            "avg_thrust": 150.0
        }"#;
        let data: MotorData = serde_json::from_str(json).unwrap();
        assert_eq!(data.designation, "H110");
        assert_eq!(data.thrust.samples().len(), 2);
        assert!(Motor::new(data).is_ok());
    }
}
