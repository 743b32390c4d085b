//! Simulation configuration.
//!
//! Loaded from a JSON file. Every section and field has a default, so a file
//! only needs to name what it changes; an empty object is a valid config.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use flight_component::{MotorData, ThrustCurve, ThrustSample};
use flight_math::Vector3;
use flight_sim::{RocketSpec, STANDARD_GRAVITY, TickConfig};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub simulation: SimulationConfig,
    pub launchsite: LaunchsiteConfig,
    pub rocket: RocketConfig,
}

/// Integration and driver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds per tick.
    pub step: f64,
    /// Seconds to simulate at most.
    pub max_time: f64,
    /// Physics worker threads; 0 is treated as 1.
    pub workers: usize,
    /// Pace the run against the wall clock.
    pub realtime: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            step: 0.01,
            max_time: 60.0,
            workers: 1,
            realtime: false,
        }
    }
}

/// Where the rocket flies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchsiteConfig {
    /// Gravitational acceleration in m/s².
    pub gravity: f64,
}

impl Default for LaunchsiteConfig {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
        }
    }
}

/// The vehicle to fly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketConfig {
    /// Lift-off mass in kilograms.
    pub mass: f64,
    pub drag_coefficient: f64,
    /// Nose cone radius in metres; sets the drag reference area.
    pub nose_radius: f64,
    pub motor: MotorData,
}

impl Default for RocketConfig {
    fn default() -> Self {
        Self {
            mass: 2.0,
            drag_coefficient: 0.45,
            nose_radius: 0.05,
            motor: default_motor(),
        }
    }
}

impl RocketConfig {
    /// The assembly description for this rocket, standing on the origin.
    #[must_use]
    pub fn spec(&self) -> RocketSpec {
        RocketSpec {
            mass: self.mass,
            drag_coefficient: self.drag_coefficient,
            nose_radius: self.nose_radius,
            position: Vector3::ZERO,
            motor: self.motor.clone(),
        }
    }
}

/// A mid-power G motor with a short regressive burn.
fn default_motor() -> MotorData {
    let samples = [
        [0.0, 0.0],
        [0.05, 110.0],
        [0.2, 95.0],
        [0.8, 80.0],
        [1.2, 60.0],
        [1.4, 15.0],
        [1.5, 0.0],
    ];
    MotorData {
        designation: "G80".to_string(),
        thrust: ThrustCurve::new(samples.into_iter().map(ThrustSample::from)).unwrap_or_default(),
        total_mass: 1.5,
        burn_time: 1.5,
        avg_thrust: 80.0,
    }
}

impl SimConfig {
    /// Reads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON for this shape,
    /// or holds values [`validate`](Self::validate) rejects.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SimConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Tick loop settings for this run.
    #[must_use]
    pub fn tick_config(&self) -> TickConfig {
        TickConfig {
            step: self.simulation.step,
            max_time: self.simulation.max_time,
            realtime: self.simulation.realtime,
        }
    }

    /// Describes every invalid field.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut positive = |name: &str, value: f64| {
            if !(value.is_finite() && value > 0.0) {
                problems.push(format!("{name} must be positive, got {value}"));
            }
        };

        positive("simulation.step", self.simulation.step);
        positive("rocket.mass", self.rocket.mass);
        positive("rocket.nose_radius", self.rocket.nose_radius);
        positive("rocket.motor.avg_thrust", self.rocket.motor.avg_thrust);

        let mut non_negative = |name: &str, value: f64| {
            if !(value.is_finite() && value >= 0.0) {
                problems.push(format!("{name} must be non-negative, got {value}"));
            }
        };

        non_negative("simulation.max_time", self.simulation.max_time);
        non_negative("launchsite.gravity", self.launchsite.gravity);
        non_negative("rocket.drag_coefficient", self.rocket.drag_coefficient);
        non_negative("rocket.motor.total_mass", self.rocket.motor.total_mass);
        non_negative("rocket.motor.burn_time", self.rocket.motor.burn_time);

        if self.rocket.motor.thrust.is_empty() {
            problems.push("rocket.motor.thrust must have at least one sample".to_string());
        }
        problems
    }

    /// Checks every field at once.
    ///
    /// # Errors
    ///
    /// Lists all invalid fields in a single error.
    pub fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if !problems.is_empty() {
            bail!("invalid configuration: {}", problems.join("; "));
        }
        Ok(())
    }
}
