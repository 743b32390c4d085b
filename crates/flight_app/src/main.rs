//! # flight_app
//!
//! Flies a single rocket from a JSON configuration and reports the flight.
//!
//! ## Run Sequence
//!
//! 1. Load the configuration (or defaults) and apply command-line overrides.
//! 2. Register the motor, rocket and physics systems with a fresh world.
//! 3. Assemble the rocket and tick until it lands or time runs out.

mod config;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::SimConfig;
use flight_component::BurnState;
use flight_math::VectorExt;
use flight_sim::{
    FlightSample, MotorSystem, PhysicsSystem, RocketSystem, TickLoop, World, spawn_rocket,
};

#[derive(Parser)]
#[command(name = "flight_app", about = "Rigid-body rocket flight simulator")]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds to simulate at most
    #[arg(long)]
    max_time: Option<f64>,

    /// Seconds per tick
    #[arg(long)]
    step: Option<f64>,

    /// Physics worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Pace the simulation against the wall clock
    #[arg(long)]
    realtime: bool,

    /// Write one JSON flight sample per tick to this file
    #[arg(short, long)]
    telemetry: Option<PathBuf>,
}

impl Args {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(max_time) = self.max_time {
            config.simulation.max_time = max_time;
        }
        if let Some(step) = self.step {
            config.simulation.step = step;
        }
        if let Some(workers) = self.workers {
            config.simulation.workers = workers;
        }
        if self.realtime {
            config.simulation.realtime = true;
        }
    }
}

/// Running summary of the flight, updated from every sample.
#[derive(Debug, Default)]
struct FlightLog {
    apogee: Option<FlightSample>,
    burnout: Option<FlightSample>,
    last_state: BurnState,
}

impl FlightLog {
    /// Records `sample`. Returns `true` once the rocket is back on the ground.
    fn record(&mut self, sample: &FlightSample) -> bool {
        if self
            .apogee
            .as_ref()
            .is_none_or(|apogee| sample.altitude() > apogee.altitude())
        {
            self.apogee = Some(sample.clone());
        }

        if self.last_state == BurnState::Burning && sample.burn_state == BurnState::Idle {
            info!(time = sample.time, altitude = sample.altitude(), "burnout");
            self.burnout = Some(sample.clone());
        }
        self.last_state = sample.burn_state;

        sample.altitude() < 0.0 && sample.velocity.y < 0.0
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("flight_app=info".parse()?))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            SimConfig::load(path)?
        }
        None => SimConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let world = World::new();
    world.add_system(MotorSystem::new());
    world.add_system(RocketSystem::new());
    world.add_system(PhysicsSystem::new(config.simulation.workers));

    let rocket = spawn_rocket(&world, &config.rocket.spec(), config.launchsite.gravity)
        .context("assembling rocket")?;

    let mut telemetry = match &args.telemetry {
        Some(path) => Some(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };

    let mut tick_loop = TickLoop::new(world, config.tick_config())?;
    let mut log = FlightLog::default();
    let mut write_error = None;

    let ticks = tick_loop.run_with(|tl| {
        let Some(sample) = tl.sample(rocket) else {
            return ControlFlow::Break(());
        };
        if let Some(out) = telemetry.as_mut() {
            let written = serde_json::to_writer(&mut *out, &sample)
                .map_err(anyhow::Error::from)
                .and_then(|()| writeln!(out).map_err(anyhow::Error::from));
            if let Err(err) = written {
                write_error = Some(err);
                return ControlFlow::Break(());
            }
        }
        if log.record(&sample) {
            info!(time = sample.time, "landed");
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })?;

    if let Some(err) = write_error {
        return Err(err.context("writing telemetry"));
    }
    if let Some(mut out) = telemetry {
        out.flush().context("flushing telemetry")?;
    }

    if let Some(apogee) = &log.apogee {
        info!(time = apogee.time, altitude = apogee.altitude(), "apogee");
    }
    if log.burnout.is_none() {
        warn!("motor never burned out");
    }
    if let Some(last) = tick_loop.sample(rocket) {
        info!(
            ticks,
            time = last.time,
            position = ?last.position.rounded(3),
            speed = last.velocity.length(),
            "flight complete"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use flight_math::Vector3;

    use super::*;

    fn sample(time: f64, altitude: f64, vy: f64, burn_state: BurnState) -> FlightSample {
        FlightSample {
            tick: 0,
            time,
            position: Vector3::new(0.0, altitude, 0.0),
            velocity: Vector3::new(0.0, vy, 0.0),
            acceleration: Vector3::ZERO,
            thrust: 0.0,
            motor_mass: 0.0,
            burn_state,
        }
    }

    #[test]
    fn test_flight_log_tracks_apogee_burnout_and_landing() {
        let mut log = FlightLog::default();
        assert!(!log.record(&sample(0.1, 1.0, 10.0, BurnState::Burning)));
        assert!(!log.record(&sample(0.2, 5.0, 5.0, BurnState::Idle)));
        assert!(!log.record(&sample(0.3, 4.0, -2.0, BurnState::Idle)));
        assert!(log.record(&sample(0.4, -0.1, -3.0, BurnState::Idle)));

        assert_eq!(log.apogee.map(|s| s.time), Some(0.2));
        assert_eq!(log.burnout.map(|s| s.time), Some(0.2));
    }

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "flight_app",
            "--step",
            "0.02",
            "--workers",
            "3",
            "--realtime",
        ]);
        let mut config = SimConfig::default();
        args.apply(&mut config);
        assert_eq!(config.simulation.step, 0.02);
        assert_eq!(config.simulation.workers, 3);
        assert!(config.simulation.realtime);
        assert_eq!(config.simulation.max_time, 60.0);
    }

    #[test]
    fn test_default_flight_goes_up_and_comes_down() {
        let config = SimConfig::default();
        let world = World::new();
        world.add_system(MotorSystem::new());
        world.add_system(RocketSystem::new());
        world.add_system(PhysicsSystem::new(2));
        let rocket =
            spawn_rocket(&world, &config.rocket.spec(), config.launchsite.gravity).unwrap();

        let mut tick_loop = TickLoop::new(world, config.tick_config()).unwrap();
        let mut log = FlightLog::default();
        tick_loop
            .run_with(|tl| {
                let sample = tl.sample(rocket).unwrap();
                if log.record(&sample) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        let apogee = log.apogee.unwrap();
        assert!(apogee.altitude() > 10.0);
        assert!(log.burnout.is_some());
        assert!(tick_loop.sample(rocket).unwrap().altitude() < 0.0);
    }
}
