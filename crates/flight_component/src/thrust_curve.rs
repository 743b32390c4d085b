//! Thrust curves: time/thrust samples with piecewise-linear lookup.

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;

/// One point on a thrust curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrustSample {
    /// Seconds since ignition.
    pub time: f64,
    /// Thrust in newtons.
    pub thrust: f64,
}

impl From<[f64; 2]> for ThrustSample {
    fn from([time, thrust]: [f64; 2]) -> Self {
        Self { time, thrust }
    }
}

/// An immutable thrust curve, sorted by ascending time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct ThrustCurve {
    samples: Vec<ThrustSample>,
}

impl ThrustCurve {
    /// Builds a curve from samples in any order.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::InvalidConfiguration`] if any time or thrust
    /// is non-finite or negative.
    pub fn new(samples: impl IntoIterator<Item = ThrustSample>) -> Result<Self, ComponentError> {
        let mut samples: Vec<ThrustSample> = samples.into_iter().collect();
        for (i, s) in samples.iter().enumerate() {
            if !(s.time.is_finite() && s.time >= 0.0) {
                return Err(ComponentError::InvalidConfiguration(format!(
                    "thrust sample {i}: time must be finite and >= 0, got {}",
                    s.time
                )));
            }
            if !(s.thrust.is_finite() && s.thrust >= 0.0) {
                return Err(ComponentError::InvalidConfiguration(format!(
                    "thrust sample {i}: thrust must be finite and >= 0, got {}",
                    s.thrust
                )));
            }
        }
        // Stable, so equal timestamps keep their input order.
        samples.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { samples })
    }

    /// Samples in ascending time order.
    #[must_use]
    pub fn samples(&self) -> &[ThrustSample] {
        &self.samples
    }

    /// Returns `true` if the curve has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Thrust of the first sample, or zero for an empty curve.
    #[must_use]
    pub fn initial_thrust(&self) -> f64 {
        self.samples.first().map_or(0.0, |s| s.thrust)
    }

    /// Thrust at `t` seconds after ignition.
    ///
    /// Linear between neighbouring samples, flat after the last sample, and
    /// zero before the first sample or for an empty curve.
    #[must_use]
    pub fn interpolate(&self, t: f64) -> f64 {
        let Some(last) = self.samples.last() else {
            return 0.0;
        };

        for pair in self.samples.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.time <= t && t < b.time {
                return a.thrust + (b.thrust - a.thrust) * (t - a.time) / (b.time - a.time);
            }
        }

        if t >= last.time { last.thrust } else { 0.0 }
    }
}

impl TryFrom<Vec<[f64; 2]>> for ThrustCurve {
    type Error = ComponentError;

    fn try_from(value: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::new(value.into_iter().map(ThrustSample::from))
    }
}

impl From<ThrustCurve> for Vec<[f64; 2]> {
    fn from(curve: ThrustCurve) -> Self {
        curve.samples.iter().map(|s| [s.time, s.thrust]).collect()
    }
}
