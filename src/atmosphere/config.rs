//! Day/night transition configuration.

use serde::{Deserialize, Serialize};

use super::bundle::ParameterBundle;
use super::params::AtmosphereParams;

/// Transition tuning plus the two endpoint bundles.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConfig {
    /// Progress change per second; a full transition takes `1 / rate` seconds.
    pub transition_rate: f32,
    /// Progress within this distance of the target snaps onto it.
    pub settle_epsilon: f32,
    /// Extra cloud-time seconds per real second at the peak of a transition.
    pub cloud_boost: f32,
    /// Extra particle speed multiplier at the peak of a transition.
    pub particle_boost: f32,
    pub day: ParameterBundle,
    pub night: ParameterBundle,
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            transition_rate: 0.6,
            settle_epsilon: 0.001,
            cloud_boost: 100.0,
            particle_boost: 8.0,
            day: AtmosphereParams::day().to_bundle(),
            night: AtmosphereParams::night().to_bundle(),
        }
    }
}
