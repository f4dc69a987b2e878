//! Night-mode state machine.

use super::bundle::validate_pair;
use super::config::AtmosphereConfig;
use super::lerp::{ease_in_out_cubic, transition_boost};
use super::params::AtmosphereParams;
use super::state::{AtmosphereSnapshot, TransitionState};
use crate::core::{Error, Result};

/// Drives every day/night-dependent value from a single progress scalar.
///
/// `progress` chases `target` (0 = day, 1 = night) at a fixed rate. The live
/// parameters are a field-wise lerp between the two endpoint sets, keyed on
/// the eased progress. While moving, a bell-shaped boost speeds up clouds and
/// particles.
pub struct AtmosphereController {
    day: AtmosphereParams,
    night: AtmosphereParams,
    rate: f32,
    epsilon: f32,
    cloud_boost: f32,
    particle_boost: f32,

    progress: f32,
    target: f32,
    eased: f32,
    live: AtmosphereParams,
    cloud_time_offset: f32,
    particle_speed_boost: f32,
}

impl AtmosphereController {
    /// Validate the endpoint bundles and start settled on the saved preference.
    ///
    /// The start-up state is copied from the chosen endpoint, not lerped.
    pub fn new(config: &AtmosphereConfig, night_enabled: bool) -> Result<Self> {
        validate_pair(&config.day, &config.night)?;
        let day = AtmosphereParams::from_bundle(&config.day, "day")?;
        let night = AtmosphereParams::from_bundle(&config.night, "night")?;

        if !(config.transition_rate.is_finite() && config.transition_rate > 0.0) {
            return Err(Error::Config(format!(
                "transition rate must be positive, got {}",
                config.transition_rate
            )));
        }
        if !(config.settle_epsilon >= 0.0 && config.settle_epsilon < 0.5) {
            return Err(Error::Config(format!(
                "settle epsilon must be in [0, 0.5), got {}",
                config.settle_epsilon
            )));
        }

        let start = if night_enabled { 1.0 } else { 0.0 };
        let live = if night_enabled { night.clone() } else { day.clone() };
        log::info!("Atmosphere starting in {} mode", if night_enabled { "night" } else { "day" });

        Ok(Self {
            day,
            night,
            rate: config.transition_rate,
            epsilon: config.settle_epsilon,
            cloud_boost: config.cloud_boost,
            particle_boost: config.particle_boost,
            progress: start,
            target: start,
            eased: start,
            live,
            cloud_time_offset: 0.0,
            particle_speed_boost: 0.0,
        })
    }

    /// Flip the target between day and night. Mid-transition this redirects
    /// the chase from the current progress.
    pub fn request_toggle(&mut self) {
        self.target = 1.0 - self.target;
        log::debug!(
            "Night mode toggled: target {} from progress {:.3}",
            self.target,
            self.progress
        );
    }

    /// Set the target explicitly. Asking for the current target does nothing.
    pub fn set_night(&mut self, night: bool) {
        let target = if night { 1.0 } else { 0.0 };
        if target != self.target {
            self.request_toggle();
        }
    }

    /// Advance the blend by `dt` seconds. Negative or non-finite `dt` is ignored.
    pub fn advance(&mut self, dt: f32) {
        if self.progress == self.target {
            return;
        }
        if (self.progress - self.target).abs() < self.epsilon {
            self.settle();
            return;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let step = self.rate * dt;
        self.progress = if self.target > self.progress {
            (self.progress + step).min(self.target)
        } else {
            (self.progress - step).max(self.target)
        }
        .clamp(0.0, 1.0);

        let curve = transition_boost(self.progress);
        self.cloud_time_offset += dt * self.cloud_boost * curve;
        self.particle_speed_boost = self.particle_boost * curve;

        if (self.progress - self.target).abs() < self.epsilon {
            self.settle();
        } else {
            self.eased = ease_in_out_cubic(self.progress);
            self.live = self.day.lerp(&self.night, self.eased);
        }
    }

    fn settle(&mut self) {
        self.progress = self.target;
        self.eased = self.target;
        self.particle_speed_boost = 0.0;
        self.live = if self.target >= 0.5 { self.night.clone() } else { self.day.clone() };
        log::debug!("Night mode settled at {}", self.target);
    }

    /// Idle at an endpoint, or chasing a target.
    pub fn state(&self) -> TransitionState {
        if self.progress == self.target {
            TransitionState::Idle { night: self.target >= 0.5 }
        } else {
            TransitionState::Transitioning { target: self.target }
        }
    }

    /// Linear blend position, 0 = day, 1 = night.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Endpoint the blend is heading for.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether night is the current target.
    #[inline]
    pub fn is_night(&self) -> bool {
        self.target >= 0.5
    }

    /// Live (interpolated) parameters.
    #[inline]
    pub fn params(&self) -> &AtmosphereParams {
        &self.live
    }

    /// Extra cloud time accumulated during transitions.
    #[inline]
    pub fn cloud_time_offset(&self) -> f32 {
        self.cloud_time_offset
    }

    /// Additive particle speed, zero when idle.
    #[inline]
    pub fn particle_speed_boost(&self) -> f32 {
        self.particle_speed_boost
    }

    /// Freeze the current values for this frame.
    pub fn snapshot(&self) -> AtmosphereSnapshot {
        AtmosphereSnapshot {
            params: self.live.clone(),
            state: self.state(),
            progress: self.progress,
            eased: self.eased,
            star_intensity: self.eased,
            sun_direction: self.live.sun_direction(),
            cloud_time_offset: self.cloud_time_offset,
            particle_speed_boost: self.particle_speed_boost,
        }
    }
}
