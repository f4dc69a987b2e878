//! Controller state and the per-frame snapshot it publishes.

use glam::Vec3;

use super::params::AtmosphereParams;

/// Where the day/night blend currently is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionState {
    /// Settled on an endpoint.
    Idle { night: bool },
    /// Moving towards `target` (0 = day, 1 = night).
    Transitioning { target: f32 },
}

impl TransitionState {
    #[inline]
    pub fn is_transitioning(&self) -> bool {
        matches!(self, TransitionState::Transitioning { .. })
    }
}

/// Immutable view of the atmosphere for one frame.
///
/// Every consumer (sky, terrain, grass, particles, text) reads the same
/// snapshot, so no stage can observe a half-updated blend.
#[derive(Clone, Debug, PartialEq)]
pub struct AtmosphereSnapshot {
    pub params: AtmosphereParams,
    pub state: TransitionState,
    /// Linear progress, 0 = day, 1 = night.
    pub progress: f32,
    /// Eased progress; drives the parameter blend.
    pub eased: f32,
    /// Star field strength; follows the eased progress.
    pub star_intensity: f32,
    /// Direction towards the sun (not normalized).
    pub sun_direction: Vec3,
    /// Extra cloud time accumulated by transitions.
    pub cloud_time_offset: f32,
    /// Transient particle speed bonus during a transition.
    pub particle_speed_boost: f32,
}

impl AtmosphereSnapshot {
    /// Snapshot of a settled endpoint with no accumulated offsets.
    pub fn settled(params: AtmosphereParams, progress: f32) -> Self {
        let night = progress >= 0.5;
        Self {
            sun_direction: params.sun_direction(),
            params,
            state: TransitionState::Idle { night },
            progress,
            eased: progress,
            star_intensity: progress,
            cloud_time_offset: 0.0,
            particle_speed_boost: 0.0,
        }
    }

    /// Particle speed multiplier including the transition boost.
    #[inline]
    pub fn particle_speed(&self) -> f32 {
        self.params.particle_speed + self.particle_speed_boost
    }
}
