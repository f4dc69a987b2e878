//! Day/night atmosphere.
//!
//! [`AtmosphereController`] owns the transition state and publishes an
//! [`AtmosphereSnapshot`] once per frame. Everything that changes with night
//! mode (sky and fog colours, sun position, light intensities, particle
//! colour and speed, grass brightness, exposure, text material colours) is a
//! field of [`AtmosphereParams`] and is blended between the two endpoint sets.

pub mod bundle;
pub mod config;
pub mod controller;
pub mod lerp;
pub mod params;
pub mod state;

// Re-exports
pub use bundle::{ParamKind, ParamValue, ParameterBundle};
pub use config::AtmosphereConfig;
pub use controller::AtmosphereController;
pub use lerp::{ease_in_out_cubic, transition_boost, Lerp};
pub use params::AtmosphereParams;
pub use state::{AtmosphereSnapshot, TransitionState};
