//! Scene-wide configuration.

pub mod config;

pub use config::SceneConfig;
