//! Meadow - a procedural grass meadow under an animated day/night sky

pub mod core;
pub mod terrain;
pub mod grass;
pub mod atmosphere;
pub mod sky;
pub mod particles;
pub mod assets;
pub mod frame;
pub mod render;
pub mod scene;
