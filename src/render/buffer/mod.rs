//! GPU buffer management

pub mod camera_buffer;
pub mod ground_buffer;

pub use camera_buffer::{CameraBuffer, CameraUniform};
pub use ground_buffer::GroundBuffer;
