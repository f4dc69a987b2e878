//! Asynchronous asset loading.
//!
//! Loads run on a dedicated tokio runtime and report back through a
//! [`PendingAsset`] that the frame loop polls without blocking. A failed
//! load is logged and leaves the caller's fallback in place.

pub mod config;
pub mod font;
pub mod loader;
pub mod texture;

pub use config::AssetConfig;
pub use font::FontData;
pub use loader::{AssetLoader, PendingAsset};
pub use texture::TextureData;
