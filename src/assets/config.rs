//! Asset locations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Blade colour texture.
    pub blade_diffuse: PathBuf,
    /// Blade silhouette mask; the red channel is the alpha.
    pub blade_alpha: PathBuf,
    /// Typeface for the floating title. Until it loads the title is absent.
    pub title_font: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            blade_diffuse: PathBuf::from("assets/blade_diffuse.jpg"),
            blade_alpha: PathBuf::from("assets/blade_alpha.jpg"),
            title_font: PathBuf::from("assets/fonts/helvetiker_regular.typeface.json"),
        }
    }
}
