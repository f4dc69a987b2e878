//! Typeface JSON for the floating title.

use std::collections::HashMap;

use serde::Deserialize;

use crate::core::{Error, Result};

/// One glyph outline in font units.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Glyph {
    /// Horizontal advance.
    pub ha: f32,
    /// Outline path commands (`m`, `l`, `q`, `b`).
    pub o: String,
}

/// A typeface file as exported for JSON font loaders.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontData {
    #[serde(default)]
    pub family_name: String,
    #[serde(default = "default_resolution")]
    pub resolution: f32,
    pub glyphs: HashMap<String, Glyph>,
}

fn default_resolution() -> f32 {
    1000.0
}

impl FontData {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let font: Self = serde_json::from_slice(bytes)?;
        if font.glyphs.is_empty() {
            return Err(Error::Asset("typeface has no glyphs".to_string()));
        }
        if !(font.resolution > 0.0) {
            return Err(Error::Asset(format!("typeface resolution {} is not positive", font.resolution)));
        }
        Ok(font)
    }

    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        let mut buf = [0; 4];
        self.glyphs.get(&*c.encode_utf8(&mut buf))
    }

    /// Whether every character of `text` has a glyph; whitespace is exempt.
    pub fn covers(&self, text: &str) -> bool {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .all(|c| self.glyph(c).is_some())
    }

    /// Width of `text` at `size` world units per em.
    pub fn advance(&self, text: &str, size: f32) -> f32 {
        let units: f32 = text
            .chars()
            .filter_map(|c| self.glyph(c))
            .map(|g| g.ha)
            .sum();
        units * size / self.resolution
    }
}
