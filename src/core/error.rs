//! Error types for the meadow renderer

use thiserror::Error;

/// Main error type for the renderer
#[derive(Debug, Error)]
pub enum Error {
    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Day and night bundles do not name the same set of fields.
    #[error("parameter bundles differ: missing in day {missing_in_day:?}, missing in night {missing_in_night:?}")]
    BundleMismatch {
        missing_in_day: Vec<String>,
        missing_in_night: Vec<String>,
    },

    /// A field holds a scalar in one bundle and a vector in the other.
    #[error("parameter `{field}` has kind {day} in day bundle but {night} in night bundle")]
    ParameterKind {
        field: String,
        day: &'static str,
        night: &'static str,
    },

    #[error("unknown atmosphere parameter `{0}`")]
    UnknownParameter(String),

    #[error("atmosphere parameter `{field}` missing from {bundle} bundle")]
    MissingParameter { bundle: String, field: String },
}
