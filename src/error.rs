//! Error type shared by the loader, dataset validation, configuration and export.

use thiserror::Error;

/// Errors produced by `lassoplot`.
#[derive(Error, Debug)]
pub enum LassoPlotError {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Embeddings and labels have different lengths under the strict policy.
    #[error("embeddings and labels differ in length ({points} points, {labels} labels)")]
    LengthMismatch { points: usize, labels: usize },

    /// A point has a different number of coordinates than the first one.
    #[error("point {index} has {found} coordinates, expected {expected}")]
    InconsistentDimensions {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// Points must carry at least two coordinates to be plotted.
    #[error("points need at least 2 coordinates, got {found}")]
    TooFewDimensions { found: usize },

    /// A coordinate is NaN or infinite.
    #[error("point {index} contains a non-finite coordinate")]
    NonFinite { index: usize },

    /// Image encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// SVG parsing or rasterisation error
    #[error("svg error: {0}")]
    Svg(String),

    /// HTTP transport error (connection refused, timeout, bad body)
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A data source failed to deliver.
    #[error("data source error: {0}")]
    Source(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias using [`LassoPlotError`].
pub type Result<T> = std::result::Result<T, LassoPlotError>;
