//! Configuration types shared by the session, the renderers and the UI.

use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color_scheme::ColorScheme;
use crate::data::dataset::LengthPolicy;
use crate::error::{LassoPlotError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Plot geometry
// ─────────────────────────────────────────────────────────────────────────────

/// Space reserved around the plotting area for axes, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// Size of one plot region and its margins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotDimensions {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl Default for PlotDimensions {
    fn default() -> Self {
        Self::primary()
    }
}

impl PlotDimensions {
    /// 800×600, the default size of the embedding plot.
    pub fn primary() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margins: Margins::default(),
        }
    }

    /// 400×400, the default size of the projection plot.
    pub fn projection() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
            margins: Margins::default(),
        }
    }

    /// Horizontal pixel range of the plotting area (left to right).
    pub fn x_range(&self) -> [f64; 2] {
        [self.margins.left, self.width - self.margins.right]
    }

    /// Vertical pixel range of the plotting area (bottom to top, screen y grows down).
    pub fn y_range(&self) -> [f64; 2] {
        [self.height - self.margins.bottom, self.margins.top]
    }

    /// The whole plot region `[[0, 0], [width, height]]`.
    pub fn viewport(&self) -> [[f64; 2]; 2] {
        [[0.0, 0.0], [self.width, self.height]]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Interaction limits
// ─────────────────────────────────────────────────────────────────────────────

/// Bounds applied by the zoom/pan controller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    /// Smallest allowed scale factor. Default: `0.5`.
    pub min_scale: f64,
    /// Largest allowed scale factor. Default: `10.0`.
    pub max_scale: f64,
    /// Exponent applied per wheel unit: `factor = 2^(delta * sensitivity)`.
    pub wheel_sensitivity: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 10.0,
            wheel_sensitivity: 0.002,
        }
    }
}

/// Lasso sampling options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LassoConfig {
    /// Pointer samples closer than this (pixels) to the previous vertex are
    /// dropped. `0.0` records every move event.
    pub min_sample_distance: f64,
}

/// Settings for the secondary (projection) plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionPlotConfig {
    pub dimensions: PlotDimensions,
    /// Mark colour as unmultiplied RGBA.
    pub point_color: [u8; 4],
    /// Colour projected points by their class label instead of `point_color`.
    pub color_by_label: bool,
}

impl Default for ProjectionPlotConfig {
    fn default() -> Self {
        Self {
            dimensions: PlotDimensions::projection(),
            point_color: [0, 0, 255, 255],
            color_by_label: false,
        }
    }
}

impl ProjectionPlotConfig {
    pub fn point_color32(&self) -> Color32 {
        let [r, g, b, a] = self.point_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// Where the arrays are read from.
///
/// Each entry is either a file path or an `http://`/`https://` URL; see
/// [`source_from_config`](crate::loader::source_from_config).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// JSON array of coordinate arrays.
    pub embeddings: String,
    /// JSON array of integer class labels.
    pub labels: String,
}

impl DataSourceConfig {
    /// Both entries are URLs.
    pub fn is_remote(&self) -> bool {
        is_url(&self.embeddings) && is_url(&self.labels)
    }
}

pub(crate) fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

// ─────────────────────────────────────────────────────────────────────────────
// ViewConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration of a view session.
///
/// | Field            | Purpose |
/// |------------------|---------|
/// | `primary`        | Size and margins of the embedding plot |
/// | `projection`     | Size, margins and colouring of the PCA plot |
/// | `zoom`           | Scale extent and wheel sensitivity |
/// | `lasso`          | Pointer sampling |
/// | `length_policy`  | What to do when embeddings and labels differ in length |
/// | `data`           | Optional file locations for the standalone binary |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Native window title.
    pub title: String,
    pub primary: PlotDimensions,
    pub projection: ProjectionPlotConfig,
    pub zoom: ZoomLimits,
    pub lasso: LassoConfig,
    /// Radius of every point mark, in pixels.
    pub point_radius: f32,
    /// Approximate number of ticks per axis.
    pub tick_count: usize,
    pub color_scheme: ColorScheme,
    pub length_policy: LengthPolicy,
    pub data: Option<DataSourceConfig>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            title: "LassoPlot".to_string(),
            primary: PlotDimensions::primary(),
            projection: ProjectionPlotConfig::default(),
            zoom: ZoomLimits::default(),
            lasso: LassoConfig::default(),
            point_radius: 3.0,
            tick_count: 10,
            color_scheme: ColorScheme::default(),
            length_policy: LengthPolicy::default(),
            data: None,
        }
    }
}

impl ViewConfig {
    /// Load a configuration from a YAML file. Missing fields take their defaults.
    pub fn load_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let cfg: ViewConfig = serde_yaml::from_str(&s)?;
        cfg.validate()?;
        log::info!("loaded view configuration from {:?}", path);
        Ok(cfg)
    }

    /// Write the configuration as YAML.
    pub fn save_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let s = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), s)?;
        Ok(())
    }

    /// Reject settings the interaction layer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let z = &self.zoom;
        if !(z.min_scale > 0.0 && z.min_scale <= z.max_scale) {
            return Err(LassoPlotError::Config(format!(
                "invalid zoom scale extent [{}, {}]",
                z.min_scale, z.max_scale
            )));
        }
        for (name, dims) in [
            ("primary", &self.primary),
            ("projection", &self.projection.dimensions),
        ] {
            let [x0, x1] = dims.x_range();
            let [y_bottom, y_top] = dims.y_range();
            if x1 <= x0 || y_bottom <= y_top {
                return Err(LassoPlotError::Config(format!(
                    "{name} plot {}x{} leaves no room inside its margins",
                    dims.width, dims.height
                )));
            }
        }
        if self.lasso.min_sample_distance < 0.0 {
            return Err(LassoPlotError::Config(
                "lasso.min_sample_distance must not be negative".to_string(),
            ));
        }
        if let Some(data) = &self.data {
            if is_url(&data.embeddings) != is_url(&data.labels) {
                return Err(LassoPlotError::Config(
                    "data.embeddings and data.labels must both be files or both be URLs".to_string(),
                ));
            }
        }
        Ok(())
    }
}
