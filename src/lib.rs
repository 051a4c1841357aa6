//! LassoPlot crate root: re-exports and module wiring.
//!
//! An interactive 2-D scatter view of an embedding dataset. Points are coloured
//! by class label; a freehand lasso on the (zoomable, pannable) embedding plot
//! selects points, and the full-dimensional vectors of the selection are
//! reduced to two principal components and drawn in a second plot.
//!
//! Modules:
//! - `geometry`: point-in-polygon test and d3-style linear scales with ticks
//! - `data`: dataset validation, lasso capture, zoom state, selection, PCA projection
//! - `plot`: backend-neutral draw-command scenes for both plots
//! - `session`: [`ViewSession`], the state machine tying the pieces together
//! - `loader`: data sources and the one-shot background load
//! - `export`: SVG/PNG rendering of scenes
//! - `app`: egui/eframe front end and [`run_lassoplot`]
//! - `config`, `color_scheme`, `error`: shared settings, palettes and the error type

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod geometry;
pub mod loader;
pub mod plot;
pub mod session;

// Public re-exports for a compact external API
pub use app::{run_app, run_lassoplot, LassoPlotApp};
pub use config::{DataSourceConfig, PlotDimensions, ViewConfig, ZoomLimits};
pub use data::dataset::{Dataset, LengthPolicy};
pub use data::lasso::{LassoCapture, LassoPath};
pub use data::projection::{project, ProjectionResult};
pub use data::selection::{select, SelectedPoint, Selection};
pub use data::zoom::{ZoomController, ZoomState};
pub use error::{LassoPlotError, Result};
pub use geometry::{point_in_polygon, LinearScale};
pub use loader::{DataLoad, DataSource, HttpSource, JsonFileSource, StaticSource};
pub use plot::{DrawCommand, Scene};
pub use session::{InteractionEvent, LoadStatus, SessionUpdate, ViewSession};
