//! The view session: all mutable state of one loaded dataset.
//!
//! [`ViewSession`] owns the zoom controller, the lasso capture, the latest
//! selection and projection, and the per-point colour map. Input arrives as
//! [`InteractionEvent`]s and the two plots are read back as [`Scene`]s, so the
//! whole select → project → render cycle can run without any UI.
//!
//! Interaction policy: the primary pointer drives the lasso. Pan and zoom come
//! from separate events (secondary-button drag, wheel, pinch, keys) and are
//! ignored while a lasso gesture is in progress; a pan never starts a lasso.

use egui::Color32;

use crate::color_scheme::{self, ColorScheme};
use crate::config::{PlotDimensions, ViewConfig};
use crate::data::dataset::Dataset;
use crate::data::lasso::LassoCapture;
use crate::data::projection::{project, ProjectionResult};
use crate::data::selection::{select, Selection};
use crate::data::zoom::{ZoomController, ZoomState};
use crate::error::{LassoPlotError, Result};
use crate::geometry::LinearScale;
use crate::plot::{self, AxisStyle, Scene};

/// Lifecycle of the one-shot dataset load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Input to the session, in primary-plot pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    PointerDown { pos: [f64; 2] },
    PointerMove { pos: [f64; 2] },
    PointerUp,
    /// Abandon the current lasso (Escape, focus loss).
    PointerCancel,
    Pan { delta: [f64; 2] },
    Zoom { factor: f64, anchor: [f64; 2] },
    Wheel { delta: f64, anchor: [f64; 2] },
    ResetZoom,
}

/// What an event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Accepted but nothing changed.
    Unchanged,
    /// Rejected by the interaction policy or because no data is loaded.
    Ignored,
    LassoStarted,
    LassoExtended,
    LassoCancelled,
    /// A lasso completed; `projected` tells whether a new projection replaced the old one.
    Selected { count: usize, projected: bool },
    ZoomChanged,
}

pub struct ViewSession {
    config: ViewConfig,
    status: LoadStatus,
    dataset: Option<Dataset>,
    base_scales: Option<(LinearScale, LinearScale)>,
    zoom: ZoomController,
    lasso: LassoCapture,
    selection: Selection,
    projection: Option<ProjectionResult>,
    point_colors: Vec<Color32>,
}

impl ViewSession {
    pub fn new(config: ViewConfig) -> Self {
        let zoom = ZoomController::new(config.primary.viewport(), config.zoom);
        let lasso = LassoCapture::new().with_min_sample_distance(config.lasso.min_sample_distance);
        Self {
            config,
            status: LoadStatus::Loading,
            dataset: None,
            base_scales: None,
            zoom,
            lasso,
            selection: Selection::default(),
            projection: None,
            point_colors: Vec::new(),
        }
    }

    /// Install a freshly loaded dataset, discarding all interaction state.
    pub fn load_dataset(&mut self, dataset: Dataset) {
        self.base_scales = plot::fitted_scales(&self.config.primary, dataset.positions());
        if self.base_scales.is_none() {
            log::warn!("dataset is empty; nothing to plot");
        }
        log::info!(
            "loaded {} points of dimension {}",
            dataset.len(),
            dataset.dims()
        );
        self.zoom.reset();
        self.lasso.cancel();
        self.selection = Selection::default();
        self.projection = None;
        self.dataset = Some(dataset);
        self.rebuild_colors();
        self.status = LoadStatus::Ready;
    }

    /// Record a failed load. The view stays empty and inert.
    pub fn load_failed(&mut self, err: &LassoPlotError) {
        log::error!("error loading data: {err}");
        self.dataset = None;
        self.base_scales = None;
        self.lasso.cancel();
        self.selection = Selection::default();
        self.projection = None;
        self.point_colors.clear();
        self.status = LoadStatus::Failed(err.to_string());
    }

    /// Apply the outcome of a [`DataLoad`](crate::loader::DataLoad).
    pub fn apply_load(&mut self, result: Result<Dataset>) {
        match result {
            Ok(dataset) => self.load_dataset(dataset),
            Err(e) => self.load_failed(&e),
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// `true` once data is loaded and there is something to interact with.
    pub fn is_interactive(&self) -> bool {
        self.status == LoadStatus::Ready && self.base_scales.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn projection(&self) -> Option<&ProjectionResult> {
        self.projection.as_ref()
    }

    pub fn zoom(&self) -> ZoomState {
        self.zoom.state()
    }

    pub fn is_lassoing(&self) -> bool {
        self.lasso.is_dragging()
    }

    pub fn lasso_path(&self) -> &[[f64; 2]] {
        self.lasso.path()
    }

    /// Display colour of every point, indexed like the dataset.
    pub fn point_colors(&self) -> &[Color32] {
        &self.point_colors
    }

    /// Scales fitted to the data extent, before zoom.
    pub fn base_scales(&self) -> Option<(LinearScale, LinearScale)> {
        self.base_scales
    }

    /// Base scales composed with the live zoom state.
    pub fn effective_scales(&self) -> Option<(LinearScale, LinearScale)> {
        let (x, y) = self.base_scales?;
        let z = self.zoom.state();
        Some((z.rescale_x(&x), z.rescale_y(&y)))
    }

    /// Resize the primary plot. Scales are refitted and the zoom state is kept
    /// (re-constrained to the new world rectangle); selection and projection are
    /// left untouched.
    pub fn set_primary_dimensions(&mut self, dims: PlotDimensions) {
        let previous = self.zoom.state();
        self.config.primary = dims;
        self.zoom = ZoomController::new(dims.viewport(), self.config.zoom);
        self.zoom.set_state(previous);
        self.base_scales = self
            .dataset
            .as_ref()
            .and_then(|d| plot::fitted_scales(&dims, d.positions()));
    }

    /// Switch the chrome colours; data colours are unaffected.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.config.color_scheme = scheme;
    }

    /// Forget the current selection and projection.
    pub fn clear_selection(&mut self) {
        self.selection = Selection::default();
        self.projection = None;
        self.rebuild_colors();
    }

    pub fn handle(&mut self, event: InteractionEvent) -> SessionUpdate {
        if !self.is_interactive() {
            return SessionUpdate::Ignored;
        }
        match event {
            InteractionEvent::PointerDown { pos } => {
                self.lasso.pointer_down(pos);
                SessionUpdate::LassoStarted
            }
            InteractionEvent::PointerMove { pos } => {
                if self.lasso.pointer_move(pos) {
                    SessionUpdate::LassoExtended
                } else {
                    SessionUpdate::Unchanged
                }
            }
            InteractionEvent::PointerUp => self.finish_lasso(),
            InteractionEvent::PointerCancel => {
                if self.lasso.is_dragging() {
                    self.lasso.cancel();
                    SessionUpdate::LassoCancelled
                } else {
                    SessionUpdate::Unchanged
                }
            }
            _ if self.lasso.is_dragging() => SessionUpdate::Ignored,
            InteractionEvent::Pan { delta } => zoom_update(self.zoom.translate_by(delta[0], delta[1])),
            InteractionEvent::Zoom { factor, anchor } => zoom_update(self.zoom.scale_by(factor, anchor)),
            InteractionEvent::Wheel { delta, anchor } => zoom_update(self.zoom.wheel(delta, anchor)),
            InteractionEvent::ResetZoom => zoom_update(self.zoom.reset()),
        }
    }

    fn finish_lasso(&mut self) -> SessionUpdate {
        let Some(path) = self.lasso.pointer_up() else {
            return SessionUpdate::Unchanged;
        };
        let (Some(dataset), Some((x, y))) = (self.dataset.as_ref(), self.effective_scales()) else {
            return SessionUpdate::Ignored;
        };
        self.selection = select(path.vertices(), dataset.points(), &x, &y);
        log::info!(
            "lasso with {} vertices selected {} of {} points",
            path.len(),
            self.selection.len(),
            dataset.len()
        );
        self.rebuild_colors();

        let mut projected = false;
        if self.selection.len() > 1 {
            if let Some(result) = project(&self.selection) {
                log::info!(
                    "projection of {} points, explained variance {:.4} / {:.4}",
                    result.len(),
                    result.explained_variance[0],
                    result.explained_variance[1]
                );
                self.projection = Some(result);
                projected = true;
            }
        }
        SessionUpdate::Selected {
            count: self.selection.len(),
            projected,
        }
    }

    fn rebuild_colors(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.point_colors.clear();
            return;
        };
        let mut selected = self.selection.iter().map(|s| s.index).peekable();
        self.point_colors = dataset
            .labels()
            .iter()
            .enumerate()
            .map(|(i, &label)| {
                if selected.next_if_eq(&i).is_some() {
                    color_scheme::SELECTED
                } else {
                    color_scheme::label_color(label)
                }
            })
            .collect();
    }

    fn axis_style(&self) -> AxisStyle {
        AxisStyle::for_scheme(self.config.color_scheme, self.config.tick_count)
    }

    /// Primary plot: zoomed axes, coloured points and the live lasso trace.
    pub fn primary_scene(&self) -> Scene {
        let dims = &self.config.primary;
        let background = self.config.color_scheme.background();
        let (Some(dataset), Some((x, y))) = (self.dataset.as_ref(), self.effective_scales()) else {
            return Scene::empty(dims, background);
        };
        let colors = &self.point_colors;
        let mut scene = plot::scatter_scene(
            dims,
            &x,
            &y,
            dataset.positions(),
            |i| colors.get(i).copied().unwrap_or(color_scheme::CATEGORY10[0]),
            self.config.point_radius,
            &self.axis_style(),
            background,
        );
        if let Some(trace) = plot::lasso_trace(self.lasso.path()) {
            scene.commands.push(trace);
        }
        scene
    }

    /// Projection plot, redrawn from scratch; empty until a projection exists.
    pub fn projection_scene(&self) -> Scene {
        let background = self.config.color_scheme.background();
        match (&self.projection, &self.dataset) {
            (Some(result), Some(dataset)) => plot::projection_scene(
                result,
                &self.config.projection,
                dataset.labels(),
                self.config.point_radius,
                &self.axis_style(),
                background,
            ),
            _ => Scene::empty(&self.config.projection.dimensions, background),
        }
    }
}

fn zoom_update(changed: bool) -> SessionUpdate {
    if changed {
        SessionUpdate::ZoomChanged
    } else {
        SessionUpdate::Unchanged
    }
}
