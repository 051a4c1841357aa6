//! Standalone application wrapper.
//!
//! [`LassoPlotApp`] owns a [`ViewSession`] and the pending background load and
//! implements [`eframe::App`]: a toolbar on top, the embedding plot and the
//! projection plot side by side below it. The window is never smaller than
//! [`window_size`](super::window_size), so the panel has no scroll area.

use std::time::Duration;

use eframe::egui;
use egui_phosphor::regular::{ARROW_COUNTER_CLOCKWISE, ERASER, FILE_SVG, IMAGE};

use crate::color_scheme::ColorScheme;
use crate::config::ViewConfig;
use crate::data::dataset::Dataset;
use crate::export;
use crate::loader::{DataLoad, DataSource};
use crate::plot::Scene;
use crate::session::{InteractionEvent, LoadStatus, SessionUpdate, ViewSession};

use super::canvas;

/// Which plot a save action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlotKind {
    Primary,
    Projection,
}

impl PlotKind {
    fn file_prefix(self) -> &'static str {
        match self {
            PlotKind::Primary => "embeddings",
            PlotKind::Projection => "projection",
        }
    }
}

pub struct LassoPlotApp {
    pub session: ViewSession,
    load: Option<DataLoad>,
    /// Scale factor for PNG export.
    pub export_scale: f32,
    /// Last export or load message shown in the toolbar.
    status_line: Option<String>,
    color_scheme_applied: bool,
}

impl LassoPlotApp {
    /// App with no data source; stays in the loading state until a dataset is installed.
    pub fn new(config: ViewConfig) -> Self {
        Self {
            session: ViewSession::new(config),
            load: None,
            export_scale: 2.0,
            status_line: None,
            color_scheme_applied: false,
        }
    }

    /// Start loading `source` in the background; the view becomes interactive
    /// once the load finishes.
    pub fn with_source<S: DataSource>(config: ViewConfig, source: S) -> Self {
        let policy = config.length_policy;
        let mut app = Self::new(config);
        app.load = Some(DataLoad::spawn(source, policy));
        app
    }

    pub fn with_dataset(config: ViewConfig, dataset: Dataset) -> Self {
        let mut app = Self::new(config);
        app.session.load_dataset(dataset);
        app
    }

    /// Pick up a finished background load, if any.
    pub fn poll_load(&mut self) {
        let Some(load) = self.load.as_mut() else {
            return;
        };
        if let Some(result) = load.try_take() {
            self.session.apply_load(result);
            self.load = None;
        }
    }

    fn scene(&self, kind: PlotKind) -> Scene {
        match kind {
            PlotKind::Primary => self.session.primary_scene(),
            PlotKind::Projection => self.session.projection_scene(),
        }
    }

    fn save_png_dialog(&mut self, kind: PlotKind) {
        let scene = self.scene(kind);
        let default_name = export::default_file_name(kind.file_prefix(), "png");
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("PNG", &["png"])
            .save_file()
        {
            self.status_line = Some(match export::save_png(&scene, &path, self.export_scale) {
                Ok(()) => format!("Saved {}", path.display()),
                Err(e) => {
                    log::error!("failed to save PNG: {e}");
                    format!("Save failed: {e}")
                }
            });
        }
    }

    fn save_svg_dialog(&mut self, kind: PlotKind) {
        let scene = self.scene(kind);
        let default_name = export::default_file_name(kind.file_prefix(), "svg");
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("SVG", &["svg"])
            .save_file()
        {
            self.status_line = Some(match export::save_svg(&scene, &path) {
                Ok(()) => format!("Saved {}", path.display()),
                Err(e) => {
                    log::error!("failed to save SVG: {e}");
                    format!("Save failed: {e}")
                }
            });
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let interactive = self.session.is_interactive();
            if ui
                .add_enabled(
                    interactive,
                    egui::Button::new(format!("{ARROW_COUNTER_CLOCKWISE} Reset zoom")),
                )
                .clicked()
            {
                self.session.handle(InteractionEvent::ResetZoom);
            }
            if ui
                .add_enabled(
                    interactive && !self.session.selection().is_empty(),
                    egui::Button::new(format!("{ERASER} Clear selection")),
                )
                .clicked()
            {
                self.session.clear_selection();
            }
            ui.separator();
            ui.menu_button(format!("{IMAGE} Save PNG"), |ui| {
                if ui.button("Embedding plot").clicked() {
                    self.save_png_dialog(PlotKind::Primary);
                    ui.close();
                }
                if ui.button("Projection plot").clicked() {
                    self.save_png_dialog(PlotKind::Projection);
                    ui.close();
                }
            });
            ui.menu_button(format!("{FILE_SVG} Save SVG"), |ui| {
                if ui.button("Embedding plot").clicked() {
                    self.save_svg_dialog(PlotKind::Primary);
                    ui.close();
                }
                if ui.button("Projection plot").clicked() {
                    self.save_svg_dialog(PlotKind::Projection);
                    ui.close();
                }
            });
            ui.separator();
            let current = self.session.config().color_scheme;
            let mut picked = current;
            egui::ComboBox::from_id_salt("color_scheme")
                .selected_text(current.label())
                .show_ui(ui, |ui| {
                    for scheme in ColorScheme::all() {
                        ui.selectable_value(&mut picked, *scheme, scheme.label());
                    }
                });
            if picked != current {
                self.session.set_color_scheme(picked);
                picked.apply(ui.ctx());
            }
            ui.separator();
            ui.label(self.status_text());
        });
    }

    fn status_text(&self) -> String {
        if let Some(line) = &self.status_line {
            return line.clone();
        }
        match self.session.status() {
            LoadStatus::Loading => "Loading data…".to_string(),
            LoadStatus::Failed(msg) => format!("Error loading data: {msg}"),
            LoadStatus::Ready => {
                let n = self.session.dataset().map_or(0, Dataset::len);
                let selected = self.session.selection().len();
                let mut text = format!("{n} points, {selected} selected, zoom {:.2}×", self.session.zoom().k);
                if let Some(p) = self.session.projection() {
                    text.push_str(&format!(
                        ", explained variance {:.3} / {:.3}",
                        p.explained_variance[0], p.explained_variance[1]
                    ));
                }
                text
            }
        }
    }
}

impl eframe::App for LassoPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.session.config().color_scheme.apply(ctx);
            self.color_scheme_applied = true;
        }
        self.poll_load();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.toolbar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| {
                    let scene = self.session.primary_scene();
                    let (response, origin) =
                        canvas::show_scene(ui, &scene, egui::Sense::click_and_drag());
                    let events = canvas::primary_events(ui, &response, origin);
                    if !events.is_empty() {
                        // The scene above was painted before these events applied.
                        ui.ctx().request_repaint();
                    }
                    for event in events {
                        if let SessionUpdate::Selected { .. } = self.session.handle(event) {
                            self.status_line = None;
                        }
                    }
                });
                ui.vertical(|ui| {
                    ui.heading("Projection of Selected Points");
                    let scene = self.session.projection_scene();
                    canvas::show_scene(ui, &scene, egui::Sense::hover());
                });
            });
        });

        if self.load.is_some() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
