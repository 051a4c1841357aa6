//! Entry point for running the viewer as a native window.

use eframe::egui;

use crate::config::ViewConfig;
use crate::loader::DataSource;

use super::LassoPlotApp;

/// Open a native window, load `source` in the background and run the event loop.
///
/// The window is sized to fit both plots side by side. Blocks until the window
/// is closed.
pub fn run_lassoplot<S: DataSource>(config: ViewConfig, source: S) -> eframe::Result<()> {
    let app = LassoPlotApp::with_source(config, source);
    run_app(app)
}

/// Inner window size that fits the toolbar and both plots side by side,
/// including the projection heading.
///
/// Used as the minimum size too: the canvases own the wheel for zooming, so
/// the central panel never scrolls.
pub fn window_size(config: &ViewConfig) -> [f32; 2] {
    let width = config.primary.width + config.projection.dimensions.width + 60.0;
    let height = config.primary.height.max(config.projection.dimensions.height + 40.0) + 80.0;
    [width as f32, height as f32]
}

/// Run an already constructed app (e.g. one created with [`LassoPlotApp::new`]
/// to show an empty view).
pub fn run_app(app: LassoPlotApp) -> eframe::Result<()> {
    let config = app.session.config();
    let title = config.title.clone();
    let size = window_size(config);

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(size)
            .with_min_inner_size(size),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            // Phosphor icon font for the toolbar buttons.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
