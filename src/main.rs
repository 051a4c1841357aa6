//! Standalone viewer.
//!
//! Usage: `lassoplot [config.yaml]`. The configuration's `data` section names
//! the embeddings and labels arrays, as JSON files or `http(s)://` URLs;
//! `RUST_LOG` controls log output.

use lassoplot::loader::source_from_config;
use lassoplot::{run_app, run_lassoplot, LassoPlotApp, LassoPlotError, ViewConfig};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ViewConfig::load_yaml(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("cannot read configuration {path}: {e}");
                ViewConfig::default()
            }
        },
        None => ViewConfig::default(),
    };

    let source = match &config.data {
        Some(data) => source_from_config(data),
        None => Err(LassoPlotError::Source("no data source configured".to_string())),
    };
    match source {
        Ok(source) => run_lassoplot(config, source),
        Err(e) => {
            let mut app = LassoPlotApp::new(config);
            app.session.load_failed(&e);
            run_app(app)
        }
    }
}
