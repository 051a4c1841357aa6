use std::time::Duration;

use lassoplot::{LassoPlotApp, LoadStatus, StaticSource, ViewConfig};

#[test]
fn app_picks_up_background_load() {
    let source = StaticSource::new(vec![vec![0.0, 0.0], vec![1.0, 2.0]], vec![0, 1]);
    let mut app = LassoPlotApp::with_source(ViewConfig::default(), source);
    for _ in 0..500 {
        app.poll_load();
        if app.session.status() != &LoadStatus::Loading {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(app.session.status(), &LoadStatus::Ready);
    assert!(app.session.is_interactive());
    assert_eq!(app.session.primary_scene().mark_count(), 2);
}

#[test]
fn app_reports_invalid_data_as_failed_load() {
    let source = StaticSource::new(vec![vec![0.0, 0.0]], vec![0, 1]);
    let mut app = LassoPlotApp::with_source(ViewConfig::default(), source);
    for _ in 0..500 {
        app.poll_load();
        if app.session.status() != &LoadStatus::Loading {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(matches!(app.session.status(), LoadStatus::Failed(_)));
    assert!(!app.session.is_interactive());
}

#[test]
fn window_fits_both_plots_without_scrolling() {
    let mut config = ViewConfig::default();
    let [w, h] = lassoplot::app::window_size(&config);
    assert!(w >= 800.0 + 400.0);
    assert!(h >= 600.0);

    // A tall projection plot drives the height, heading included.
    config.projection.dimensions.height = 900.0;
    let [w2, h2] = lassoplot::app::window_size(&config);
    assert_eq!(w2, w);
    assert!(h2 >= 900.0 + 40.0);
}
