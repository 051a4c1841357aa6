use lassoplot::color_scheme::{self, SELECTED};
use lassoplot::config::{PlotDimensions, ViewConfig};
use lassoplot::data::dataset::{Dataset, LengthPolicy};
use lassoplot::data::zoom::ZoomState;
use lassoplot::error::LassoPlotError;
use lassoplot::plot::DrawCommand;
use lassoplot::session::{InteractionEvent, LoadStatus, SessionUpdate, ViewSession};

fn loaded_session() -> ViewSession {
    let dataset = Dataset::new(
        vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![10.0, 10.0],
        ],
        vec![0, 0, 1, 1],
        LengthPolicy::Strict,
    )
    .unwrap();
    let mut session = ViewSession::new(ViewConfig::default());
    session.load_dataset(dataset);
    session
}

/// Drag a lasso through `vertices` and release.
fn lasso(session: &mut ViewSession, vertices: &[[f64; 2]]) -> SessionUpdate {
    session.handle(InteractionEvent::PointerDown { pos: vertices[0] });
    for v in &vertices[1..] {
        session.handle(InteractionEvent::PointerMove { pos: *v });
    }
    session.handle(InteractionEvent::PointerUp)
}

// Screen positions at identity zoom: (40,570) (114,515) (188,460) (780,20).
const LOWER_LEFT: [[f64; 2]; 4] = [[30.0, 400.0], [250.0, 400.0], [250.0, 580.0], [30.0, 580.0]];
const TOP_RIGHT: [[f64; 2]; 4] = [[700.0, 5.0], [795.0, 5.0], [795.0, 60.0], [700.0, 60.0]];

#[test]
fn lasso_selects_highlights_and_projects() {
    let mut s = loaded_session();
    assert_eq!(
        lasso(&mut s, &LOWER_LEFT),
        SessionUpdate::Selected {
            count: 3,
            projected: true
        }
    );
    assert_eq!(s.selection().indices(), vec![0, 1, 2]);

    let p = s.projection().expect("projection after 3-point selection");
    assert_eq!(p.len(), 3);
    assert!(p.points.iter().all(|q| q[0].is_finite() && q[1].is_finite()));
    let c = p.centroid();
    assert!(c[0].abs() < 1e-9 && c[1].abs() < 1e-9);

    let colors = s.point_colors();
    assert_eq!(&colors[..3], &[SELECTED; 3]);
    assert_eq!(colors[3], color_scheme::label_color(1));
    assert_eq!(s.projection_scene().mark_count(), 3);
}

#[test]
fn events_before_load_are_ignored() {
    let mut s = ViewSession::new(ViewConfig::default());
    assert_eq!(s.status(), &LoadStatus::Loading);
    assert_eq!(
        s.handle(InteractionEvent::PointerDown { pos: [1.0, 1.0] }),
        SessionUpdate::Ignored
    );
    assert_eq!(s.primary_scene().mark_count(), 0);
}

#[test]
fn failed_load_leaves_an_inert_view() {
    let mut s = ViewSession::new(ViewConfig::default());
    s.apply_load(Err(LassoPlotError::Source("connection refused".to_string())));
    assert!(matches!(s.status(), LoadStatus::Failed(msg) if msg.contains("connection refused")));
    assert!(!s.is_interactive());
    assert_eq!(lasso(&mut s, &LOWER_LEFT), SessionUpdate::Ignored);
    assert!(s.selection().is_empty());
    assert!(s.projection().is_none());
    assert_eq!(s.primary_scene().mark_count(), 0);
    assert_eq!(s.projection_scene().mark_count(), 0);
}

#[test]
fn pan_and_zoom_are_ignored_while_lassoing() {
    let mut s = loaded_session();
    s.handle(InteractionEvent::PointerDown { pos: [100.0, 100.0] });
    assert_eq!(
        s.handle(InteractionEvent::Wheel {
            delta: 500.0,
            anchor: [400.0, 300.0]
        }),
        SessionUpdate::Ignored
    );
    assert_eq!(
        s.handle(InteractionEvent::Pan { delta: [10.0, 0.0] }),
        SessionUpdate::Ignored
    );
    assert_eq!(s.zoom(), ZoomState::IDENTITY);
    assert!(s.is_lassoing());
}

#[test]
fn live_lasso_is_drawn_on_the_primary_plot() {
    let mut s = loaded_session();
    s.handle(InteractionEvent::PointerDown { pos: [10.0, 10.0] });
    s.handle(InteractionEvent::PointerMove { pos: [60.0, 10.0] });
    s.handle(InteractionEvent::PointerMove { pos: [60.0, 60.0] });
    let scene = s.primary_scene();
    let trace = scene.commands.iter().find(|c| {
        matches!(
            c,
            DrawCommand::Polygon {
                fill: Some(_),
                closed: true,
                ..
            }
        )
    });
    assert!(trace.is_some());
    assert_eq!(scene.mark_count(), 4);

    assert_eq!(
        s.handle(InteractionEvent::PointerCancel),
        SessionUpdate::LassoCancelled
    );
    assert!(s.lasso_path().is_empty());
    assert!(s.selection().is_empty());
}

#[test]
fn zoom_does_not_touch_selection_or_projection() {
    let mut s = loaded_session();
    lasso(&mut s, &LOWER_LEFT);
    let selection = s.selection().clone();
    let projection = s.projection().cloned();

    assert_eq!(
        s.handle(InteractionEvent::Wheel {
            delta: 300.0,
            anchor: [400.0, 300.0]
        }),
        SessionUpdate::ZoomChanged
    );
    s.handle(InteractionEvent::Pan { delta: [-30.0, 15.0] });
    assert_eq!(s.selection(), &selection);
    assert_eq!(s.projection().cloned(), projection);

    s.set_primary_dimensions(PlotDimensions {
        width: 1000.0,
        height: 700.0,
        ..PlotDimensions::primary()
    });
    assert_eq!(s.selection(), &selection);
    assert_eq!(s.projection().cloned(), projection);
}

#[test]
fn selection_respects_current_zoom() {
    let mut s = loaded_session();
    assert_eq!(
        s.handle(InteractionEvent::Zoom {
            factor: 2.0,
            anchor: [40.0, 570.0]
        }),
        SessionUpdate::ZoomChanged
    );
    assert_eq!(s.zoom(), ZoomState::new(2.0, -40.0, -570.0));
    lasso(&mut s, &LOWER_LEFT);
    assert_eq!(s.selection().indices(), vec![0, 1]);

    let (x, _) = s.effective_scales().unwrap();
    assert!((x.apply(1.0) - 188.0).abs() < 1e-9);
}

#[test]
fn single_point_selection_keeps_previous_projection() {
    let mut s = loaded_session();
    lasso(&mut s, &LOWER_LEFT);
    let before = s.projection().cloned();

    assert_eq!(
        lasso(&mut s, &TOP_RIGHT),
        SessionUpdate::Selected {
            count: 1,
            projected: false
        }
    );
    assert_eq!(s.selection().indices(), vec![3]);
    assert_eq!(s.projection().cloned(), before);
    assert_eq!(s.point_colors()[3], SELECTED);
    assert_eq!(s.point_colors()[0], color_scheme::label_color(0));
}

#[test]
fn click_clears_highlight_but_not_projection() {
    let mut s = loaded_session();
    lasso(&mut s, &LOWER_LEFT);
    assert_eq!(
        lasso(&mut s, &[[500.0, 300.0]]),
        SessionUpdate::Selected {
            count: 0,
            projected: false
        }
    );
    assert!(s.selection().is_empty());
    assert!(s.projection().is_some());
    assert!(s.point_colors().iter().all(|c| *c != SELECTED));
}

#[test]
fn clear_selection_forgets_projection() {
    let mut s = loaded_session();
    lasso(&mut s, &LOWER_LEFT);
    s.clear_selection();
    assert!(s.selection().is_empty());
    assert!(s.projection().is_none());
    assert_eq!(s.projection_scene().mark_count(), 0);
}

#[test]
fn reset_zoom_restores_identity() {
    let mut s = loaded_session();
    s.handle(InteractionEvent::Zoom {
        factor: 3.0,
        anchor: [200.0, 200.0],
    });
    assert_ne!(s.zoom(), ZoomState::IDENTITY);
    assert_eq!(
        s.handle(InteractionEvent::ResetZoom),
        SessionUpdate::ZoomChanged
    );
    assert_eq!(s.zoom(), ZoomState::IDENTITY);
}
