use egui::Color32;
use lassoplot::color_scheme::{self, ColorScheme};
use lassoplot::config::{PlotDimensions, ProjectionPlotConfig};
use lassoplot::data::projection::ProjectionResult;
use lassoplot::geometry::LinearScale;
use lassoplot::plot::{
    axis_bottom, axis_left, fitted_scales, lasso_trace, projection_scene, scatter_scene, AxisStyle,
    DrawCommand, HAlign,
};

fn labels_of(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn bottom_axis_has_domain_path_ticks_and_labels() {
    let x = LinearScale::new([0.0, 10.0], [40.0, 780.0]);
    let cmds = axis_bottom(&x, 570.0, &AxisStyle::default());
    // domain path + 11 tick lines + 11 labels
    assert_eq!(cmds.len(), 23);
    let labels = labels_of(&cmds);
    assert_eq!(labels.first().map(String::as_str), Some("0"));
    assert_eq!(labels.last().map(String::as_str), Some("10"));

    let tick_at_five = cmds.iter().any(|c| {
        matches!(c, DrawCommand::Line { from, to, .. }
            if from == &[410.0, 570.0] && to == &[410.0, 576.0])
    });
    assert!(tick_at_five);
}

#[test]
fn left_axis_labels_are_right_aligned_beside_ticks() {
    let y = LinearScale::new([0.0, 1.0], [570.0, 20.0]);
    let cmds = axis_left(&y, 40.0, &AxisStyle::default());
    let labels = labels_of(&cmds);
    assert_eq!(labels.len(), 11);
    assert_eq!(labels[5], "0.5");
    for c in &cmds {
        if let DrawCommand::Text { pos, h_align, .. } = c {
            assert_eq!(*h_align, HAlign::End);
            assert_eq!(pos[0], 31.0);
        }
    }
}

#[test]
fn scatter_scene_draws_one_mark_per_point() {
    let dims = PlotDimensions::primary();
    let positions = vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [10.0, 10.0]];
    let (x, y) = fitted_scales(&dims, positions.iter().copied()).unwrap();
    let scene = scatter_scene(
        &dims,
        &x,
        &y,
        positions.iter().copied(),
        |i| color_scheme::label_color(i as i64),
        3.0,
        &AxisStyle::for_scheme(ColorScheme::Light, 10),
        Color32::WHITE,
    );
    assert_eq!(scene.mark_count(), 4);
    assert_eq!((scene.width, scene.height), (800.0, 600.0));

    let centers: Vec<[f32; 2]> = scene
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(centers[0], [40.0, 570.0]);
    assert_eq!(centers[3], [780.0, 20.0]);
}

#[test]
fn fitted_scales_need_data() {
    let dims = PlotDimensions::primary();
    assert!(fitted_scales(&dims, Vec::<[f64; 2]>::new()).is_none());
}

#[test]
fn lasso_trace_closes_once_it_has_area() {
    assert!(lasso_trace(&[]).is_none());
    match lasso_trace(&[[0.0, 0.0], [5.0, 0.0]]) {
        Some(DrawCommand::Polygon { closed, .. }) => assert!(!closed),
        other => panic!("unexpected trace {other:?}"),
    }
    match lasso_trace(&[[0.0, 0.0], [5.0, 0.0], [5.0, 5.0]]) {
        Some(DrawCommand::Polygon {
            closed,
            fill,
            stroke,
            ..
        }) => {
            assert!(closed);
            assert_eq!(fill, Some(color_scheme::lasso_fill()));
            assert_eq!(
                stroke,
                Some((color_scheme::LASSO_STROKE_WIDTH, color_scheme::LASSO_STROKE))
            );
        }
        other => panic!("unexpected trace {other:?}"),
    }
}

fn projection() -> ProjectionResult {
    ProjectionResult {
        points: vec![[-1.0, 0.5], [0.0, -1.0], [1.0, 0.5]],
        source_indices: vec![2, 5, 7],
        explained_variance: [1.0, 0.75],
    }
}

#[test]
fn projection_points_use_fixed_colour_by_default() {
    let config = ProjectionPlotConfig::default();
    let scene = projection_scene(
        &projection(),
        &config,
        &[0; 8],
        3.0,
        &AxisStyle::default(),
        Color32::WHITE,
    );
    assert_eq!((scene.width, scene.height), (400.0, 400.0));
    assert_eq!(scene.mark_count(), 3);
    for c in &scene.commands {
        if let DrawCommand::Circle { fill, .. } = c {
            assert_eq!(*fill, Color32::from_rgb(0, 0, 255));
        }
    }
}

#[test]
fn projection_points_can_follow_labels() {
    let config = ProjectionPlotConfig {
        color_by_label: true,
        ..Default::default()
    };
    let labels = [0, 0, 3, 0, 0, 4, 0, 12];
    let scene = projection_scene(
        &projection(),
        &config,
        &labels,
        3.0,
        &AxisStyle::default(),
        Color32::WHITE,
    );
    let fills: Vec<Color32> = scene
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Circle { fill, .. } => Some(*fill),
            _ => None,
        })
        .collect();
    assert_eq!(
        fills,
        vec![
            color_scheme::label_color(3),
            color_scheme::label_color(4),
            color_scheme::label_color(2),
        ]
    );
}

#[test]
fn label_colours_wrap_around_the_palette() {
    assert_eq!(color_scheme::label_color(13), color_scheme::CATEGORY10[3]);
    assert_eq!(color_scheme::label_color(-1), color_scheme::CATEGORY10[9]);
}
