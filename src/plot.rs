//! Backend-independent scatter-plot rendering.
//!
//! Renderers here are pure functions from plot state to a [`Scene`]: a list of
//! [`DrawCommand`]s in the pixel space of one plot region. The egui canvas
//! (`app::canvas`) and the SVG/PNG exporter (`export`) both consume the same
//! scenes, so nothing in this module touches a drawing surface.

use egui::Color32;

use crate::color_scheme::{self, ColorScheme};
use crate::config::{PlotDimensions, ProjectionPlotConfig};
use crate::data::projection::ProjectionResult;
use crate::geometry::LinearScale;

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Start,
    Middle,
    End,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// One primitive in plot-region pixel coordinates (origin top-left, y down).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: [f32; 2],
        to: [f32; 2],
        color: Color32,
        width: f32,
    },
    Circle {
        center: [f32; 2],
        radius: f32,
        fill: Color32,
    },
    /// Polyline, or polygon when `closed` is set.
    Polygon {
        points: Vec<[f32; 2]>,
        closed: bool,
        fill: Option<Color32>,
        stroke: Option<(f32, Color32)>,
    },
    Text {
        pos: [f32; 2],
        text: String,
        h_align: HAlign,
        v_align: VAlign,
        color: Color32,
        size: f32,
    },
}

/// Everything needed to draw one plot region from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Color32,
    pub commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn empty(dims: &PlotDimensions, background: Color32) -> Self {
        Self {
            width: dims.width as f32,
            height: dims.height as f32,
            background,
            commands: Vec::new(),
        }
    }

    /// Number of point marks in the scene.
    pub fn mark_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

/// Tick and label geometry shared by both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStyle {
    pub color: Color32,
    pub tick_count: usize,
    pub tick_size: f32,
    pub tick_padding: f32,
    pub font_size: f32,
    pub line_width: f32,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            tick_count: 10,
            tick_size: 6.0,
            tick_padding: 3.0,
            font_size: 10.0,
            line_width: 1.0,
        }
    }
}

impl AxisStyle {
    pub fn for_scheme(scheme: ColorScheme, tick_count: usize) -> Self {
        Self {
            color: scheme.axis_color(),
            tick_count,
            ..Self::default()
        }
    }
}

/// Horizontal axis drawn along `y`, ticks pointing down.
pub fn axis_bottom(scale: &LinearScale, y: f64, style: &AxisStyle) -> Vec<DrawCommand> {
    let y = y as f32;
    let [r0, r1] = scale.range().map(|r| r as f32);
    let mut out = vec![DrawCommand::Polygon {
        points: vec![
            [r0, y + style.tick_size],
            [r0, y],
            [r1, y],
            [r1, y + style.tick_size],
        ],
        closed: false,
        fill: None,
        stroke: Some((style.line_width, style.color)),
    }];
    let format = scale.tick_format(style.tick_count);
    for t in scale.ticks(style.tick_count) {
        let x = scale.apply(t) as f32;
        out.push(DrawCommand::Line {
            from: [x, y],
            to: [x, y + style.tick_size],
            color: style.color,
            width: style.line_width,
        });
        out.push(DrawCommand::Text {
            pos: [x, y + style.tick_size + style.tick_padding],
            text: format.format(t),
            h_align: HAlign::Middle,
            v_align: VAlign::Top,
            color: style.color,
            size: style.font_size,
        });
    }
    out
}

/// Vertical axis drawn along `x`, ticks pointing left.
pub fn axis_left(scale: &LinearScale, x: f64, style: &AxisStyle) -> Vec<DrawCommand> {
    let x = x as f32;
    let [r0, r1] = scale.range().map(|r| r as f32);
    let mut out = vec![DrawCommand::Polygon {
        points: vec![
            [x - style.tick_size, r0],
            [x, r0],
            [x, r1],
            [x - style.tick_size, r1],
        ],
        closed: false,
        fill: None,
        stroke: Some((style.line_width, style.color)),
    }];
    let format = scale.tick_format(style.tick_count);
    for t in scale.ticks(style.tick_count) {
        let y = scale.apply(t) as f32;
        out.push(DrawCommand::Line {
            from: [x - style.tick_size, y],
            to: [x, y],
            color: style.color,
            width: style.line_width,
        });
        out.push(DrawCommand::Text {
            pos: [x - style.tick_size - style.tick_padding, y],
            text: format.format(t),
            h_align: HAlign::End,
            v_align: VAlign::Center,
            color: style.color,
            size: style.font_size,
        });
    }
    out
}

/// One filled circle per data-space position, coloured by index.
pub fn scatter_marks<I, F>(
    positions: I,
    x: &LinearScale,
    y: &LinearScale,
    radius: f32,
    color_of: F,
) -> Vec<DrawCommand>
where
    I: IntoIterator<Item = [f64; 2]>,
    F: Fn(usize) -> Color32,
{
    positions
        .into_iter()
        .enumerate()
        .map(|(i, p)| DrawCommand::Circle {
            center: [x.apply(p[0]) as f32, y.apply(p[1]) as f32],
            radius,
            fill: color_of(i),
        })
        .collect()
}

/// The in-progress lasso: translucent fill plus outline, closed back to the start.
pub fn lasso_trace(path: &[[f64; 2]]) -> Option<DrawCommand> {
    if path.is_empty() {
        return None;
    }
    Some(DrawCommand::Polygon {
        points: path.iter().map(|p| [p[0] as f32, p[1] as f32]).collect(),
        closed: path.len() >= 3,
        fill: Some(color_scheme::lasso_fill()),
        stroke: Some((color_scheme::LASSO_STROKE_WIDTH, color_scheme::LASSO_STROKE)),
    })
}

/// Axes plus marks for one scatter plot.
#[allow(clippy::too_many_arguments)]
pub fn scatter_scene<I, F>(
    dims: &PlotDimensions,
    x: &LinearScale,
    y: &LinearScale,
    positions: I,
    color_of: F,
    radius: f32,
    axis: &AxisStyle,
    background: Color32,
) -> Scene
where
    I: IntoIterator<Item = [f64; 2]>,
    F: Fn(usize) -> Color32,
{
    let mut scene = Scene::empty(dims, background);
    scene
        .commands
        .extend(axis_bottom(x, dims.height - dims.margins.bottom, axis));
    scene
        .commands
        .extend(axis_left(y, dims.margins.left, axis));
    scene
        .commands
        .extend(scatter_marks(positions, x, y, radius, color_of));
    scene
}

/// Scales fitted to the extent of `positions` inside the plotting area of `dims`.
pub fn fitted_scales<I>(dims: &PlotDimensions, positions: I) -> Option<(LinearScale, LinearScale)>
where
    I: IntoIterator<Item = [f64; 2]> + Clone,
{
    let x = LinearScale::from_extent(positions.clone().into_iter().map(|p| p[0]), dims.x_range())?;
    let y = LinearScale::from_extent(positions.into_iter().map(|p| p[1]), dims.y_range())?;
    Some((x, y))
}

/// Full redraw of the projection plot for `result`.
///
/// `labels` holds the class label of every dataset point and is only consulted
/// when the config asks for label colours.
pub fn projection_scene(
    result: &ProjectionResult,
    config: &ProjectionPlotConfig,
    labels: &[i64],
    radius: f32,
    axis: &AxisStyle,
    background: Color32,
) -> Scene {
    let dims = &config.dimensions;
    let Some((x, y)) = fitted_scales(dims, result.points.iter().copied()) else {
        return Scene::empty(dims, background);
    };
    let fixed = config.point_color32();
    let color_of = |i: usize| {
        if !config.color_by_label {
            return fixed;
        }
        result
            .source_indices
            .get(i)
            .and_then(|&src| labels.get(src))
            .map_or(fixed, |&l| color_scheme::label_color(l))
    };
    scatter_scene(
        dims,
        &x,
        &y,
        result.points.iter().copied(),
        color_of,
        radius,
        axis,
        background,
    )
}
