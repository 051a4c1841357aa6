//! egui backend for [`Scene`]s and pointer-to-[`InteractionEvent`] translation.

use eframe::egui::{self, Align, Align2, FontId, Painter, Pos2, Response, Sense, Shape, Stroke, Ui};

use crate::plot::{DrawCommand, HAlign, Scene, VAlign};
use crate::session::InteractionEvent;

/// Pan step for arrow keys, in pixels.
const KEY_PAN_STEP: f64 = 20.0;

/// Allocate a region of the scene's size and paint the scene into it.
///
/// Returns the response (for input handling) and the top-left corner of the
/// region, which is the origin of the scene's coordinate system.
pub fn show_scene(ui: &mut Ui, scene: &Scene, sense: Sense) -> (Response, Pos2) {
    let (response, painter) =
        ui.allocate_painter(egui::vec2(scene.width, scene.height), sense);
    let origin = response.rect.min;
    paint_scene(&painter, scene, origin);
    (response, origin)
}

pub fn paint_scene(painter: &Painter, scene: &Scene, origin: Pos2) {
    let at = |p: [f32; 2]| Pos2::new(origin.x + p[0], origin.y + p[1]);
    painter.rect_filled(
        egui::Rect::from_min_size(origin, egui::vec2(scene.width, scene.height)),
        0.0,
        scene.background,
    );
    for cmd in &scene.commands {
        match cmd {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                painter.line_segment([at(*from), at(*to)], Stroke::new(*width, *color));
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
            } => {
                painter.circle_filled(at(*center), *radius, *fill);
            }
            DrawCommand::Polygon {
                points,
                closed,
                fill: _,
                stroke,
            } => {
                // egui only fills convex paths, so lasso traces are drawn as outlines here.
                let Some((width, color)) = stroke else {
                    continue;
                };
                let pts: Vec<Pos2> = points.iter().map(|p| at(*p)).collect();
                let stroke = Stroke::new(*width, *color);
                if *closed {
                    painter.add(Shape::closed_line(pts, stroke));
                } else {
                    painter.add(Shape::line(pts, stroke));
                }
            }
            DrawCommand::Text {
                pos,
                text,
                h_align,
                v_align,
                color,
                size,
            } => {
                let anchor = Align2([h(*h_align), v(*v_align)]);
                painter.text(at(*pos), anchor, text, FontId::proportional(*size), *color);
            }
        }
    }
}

fn h(a: HAlign) -> Align {
    match a {
        HAlign::Start => Align::Min,
        HAlign::Middle => Align::Center,
        HAlign::End => Align::Max,
    }
}

fn v(a: VAlign) -> Align {
    match a {
        VAlign::Top => Align::Min,
        VAlign::Center => Align::Center,
        VAlign::Bottom => Align::Max,
    }
}

fn local(p: Pos2, origin: Pos2) -> [f64; 2] {
    [(p.x - origin.x) as f64, (p.y - origin.y) as f64]
}

/// One frame of canvas input, in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasInput {
    /// Press position of a primary drag that started this frame.
    pub drag_start: Option<[f64; 2]>,
    /// Pointer position while the primary button is dragging.
    pub drag_pos: Option<[f64; 2]>,
    pub drag_stopped: bool,
    /// Position of a primary click (press and release without drag).
    pub click: Option<[f64; 2]>,
    /// Secondary double click or the Home key.
    pub reset: bool,
    /// Secondary/middle drag movement plus arrow-key steps.
    pub pan: Vec<[f64; 2]>,
    pub hover: Option<[f64; 2]>,
    /// Raw vertical wheel delta.
    pub scroll: f64,
    /// Multiplicative zoom from pinch or ctrl/cmd + wheel.
    pub zoom_factor: f64,
    /// Ctrl (cmd on macOS) held: egui already turned the wheel into `zoom_factor`.
    pub command_held: bool,
    pub escape: bool,
}

impl Default for CanvasInput {
    fn default() -> Self {
        Self {
            drag_start: None,
            drag_pos: None,
            drag_stopped: false,
            click: None,
            reset: false,
            pan: Vec::new(),
            hover: None,
            scroll: 0.0,
            zoom_factor: 1.0,
            command_held: false,
            escape: false,
        }
    }
}

impl CanvasInput {
    /// Read this frame's input for the primary canvas at `origin`.
    pub fn capture(ui: &Ui, response: &Response, origin: Pos2) -> Self {
        let primary = egui::PointerButton::Primary;
        let mut input = Self::default();

        if response.drag_started_by(primary) {
            input.drag_start = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos())
                .map(|p| local(p, origin));
        }
        if response.dragged_by(primary) {
            input.drag_pos = response.interact_pointer_pos().map(|p| local(p, origin));
        }
        input.drag_stopped = response.drag_stopped_by(primary);
        if response.clicked_by(primary) {
            input.click = response.interact_pointer_pos().map(|p| local(p, origin));
        }

        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            let d = response.drag_delta();
            if d != egui::Vec2::ZERO {
                input.pan.push([d.x as f64, d.y as f64]);
            }
        }

        let hovered = response.hovered() || response.has_focus();
        input.reset = response.double_clicked_by(egui::PointerButton::Secondary)
            || (hovered && ui.input(|i| i.key_pressed(egui::Key::Home)));
        if hovered {
            ui.input(|i| {
                for (key, delta) in [
                    (egui::Key::ArrowLeft, [KEY_PAN_STEP, 0.0]),
                    (egui::Key::ArrowRight, [-KEY_PAN_STEP, 0.0]),
                    (egui::Key::ArrowUp, [0.0, KEY_PAN_STEP]),
                    (egui::Key::ArrowDown, [0.0, -KEY_PAN_STEP]),
                ] {
                    if i.key_pressed(key) {
                        input.pan.push(delta);
                    }
                }
            });
        }

        input.hover = response.hover_pos().map(|p| local(p, origin));
        ui.input(|i| {
            input.scroll = i.raw_scroll_delta.y as f64;
            input.zoom_factor = i.zoom_delta() as f64;
            input.command_held = i.modifiers.command;
            input.escape = i.key_pressed(egui::Key::Escape);
        });
        input
    }
}

/// Translate one frame of input into session events.
///
/// Primary button: lasso (a plain click is a lasso with a single vertex, which
/// clears the highlight). Secondary/middle drag and arrow keys: pan. Wheel and
/// pinch: zoom around the pointer. Secondary double click or Home: reset zoom.
/// Escape: cancel lasso.
pub fn translate_input(input: &CanvasInput) -> Vec<InteractionEvent> {
    let mut events = Vec::new();

    if let Some(pos) = input.drag_start {
        events.push(InteractionEvent::PointerDown { pos });
    }
    if let Some(pos) = input.drag_pos {
        events.push(InteractionEvent::PointerMove { pos });
    }
    if input.drag_stopped {
        events.push(InteractionEvent::PointerUp);
    }
    if let Some(pos) = input.click {
        events.push(InteractionEvent::PointerDown { pos });
        events.push(InteractionEvent::PointerUp);
    }
    if input.reset {
        events.push(InteractionEvent::ResetZoom);
    }
    for delta in &input.pan {
        events.push(InteractionEvent::Pan { delta: *delta });
    }

    if let Some(anchor) = input.hover {
        // With ctrl/cmd held the wheel is already folded into zoom_factor.
        if input.scroll != 0.0 && !input.command_held {
            events.push(InteractionEvent::Wheel {
                delta: input.scroll,
                anchor,
            });
        }
        if input.zoom_factor != 1.0 {
            events.push(InteractionEvent::Zoom {
                factor: input.zoom_factor,
                anchor,
            });
        }
    }

    if input.escape {
        events.push(InteractionEvent::PointerCancel);
    }
    events
}

/// Translate this frame's input on the primary canvas into session events.
pub fn primary_events(ui: &Ui, response: &Response, origin: Pos2) -> Vec<InteractionEvent> {
    translate_input(&CanvasInput::capture(ui, response, origin))
}
