//! Scene export: SVG serialisation and PNG rasterisation.
//!
//! Scenes are written as plain SVG (circles, polylines and text with d3-style
//! anchors) and rendered to pixels with `usvg` + `resvg` into a `tiny_skia`
//! pixmap, which is then saved through the `image` crate.

use std::fmt;
use std::fs;
use std::path::Path;

use egui::Color32;
use image::{Rgba, RgbaImage};

use crate::error::{LassoPlotError, Result};
use crate::plot::{DrawCommand, HAlign, Scene, VAlign};

/// Serialise a scene into a standalone SVG document.
pub fn scene_to_svg(scene: &Scene) -> String {
    SvgDocument(scene).to_string()
}

/// [`Scene`] viewed as an SVG document; `Display` writes the markup.
pub struct SvgDocument<'a>(pub &'a Scene);

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = scene.width,
            h = scene.height
        )?;
        let (bg, bg_alpha) = paint(scene.background);
        writeln!(
            f,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{bg}" fill-opacity="{bg_alpha}"/>"#,
            scene.width, scene.height
        )?;
        for cmd in &scene.commands {
            write_command(f, cmd)?;
        }
        writeln!(f, "</svg>")
    }
}

fn write_command(f: &mut fmt::Formatter<'_>, cmd: &DrawCommand) -> fmt::Result {
    match cmd {
        DrawCommand::Line {
            from,
            to,
            color,
            width,
        } => {
            let (c, a) = paint(*color);
            writeln!(
                f,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{c}" stroke-opacity="{a}" stroke-width="{width}"/>"#,
                from[0], from[1], to[0], to[1]
            )
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
        } => {
            let (c, a) = paint(*fill);
            writeln!(
                f,
                r#"<circle cx="{}" cy="{}" r="{radius}" fill="{c}" fill-opacity="{a}"/>"#,
                center[0], center[1]
            )
        }
        DrawCommand::Polygon {
            points,
            closed,
            fill,
            stroke,
        } => {
            let tag = if *closed { "polygon" } else { "polyline" };
            let coords = points
                .iter()
                .map(|p| format!("{},{}", p[0], p[1]))
                .collect::<Vec<_>>()
                .join(" ");
            let fill_attr = match fill {
                Some(fill) => {
                    let (c, a) = paint(*fill);
                    format!(r#"fill="{c}" fill-opacity="{a}""#)
                }
                None => r#"fill="none""#.to_string(),
            };
            let stroke_attr = match stroke {
                Some((w, s)) => {
                    let (c, a) = paint(*s);
                    format!(r#" stroke="{c}" stroke-opacity="{a}" stroke-width="{w}""#)
                }
                None => String::new(),
            };
            writeln!(f, r#"<{tag} points="{coords}" {fill_attr}{stroke_attr}/>"#)
        }
        DrawCommand::Text {
            pos,
            text,
            h_align,
            v_align,
            color,
            size,
        } => {
            let anchor = match h_align {
                HAlign::Start => "start",
                HAlign::Middle => "middle",
                HAlign::End => "end",
            };
            let dy = match v_align {
                VAlign::Top => "0.71em",
                VAlign::Center => "0.32em",
                VAlign::Bottom => "0",
            };
            let (c, a) = paint(*color);
            writeln!(
                f,
                r#"<text x="{}" y="{}" dy="{dy}" text-anchor="{anchor}" font-family="sans-serif" font-size="{size}" fill="{c}" fill-opacity="{a}">{}</text>"#,
                pos[0],
                pos[1],
                escape(text)
            )
        }
    }
}

fn paint(color: Color32) -> (String, f32) {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    (format!("rgb({r},{g},{b})"), a as f32 / 255.0)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render a scene to a pixmap; `scale` multiplies the scene size (1.0 = 1 px per unit).
pub fn rasterize(scene: &Scene, scale: f32) -> Result<tiny_skia::Pixmap> {
    let svg = scene_to_svg(scene);
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &opt).map_err(|e| LassoPlotError::Svg(e.to_string()))?;

    let width = (scene.width * scale).ceil() as u32;
    let height = (scene.height * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        LassoPlotError::Svg(format!("cannot allocate a {width}x{height} pixmap"))
    })?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut canvas);
    Ok(pixmap)
}

/// Un-premultiply a pixmap into an `image` buffer.
pub fn pixmap_to_image(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut out = RgbaImage::new(width, pixmap.height());
    for (i, px) in pixmap.pixels().iter().enumerate() {
        let c = px.demultiply();
        let (x, y) = (i as u32 % width, i as u32 / width);
        out.put_pixel(x, y, Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
    }
    out
}

/// Rasterise `scene` and write it as a PNG file.
pub fn save_png(scene: &Scene, path: impl AsRef<Path>, scale: f32) -> Result<()> {
    let path = path.as_ref();
    let image = pixmap_to_image(&rasterize(scene, scale)?);
    image.save(path)?;
    log::info!("saved plot image to {:?}", path);
    Ok(())
}

/// Write `scene` as an SVG file.
pub fn save_svg(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, scene_to_svg(scene))?;
    log::info!("saved plot SVG to {:?}", path);
    Ok(())
}

/// Timestamped default file name, e.g. `projection_20240115_120000.png`.
pub fn default_file_name(prefix: &str, extension: &str) -> String {
    format!(
        "{prefix}_{}.{extension}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape("a<b & c>d"), "a&lt;b &amp; c&gt;d");
    }

    #[test]
    fn document_lists_every_command_between_header_and_footer() {
        let scene = Scene {
            width: 10.0,
            height: 10.0,
            background: Color32::WHITE,
            commands: vec![
                DrawCommand::Line {
                    from: [0.0, 0.0],
                    to: [10.0, 10.0],
                    color: Color32::BLACK,
                    width: 1.0,
                },
                DrawCommand::Polygon {
                    points: vec![[1.0, 1.0], [5.0, 1.0], [5.0, 5.0]],
                    closed: true,
                    fill: None,
                    stroke: Some((2.0, Color32::BLUE)),
                },
            ],
        };
        let svg = scene_to_svg(&scene);
        let lines: Vec<&str> = svg.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("<svg"));
        assert!(lines[1].starts_with("<rect"));
        assert!(lines[2].starts_with("<line"));
        assert_eq!(
            lines[3],
            r#"<polygon points="1,1 5,1 5,5" fill="none" stroke="rgb(0,0,255)" stroke-opacity="1" stroke-width="2"/>"#
        );
        assert_eq!(lines[4], "</svg>");
        assert_eq!(svg, SvgDocument(&scene).to_string());
    }

    #[test]
    fn paint_splits_alpha() {
        let (c, a) = paint(Color32::from_rgb(10, 20, 30));
        assert_eq!(c, "rgb(10,20,30)");
        assert!((a - 1.0).abs() < 1e-6);
    }
}
