use egui::Color32;
use lassoplot::config::ViewConfig;
use lassoplot::data::dataset::{Dataset, LengthPolicy};
use lassoplot::export::{default_file_name, pixmap_to_image, rasterize, save_png, save_svg, scene_to_svg};
use lassoplot::plot::{DrawCommand, HAlign, Scene, VAlign};
use lassoplot::session::ViewSession;

fn small_scene() -> Scene {
    Scene {
        width: 40.0,
        height: 30.0,
        background: Color32::WHITE,
        commands: vec![
            DrawCommand::Circle {
                center: [20.0, 15.0],
                radius: 5.0,
                fill: Color32::RED,
            },
            DrawCommand::Text {
                pos: [2.0, 2.0],
                text: "a<b".to_string(),
                h_align: HAlign::Start,
                v_align: VAlign::Top,
                color: Color32::BLACK,
                size: 10.0,
            },
        ],
    }
}

#[test]
fn svg_contains_every_primitive() {
    let svg = scene_to_svg(&small_scene());
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="40" height="30""#));
    assert!(svg.contains(r#"<circle cx="20" cy="15" r="5" fill="rgb(255,0,0)""#));
    assert!(svg.contains("a&lt;b"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn session_scene_exports_one_circle_per_point() {
    let dataset = Dataset::new(
        vec![vec![0.0, 0.0], vec![1.0, 2.0], vec![3.0, 1.0]],
        vec![0, 1, 2],
        LengthPolicy::Strict,
    )
    .unwrap();
    let mut session = ViewSession::new(ViewConfig::default());
    session.load_dataset(dataset);
    let svg = scene_to_svg(&session.primary_scene());
    assert_eq!(svg.matches("<circle").count(), 3);
}

#[test]
fn rasterized_scene_has_background_and_mark_colours() {
    let pixmap = rasterize(&small_scene(), 1.0).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (40, 30));
    let image = pixmap_to_image(&pixmap);
    assert_eq!(image.get_pixel(38, 28).0, [255, 255, 255, 255]);
    assert_eq!(image.get_pixel(20, 15).0, [255, 0, 0, 255]);
}

#[test]
fn raster_scale_multiplies_size() {
    let pixmap = rasterize(&small_scene(), 2.0).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (80, 60));
}

#[test]
fn png_and_svg_files_are_written() {
    let dir = std::env::temp_dir().join(format!("lassoplot-export-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let png = dir.join("scene.png");
    let svg = dir.join("scene.svg");
    save_png(&small_scene(), &png, 1.0).unwrap();
    save_svg(&small_scene(), &svg).unwrap();

    let decoded = image::open(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (40, 30));
    let text = std::fs::read_to_string(&svg).unwrap();
    assert!(text.contains("<circle"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn default_file_names_carry_prefix_and_extension() {
    let name = default_file_name("projection", "png");
    assert!(name.starts_with("projection_"));
    assert!(name.ends_with(".png"));
    // projection_YYYYmmdd_HHMMSS.png
    assert_eq!(name.len(), "projection_".len() + 15 + ".png".len());
}
