//! Example: Headless session and export
//!
//! What it demonstrates
//! - Driving a [`ViewSession`] with scripted [`InteractionEvent`]s, no window.
//! - Zooming in, drawing a lasso and reading back the selection and projection.
//! - Writing both plots as PNG and SVG with the export module.
//!
//! How to run
//! ```bash
//! RUST_LOG=info cargo run --example headless_export -- /tmp/lassoplot-out
//! ```

use std::path::PathBuf;

use lassoplot::export::{save_png, save_svg};
use lassoplot::{Dataset, InteractionEvent, LengthPolicy, ViewConfig, ViewSession};

fn main() -> lassoplot::Result<()> {
    env_logger::init();
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&out_dir)?;

    // A noisy spiral in 3-D, labelled by turn.
    let (points, labels): (Vec<Vec<f64>>, Vec<i64>) = (0..400)
        .map(|i| {
            let t = i as f64 * 0.05;
            let p = vec![t * t.cos(), t * t.sin(), (t * 3.0).sin()];
            (p, (t / std::f64::consts::TAU) as i64)
        })
        .unzip();
    let dataset = Dataset::new(points, labels, LengthPolicy::Strict)?;

    let mut session = ViewSession::new(ViewConfig::default());
    session.load_dataset(dataset);

    session.handle(InteractionEvent::Wheel {
        delta: 300.0,
        anchor: [420.0, 300.0],
    });
    let lasso = [
        [300.0, 180.0],
        [560.0, 200.0],
        [600.0, 420.0],
        [320.0, 440.0],
    ];
    session.handle(InteractionEvent::PointerDown { pos: lasso[0] });
    for pos in &lasso[1..] {
        session.handle(InteractionEvent::PointerMove { pos: *pos });
    }
    let update = session.handle(InteractionEvent::PointerUp);
    log::info!("lasso result: {update:?}");

    println!(
        "zoom k = {:.3}, selected {} points",
        session.zoom().k,
        session.selection().len()
    );
    if let Some(p) = session.projection() {
        println!(
            "explained variance: {:.4} / {:.4}",
            p.explained_variance[0], p.explained_variance[1]
        );
    }

    let primary = session.primary_scene();
    let projection = session.projection_scene();
    save_png(&primary, out_dir.join("embeddings.png"), 1.0)?;
    save_svg(&primary, out_dir.join("embeddings.svg"))?;
    save_png(&projection, out_dir.join("projection.png"), 2.0)?;
    save_svg(&projection, out_dir.join("projection.svg"))?;
    println!("wrote plots to {}", out_dir.display());
    Ok(())
}
