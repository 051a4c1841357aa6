//! Example: Synthetic clusters
//!
//! What it demonstrates
//! - Feeding an in-memory dataset through [`StaticSource`].
//! - Five labelled clusters in 6 dimensions; the first two coordinates are
//!   plotted, all six are reduced when a lasso selection is projected.
//! - Colouring the projection plot by class label.
//!
//! How to run
//! ```bash
//! cargo run --example synthetic_clusters
//! RUST_LOG=debug cargo run --example synthetic_clusters -- 2000
//! ```

use lassoplot::{run_lassoplot, StaticSource, ViewConfig};

const DIMS: usize = 6;
const CLUSTERS: usize = 5;

/// Deterministic value in `[-1, 1)` for sample `i`, coordinate `j`.
fn jitter(i: usize, j: usize) -> f64 {
    let x = ((i * 31 + j * 17) as f64 * 12.9898).sin() * 43758.5453;
    2.0 * (x - x.floor()) - 1.0
}

fn clusters(n: usize) -> (Vec<Vec<f64>>, Vec<i64>) {
    let mut points = Vec::with_capacity(n);
    let mut labels = Vec::with_capacity(n);
    for i in 0..n {
        let c = i % CLUSTERS;
        let angle = c as f64 * std::f64::consts::TAU / CLUSTERS as f64;
        let center = [4.0 * angle.cos(), 4.0 * angle.sin()];
        let p = (0..DIMS)
            .map(|j| {
                let base = center.get(j).copied().unwrap_or(c as f64 * 0.5);
                // Elongate every cluster along its own direction in the hidden dims.
                let spread = if j == 2 + c % (DIMS - 2) { 2.5 } else { 0.8 };
                base + spread * jitter(i, j)
            })
            .collect();
        points.push(p);
        labels.push(c as i64);
    }
    (points, labels)
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let n = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(500);

    let (points, labels) = clusters(n);
    let mut config = ViewConfig {
        title: "LassoPlot: synthetic clusters".to_string(),
        ..Default::default()
    };
    config.projection.color_by_label = true;
    config.lasso.min_sample_distance = 2.0;

    run_lassoplot(config, StaticSource::new(points, labels))
}
