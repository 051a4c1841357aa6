//! PCA projection of a selection onto its two leading principal components.

use nalgebra::{DMatrix, RowDVector};

use crate::data::selection::Selection;

/// Singular values below this (relative to the largest) are treated as zero.
const RANK_EPSILON: f64 = 1e-12;

/// 2-D coordinates of the selected points in principal-component space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionResult {
    /// One point per selected item, in selection order.
    pub points: Vec<[f64; 2]>,
    /// Original dataset index of each projected point.
    pub source_indices: Vec<usize>,
    /// Variance captured by each component (`s² / (n - 1)`).
    pub explained_variance: [f64; 2],
}

impl ProjectionResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of the projected points; (0, 0) up to rounding.
    pub fn centroid(&self) -> [f64; 2] {
        if self.points.is_empty() {
            return [0.0, 0.0];
        }
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        [sx / n, sy / n]
    }
}

/// Project the selected feature vectors onto their top two principal components.
///
/// Returns `None` for fewer than two items, where PCA is undefined. The data are
/// mean-centred and decomposed by SVD; the right singular vectors belonging to
/// the two largest singular values are the components. Each component is
/// oriented so its largest-magnitude loading is positive. When the data have
/// rank below two (a single feature, or collinear/identical points) the missing
/// component is zero and so is the matching output coordinate.
pub fn project(selection: &Selection) -> Option<ProjectionResult> {
    let n = selection.len();
    if n < 2 {
        return None;
    }
    let d = selection.items()[0].point.len();
    if d == 0 || selection.iter().any(|s| s.point.len() != d) {
        log::warn!("projection skipped: selection rows have inconsistent dimensions");
        return None;
    }

    let mut centered = DMatrix::<f64>::zeros(n, d);
    for (i, row) in selection.feature_rows().enumerate() {
        for (j, v) in row.iter().enumerate() {
            centered[(i, j)] = *v;
        }
    }
    for j in 0..d {
        let mean = centered.column(j).mean();
        centered.column_mut(j).add_scalar_mut(-mean);
    }

    let svd = centered.clone().svd(false, true);
    let v_t = svd.v_t?;
    let singular = svd.singular_values;

    let mut order: Vec<usize> = (0..singular.len()).collect();
    order.sort_by(|&a, &b| singular[b].total_cmp(&singular[a]));
    let largest = order.first().map_or(0.0, |&i| singular[i]);

    let mut components: Vec<RowDVector<f64>> = Vec::with_capacity(2);
    let mut explained_variance = [0.0; 2];
    for slot in 0..2 {
        let component = order
            .get(slot)
            .filter(|&&i| singular[i] > RANK_EPSILON * largest.max(f64::MIN_POSITIVE))
            .map(|&i| {
                explained_variance[slot] = singular[i] * singular[i] / (n as f64 - 1.0);
                oriented(v_t.row(i).clone_owned())
            })
            .unwrap_or_else(|| RowDVector::zeros(d));
        components.push(component);
    }

    let points = (0..n)
        .map(|i| {
            let row = centered.row(i);
            [row.dot(&components[0]), row.dot(&components[1])]
        })
        .collect();

    log::debug!(
        "projected {n} points of dimension {d}; explained variance {:?}",
        explained_variance
    );

    Some(ProjectionResult {
        points,
        source_indices: selection.indices(),
        explained_variance,
    })
}

fn oriented(mut component: RowDVector<f64>) -> RowDVector<f64> {
    let pivot = component
        .iter()
        .copied()
        .fold(0.0_f64, |best, v| if v.abs() > best.abs() { v } else { best });
    if pivot < 0.0 {
        component.neg_mut();
    }
    component
}
