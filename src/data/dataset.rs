use serde::{Deserialize, Serialize};

use crate::error::{LassoPlotError, Result};

/// What to do when the embeddings and labels arrays differ in length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthPolicy {
    /// Refuse the data with [`LassoPlotError::LengthMismatch`].
    #[default]
    Strict,
    /// Keep the first `min(points, labels)` entries of both arrays.
    Truncate,
}

/// Immutable, validated pair of parallel arrays: points and class labels.
///
/// Every point has the same number of coordinates (at least two). The first two
/// coordinates are what the primary plot shows; the full vector is what the
/// projection engine reduces.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    dims: usize,
    coords: Vec<f64>,
    labels: Vec<i64>,
}

impl Dataset {
    pub fn new(points: Vec<Vec<f64>>, labels: Vec<i64>, policy: LengthPolicy) -> Result<Self> {
        let (points, labels) = match policy {
            LengthPolicy::Strict if points.len() != labels.len() => {
                return Err(LassoPlotError::LengthMismatch {
                    points: points.len(),
                    labels: labels.len(),
                });
            }
            LengthPolicy::Truncate if points.len() != labels.len() => {
                let n = points.len().min(labels.len());
                log::warn!(
                    "truncating dataset to {n} entries ({} points, {} labels)",
                    points.len(),
                    labels.len()
                );
                let mut points = points;
                let mut labels = labels;
                points.truncate(n);
                labels.truncate(n);
                (points, labels)
            }
            _ => (points, labels),
        };

        let dims = points.first().map_or(2, Vec::len);
        if dims < 2 {
            return Err(LassoPlotError::TooFewDimensions { found: dims });
        }
        let mut coords = Vec::with_capacity(points.len() * dims);
        for (index, p) in points.into_iter().enumerate() {
            if p.len() != dims {
                return Err(LassoPlotError::InconsistentDimensions {
                    index,
                    expected: dims,
                    found: p.len(),
                });
            }
            if p.iter().any(|v| !v.is_finite()) {
                return Err(LassoPlotError::NonFinite { index });
            }
            coords.extend(p);
        }
        Ok(Self {
            dims,
            coords,
            labels,
        })
    }

    /// Parse the two JSON arrays delivered by the data endpoints.
    pub fn from_json(embeddings: &str, labels: &str, policy: LengthPolicy) -> Result<Self> {
        let points: Vec<Vec<f64>> = serde_json::from_str(embeddings)?;
        let labels: Vec<i64> = serde_json::from_str(labels)?;
        Self::new(points, labels, policy)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of coordinates per point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn point(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.dims)?;
        self.coords.get(start..start + self.dims)
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &[f64]> + Clone + '_ {
        self.coords.chunks_exact(self.dims)
    }

    /// The two plotted coordinates of every point.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = [f64; 2]> + Clone + '_ {
        self.points().map(|p| [p[0], p[1]])
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<i64> {
        self.labels.get(index).copied()
    }
}
