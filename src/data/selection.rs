use crate::geometry::{point_in_polygon, LinearScale};

/// One point captured by a lasso, in data space.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPoint {
    /// Position in the original embeddings array.
    pub index: usize,
    /// Untransformed coordinates, all dimensions.
    pub point: Vec<f64>,
}

/// Result of one lasso gesture, ordered by original index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    items: Vec<SelectedPoint>,
}

impl Selection {
    pub fn new(items: Vec<SelectedPoint>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[SelectedPoint] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectedPoint> {
        self.items.iter()
    }

    pub fn indices(&self) -> Vec<usize> {
        self.items.iter().map(|s| s.index).collect()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.items
            .binary_search_by_key(&index, |s| s.index)
            .is_ok()
    }

    /// Feature vectors in selection order, as fed to the projection engine.
    pub fn feature_rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.items.iter().map(|s| s.point.as_slice())
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a SelectedPoint;
    type IntoIter = std::slice::Iter<'a, SelectedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Collect the points whose on-screen position lies inside `lasso`.
///
/// `x` and `y` must be the effective (zoomed) scales in use when the lasso was
/// drawn. Each point's first two coordinates are mapped through them and tested
/// against the implicitly closed polygon; the untransformed point is returned.
/// A lasso with fewer than three vertices selects nothing.
pub fn select<'a, I>(lasso: &[[f64; 2]], points: I, x: &LinearScale, y: &LinearScale) -> Selection
where
    I: IntoIterator<Item = &'a [f64]>,
{
    if lasso.len() < 3 {
        return Selection::default();
    }
    let items = points
        .into_iter()
        .enumerate()
        .filter(|(_, p)| p.len() >= 2)
        .filter(|(_, p)| point_in_polygon([x.apply(p[0]), y.apply(p[1])], lasso))
        .map(|(index, p)| SelectedPoint {
            index,
            point: p.to_vec(),
        })
        .collect();
    Selection::new(items)
}
