//! Geometry helpers: point-in-polygon membership and d3-style linear scales.
//!
//! Everything here works on plain `[f64; 2]` screen or data coordinates so the
//! selection engine and the draw-command builders can share it without pulling
//! in any rendering backend.

/// Relative tolerance used to decide whether a point lies on a polygon edge.
const BOUNDARY_EPSILON: f64 = 1e-9;

// Thresholds of the "nice" tick step search (1, 2, 5 × 10^n).
const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Even-odd membership test of `point` against an implicitly closed `polygon`.
///
/// * Polygons with fewer than three vertices contain nothing.
/// * The last vertex does not need to repeat the first one.
/// * A point that lies on an edge (or on a vertex) is reported as **outside**.
/// * Self-intersecting polygons follow the even-odd rule uniformly.
pub fn point_in_polygon(point: [f64; 2], polygon: &[[f64; 2]]) -> bool {
    if polygon.len() < 3 || !point[0].is_finite() || !point[1].is_finite() {
        return false;
    }
    let [x, y] = point;
    let tolerance = BOUNDARY_EPSILON * coordinate_magnitude(polygon).max(1.0);

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let [xi, yi] = polygon[i];
        let [xj, yj] = polygon[j];
        if on_segment(point, polygon[j], polygon[i], tolerance) {
            return false;
        }
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn coordinate_magnitude(polygon: &[[f64; 2]]) -> f64 {
    polygon
        .iter()
        .flat_map(|p| p.iter())
        .filter(|v| v.is_finite())
        .fold(0.0_f64, |m, v| m.max(v.abs()))
}

fn on_segment(p: [f64; 2], a: [f64; 2], b: [f64; 2], tolerance: f64) -> bool {
    let (ex, ey) = (b[0] - a[0], b[1] - a[1]);
    let (px, py) = (p[0] - a[0], p[1] - a[1]);
    let len = ex.hypot(ey);
    if len == 0.0 {
        return px.hypot(py) <= tolerance;
    }
    let distance = (ex * py - ey * px) / len;
    if distance.abs() > tolerance {
        return false;
    }
    let along = (px * ex + py * ey) / len;
    along >= -tolerance && along <= len + tolerance
}

/// Linear mapping from a data `domain` to a pixel `range`.
///
/// Mirrors the behaviour of `d3.scaleLinear`: a degenerate domain maps every
/// value to the middle of the range, and [`ticks`](Self::ticks) produces
/// "nice" round values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Build a scale whose domain is the `[min, max]` extent of `values`.
    ///
    /// Returns `None` when no finite value is supplied.
    pub fn from_extent<I>(values: I, range: [f64; 2]) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min > max {
            return None;
        }
        Some(Self::new([min, max], range))
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Map a domain value to the range.
    pub fn apply(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if r1 == r0 {
            return (d0 + d1) / 2.0;
        }
        d0 + (value - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Same scale with a different domain.
    pub fn with_domain(&self, domain: [f64; 2]) -> Self {
        Self::new(domain, self.range)
    }

    /// Roughly `count` round tick values inside the domain, in ascending order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let [a, b] = self.domain;
        if count == 0 || !a.is_finite() || !b.is_finite() {
            return Vec::new();
        }
        if a == b {
            return vec![a];
        }
        let (start, stop) = if a < b { (a, b) } else { (b, a) };
        let (i1, i2, inc) = tick_spec(start, stop, count as f64);
        if !(i2 >= i1) {
            return Vec::new();
        }
        let n = (i2 - i1 + 1.0) as usize;
        (0..n)
            .map(|i| {
                let i = i1 + i as f64;
                if inc < 0.0 {
                    i / -inc
                } else {
                    i * inc
                }
            })
            .collect()
    }

    /// Distance between consecutive ticks for the given tick count.
    pub fn tick_step(&self, count: usize) -> f64 {
        let [a, b] = self.domain;
        if count == 0 || a == b || !a.is_finite() || !b.is_finite() {
            return 0.0;
        }
        let (start, stop) = if a < b { (a, b) } else { (b, a) };
        let (_, _, inc) = tick_spec(start, stop, count as f64);
        if inc < 0.0 {
            1.0 / -inc
        } else {
            inc
        }
    }

    /// Label formatter matching the precision of [`ticks`](Self::ticks).
    pub fn tick_format(&self, count: usize) -> TickFormat {
        let step = self.tick_step(count);
        let precision = if step > 0.0 && step.is_finite() {
            (-(step.log10() + 1e-9).floor()).max(0.0) as usize
        } else {
            0
        };
        TickFormat { precision }
    }
}

/// Fixed-point tick label formatter with thousands grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickFormat {
    precision: usize,
}

impl TickFormat {
    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn format(&self, value: f64) -> String {
        let half_ulp = 0.5 * 10f64.powi(-(self.precision as i32));
        let value = if value.abs() < half_ulp { 0.0 } else { value };
        group_thousands(&format!("{:.*}", self.precision, value))
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scaled = 10f64.powf(-power) / factor;
        i1 = (start * scaled).round();
        i2 = (stop * scaled).round();
        if i1 / scaled < start {
            i1 += 1.0;
        }
        if i2 / scaled > stop {
            i2 -= 1.0;
        }
        inc = -scaled;
    } else {
        let scaled = 10f64.powf(power) * factor;
        i1 = (start / scaled).round();
        i2 = (stop / scaled).round();
        if i1 * scaled < start {
            i1 += 1.0;
        }
        if i2 * scaled > stop {
            i2 -= 1.0;
        }
        inc = scaled;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn group_thousands(formatted: &str) -> String {
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
