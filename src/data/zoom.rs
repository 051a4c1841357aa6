use crate::config::ZoomLimits;
use crate::geometry::LinearScale;

/// Uniform scale `k` followed by a translation `(x, y)`, in screen pixels.
///
/// A screen position `s` produced by the base scales is displayed at
/// `k * s + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomState {
    pub const IDENTITY: ZoomState = ZoomState {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    pub fn apply(&self, p: [f64; 2]) -> [f64; 2] {
        [self.apply_x(p[0]), self.apply_y(p[1])]
    }

    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.k + self.x
    }

    pub fn apply_y(&self, y: f64) -> f64 {
        y * self.k + self.y
    }

    pub fn invert(&self, p: [f64; 2]) -> [f64; 2] {
        [self.invert_x(p[0]), self.invert_y(p[1])]
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Effective horizontal scale: `base` followed by this zoom.
    ///
    /// The returned scale keeps `base`'s pixel range and narrows (or widens) its
    /// domain, so `rescale_x(base).apply(v) == apply_x(base.apply(v))`.
    pub fn rescale_x(&self, base: &LinearScale) -> LinearScale {
        let [r0, r1] = base.range();
        base.with_domain([
            base.invert(self.invert_x(r0)),
            base.invert(self.invert_x(r1)),
        ])
    }

    /// Effective vertical scale; see [`rescale_x`](Self::rescale_x).
    pub fn rescale_y(&self, base: &LinearScale) -> LinearScale {
        let [r0, r1] = base.range();
        base.with_domain([
            base.invert(self.invert_y(r0)),
            base.invert(self.invert_y(r1)),
        ])
    }

    /// Translate in the zoomed coordinate system (the offset is multiplied by `k`).
    fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.k, self.x + self.k * dx, self.y + self.k * dy)
    }
}

/// Owns the live [`ZoomState`] and keeps it inside the configured bounds.
///
/// The scale factor is clamped to `[min_scale, max_scale]`, and the translation
/// is constrained so the visible rectangle never leaves the world rectangle
/// (the plot region `[[0, 0], [width, height]]`). When the visible rectangle is
/// larger than the world on an axis (zoomed out below 1), it is centred instead.
#[derive(Debug, Clone)]
pub struct ZoomController {
    state: ZoomState,
    viewport: [[f64; 2]; 2],
    translate_extent: [[f64; 2]; 2],
    limits: ZoomLimits,
}

impl ZoomController {
    pub fn new(viewport: [[f64; 2]; 2], limits: ZoomLimits) -> Self {
        Self {
            state: ZoomState::IDENTITY,
            viewport,
            translate_extent: viewport,
            limits,
        }
    }

    /// Use a world rectangle different from the visible viewport.
    pub fn with_translate_extent(mut self, extent: [[f64; 2]; 2]) -> Self {
        self.translate_extent = extent;
        self.state = constrain(self.state, self.viewport, self.translate_extent);
        self
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Multiply the scale by `factor`, keeping `anchor` fixed on screen.
    pub fn scale_by(&mut self, factor: f64, anchor: [f64; 2]) -> bool {
        self.scale_to(self.state.k * factor, anchor)
    }

    /// Set the scale to `k` (clamped), keeping `anchor` fixed on screen.
    pub fn scale_to(&mut self, k: f64, anchor: [f64; 2]) -> bool {
        if !k.is_finite() || k <= 0.0 {
            return false;
        }
        let k = k.clamp(self.limits.min_scale, self.limits.max_scale);
        let p1 = self.state.invert(anchor);
        self.commit(ZoomState::new(
            k,
            anchor[0] - p1[0] * k,
            anchor[1] - p1[1] * k,
        ))
    }

    /// Wheel or pinch input: positive `delta` zooms in around `anchor`.
    pub fn wheel(&mut self, delta: f64, anchor: [f64; 2]) -> bool {
        let factor = 2f64.powf(delta * self.limits.wheel_sensitivity);
        self.scale_by(factor, anchor)
    }

    /// Pan by a screen-space offset.
    pub fn translate_by(&mut self, dx: f64, dy: f64) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        let s = self.state;
        self.commit(ZoomState::new(s.k, s.x + dx, s.y + dy))
    }

    /// Replace the state (the scale is clamped and the translation constrained).
    pub fn set_state(&mut self, state: ZoomState) -> bool {
        if !(state.k.is_finite() && state.x.is_finite() && state.y.is_finite()) || state.k <= 0.0 {
            return false;
        }
        let k = state.k.clamp(self.limits.min_scale, self.limits.max_scale);
        self.commit(ZoomState::new(k, state.x, state.y))
    }

    pub fn reset(&mut self) -> bool {
        self.commit(ZoomState::IDENTITY)
    }

    fn commit(&mut self, next: ZoomState) -> bool {
        let next = constrain(next, self.viewport, self.translate_extent);
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }
}

fn constrain(t: ZoomState, extent: [[f64; 2]; 2], translate_extent: [[f64; 2]; 2]) -> ZoomState {
    let dx0 = t.invert_x(extent[0][0]) - translate_extent[0][0];
    let dx1 = t.invert_x(extent[1][0]) - translate_extent[1][0];
    let dy0 = t.invert_y(extent[0][1]) - translate_extent[0][1];
    let dy1 = t.invert_y(extent[1][1]) - translate_extent[1][1];
    t.translate(axis_correction(dx0, dx1), axis_correction(dy0, dy1))
}

fn axis_correction(d0: f64, d1: f64) -> f64 {
    if d1 > d0 {
        return (d0 + d1) / 2.0;
    }
    let low = d0.min(0.0);
    if low != 0.0 {
        low
    } else {
        d1.max(0.0)
    }
}
