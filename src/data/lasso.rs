// Lasso capture: turns pointer down/move/up into a closed screen-space polygon.

/// Whether a lasso gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LassoState {
    #[default]
    Idle,
    Dragging,
}

/// A finished lasso: screen-space vertices, implicitly closed (last → first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LassoPath {
    vertices: Vec<[f64; 2]>,
}

impl LassoPath {
    pub fn new(vertices: Vec<[f64; 2]>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[[f64; 2]] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A polygon needs three vertices to enclose anything.
    pub fn encloses_area(&self) -> bool {
        self.vertices.len() >= 3
    }
}

/// Pointer-driven state machine building a [`LassoPath`].
///
/// Positions are recorded exactly as delivered (screen coordinates of the plot
/// region); zoom is accounted for later, when points are tested against the path.
#[derive(Debug, Clone, Default)]
pub struct LassoCapture {
    state: LassoState,
    path: Vec<[f64; 2]>,
    min_sample_distance: f64,
}

impl LassoCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop move samples closer than `distance` pixels to the previous vertex.
    pub fn with_min_sample_distance(mut self, distance: f64) -> Self {
        self.min_sample_distance = distance.max(0.0);
        self
    }

    pub fn state(&self) -> LassoState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == LassoState::Dragging
    }

    /// Vertices recorded so far in the current gesture (empty while idle).
    pub fn path(&self) -> &[[f64; 2]] {
        &self.path
    }

    /// Start a gesture at `pos`. Restarts the path if a gesture was already running.
    pub fn pointer_down(&mut self, pos: [f64; 2]) {
        self.path.clear();
        self.path.push(pos);
        self.state = LassoState::Dragging;
    }

    /// Record `pos` while dragging. Returns `true` if a vertex was appended.
    pub fn pointer_move(&mut self, pos: [f64; 2]) -> bool {
        if self.state != LassoState::Dragging {
            return false;
        }
        if self.min_sample_distance > 0.0 {
            if let Some(last) = self.path.last() {
                if (pos[0] - last[0]).hypot(pos[1] - last[1]) < self.min_sample_distance {
                    return false;
                }
            }
        }
        self.path.push(pos);
        true
    }

    /// Finish the gesture and hand out the closed path; `None` while idle.
    pub fn pointer_up(&mut self) -> Option<LassoPath> {
        if self.state != LassoState::Dragging {
            return None;
        }
        self.state = LassoState::Idle;
        Some(LassoPath::new(std::mem::take(&mut self.path)))
    }

    /// Abandon the current gesture without producing a path.
    pub fn cancel(&mut self) {
        self.state = LassoState::Idle;
        self.path.clear();
    }
}
