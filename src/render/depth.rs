/// Nearest distance drawn so far in each screen column.
///
/// Owned by the caller and reused across frames; the raycaster itself keeps
/// no per-frame state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f64>,
}

impl DepthBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            depths: vec![f64::INFINITY; width],
        }
    }

    /// Resize to `width` columns and mark every column as empty.
    pub fn reset(&mut self, width: usize) {
        self.depths.clear();
        self.depths.resize(width, f64::INFINITY);
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn get(&self, column: usize) -> Option<f64> {
        self.depths.get(column).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.depths
    }

    /// Store `depth` for `column` if it is nearer than what is recorded.
    /// Returns whether the value was stored.
    pub fn record(&mut self, column: usize, depth: f64) -> bool {
        match self.depths.get_mut(column) {
            Some(stored) if depth < *stored => {
                *stored = depth;
                true
            }
            _ => false,
        }
    }

    /// Whether something at `depth` would be in front of `column`'s contents.
    /// Columns outside the buffer are never visible.
    #[inline]
    pub fn is_nearer(&self, column: usize, depth: f64) -> bool {
        self.depths.get(column).is_some_and(|stored| depth < *stored)
    }
}
