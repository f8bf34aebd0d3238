//! Point buffer for polygon assembly

use heapless::Vec;

/// Maximum buffered points (and polygon vertices)
pub const MAX_POINTS: usize = 32;

/// Vertex list
pub type Points = Vec<(i32, i32), MAX_POINTS>;

/// Ordered (x, y) pairs collected by the Point command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointBuffer {
    points: Points,
}

impl PointBuffer {
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append a point
    ///
    /// Returns the point back if the buffer is full.
    pub fn push(&mut self, x: i32, y: i32) -> Result<(), (i32, i32)> {
        self.points.push((x, y))
    }

    /// Remove and return every buffered point
    pub fn take(&mut self) -> Points {
        core::mem::take(&mut self.points)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn as_slice(&self) -> &[(i32, i32)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
