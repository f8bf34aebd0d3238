//! Touch hit-testing
//!
//! Shapes are tested top-most first. The first shape containing the touch
//! decides the outcome: its group if it has one, otherwise the touch is
//! absorbed. A shape without a group therefore hides every shape below
//! it, which is how a host masks parts of the screen.

use touchwire_protocol::NO_GROUP;

use crate::registry::ShapeRegistry;

/// Outcome of a hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hit {
    /// Top-most containing shape belongs to this group
    Group(i32),
    /// Top-most containing shape has no group
    Absorbed,
    /// No shape contains the point
    Miss,
}

impl Hit {
    /// Wire id for this outcome; both non-group outcomes report `-1`
    pub fn group_id(self) -> i32 {
        match self {
            Hit::Group(id) => id,
            Hit::Absorbed | Hit::Miss => NO_GROUP,
        }
    }
}

impl<R> ShapeRegistry<R> {
    /// Find what a touch at (`px`, `py`) lands on
    pub fn hit_at(&self, px: i32, py: i32) -> Hit {
        match self.shapes().iter().rev().find(|s| s.contains(px, py)) {
            Some(shape) => match self.group_id(shape) {
                Some(id) => Hit::Group(id),
                None => Hit::Absorbed,
            },
            None => Hit::Miss,
        }
    }

    /// Group id for a touch at (`px`, `py`), or `-1`
    pub fn find_group_at(&self, px: i32, py: i32) -> i32 {
        self.hit_at(px, py).group_id()
    }
}
