//! Text style and screen-space bounds

use crate::color::Color565;

/// Axis-aligned screen area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment test
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x
            && (px as i64) < self.x as i64 + self.w as i64
            && py >= self.y
            && (py as i64) < self.y as i64 + self.h as i64
    }

    /// Returns true if the area covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Parameters for a text draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    /// Index into the renderer's font table
    pub font: usize,
    /// Integer magnification, at least 1
    pub size: u8,
    /// Clockwise quarter turns (0-3)
    pub rotation: u8,
    /// Glyph color
    pub color: Color565,
}

impl TextStyle {
    pub const fn new(font: usize, size: u8, rotation: u8, color: Color565) -> Self {
        Self {
            font,
            size,
            rotation,
            color,
        }
    }

    /// Magnification clamped to at least 1
    pub fn scale(&self) -> i32 {
        self.size.max(1) as i32
    }
}

/// Rotate an unrotated text extent around its anchor
///
/// `w` and `h` are the extent of the upright text; the result is the
/// screen area covered after `rotation` clockwise quarter turns.
pub fn rotated_bounds(x: i32, y: i32, w: i32, h: i32, rotation: u8) -> Bounds {
    match rotation % 4 {
        0 => Bounds::new(x, y, w, h),
        1 => Bounds::new(x.saturating_sub(h), y, h, w),
        2 => Bounds::new(x.saturating_sub(w), y.saturating_sub(h), w, h),
        _ => Bounds::new(x, y.saturating_sub(w), h, w),
    }
}
