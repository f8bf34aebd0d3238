//! Renderer adapter trait
//!
//! Defines the drawing interface the shape registry renders through.

use crate::color::Color565;
use crate::text::{Bounds, TextStyle};

/// Renderer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// The underlying draw target rejected the operation
    Target,
    /// No room left in the font table
    FontTableFull,
}

/// Renderer adapter
///
/// Provides the primitive operations the interpreter needs. Coordinates
/// are display pixels; the origin is the top-left corner. Zero or
/// negative extents draw nothing.
pub trait Renderer {
    /// Fill a rectangle
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color565)
        -> Result<(), RenderError>;

    /// Draw a one-pixel rectangle outline
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color565)
        -> Result<(), RenderError>;

    /// Fill a circle of the given radius around (`cx`, `cy`)
    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color565)
        -> Result<(), RenderError>;

    /// Draw a one-pixel circle outline
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color565)
        -> Result<(), RenderError>;

    /// Draw a one-pixel line between two points (both inclusive)
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color565)
        -> Result<(), RenderError>;

    /// Draw text anchored at (`x`, `y`)
    ///
    /// The anchor is the top-left corner of the unrotated text; rotation
    /// turns the text clockwise around it.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: &TextStyle)
        -> Result<(), RenderError>;

    /// Compute the area [`Renderer::draw_text`] would cover
    fn measure_text(&self, x: i32, y: i32, text: &str, style: &TextStyle) -> Bounds;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color565)
        -> Result<(), RenderError> {
        (**self).fill_rect(x, y, w, h, color)
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color565)
        -> Result<(), RenderError> {
        (**self).draw_rect(x, y, w, h, color)
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color565)
        -> Result<(), RenderError> {
        (**self).fill_circle(cx, cy, radius, color)
    }

    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color565)
        -> Result<(), RenderError> {
        (**self).draw_circle(cx, cy, radius, color)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color565)
        -> Result<(), RenderError> {
        (**self).draw_line(x0, y0, x1, y1, color)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: &TextStyle)
        -> Result<(), RenderError> {
        (**self).draw_text(x, y, text, style)
    }

    fn measure_text(&self, x: i32, y: i32, text: &str, style: &TextStyle) -> Bounds {
        (**self).measure_text(x, y, text, style)
    }
}
