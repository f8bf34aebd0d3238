//! Drawable and touchable shapes
//!
//! A [`Shape`] is one of four closed variants plus the fields every
//! variant shares. Geometry is fixed at construction; the only state a
//! shape picks up later is a text label's measured bounding box.

use heapless::String;
use touchwire_display::{Bounds, Color565, RenderError, Renderer, TextStyle};
use touchwire_protocol::MAX_QUOTE_LEN;

use crate::group::GroupHandle;
use crate::points::Points;

/// Maximum label length in bytes
pub const MAX_TEXT_LEN: usize = MAX_QUOTE_LEN;

/// Text label
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextShape {
    x: i32,
    y: i32,
    text: String<MAX_TEXT_LEN>,
    font: usize,
    size: u8,
    rotation: u8,
    bounds: Option<Bounds>,
}

impl TextShape {
    /// Create an unmeasured label
    ///
    /// Text longer than [`MAX_TEXT_LEN`] is cut at a character boundary.
    /// `rotation` is taken modulo 4 and `size` is at least 1.
    pub fn new(x: i32, y: i32, text: &str, font: usize, size: u8, rotation: u8) -> Self {
        let mut label = String::new();
        for c in text.chars() {
            if label.push(c).is_err() {
                break;
            }
        }
        Self {
            x,
            y,
            text: label,
            font,
            size: size.max(1),
            rotation: rotation % 4,
            bounds: None,
        }
    }

    /// Anchor point of the unrotated text
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Label content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Font table index
    pub fn font(&self) -> usize {
        self.font
    }

    /// Integer magnification
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Clockwise quarter turns
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Measured area, `None` until the label has been measured
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Returns true once the label can be touched
    pub fn is_measured(&self) -> bool {
        self.bounds.is_some()
    }

    /// Render parameters for this label in `color`
    pub fn style(&self, color: Color565) -> TextStyle {
        TextStyle::new(self.font, self.size, self.rotation, color)
    }

    /// Ask the renderer for the area this label covers
    pub fn measure<R: Renderer + ?Sized>(&mut self, renderer: &R, color: Color565) {
        let style = self.style(color);
        self.bounds = Some(renderer.measure_text(self.x, self.y, &self.text, &style));
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        self.bounds.is_some_and(|b| b.contains(px, py))
    }
}

/// Shape geometry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShapeKind {
    /// Top-left corner and extent
    Rect { x: i32, y: i32, w: i32, h: i32 },
    /// Center and radius
    Circle { x: i32, y: i32, radius: i32 },
    /// Vertices in drawing order
    Polygon(Points),
    /// Text label
    Text(TextShape),
}

/// A shape in the registry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Shape {
    kind: ShapeKind,
    color: Color565,
    filled: bool,
    group: Option<GroupHandle>,
}

impl Shape {
    /// Create a shape that belongs to no group yet
    pub fn new(kind: ShapeKind, color: Color565, filled: bool) -> Self {
        Self {
            kind,
            color,
            filled,
            group: None,
        }
    }

    /// Rectangle covering `[x, x + w) x [y, y + h)`
    pub fn rect(x: i32, y: i32, w: i32, h: i32, color: Color565, filled: bool) -> Self {
        Self::new(ShapeKind::Rect { x, y, w, h }, color, filled)
    }

    /// Circle centered on (`x`, `y`) with radius `diameter / 2`
    ///
    /// A negative diameter gives radius 0.
    pub fn circle(x: i32, y: i32, diameter: i32, color: Color565, filled: bool) -> Self {
        let radius = diameter.max(0) / 2;
        Self::new(ShapeKind::Circle { x, y, radius }, color, filled)
    }

    /// Polygon outline; the fill flag does not apply
    pub fn polygon(points: Points, color: Color565) -> Self {
        Self::new(ShapeKind::Polygon(points), color, false)
    }

    /// Text label; touchable once measured
    pub fn text(text: TextShape, color: Color565) -> Self {
        Self::new(ShapeKind::Text(text), color, false)
    }

    /// Geometry
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Draw color
    pub fn color(&self) -> Color565 {
        self.color
    }

    /// Returns true if Rect and Circle are drawn solid
    pub fn filled(&self) -> bool {
        self.filled
    }

    /// Owning group, `None` for dead area
    pub fn group(&self) -> Option<GroupHandle> {
        self.group
    }

    pub(crate) fn set_group(&mut self, group: Option<GroupHandle>) {
        self.group = group;
    }

    /// Returns true if (`px`, `py`) lies inside the shape
    pub fn contains(&self, px: i32, py: i32) -> bool {
        match &self.kind {
            ShapeKind::Rect { x, y, w, h } => Bounds::new(*x, *y, *w, *h).contains(px, py),
            ShapeKind::Circle { x, y, radius } => {
                let dx = px as i64 - *x as i64;
                let dy = py as i64 - *y as i64;
                let r = *radius as i64;
                dx * dx + dy * dy <= r * r
            }
            ShapeKind::Polygon(points) => polygon_contains(points, px, py),
            ShapeKind::Text(text) => text.contains(px, py),
        }
    }

    /// Measure a text label; other shapes have nothing to measure
    pub fn measure<R: Renderer + ?Sized>(&mut self, renderer: &R) {
        if let ShapeKind::Text(text) = &mut self.kind {
            text.measure(renderer, self.color);
        }
    }

    /// Render the shape
    ///
    /// Text labels are measured first, which makes them touchable.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), RenderError> {
        let color = self.color;
        match &mut self.kind {
            ShapeKind::Rect { x, y, w, h } => {
                if self.filled {
                    renderer.fill_rect(*x, *y, *w, *h, color)
                } else {
                    renderer.draw_rect(*x, *y, *w, *h, color)
                }
            }
            ShapeKind::Circle { x, y, radius } => {
                if self.filled {
                    renderer.fill_circle(*x, *y, *radius, color)
                } else {
                    renderer.draw_circle(*x, *y, *radius, color)
                }
            }
            ShapeKind::Polygon(points) => draw_polygon(renderer, points, color),
            ShapeKind::Text(text) => {
                text.measure(&*renderer, color);
                let style = text.style(color);
                let (x, y) = text.position();
                renderer.draw_text(x, y, text.text(), &style)
            }
        }
    }
}

fn draw_polygon<R: Renderer + ?Sized>(
    renderer: &mut R,
    points: &[(i32, i32)],
    color: Color565,
) -> Result<(), RenderError> {
    for pair in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        renderer.draw_line(x0, y0, x1, y1, color)?;
    }
    if points.len() >= 3 {
        if let (Some(&(x0, y0)), Some(&(x1, y1))) = (points.last(), points.first()) {
            renderer.draw_line(x0, y0, x1, y1, color)?;
        }
    }
    Ok(())
}

/// Even-odd ray casting in exact integer arithmetic
///
/// Casts a ray towards +x and counts edge crossings. Fewer than three
/// vertices never contain anything.
pub fn polygon_contains(points: &[(i32, i32)], px: i32, py: i32) -> bool {
    if points.len() < 3 {
        return false;
    }
    // Products of two coordinate differences need more than 64 bits
    let (px, py) = (px as i128, py as i128);
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = (points[i].0 as i128, points[i].1 as i128);
        let (xj, yj) = (points[j].0 as i128, points[j].1 as i128);
        if (yi > py) != (yj > py) {
            // px < xi + (xj - xi) * (py - yi) / dy, without the division
            let dy = yj - yi;
            let lhs = (px - xi) * dy;
            let rhs = (xj - xi) * (py - yi);
            let crosses = if dy > 0 { lhs < rhs } else { lhs > rhs };
            if crosses {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
