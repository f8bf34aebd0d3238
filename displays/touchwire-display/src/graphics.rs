//! `embedded-graphics` renderer
//!
//! Renders onto any RGB565 [`DrawTarget`]. Text uses monospace fonts from
//! a [`FontTable`]; magnification and quarter-turn rotation are applied by
//! a wrapping draw target so every font gets them for free.
//!
//! Shape coordinates may lie anywhere in the `i32` range. Every primitive
//! is clipped against the target's bounding box in 64-bit arithmetic
//! before it reaches `embedded-graphics`, and fully off-screen parts are
//! skipped.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, Point, Size};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{Line, Primitive, PrimitiveStyle, Rectangle};
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::{Drawable, Pixel};

use crate::backend::{RenderError, Renderer};
use crate::color::Color565;
use crate::font::FontTable;
use crate::text::{rotated_bounds, Bounds, TextStyle};

/// Font handle used by [`GraphicsRenderer`]
pub type MonoFontRef = &'static MonoFont<'static>;

/// Renderer backed by an `embedded-graphics` draw target
pub struct GraphicsRenderer<D> {
    target: D,
    fonts: FontTable<MonoFontRef>,
}

impl<D> GraphicsRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Create a renderer; `default_font` becomes font index 0
    pub fn new(target: D, default_font: MonoFontRef) -> Self {
        Self {
            target,
            fonts: FontTable::new(default_font),
        }
    }

    /// Register an additional font, returning its index
    pub fn register_font(&mut self, font: MonoFontRef) -> Result<usize, RenderError> {
        self.fonts.push(font)
    }

    /// Borrow the font table
    pub fn fonts(&self) -> &FontTable<MonoFontRef> {
        &self.fonts
    }

    /// Borrow the draw target
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Borrow the draw target mutably
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Unwrap the draw target
    pub fn into_target(self) -> D {
        self.target
    }

    /// Fill the half-open area `[x0, x1) x [y0, y1)`, clipped to the target
    fn fill_area(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb565)
        -> Result<(), RenderError> {
        match clip_area(&self.target.bounding_box(), x0, y0, x1, y1) {
            Some(area) => self.target.fill_solid(&area, color).map_err(target_error),
            None => Ok(()),
        }
    }

    /// Disc or ring of `radius` around (`cx`, `cy`), one span per row
    ///
    /// Covers exactly the pixels with `dx² + dy² <= radius²`; the ring
    /// drops those with `dx² + dy² <= (radius - 1)²`.
    fn circle_spans(&mut self, cx: i32, cy: i32, radius: i32, color: Color565, ring: bool)
        -> Result<(), RenderError> {
        if radius < 0 {
            return Ok(());
        }
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        let bounds = self.target.bounding_box();
        let top = (cy - r).max(bounds.top_left.y as i64);
        let bottom = (cy + r).min(bounds.top_left.y as i64 + bounds.size.height as i64 - 1);
        let color = color.into();
        for y in top..=bottom {
            let dy2 = (y - cy) * (y - cy);
            let outer = isqrt(r * r - dy2);
            let inner = (r - 1) * (r - 1) - dy2;
            if ring && r > 0 && inner >= 0 {
                let inner = isqrt(inner);
                self.fill_area(cx - outer, y, cx - inner, y + 1, color)?;
                self.fill_area(cx + inner + 1, y, cx + outer + 1, y + 1, color)?;
            } else {
                self.fill_area(cx - outer, y, cx + outer + 1, y + 1, color)?;
            }
        }
        Ok(())
    }
}

fn target_error<E>(_: E) -> RenderError {
    RenderError::Target
}

/// Intersect the half-open area `[x0, x1) x [y0, y1)` with `bounds`
fn clip_area(bounds: &Rectangle, x0: i64, y0: i64, x1: i64, y1: i64) -> Option<Rectangle> {
    let left = x0.max(bounds.top_left.x as i64);
    let top = y0.max(bounds.top_left.y as i64);
    let right = x1.min(bounds.top_left.x as i64 + bounds.size.width as i64);
    let bottom = y1.min(bounds.top_left.y as i64 + bounds.size.height as i64);
    if left >= right || top >= bottom {
        return None;
    }
    Some(Rectangle::new(
        Point::new(i32::try_from(left).ok()?, i32::try_from(top).ok()?),
        Size::new(u32::try_from(right - left).ok()?, u32::try_from(bottom - top).ok()?),
    ))
}

/// Clip a segment with inclusive endpoints to `bounds` (Cohen-Sutherland)
fn clip_line(bounds: &Rectangle, mut a: (i64, i64), mut b: (i64, i64)) -> Option<Line> {
    let left = bounds.top_left.x as i64;
    let top = bounds.top_left.y as i64;
    let right = left + bounds.size.width as i64 - 1;
    let bottom = top + bounds.size.height as i64 - 1;
    if right < left || bottom < top {
        return None;
    }
    let outcode = |(x, y): (i64, i64)| -> u8 {
        let mut code = 0;
        if x < left {
            code |= 1;
        } else if x > right {
            code |= 2;
        }
        if y < top {
            code |= 4;
        } else if y > bottom {
            code |= 8;
        }
        code
    };

    let mut code_a = outcode(a);
    let mut code_b = outcode(b);
    // Rounding can leave a moved endpoint one pixel outside another edge
    for _ in 0..8 {
        if code_a | code_b == 0 {
            let start = Point::new(i32::try_from(a.0).ok()?, i32::try_from(a.1).ok()?);
            let end = Point::new(i32::try_from(b.0).ok()?, i32::try_from(b.1).ok()?);
            return Some(Line::new(start, end));
        }
        if code_a & code_b != 0 {
            return None;
        }
        let move_a = code_a != 0;
        let out = if move_a { code_a } else { code_b };
        let (x0, y0, x1, y1) = (a.0 as i128, a.1 as i128, b.0 as i128, b.1 as i128);
        let (x, y) = if out & 8 != 0 {
            let y = bottom as i128;
            (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
        } else if out & 4 != 0 {
            let y = top as i128;
            (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
        } else if out & 2 != 0 {
            let x = right as i128;
            (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
        } else {
            let x = left as i128;
            (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
        };
        // Between the two endpoints, so it fits back into i64
        let point = (x as i64, y as i64);
        if move_a {
            a = point;
            code_a = outcode(a);
        } else {
            b = point;
            code_b = outcode(b);
        }
    }
    None
}

/// Integer square root, rounded down
fn isqrt(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

impl<D> Renderer for GraphicsRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color565)
        -> Result<(), RenderError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let (x0, y0) = (x as i64, y as i64);
        self.fill_area(x0, y0, x0 + w as i64, y0 + h as i64, color.into())
    }

    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color565)
        -> Result<(), RenderError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let color = color.into();
        let (x0, y0) = (x as i64, y as i64);
        let (x1, y1) = (x0 + w as i64, y0 + h as i64);
        // Four edges that never overlap
        self.fill_area(x0, y0, x1, y0 + 1, color)?;
        if h > 1 {
            self.fill_area(x0, y1 - 1, x1, y1, color)?;
        }
        self.fill_area(x0, y0 + 1, x0 + 1, y1 - 1, color)?;
        if w > 1 {
            self.fill_area(x1 - 1, y0 + 1, x1, y1 - 1, color)?;
        }
        Ok(())
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color565)
        -> Result<(), RenderError> {
        self.circle_spans(cx, cy, radius, color, false)
    }

    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color565)
        -> Result<(), RenderError> {
        self.circle_spans(cx, cy, radius, color, true)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color565)
        -> Result<(), RenderError> {
        let a = (x0 as i64, y0 as i64);
        let b = (x1 as i64, y1 as i64);
        match clip_line(&self.target.bounding_box(), a, b) {
            Some(line) => line
                .into_styled(PrimitiveStyle::with_stroke(color.into(), 1))
                .draw(&mut self.target)
                .map_err(target_error),
            None => Ok(()),
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: &TextStyle)
        -> Result<(), RenderError> {
        let character_style: MonoTextStyle<'_, Rgb565> =
            MonoTextStyle::new(self.fonts.get(style.font), style.color.into());
        let mut canvas = GlyphCanvas {
            target: &mut self.target,
            origin: (x as i64, y as i64),
            scale: style.scale() as i64,
            rotation: style.rotation % 4,
        };
        Text::with_baseline(text, Point::zero(), character_style, Baseline::Top)
            .draw(&mut canvas)
            .map(|_| ())
            .map_err(target_error)
    }

    fn measure_text(&self, x: i32, y: i32, text: &str, style: &TextStyle) -> Bounds {
        let character_style: MonoTextStyle<'_, Rgb565> =
            MonoTextStyle::new(self.fonts.get(style.font), style.color.into());
        let metrics = character_style.measure_string(text, Point::zero(), Baseline::Top);
        let size = metrics.bounding_box.size;
        let scale = style.scale();
        rotated_bounds(
            x,
            y,
            (size.width as i32).saturating_mul(scale),
            (size.height as i32).saturating_mul(scale),
            style.rotation,
        )
    }
}

/// Draw target that magnifies and rotates upright glyph pixels
///
/// Text is drawn at the glyph-space origin; each pixel becomes a
/// `scale` x `scale` block, turned clockwise around `origin`.
struct GlyphCanvas<'a, D> {
    target: &'a mut D,
    origin: (i64, i64),
    scale: i64,
    rotation: u8,
}

impl<D> GlyphCanvas<'_, D> {
    /// Map one glyph-space cell to its screen-space cell
    fn rotate(&self, x: i64, y: i64) -> (i64, i64) {
        let (rx, ry) = match self.rotation {
            0 => (x, y),
            1 => (-1 - y, x),
            2 => (-1 - x, -1 - y),
            _ => (y, -1 - x),
        };
        (self.origin.0 + rx, self.origin.1 + ry)
    }

    /// Screen-space block of one glyph pixel as a half-open area
    fn block(&self, point: Point) -> (i64, i64, i64, i64) {
        let x0 = point.x as i64 * self.scale;
        let y0 = point.y as i64 * self.scale;
        let a = self.rotate(x0, y0);
        let b = self.rotate(x0 + self.scale - 1, y0 + self.scale - 1);
        (a.0.min(b.0), a.1.min(b.1), a.0.max(b.0) + 1, a.1.max(b.1) + 1)
    }
}

impl<D: DrawTarget<Color = Rgb565>> Dimensions for GlyphCanvas<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        // Glyph space is unbounded; clipping happens per block
        Rectangle::new(Point::new(-(1 << 15), -(1 << 15)), Size::new(1 << 16, 1 << 16))
    }
}

impl<D: DrawTarget<Color = Rgb565>> DrawTarget for GlyphCanvas<'_, D> {
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.target.bounding_box();
        for Pixel(point, color) in pixels {
            let (x0, y0, x1, y1) = self.block(point);
            if let Some(area) = clip_area(&bounds, x0, y0, x1, y1) {
                self.target.fill_solid(&area, color)?;
            }
        }
        Ok(())
    }
}
