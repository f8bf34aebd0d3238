//! Shape registry
//!
//! Append-only list of shapes in arrival order. Index 0 is the bottom of
//! the Z-order and the last shape is on top. Shapes are only ever removed
//! all at once, together with the group table.
//!
//! A registry may have a [`Renderer`] bound to it. Every shape added while
//! one is bound is drawn immediately.

use heapless::Vec;
use touchwire_display::{Bounds, Color565, RenderError, Renderer, TextStyle};

use crate::group::GroupTable;
use crate::points::Points;
use crate::shape::{Shape, TextShape};

/// Maximum shapes per session
pub const MAX_SHAPES: usize = 128;

/// Registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No room for another shape
    Full,
    /// No room for another group
    GroupTableFull,
}

/// Renderer type of a registry with nothing to draw on
///
/// Uninhabited, so an unbound registry never calls into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unbound {}

impl Renderer for Unbound {
    fn fill_rect(&mut self, _: i32, _: i32, _: i32, _: i32, _: Color565) -> Result<(), RenderError> {
        match *self {}
    }

    fn draw_rect(&mut self, _: i32, _: i32, _: i32, _: i32, _: Color565) -> Result<(), RenderError> {
        match *self {}
    }

    fn fill_circle(&mut self, _: i32, _: i32, _: i32, _: Color565) -> Result<(), RenderError> {
        match *self {}
    }

    fn draw_circle(&mut self, _: i32, _: i32, _: i32, _: Color565) -> Result<(), RenderError> {
        match *self {}
    }

    fn draw_line(&mut self, _: i32, _: i32, _: i32, _: i32, _: Color565) -> Result<(), RenderError> {
        match *self {}
    }

    fn draw_text(&mut self, _: i32, _: i32, _: &str, _: &TextStyle) -> Result<(), RenderError> {
        match *self {}
    }

    fn measure_text(&self, _: i32, _: i32, _: &str, _: &TextStyle) -> Bounds {
        match *self {}
    }
}

/// Z-ordered shapes and the groups they belong to
#[derive(Debug)]
pub struct ShapeRegistry<R = Unbound> {
    shapes: Vec<Shape, MAX_SHAPES>,
    groups: GroupTable,
    renderer: Option<R>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeRegistry {
    /// Create a registry with no renderer
    pub const fn new() -> Self {
        Self {
            shapes: Vec::new(),
            groups: GroupTable::new(),
            renderer: None,
        }
    }
}

impl<R: Renderer> ShapeRegistry<R> {
    /// Create a registry that draws every added shape on `renderer`
    pub fn with_renderer(renderer: R) -> Self {
        Self {
            shapes: Vec::new(),
            groups: GroupTable::new(),
            renderer: Some(renderer),
        }
    }

    /// Bind a renderer, returning the previous one
    pub fn bind(&mut self, renderer: R) -> Option<R> {
        self.renderer.replace(renderer)
    }

    /// Detach the renderer; later shapes are stored but not drawn
    pub fn unbind(&mut self) -> Option<R> {
        self.renderer.take()
    }

    /// Borrow the bound renderer
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// Borrow the bound renderer mutably
    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    /// Append a shape bound to group `group_id` (0 = no group)
    ///
    /// Returns the shape's Z index. If a renderer is bound the shape is
    /// drawn right away; a render failure is logged and the shape is kept.
    pub fn add_shape(&mut self, mut shape: Shape, group_id: i32) -> Result<usize, RegistryError> {
        if self.shapes.is_full() {
            return Err(RegistryError::Full);
        }
        let group = self.groups.get_or_create(group_id)?;
        shape.set_group(group);
        self.shapes.push(shape).map_err(|_| RegistryError::Full)?;
        let index = self.shapes.len() - 1;
        debug!("shape {} added, group {}", index, group_id);

        if let (Some(renderer), Some(shape)) = (self.renderer.as_mut(), self.shapes.last_mut()) {
            if let Err(e) = shape.draw(renderer) {
                warn!("render failed for shape {}: {}", index, e);
            }
        }
        Ok(index)
    }

    /// Add a rectangle with its top-left corner at (`x`, `y`)
    #[allow(clippy::too_many_arguments)]
    pub fn add_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color565,
        filled: bool,
        group_id: i32,
    ) -> Result<usize, RegistryError> {
        self.add_shape(Shape::rect(x, y, w, h, color, filled), group_id)
    }

    /// Add a circle centered on (`x`, `y`)
    pub fn add_circle(
        &mut self,
        x: i32,
        y: i32,
        diameter: i32,
        color: Color565,
        filled: bool,
        group_id: i32,
    ) -> Result<usize, RegistryError> {
        self.add_shape(Shape::circle(x, y, diameter, color, filled), group_id)
    }

    /// Add a polygon outline
    pub fn add_polygon(
        &mut self,
        points: Points,
        color: Color565,
        group_id: i32,
    ) -> Result<usize, RegistryError> {
        self.add_shape(Shape::polygon(points, color), group_id)
    }

    /// Add a text label; it is measured and drawn if a renderer is bound
    pub fn add_text(
        &mut self,
        text: TextShape,
        color: Color565,
        group_id: i32,
    ) -> Result<usize, RegistryError> {
        self.add_shape(Shape::text(text, color), group_id)
    }

    /// Measure every text label against the bound renderer
    pub fn measure_all(&mut self) {
        if let Some(renderer) = self.renderer.as_ref() {
            for shape in self.shapes.iter_mut() {
                shape.measure(renderer);
            }
        }
    }

    /// Redraw every shape bottom to top
    ///
    /// Stops at the first render error. Does nothing without a renderer.
    pub fn draw_all(&mut self) -> Result<(), RenderError> {
        if let Some(renderer) = self.renderer.as_mut() {
            for shape in self.shapes.iter_mut() {
                shape.draw(renderer)?;
            }
        }
        Ok(())
    }
}

impl<R> ShapeRegistry<R> {
    /// Shapes bottom to top
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Groups created so far
    pub fn groups(&self) -> &GroupTable {
        &self.groups
    }

    /// Group id of a shape, `None` if it has no group
    pub fn group_id(&self, shape: &Shape) -> Option<i32> {
        shape.group().and_then(|handle| self.groups.id_of(handle))
    }

    /// Number of shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if there are no shapes
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Remove every shape and group; the renderer stays bound
    pub fn clear_all(&mut self) {
        self.shapes.clear();
        self.groups.clear();
    }
}
