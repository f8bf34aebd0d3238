//! Font table
//!
//! Text shapes name fonts by index. Index 0 is always the default font,
//! and any index past the end of the table resolves to it.

use heapless::Vec;

use crate::backend::RenderError;

/// Maximum fonts a renderer can register
pub const MAX_FONTS: usize = 8;

/// Append-only list of font handles
#[derive(Debug, Clone)]
pub struct FontTable<F: Copy> {
    fonts: Vec<F, MAX_FONTS>,
    default: F,
}

impl<F: Copy> FontTable<F> {
    /// Create a table whose entry 0 is `default`
    pub fn new(default: F) -> Self {
        let mut fonts = Vec::new();
        // Capacity is non-zero, the first push cannot fail
        let _ = fonts.push(default);
        Self { fonts, default }
    }

    /// Register a font, returning its index
    pub fn push(&mut self, font: F) -> Result<usize, RenderError> {
        self.fonts
            .push(font)
            .map_err(|_| RenderError::FontTableFull)?;
        Ok(self.fonts.len() - 1)
    }

    /// Resolve an index, falling back to the default font
    pub fn get(&self, index: usize) -> F {
        self.fonts.get(index).copied().unwrap_or(self.default)
    }

    /// Number of registered fonts (including the default)
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Always false; the default font is entry 0
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
