//! Host-side command encoder
//!
//! Builds protocol text for a host written in Rust. Every shape helper
//! sets all the attributes its command reads, so the output does not
//! depend on defaults left behind by earlier commands.

use core::fmt::{self, Write};

use crate::command::Command;
use crate::lexer::{QUOTE_DELIMITER, RADIX_PREFIX};

/// Protocol text writer
pub struct Script<W: Write> {
    out: W,
    delimiter: u8,
}

impl<W: Write> Script<W> {
    /// Wrap an output, quoting with the default delimiter
    pub fn new(out: W) -> Self {
        Self::with_delimiter(out, QUOTE_DELIMITER)
    }

    /// Wrap an output for a device configured with another quote delimiter
    pub fn with_delimiter(out: W, delimiter: u8) -> Self {
        Self { out, delimiter }
    }

    /// Unwrap the output
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Set attribute `letter` to a decimal value
    pub fn attr(&mut self, letter: char, value: u32) -> fmt::Result {
        write!(self.out, "{}{}", value, letter.to_ascii_lowercase())
    }

    /// Set attribute `letter` to a hexadecimal value
    pub fn hex_attr(&mut self, letter: char, value: u32) -> fmt::Result {
        write!(
            self.out,
            "{}{:X}{}",
            RADIX_PREFIX as char,
            value,
            letter.to_ascii_lowercase()
        )
    }

    /// Emit a bare command byte
    pub fn command(&mut self, command: Command) -> fmt::Result {
        self.out.write_char(command.to_byte() as char)
    }

    /// Quote free text for the next Text command
    ///
    /// Fails if the text contains the delimiter, which cannot be escaped,
    /// or if the delimiter is not a single ASCII byte.
    pub fn quote(&mut self, text: &str) -> fmt::Result {
        if !self.delimiter.is_ascii() || text.as_bytes().contains(&self.delimiter) {
            return Err(fmt::Error);
        }
        let delimiter = self.delimiter as char;
        write!(self.out, "{}{}{}", delimiter, text, delimiter)
    }

    /// Reset the remote session
    pub fn zero(&mut self) -> fmt::Result {
        self.command(Command::Zero)
    }

    /// Add a filled rectangle
    pub fn rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: u16, group: u32) -> fmt::Result {
        self.attr('x', x)?;
        self.attr('y', y)?;
        self.attr('w', w)?;
        self.attr('h', h)?;
        self.hex_attr('c', color as u32)?;
        self.attr('i', group)?;
        self.command(Command::Rect)
    }

    /// Add a filled circle centered on (`x`, `y`)
    pub fn circle(&mut self, x: u32, y: u32, diameter: u32, color: u16, group: u32) -> fmt::Result {
        self.attr('x', x)?;
        self.attr('y', y)?;
        self.attr('d', diameter)?;
        self.hex_attr('c', color as u32)?;
        self.attr('i', group)?;
        self.command(Command::Circle)
    }

    /// Buffer points and close them into a polygon
    pub fn polygon(&mut self, points: &[(u32, u32)], color: u16, group: u32) -> fmt::Result {
        for &(x, y) in points {
            self.attr('x', x)?;
            self.attr('y', y)?;
            self.command(Command::Point)?;
        }
        self.hex_attr('c', color as u32)?;
        self.attr('i', group)?;
        self.command(Command::Polygon)
    }

    /// Add a text label
    #[allow(clippy::too_many_arguments)]
    pub fn label(
        &mut self,
        x: u32,
        y: u32,
        text: &str,
        color: u16,
        font: u32,
        size: u32,
        rotation: u32,
        group: u32,
    ) -> fmt::Result {
        self.quote(text)?;
        self.attr('x', x)?;
        self.attr('y', y)?;
        self.hex_attr('c', color as u32)?;
        self.attr('f', font)?;
        // The device draws at s + 1
        self.attr('s', size.saturating_sub(1))?;
        self.attr('d', rotation)?;
        self.attr('i', group)?;
        self.command(Command::Text)
    }

    /// Push values onto the remote series and close it into the graph
    pub fn graph(&mut self, values: &[u32], window: u32) -> fmt::Result {
        self.attr('w', window)?;
        for &value in values {
            write!(self.out, "{}", value)?;
            self.command(Command::SeriesPush)?;
        }
        self.command(Command::Graph)
    }
}
