//! Interpreter session
//!
//! A [`Session`] owns every piece of interpreter state: lexer, attribute
//! table, point and series buffers, graph window and shape registry. Bytes
//! go in one at a time through [`Session::feed`]; anything the protocol
//! sends back (dumps) is written to the caller's `fmt::Write`.
//!
//! The interpreter is permissive. Unknown bytes are ignored, missing
//! attributes read as 0 and a full buffer drops the new item with a
//! warning. The only error `feed` reports is a failed write.

use core::fmt::{self, Write};

use touchwire_display::{Color565, Renderer};
use touchwire_protocol::report::{write_attribute_dump, write_graph_dump, write_point_dump};
use touchwire_protocol::{Command, Lexer, Token};

use crate::attributes::AttributeTable;
use crate::config::TerminalConfig;
use crate::hit::Hit;
use crate::points::PointBuffer;
use crate::registry::{RegistryError, ShapeRegistry, Unbound};
use crate::series::{GraphWindow, SeriesBuffer};
use crate::shape::TextShape;

/// Interpreter state between two Zero commands
#[derive(Debug)]
pub struct Session<R = Unbound> {
    lexer: Lexer,
    attributes: AttributeTable,
    points: PointBuffer,
    series: SeriesBuffer,
    window: GraphWindow,
    registry: ShapeRegistry<R>,
    text_rotation_offset: u8,
    default_graph_window: u8,
}

impl Session {
    /// Create a session that only tracks shapes, without drawing them
    ///
    /// `config` is used as given; check it with
    /// [`TerminalConfig::validate`] first.
    pub fn new(config: &TerminalConfig) -> Self {
        Self::with_registry(config, ShapeRegistry::new())
    }
}

impl<R: Renderer> Session<R> {
    /// Create a session that draws on `renderer`
    pub fn with_renderer(config: &TerminalConfig, renderer: R) -> Self {
        Self::with_registry(config, ShapeRegistry::with_renderer(renderer))
    }

    fn with_registry(config: &TerminalConfig, registry: ShapeRegistry<R>) -> Self {
        Self {
            lexer: Lexer::with_delimiter(config.quote_delimiter),
            attributes: AttributeTable::new(),
            points: PointBuffer::new(),
            series: SeriesBuffer::new(),
            window: GraphWindow::new(),
            registry,
            text_rotation_offset: config.text_rotation_offset,
            default_graph_window: config.default_graph_window,
        }
    }

    /// Process one byte from the host
    pub fn feed<W: Write>(&mut self, byte: u8, out: &mut W) -> fmt::Result {
        let Some(token) = self.lexer.feed(byte) else {
            return Ok(());
        };
        match token {
            Token::Attribute { slot, value } => self.attributes.set_slot(slot, value),
            Token::Radix(radix) => trace!("radix {}", radix),
            Token::Ignored(byte) => trace!("ignored byte {=u8:#x}", byte),
            Token::Command { command, literal } => return self.dispatch(command, literal, out),
        }
        Ok(())
    }

    /// Process a run of bytes, stopping at the first write error
    pub fn feed_all<W: Write>(&mut self, bytes: &[u8], out: &mut W) -> fmt::Result {
        bytes.iter().try_for_each(|&b| self.feed(b, out))
    }

    fn dispatch<W: Write>(
        &mut self,
        command: Command,
        literal: Option<i32>,
        out: &mut W,
    ) -> fmt::Result {
        trace!("command {}", command);

        // Series commands consume their literal; letters store it first
        if !matches!(command, Command::SeriesPush | Command::Graph) {
            if let (Some(value), Some(slot)) = (literal, command.attribute_slot()) {
                self.attributes.set_slot(slot, value);
            }
        }

        match command {
            Command::Zero => self.zero(),
            Command::Rect => self.add_rect(),
            Command::Circle => self.add_circle(),
            Command::Point => self.push_point(),
            Command::Polygon => self.add_polygon(),
            Command::Text => self.add_text(),
            Command::SeriesPush => self.push_series(literal.unwrap_or(0)),
            Command::Graph => {
                if let Some(value) = literal {
                    self.push_series(value);
                }
                return self.close_graph(out);
            }
            Command::Dump => return self.dump(out),
        }
        Ok(())
    }

    fn attr(&self, letter: u8) -> i32 {
        self.attributes.get(letter)
    }

    fn color(&self) -> Color565 {
        Color565::from_attribute(self.attr(b'c'))
    }

    fn zero(&mut self) {
        debug!("zero: {} shapes cleared", self.registry.len());
        self.registry.clear_all();
        self.attributes.clear();
        self.points.clear();
        self.series.clear();
        self.window.clear();
        self.lexer.reset();
    }

    fn add_rect(&mut self) {
        let result = self.registry.add_rect(
            self.attr(b'x'),
            self.attr(b'y'),
            self.attr(b'w'),
            self.attr(b'h'),
            self.color(),
            true,
            self.attr(b'i'),
        );
        report_dropped(result);
    }

    fn add_circle(&mut self) {
        let result = self.registry.add_circle(
            self.attr(b'x'),
            self.attr(b'y'),
            self.attr(b'd'),
            self.color(),
            true,
            self.attr(b'i'),
        );
        report_dropped(result);
    }

    fn push_point(&mut self) {
        let (x, y) = (self.attr(b'x'), self.attr(b'y'));
        if self.points.push(x, y).is_err() {
            warn!("point buffer full, ({}, {}) dropped", x, y);
        }
    }

    fn add_polygon(&mut self) {
        let points = self.points.take();
        let result = self
            .registry
            .add_polygon(points, self.color(), self.attr(b'i'));
        report_dropped(result);
    }

    fn add_text(&mut self) {
        if self.lexer.quote_truncated() {
            warn!("text truncated");
        }
        let size = self.attr(b's').saturating_add(1).clamp(1, u8::MAX as i32) as u8;
        let rotation = (self.attr(b'd') as i64 + self.text_rotation_offset as i64).rem_euclid(4) as u8;
        // Negative indices are past the end of any font table
        let font = usize::try_from(self.attr(b'f')).unwrap_or(usize::MAX);
        let text = TextShape::new(
            self.attr(b'x'),
            self.attr(b'y'),
            self.lexer.quoted(),
            font,
            size,
            rotation,
        );
        self.lexer.clear_quote();
        let result = self.registry.add_text(text, self.color(), self.attr(b'i'));
        report_dropped(result);
    }

    fn push_series(&mut self, value: i32) {
        if self.series.push(value).is_err() {
            warn!("series full, {} dropped", value);
        }
    }

    fn close_graph<W: Write>(&mut self, out: &mut W) -> fmt::Result {
        let w = self.attr(b'w');
        let depth = if w <= 0 {
            self.default_graph_window as usize
        } else {
            w as usize
        };
        self.window.push(self.series.take(), depth);
        write_graph_dump(out, self.window.iter())
    }

    fn dump<W: Write>(&self, out: &mut W) -> fmt::Result {
        write_attribute_dump(out, self.attributes.as_slice())?;
        write_point_dump(out, self.points.as_slice().iter().copied())
    }

    /// Borrow the shape registry mutably
    pub fn registry_mut(&mut self) -> &mut ShapeRegistry<R> {
        &mut self.registry
    }
}

impl<R> Session<R> {
    /// Attribute values set so far
    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    /// Points waiting for the next Polygon
    pub fn points(&self) -> &PointBuffer {
        &self.points
    }

    /// Values waiting for the next Graph
    pub fn series(&self) -> &SeriesBuffer {
        &self.series
    }

    /// Rolling window of closed series
    pub fn window(&self) -> &GraphWindow {
        &self.window
    }

    /// Lexer state, including any pending literal
    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// Borrow the shape registry
    pub fn registry(&self) -> &ShapeRegistry<R> {
        &self.registry
    }

    /// Hit-test a display coordinate
    pub fn hit_at(&self, px: i32, py: i32) -> Hit {
        self.registry.hit_at(px, py)
    }

    /// Group id for a display coordinate, or `-1`
    pub fn find_group_at(&self, px: i32, py: i32) -> i32 {
        self.registry.find_group_at(px, py)
    }
}

fn report_dropped(result: Result<usize, RegistryError>) {
    if let Err(e) = result {
        warn!("shape dropped: {}", e);
    }
}
