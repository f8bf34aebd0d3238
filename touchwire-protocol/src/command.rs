//! Command bytes of the Touchwire protocol

/// Commands recognized by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Reset the whole session
    Zero,
    /// Add a filled rectangle from `x y w h c i`
    Rect,
    /// Add a filled circle from `x y d c i`
    Circle,
    /// Buffer the point `x y`
    Point,
    /// Add a polygon from the buffered points, `c i`
    Polygon,
    /// Add text from the quote buffer, `x y c f s d i`
    Text,
    /// Close the current series into the graph window, depth `w`
    Graph,
    /// Push the pending literal onto the current series
    SeriesPush,
    /// Dump attributes and buffered points
    Dump,
}

// Wire format values
pub const CMD_ZERO: u8 = b'Z';
pub const CMD_RECT: u8 = b'R';
pub const CMD_CIRCLE: u8 = b'O';
pub const CMD_POINT: u8 = b'P';
pub const CMD_POLYGON: u8 = b'L';
pub const CMD_TEXT: u8 = b'T';
pub const CMD_GRAPH: u8 = b'G';
pub const CMD_SERIES_PUSH: u8 = b',';
pub const CMD_DUMP: u8 = b'?';

impl Command {
    /// Parse a command from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            CMD_ZERO => Some(Command::Zero),
            CMD_RECT => Some(Command::Rect),
            CMD_CIRCLE => Some(Command::Circle),
            CMD_POINT => Some(Command::Point),
            CMD_POLYGON => Some(Command::Polygon),
            CMD_TEXT => Some(Command::Text),
            CMD_GRAPH => Some(Command::Graph),
            CMD_SERIES_PUSH => Some(Command::SeriesPush),
            CMD_DUMP => Some(Command::Dump),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Zero => CMD_ZERO,
            Command::Rect => CMD_RECT,
            Command::Circle => CMD_CIRCLE,
            Command::Point => CMD_POINT,
            Command::Polygon => CMD_POLYGON,
            Command::Text => CMD_TEXT,
            Command::Graph => CMD_GRAPH,
            Command::SeriesPush => CMD_SERIES_PUSH,
            Command::Dump => CMD_DUMP,
        }
    }

    /// Attribute slot closed by a literal that precedes this command
    ///
    /// Letter commands close the slot of their lowercase letter; `,` and
    /// `?` close no slot.
    pub fn attribute_slot(&self) -> Option<u8> {
        let byte = self.to_byte();
        if byte.is_ascii_uppercase() {
            Some(byte - b'A')
        } else {
            None
        }
    }
}
