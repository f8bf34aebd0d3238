//! Byte lexer for the Touchwire protocol
//!
//! The protocol is postfix: a value is written first and the letter that
//! follows says what it is for.
//!
//! ```text
//! 10x 20y 40w 50h #F800c 1i R
//! └─ literal closed by attribute letter ┘ └ command
//! ```
//!
//! - Digits accumulate into a literal in the current radix (default 10).
//!   Uppercase letters are digits too when the radix is above 10.
//! - `#` sets the radix: 16 when no literal is pending, else the literal.
//! - A lowercase letter closes the literal into that letter's attribute.
//! - An uppercase letter closes a pending literal into its lowercase
//!   attribute and, if it is a command, dispatches it.
//! - The quote delimiter toggles free-text capture for the Text command.

use heapless::Vec;

use crate::command::Command;

/// Default numeric base
pub const DEFAULT_RADIX: u32 = 10;

/// Radix selected by a bare `#`
pub const HEX_RADIX: u32 = 16;

/// Largest radix a literal can use (digits 0-9 then A-Z)
pub const MAX_RADIX: u32 = 36;

/// Byte that selects the radix
pub const RADIX_PREFIX: u8 = b'#';

/// Default free-text delimiter
pub const QUOTE_DELIMITER: u8 = b'"';

/// Maximum captured text length in bytes
pub const MAX_QUOTE_LEN: usize = 64;

/// Number of attribute slots (`a` to `z`)
pub const ATTRIBUTE_COUNT: usize = 26;

/// Lexer output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Token {
    /// A literal closed by a letter: store `value` in `slot` (0 = `a`)
    Attribute { slot: u8, value: i32 },
    /// A command byte, with the literal it closed if one was pending
    Command {
        command: Command,
        literal: Option<i32>,
    },
    /// `#` changed the radix
    Radix(u32),
    /// Unrecognized byte; any pending literal was discarded
    Ignored(u8),
}

/// Free-text capture state
#[derive(Debug, Clone)]
struct QuoteState {
    active: bool,
    /// The previous byte was the delimiter that closed a capture
    just_closed: bool,
    buffer: Vec<u8, MAX_QUOTE_LEN>,
    truncated: bool,
}

impl QuoteState {
    const fn new() -> Self {
        Self {
            active: false,
            just_closed: false,
            buffer: Vec::new(),
            truncated: false,
        }
    }

    fn toggle(&mut self) {
        if self.active {
            self.active = false;
            self.just_closed = true;
        } else {
            // Two delimiters in a row restart the capture
            if self.just_closed {
                self.clear();
            }
            self.active = true;
            self.just_closed = false;
        }
    }

    fn push(&mut self, byte: u8) {
        if self.buffer.push(byte).is_err() {
            self.truncated = true;
        }
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.truncated = false;
    }
}

/// Incremental lexer
///
/// Holds the number accumulator, radix and quote buffer. A partially
/// received literal or string simply stays here until more bytes arrive.
#[derive(Debug, Clone)]
pub struct Lexer {
    value: i32,
    radix: u32,
    in_progress: bool,
    quote: QuoteState,
    delimiter: u8,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// Create a lexer using the default quote delimiter
    pub const fn new() -> Self {
        Self::with_delimiter(QUOTE_DELIMITER)
    }

    /// Create a lexer with a custom quote delimiter
    pub const fn with_delimiter(delimiter: u8) -> Self {
        Self {
            value: 0,
            radix: DEFAULT_RADIX,
            in_progress: false,
            quote: QuoteState::new(),
            delimiter,
        }
    }

    /// Reset accumulator, radix and quote state
    pub fn reset(&mut self) {
        self.reset_number();
        self.quote = QuoteState::new();
    }

    /// Current radix
    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Literal accumulated so far, if any digit has arrived
    pub fn pending(&self) -> Option<i32> {
        self.in_progress.then_some(self.value)
    }

    /// Returns true while free text is being captured
    pub fn is_quoting(&self) -> bool {
        self.quote.active
    }

    /// Captured free text
    ///
    /// Invalid UTF-8 is cut at the first bad sequence.
    pub fn quoted(&self) -> &str {
        let bytes = self.quote.buffer.as_slice();
        match core::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }

    /// Returns true if captured text was cut at [`MAX_QUOTE_LEN`]
    pub fn quote_truncated(&self) -> bool {
        self.quote.truncated
    }

    /// Discard captured text
    pub fn clear_quote(&mut self) {
        self.quote.clear();
    }

    fn reset_number(&mut self) {
        self.value = 0;
        self.radix = DEFAULT_RADIX;
        self.in_progress = false;
    }

    /// Take the accumulator value and reset for the next literal
    fn close(&mut self) -> Option<i32> {
        let pending = self.pending();
        self.reset_number();
        pending
    }

    fn digit_value(&self, byte: u8) -> Option<u32> {
        let digit = match byte {
            b'0'..=b'9' => (byte - b'0') as u32,
            b'A'..=b'Z' => (byte - b'A') as u32 + 10,
            _ => return None,
        };
        (digit < self.radix).then_some(digit)
    }

    /// Feed a single byte to the lexer
    ///
    /// Returns `Some(token)` when the byte completes something the
    /// dispatcher must act on, `None` when it was absorbed (a digit, a
    /// delimiter or captured text).
    pub fn feed(&mut self, byte: u8) -> Option<Token> {
        if byte == self.delimiter {
            self.quote.toggle();
            return None;
        }
        self.quote.just_closed = false;

        if self.quote.active {
            self.quote.push(byte);
            return None;
        }

        if let Some(digit) = self.digit_value(byte) {
            self.value = self
                .value
                .saturating_mul(self.radix as i32)
                .saturating_add(digit as i32);
            self.in_progress = true;
            return None;
        }

        match byte {
            RADIX_PREFIX => {
                let radix = match self.value {
                    0 => HEX_RADIX,
                    n => (n as u32).clamp(2, MAX_RADIX),
                };
                self.reset_number();
                self.radix = radix;
                Some(Token::Radix(radix))
            }
            b'a'..=b'z' => {
                let value = self.close().unwrap_or(0);
                Some(Token::Attribute {
                    slot: byte - b'a',
                    value,
                })
            }
            _ => {
                let literal = self.close();
                match Command::from_byte(byte) {
                    Some(command) => Some(Token::Command { command, literal }),
                    None if byte.is_ascii_uppercase() => Some(Token::Attribute {
                        slot: byte - b'A',
                        value: literal.unwrap_or(0),
                    }),
                    None => Some(Token::Ignored(byte)),
                }
            }
        }
    }
}

/// Attribute letter for a slot index
pub fn slot_letter(slot: usize) -> char {
    (b'a' + (slot % ATTRIBUTE_COUNT) as u8) as char
}
