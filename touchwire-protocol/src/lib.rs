//! Touchwire Serial Protocol
//!
//! This crate defines the text protocol a host speaks to a Touchwire
//! display/touch co-processor over a serial line. Commands are postfix:
//! values come first, the letter that follows says what they are for.
//!
//! # Protocol Overview
//!
//! ```text
//!   host ──► "10x20y40w50h#F800c1iR"  ──► device   (add a red rect, group 1)
//!   host ◄── "1@X:25Y:30\r\n"         ◄── device   (touch landed in group 1)
//! ```
//!
//! - [`lexer`] turns bytes into tokens, one byte at a time
//! - [`command`] names the command bytes
//! - [`report`] formats everything the device sends back
//! - [`script`] encodes commands on the host side
//!
//! Nothing here allocates; all buffers are fixed-capacity `heapless` types.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod lexer;
pub mod report;
pub mod script;

pub use command::Command;
pub use lexer::{Lexer, Token, ATTRIBUTE_COUNT, MAX_QUOTE_LEN, QUOTE_DELIMITER};
pub use report::{TouchReport, EOL, NO_GROUP};
pub use script::Script;
