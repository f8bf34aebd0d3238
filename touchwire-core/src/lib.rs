//! Board-agnostic core of the Touchwire co-processor
//!
//! This crate contains everything between the serial link and the panel
//! that does not depend on specific hardware:
//!
//! - Attribute table, point buffer, series buffer and graph window
//! - Group table and shape registry (Z-ordered, append-only)
//! - Touch hit-testing
//! - Interpreter session (command dispatch)
//! - Terminal poll loop (one byte and one touch poll per tick)
//! - Configuration type definitions
//!
//! # Data flow
//!
//! ```text
//!  UartRx ──► Lexer ──► Session ──► ShapeRegistry ──► Renderer
//!                          │              ▲
//!                          ▼              │ hit_at
//!  UartTx ◄── dumps / TouchReport ◄── Terminal ◄── TouchSource
//! ```

#![no_std]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod attributes;
pub mod config;
pub mod group;
pub mod hit;
pub mod points;
pub mod registry;
pub mod series;
pub mod session;
pub mod shape;
pub mod terminal;

pub use attributes::AttributeTable;
pub use config::{ConfigError, DisplayGeometry, TerminalConfig, TouchConfig};
pub use group::{Group, GroupHandle, GroupTable, MAX_GROUPS};
pub use hit::Hit;
pub use points::{PointBuffer, MAX_POINTS};
pub use registry::{RegistryError, ShapeRegistry, Unbound, MAX_SHAPES};
pub use series::{GraphWindow, SeriesBuffer, MAX_SERIES_VALUES, MAX_WINDOW};
pub use session::Session;
pub use shape::{Shape, ShapeKind, TextShape};
pub use terminal::{Terminal, TerminalError};
