//! Touchwire Hardware Abstraction Layer
//!
//! This crate defines the two hardware seams the interpreter depends on:
//! the serial link to the host and the touch controller. Chip-specific
//! crates implement these traits; the core never touches a peripheral.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  touchwire-core (Terminal, Session)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  touchwire-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-io   │       │ touch driver  │
//! │ serial port   │       │ (XPT2046 ...) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`touch::TouchSource`] - Touch controller polling

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod touch;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use io::IoUart;
pub use touch::{RawPoint, Rotation, TouchCalibration, TouchSource};
pub use uart::{TxWriter, Uart, UartRx, UartTx};
