//! Renderer adapter traits and shared drawing components for Touchwire
//!
//! This crate provides:
//! - `Renderer` trait the shape registry draws through
//! - `Color565` packed color as carried by the wire protocol
//! - `TextStyle` and `Bounds` for text layout and hit areas
//! - `FontTable` with default-font fallback
//! - `GraphicsRenderer`, a `Renderer` over any `embedded-graphics` target
//!
//! # Architecture
//!
//! The interpreter never touches pixels. Each shape it accepts is handed
//! to a `Renderer` once, when it is added. Panels with an
//! `embedded-graphics` driver use [`GraphicsRenderer`]; anything else
//! implements [`Renderer`] directly.

#![no_std]

pub mod backend;
pub mod color;
pub mod font;
pub mod graphics;
pub mod text;

// Re-export key types
pub use backend::{RenderError, Renderer};
pub use color::Color565;
pub use font::{FontTable, MAX_FONTS};
pub use graphics::{GraphicsRenderer, MonoFontRef};
pub use text::{Bounds, TextStyle};
