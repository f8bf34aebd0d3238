//! Terminal configuration
//!
//! Board-level settings that the wire protocol cannot change: panel
//! geometry, touch calibration and a few interpreter defaults. With the
//! `serde` feature the configuration can be stored as postcard binary.

use touchwire_hal::{Rotation, TouchCalibration};
use touchwire_protocol::QUOTE_DELIMITER;

use crate::series::MAX_WINDOW;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Largest serialized configuration
pub const MAX_CONFIG_SIZE: usize = 64;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Stored version does not match [`CONFIG_VERSION`]
    VersionMismatch,
    /// Panel width or height is zero
    InvalidGeometry,
    /// Default graph window outside `1..=MAX_WINDOW`
    InvalidGraphWindow,
    /// Quote delimiter would shadow a digit, letter or command
    InvalidDelimiter,
}

/// Native panel size in pixels, before rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayGeometry {
    /// Native width in pixels
    pub width: u16,
    /// Native height in pixels
    pub height: u16,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
        }
    }
}

/// Touch controller settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// Raw reading to panel pixel scaling
    pub calibration: TouchCalibration,
    /// Panel mounting rotation
    pub rotation: Rotation,
}

/// Complete terminal configuration
///
/// [`Terminal`](crate::Terminal) refuses a configuration that fails
/// [`TerminalConfig::validate`]; a bare [`Session`](crate::Session)
/// trusts its caller to have checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerminalConfig {
    /// Layout version
    pub version: u8,
    /// Panel size
    pub display: DisplayGeometry,
    /// Touch controller settings
    pub touch: TouchConfig,
    /// Quarter turns added to every Text rotation
    pub text_rotation_offset: u8,
    /// Graph depth used when `w` is zero or negative
    pub default_graph_window: u8,
    /// Byte that toggles free-text capture
    pub quote_delimiter: u8,
    /// Send `-1@X:-1Y:-1` when the panel is released
    pub report_releases: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display: DisplayGeometry::default(),
            touch: TouchConfig::default(),
            text_rotation_offset: 0,
            default_graph_window: MAX_WINDOW as u8,
            quote_delimiter: QUOTE_DELIMITER,
            report_releases: false,
        }
    }
}

impl TerminalConfig {
    /// Check the configuration for values the terminal cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ConfigError::InvalidGeometry);
        }
        if !(1..=MAX_WINDOW).contains(&(self.default_graph_window as usize)) {
            return Err(ConfigError::InvalidGraphWindow);
        }
        let d = self.quote_delimiter;
        if d.is_ascii_alphanumeric() || d == b'#' || d == b',' || d == b'?' {
            return Err(ConfigError::InvalidDelimiter);
        }
        Ok(())
    }

    /// Serialize into `buffer` as postcard binary
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buffer).map_err(|_| ConfigError::Serialize)
    }

    /// Load and validate a postcard-serialized configuration
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }
}
