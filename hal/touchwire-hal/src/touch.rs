//! Touch controller abstractions
//!
//! Resistive controllers report raw ADC readings in the panel's native
//! orientation. [`TouchCalibration`] scales those into panel pixels and
//! [`Rotation`] turns panel pixels into display coordinates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw controller reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPoint {
    /// Raw X reading
    pub x: u16,
    /// Raw Y reading
    pub y: u16,
}

/// Touch controller
pub trait TouchSource {
    /// Error type for controller access
    type Error;

    /// Check if the panel is currently pressed
    fn is_touched(&mut self) -> Result<bool, Self::Error>;

    /// Read the current raw position
    ///
    /// Only meaningful while [`TouchSource::is_touched`] reports true.
    fn read_raw(&mut self) -> Result<RawPoint, Self::Error>;
}

/// Display rotation in quarter turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// Native panel orientation
    #[default]
    Deg0,
    /// Rotated 90 degrees clockwise
    Deg90,
    /// Rotated 180 degrees
    Deg180,
    /// Rotated 270 degrees clockwise
    Deg270,
}

impl Rotation {
    /// Build from a quarter-turn count; wraps modulo 4
    pub fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// Quarter-turn count (0-3)
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Returns true if width and height swap in this orientation
    pub fn is_landscape_swap(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Map a point in native panel pixels into display coordinates
    ///
    /// `panel_width` and `panel_height` are the native (unrotated) panel
    /// dimensions.
    pub fn remap(self, x: i32, y: i32, panel_width: i32, panel_height: i32) -> (i32, i32) {
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, panel_width - 1 - x),
            Rotation::Deg180 => (panel_width - 1 - x, panel_height - 1 - y),
            Rotation::Deg270 => (panel_height - 1 - y, x),
        }
    }
}

/// Raw-to-panel scaling for a resistive controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchCalibration {
    /// Raw reading at the left panel edge
    pub raw_x_min: u16,
    /// Raw reading at the right panel edge
    pub raw_x_max: u16,
    /// Raw reading at the top panel edge
    pub raw_y_min: u16,
    /// Raw reading at the bottom panel edge
    pub raw_y_max: u16,
}

impl Default for TouchCalibration {
    fn default() -> Self {
        // Typical XPT2046 on a 2.8" ILI9341 module
        Self {
            raw_x_min: 200,
            raw_x_max: 3900,
            raw_y_min: 200,
            raw_y_max: 3900,
        }
    }
}

impl TouchCalibration {
    /// Identity calibration: raw readings already are panel pixels
    pub const fn identity(panel_width: u16, panel_height: u16) -> Self {
        Self {
            raw_x_min: 0,
            raw_x_max: panel_width.saturating_sub(1),
            raw_y_min: 0,
            raw_y_max: panel_height.saturating_sub(1),
        }
    }

    /// Scale a raw reading into native panel pixels, clamped to the panel
    pub fn to_panel(&self, raw: RawPoint, panel_width: i32, panel_height: i32) -> (i32, i32) {
        (
            scale_axis(raw.x, self.raw_x_min, self.raw_x_max, panel_width),
            scale_axis(raw.y, self.raw_y_min, self.raw_y_max, panel_height),
        )
    }
}

fn scale_axis(raw: u16, min: u16, max: u16, extent: i32) -> i32 {
    if extent <= 0 {
        return 0;
    }
    let span = max as i64 - min as i64;
    if span == 0 {
        return 0;
    }
    let offset = raw as i64 - min as i64;
    let last = extent as i64 - 1;
    // Clamped to 0..extent, so the narrowing cast is lossless
    (offset * last / span).clamp(0, last) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: i32 = 240;
    const H: i32 = 320;

    #[test]
    fn test_rotation_roundtrip_turns() {
        for turns in 0..8u8 {
            assert_eq!(Rotation::from_quarter_turns(turns).quarter_turns(), turns % 4);
        }
    }

    #[test]
    fn test_remap_corners() {
        // Native top-left corner
        assert_eq!(Rotation::Deg0.remap(0, 0, W, H), (0, 0));
        assert_eq!(Rotation::Deg90.remap(0, 0, W, H), (0, W - 1));
        assert_eq!(Rotation::Deg180.remap(0, 0, W, H), (W - 1, H - 1));
        assert_eq!(Rotation::Deg270.remap(0, 0, W, H), (H - 1, 0));
    }

    #[test]
    fn test_remap_stays_in_rotated_bounds() {
        for rotation in [
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ] {
            let (dw, dh) = if rotation.is_landscape_swap() { (H, W) } else { (W, H) };
            for &(x, y) in &[(0, 0), (W - 1, 0), (0, H - 1), (W - 1, H - 1), (17, 203)] {
                let (rx, ry) = rotation.remap(x, y, W, H);
                assert!((0..dw).contains(&rx), "{:?} x out of range", rotation);
                assert!((0..dh).contains(&ry), "{:?} y out of range", rotation);
            }
        }
    }

    #[test]
    fn test_calibration_scales_and_clamps() {
        let cal = TouchCalibration {
            raw_x_min: 100,
            raw_x_max: 1100,
            raw_y_min: 100,
            raw_y_max: 2100,
        };
        assert_eq!(cal.to_panel(RawPoint { x: 100, y: 100 }, 101, 201), (0, 0));
        assert_eq!(cal.to_panel(RawPoint { x: 600, y: 1100 }, 101, 201), (50, 100));
        assert_eq!(cal.to_panel(RawPoint { x: 0, y: 4000 }, 101, 201), (0, 200));
    }

    #[test]
    fn test_identity_calibration() {
        let cal = TouchCalibration::identity(320, 240);
        assert_eq!(cal.to_panel(RawPoint { x: 45, y: 45 }, 320, 240), (45, 45));
        assert_eq!(cal.to_panel(RawPoint { x: 319, y: 239 }, 320, 240), (319, 239));
    }

    #[test]
    fn test_inverted_calibration_axis() {
        // Some modules report X descending left to right
        let cal = TouchCalibration {
            raw_x_min: 1000,
            raw_x_max: 0,
            raw_y_min: 0,
            raw_y_max: 1000,
        };
        assert_eq!(cal.to_panel(RawPoint { x: 1000, y: 0 }, 11, 11), (0, 0));
        assert_eq!(cal.to_panel(RawPoint { x: 0, y: 1000 }, 11, 11), (10, 10));
    }

    #[test]
    fn test_large_panel_does_not_overflow() {
        let cal = TouchCalibration {
            raw_x_min: 0,
            raw_x_max: 1,
            raw_y_min: 0,
            raw_y_max: 1,
        };
        assert_eq!(cal.to_panel(RawPoint { x: 65535, y: 0 }, 40000, 240), (39999, 0));
        let full = TouchCalibration::identity(u16::MAX, u16::MAX);
        let far = RawPoint { x: u16::MAX - 1, y: u16::MAX - 1 };
        assert_eq!(full.to_panel(far, 65535, 65535), (65534, 65534));
    }
}
