//! Text sent back to the host
//!
//! - Touch report: `<group>@X:<x>Y:<y>` per distinct touch position
//! - `?` dump: `a=<v>, b=<v>, ... z=<v>.` then `points: (x,y) ... .`
//! - Graph dump: `<index>:<v>,<v>,...` per series, then `end`
//!
//! Every line ends with CRLF.

use core::fmt::{self, Write};

use crate::lexer::slot_letter;

/// Line terminator
pub const EOL: &str = "\r\n";

/// Group id reported when a touch hits nothing actionable
pub const NO_GROUP: i32 = -1;

/// One touch report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchReport {
    /// Group id, or [`NO_GROUP`]
    pub group: i32,
    /// Display X
    pub x: i32,
    /// Display Y
    pub y: i32,
}

impl TouchReport {
    pub const fn new(group: i32, x: i32, y: i32) -> Self {
        Self { group, x, y }
    }

    /// Write this report as a full line
    pub fn write_to<W: Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "{}@X:{}Y:{}{}", self.group, self.x, self.y, EOL)
    }

    /// Parse a report line (host side)
    ///
    /// Trailing CR/LF is accepted. Returns `None` for anything else that is
    /// not exactly `<group>@X:<x>Y:<y>`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (group, rest) = line.split_once("@X:")?;
        let (x, y) = rest.split_once("Y:")?;
        Some(Self {
            group: group.parse().ok()?,
            x: x.parse().ok()?,
            y: y.parse().ok()?,
        })
    }
}

/// Write the attribute table dump line
pub fn write_attribute_dump<W: Write>(w: &mut W, values: &[i32]) -> fmt::Result {
    for (slot, value) in values.iter().enumerate() {
        if slot > 0 {
            w.write_str(", ")?;
        }
        write!(w, "{}={}", slot_letter(slot), value)?;
    }
    write!(w, ".{}", EOL)
}

/// Write the point buffer dump line
pub fn write_point_dump<W, I>(w: &mut W, points: I) -> fmt::Result
where
    W: Write,
    I: IntoIterator<Item = (i32, i32)>,
{
    w.write_str("points:")?;
    for (x, y) in points {
        write!(w, " ({},{})", x, y)?;
    }
    write!(w, ".{}", EOL)
}

/// Write the graph window, oldest series first
pub fn write_graph_dump<'a, W, I>(w: &mut W, series: I) -> fmt::Result
where
    W: Write,
    I: IntoIterator<Item = &'a [i32]>,
{
    for (index, values) in series.into_iter().enumerate() {
        write!(w, "{}:", index)?;
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                w.write_char(',')?;
            }
            write!(w, "{}", value)?;
        }
        w.write_str(EOL)?;
    }
    write!(w, "end{}", EOL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    #[test]
    fn test_touch_report_line() {
        let mut out = String::<32>::new();
        TouchReport::new(99, 45, 45).write_to(&mut out).unwrap();
        assert_eq!(out.as_str(), "99@X:45Y:45\r\n");
    }

    #[test]
    fn test_touch_report_sentinel() {
        let mut out = String::<32>::new();
        TouchReport::new(NO_GROUP, 200, 200).write_to(&mut out).unwrap();
        assert_eq!(out.as_str(), "-1@X:200Y:200\r\n");
    }

    #[test]
    fn test_touch_report_parse() {
        assert_eq!(
            TouchReport::parse("2@X:100Y:33\r\n"),
            Some(TouchReport::new(2, 100, 33))
        );
        assert_eq!(
            TouchReport::parse("-1@X:0Y:0"),
            Some(TouchReport::new(-1, 0, 0))
        );
        assert_eq!(TouchReport::parse("Ready"), None);
        assert_eq!(TouchReport::parse("1@X:aY:2"), None);
        assert_eq!(TouchReport::parse("1@X:2"), None);
    }

    #[test]
    fn test_attribute_dump() {
        let mut values = [0i32; 26];
        values[0] = 5;
        values[25] = -3;
        let mut out = String::<256>::new();
        write_attribute_dump(&mut out, &values).unwrap();
        assert!(out.starts_with("a=5, b=0, c=0, "));
        assert!(out.ends_with("y=0, z=-3.\r\n"));
    }

    #[test]
    fn test_point_dump() {
        let mut out = String::<64>::new();
        write_point_dump(&mut out, [(10, 20), (30, 40)]).unwrap();
        assert_eq!(out.as_str(), "points: (10,20) (30,40).\r\n");
    }

    #[test]
    fn test_empty_point_dump() {
        let mut out = String::<16>::new();
        write_point_dump(&mut out, core::iter::empty()).unwrap();
        assert_eq!(out.as_str(), "points:.\r\n");
    }

    #[test]
    fn test_graph_dump() {
        let first: &[i32] = &[1, 2, 3];
        let second: &[i32] = &[];
        let third: &[i32] = &[-7];
        let mut out = String::<64>::new();
        write_graph_dump(&mut out, [first, second, third]).unwrap();
        assert_eq!(out.as_str(), "0:1,2,3\r\n1:\r\n2:-7\r\nend\r\n");
    }

    #[test]
    fn test_writer_overflow_is_reported() {
        let mut out = String::<4>::new();
        assert!(TouchReport::new(1, 2, 3).write_to(&mut out).is_err());
    }
}
