//! Series buffer and rolling graph window
//!
//! Values pushed with `,` collect in a [`SeriesBuffer`]. The Graph command
//! closes the buffer into a [`GraphWindow`] that keeps only the newest
//! series, up to a depth chosen per command.

use heapless::{Deque, Vec};

/// Maximum values in one series
pub const MAX_SERIES_VALUES: usize = 32;

/// Maximum series kept in the graph window
pub const MAX_WINDOW: usize = 8;

/// One closed series
pub type Series = Vec<i32, MAX_SERIES_VALUES>;

/// Values collected for the series in progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SeriesBuffer {
    values: Series,
}

impl SeriesBuffer {
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Append a value; returns it back if the series is full
    pub fn push(&mut self, value: i32) -> Result<(), i32> {
        self.values.push(value)
    }

    /// Remove and return the series in progress
    pub fn take(&mut self) -> Series {
        core::mem::take(&mut self.values)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Newest series, oldest first
#[derive(Debug, Clone, Default)]
pub struct GraphWindow {
    series: Deque<Series, MAX_WINDOW>,
}

impl GraphWindow {
    pub const fn new() -> Self {
        Self {
            series: Deque::new(),
        }
    }

    /// Append a series, evicting the oldest until at most `depth` remain
    ///
    /// `depth` is clamped to `1..=MAX_WINDOW`.
    pub fn push(&mut self, series: Series, depth: usize) {
        let depth = depth.clamp(1, MAX_WINDOW);
        while self.series.len() >= depth {
            self.series.pop_front();
        }
        // Room was made above
        let _ = self.series.push_back(series);
    }

    /// Iterate series from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &[i32]> + '_ {
        self.series.iter().map(|s| s.as_slice())
    }

    pub fn clear(&mut self) {
        self.series.clear();
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[i32]) -> Series {
        Series::from_slice(values).unwrap()
    }

    #[test]
    fn test_series_take() {
        let mut buffer = SeriesBuffer::new();
        buffer.push(3).unwrap();
        buffer.push(-1).unwrap();
        assert_eq!(buffer.take().as_slice(), &[3, -1]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_series_overflow() {
        let mut buffer = SeriesBuffer::new();
        for i in 0..MAX_SERIES_VALUES as i32 {
            buffer.push(i).unwrap();
        }
        assert_eq!(buffer.push(100), Err(100));
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut window = GraphWindow::new();
        window.push(series(&[1]), 2);
        window.push(series(&[2]), 2);
        window.push(series(&[3]), 2);
        let kept: heapless::Vec<&[i32], 4> = window.iter().collect();
        assert_eq!(kept.as_slice(), &[&[2][..], &[3][..]]);
    }

    #[test]
    fn test_window_shrinks_to_new_depth() {
        let mut window = GraphWindow::new();
        for i in 0..5 {
            window.push(series(&[i]), 8);
        }
        window.push(series(&[9]), 1);
        assert_eq!(window.len(), 1);
        assert_eq!(window.iter().next(), Some(&[9][..]));
    }

    #[test]
    fn test_window_depth_clamped() {
        let mut window = GraphWindow::new();
        for i in 0..20 {
            window.push(series(&[i]), 100);
        }
        assert_eq!(window.len(), MAX_WINDOW);
        window.push(series(&[0]), 0);
        assert_eq!(window.len(), 1);
    }
}
