//! Attribute table
//!
//! One `i32` per lowercase letter. Commands read their parameters from
//! here, so a value set once stays the default for every later command
//! until it is overwritten or the session is zeroed.

use touchwire_protocol::ATTRIBUTE_COUNT;

/// Letter-indexed attribute store
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AttributeTable {
    values: [i32; ATTRIBUTE_COUNT],
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeTable {
    /// Create a table with every attribute at 0
    pub const fn new() -> Self {
        Self {
            values: [0; ATTRIBUTE_COUNT],
        }
    }

    /// Read the attribute for `letter` (either case)
    ///
    /// Anything that is not an ASCII letter reads as 0.
    pub fn get(&self, letter: u8) -> i32 {
        slot_of(letter)
            .map(|slot| self.values[slot])
            .unwrap_or(0)
    }

    /// Set the attribute for `letter` (either case); other bytes are ignored
    pub fn set(&mut self, letter: u8, value: i32) {
        if let Some(slot) = slot_of(letter) {
            self.values[slot] = value;
        }
    }

    /// Set an attribute by slot index (0 = `a`)
    pub fn set_slot(&mut self, slot: u8, value: i32) {
        if let Some(entry) = self.values.get_mut(slot as usize) {
            *entry = value;
        }
    }

    /// Reset every attribute to 0
    pub fn clear(&mut self) {
        self.values = [0; ATTRIBUTE_COUNT];
    }

    /// All values in letter order
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }
}

fn slot_of(letter: u8) -> Option<usize> {
    match letter {
        b'a'..=b'z' => Some((letter - b'a') as usize),
        b'A'..=b'Z' => Some((letter - b'A') as usize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_zero() {
        let table = AttributeTable::new();
        assert!(table.as_slice().iter().all(|&v| v == 0));
        assert_eq!(table.get(b'x'), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut table = AttributeTable::new();
        table.set(b'x', 120);
        table.set(b'C', 0xF800);
        assert_eq!(table.get(b'x'), 120);
        assert_eq!(table.get(b'X'), 120);
        assert_eq!(table.get(b'c'), 0xF800);
    }

    #[test]
    fn test_set_slot() {
        let mut table = AttributeTable::new();
        table.set_slot(25, -4);
        assert_eq!(table.get(b'z'), -4);
        // Out of range is ignored
        table.set_slot(26, 9);
        assert_eq!(table.as_slice().len(), ATTRIBUTE_COUNT);
    }

    #[test]
    fn test_non_letter_reads_zero() {
        let mut table = AttributeTable::new();
        table.set(b'#', 5);
        assert_eq!(table.get(b'#'), 0);
    }

    #[test]
    fn test_clear() {
        let mut table = AttributeTable::new();
        table.set(b'w', 40);
        table.clear();
        assert_eq!(table.get(b'w'), 0);
    }
}
