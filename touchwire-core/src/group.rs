//! Group table
//!
//! Groups give shapes a shared touch identity. The table owns every
//! group; shapes only keep a [`GroupHandle`] into it. Id 0 means "no
//! group" and is never stored.

use heapless::Vec;

use crate::registry::RegistryError;

/// Maximum distinct groups per session
pub const MAX_GROUPS: usize = 64;

/// Id that never names a group
pub const NO_GROUP_ID: i32 = 0;

/// Index of a group in its [`GroupTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupHandle(u8);

impl GroupHandle {
    /// Position in the table
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A touch group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Group {
    id: i32,
}

impl Group {
    /// Host-chosen group id, never 0
    pub fn id(&self) -> i32 {
        self.id
    }
}

/// Id to group registry, filled on first reference
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    groups: Vec<Group, MAX_GROUPS>,
}

impl GroupTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Look up an existing group
    pub fn find(&self, id: i32) -> Option<GroupHandle> {
        if id == NO_GROUP_ID {
            return None;
        }
        self.groups
            .iter()
            .position(|g| g.id == id)
            .map(|index| GroupHandle(index as u8))
    }

    /// Resolve `id` to a group, creating it on first use
    ///
    /// Id 0 resolves to `Ok(None)`.
    pub fn get_or_create(&mut self, id: i32) -> Result<Option<GroupHandle>, RegistryError> {
        if id == NO_GROUP_ID {
            return Ok(None);
        }
        if let Some(handle) = self.find(id) {
            return Ok(Some(handle));
        }
        let handle = GroupHandle(self.groups.len() as u8);
        self.groups
            .push(Group { id })
            .map_err(|_| RegistryError::GroupTableFull)?;
        debug!("group {} created", id);
        Ok(Some(handle))
    }

    /// Group behind `handle`
    pub fn get(&self, handle: GroupHandle) -> Option<&Group> {
        self.groups.get(handle.index())
    }

    /// Id of the group behind `handle`
    pub fn id_of(&self, handle: GroupHandle) -> Option<i32> {
        self.get(handle).map(Group::id)
    }

    /// Groups in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Remove every group; existing handles become stale
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_no_group() {
        let mut table = GroupTable::new();
        assert_eq!(table.get_or_create(0), Ok(None));
        assert!(table.is_empty());
    }

    #[test]
    fn test_same_id_same_group() {
        let mut table = GroupTable::new();
        let a = table.get_or_create(7).unwrap().unwrap();
        let b = table.get_or_create(7).unwrap().unwrap();
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
        assert_eq!(table.id_of(a), Some(7));
    }

    #[test]
    fn test_distinct_ids() {
        let mut table = GroupTable::new();
        let a = table.get_or_create(1).unwrap().unwrap();
        let b = table.get_or_create(-2).unwrap().unwrap();
        assert_ne!(a, b);
        assert_eq!(table.find(-2), Some(b));
        assert_eq!(table.find(3), None);
    }

    #[test]
    fn test_table_full() {
        let mut table = GroupTable::new();
        for id in 1..=MAX_GROUPS as i32 {
            table.get_or_create(id).unwrap();
        }
        assert_eq!(
            table.get_or_create(1000),
            Err(RegistryError::GroupTableFull)
        );
        // Existing ids still resolve
        assert!(table.get_or_create(5).unwrap().is_some());
    }

    #[test]
    fn test_clear() {
        let mut table = GroupTable::new();
        table.get_or_create(3).unwrap();
        table.clear();
        assert_eq!(table.find(3), None);
    }
}
