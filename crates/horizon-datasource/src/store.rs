//! Sectioned item storage.
//!
//! [`ItemStore<T>`] owns the two-level collection behind a data source: an
//! ordered list of sections, each an ordered list of items. Every entry point
//! validates the [`Address`] it is given against the live counts and reports
//! [`DataSourceError::SectionOutOfRange`] or
//! [`DataSourceError::IndexOutOfRange`] instead of panicking.
//!
//! Successful mutations are announced through [`StoreSignals`].

use horizon_datasource_core::logging::targets;
use horizon_datasource_core::Signal;

use crate::address::Address;
use crate::error::{DataSourceError, Result};

/// Signals emitted by an [`ItemStore`] after a mutation has been applied.
///
/// Nothing is emitted for a mutation that fails validation.
#[derive(Debug, Default)]
pub struct StoreSignals {
    /// Emitted after an item was inserted at the given address.
    pub item_inserted: Signal<Address>,
    /// Emitted after the item at the given address was removed.
    pub item_removed: Signal<Address>,
    /// Emitted after an item moved.
    /// Args: (source address, destination address)
    pub item_moved: Signal<(Address, Address)>,
    /// Emitted after an item was modified in place.
    pub item_changed: Signal<Address>,
    /// Emitted after a section was inserted at the given position.
    pub section_inserted: Signal<usize>,
    /// Emitted after the section at the given position was removed.
    pub section_removed: Signal<usize>,
    /// Emitted after the whole collection was replaced.
    pub reset: Signal<()>,
}

impl StoreSignals {
    /// Creates a new set of store signals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks or unblocks every signal in the set.
    pub fn set_blocked(&self, blocked: bool) {
        self.item_inserted.set_blocked(blocked);
        self.item_removed.set_blocked(blocked);
        self.item_moved.set_blocked(blocked);
        self.item_changed.set_blocked(blocked);
        self.section_inserted.set_blocked(blocked);
        self.section_removed.set_blocked(blocked);
        self.reset.set_blocked(blocked);
    }
}

/// An ordered collection of items grouped into ordered sections.
///
/// # Example
///
/// ```
/// use horizon_datasource::{Address, ItemStore};
///
/// let mut store = ItemStore::new(vec![vec!["a", "b", "c"], vec!["d", "e"]]);
///
/// store.move_item(Address::new(0, 1), Address::new(1, 2)).unwrap();
///
/// assert_eq!(store.sections(), &[vec!["a", "c"], vec!["d", "e", "b"]]);
/// assert_eq!(store.item_count(1).unwrap(), 3);
/// assert_eq!(store.item(Address::new(1, 2)).unwrap(), &"b");
/// ```
#[derive(Debug)]
pub struct ItemStore<T> {
    sections: Vec<Vec<T>>,
    signals: StoreSignals,
}

impl<T> Default for ItemStore<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<Vec<T>>> for ItemStore<T> {
    fn from(sections: Vec<Vec<T>>) -> Self {
        Self::new(sections)
    }
}

impl<T> From<Vec<T>> for ItemStore<T> {
    fn from(items: Vec<T>) -> Self {
        Self::single_section(items)
    }
}

impl<T> ItemStore<T> {
    /// Creates a store holding the given sections.
    pub fn new(sections: Vec<Vec<T>>) -> Self {
        Self {
            sections,
            signals: StoreSignals::new(),
        }
    }

    /// Creates a store with exactly one section containing `items`.
    pub fn single_section(items: Vec<T>) -> Self {
        Self::new(vec![items])
    }

    /// Creates a store with no sections.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the signals for this store.
    pub fn signals(&self) -> &StoreSignals {
        &self.signals
    }

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the number of items in `section`.
    pub fn item_count(&self, section: usize) -> Result<usize> {
        self.section(section).map(<[T]>::len)
    }

    /// Returns the total number of items across all sections.
    pub fn total_items(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    /// Returns `true` if no section holds any item.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// Returns the items of `section`.
    pub fn section(&self, section: usize) -> Result<&[T]> {
        self.sections
            .get(section)
            .map(Vec::as_slice)
            .ok_or_else(|| DataSourceError::section_out_of_range(section, self.sections.len()))
    }

    /// Returns all sections.
    pub fn sections(&self) -> &[Vec<T>] {
        &self.sections
    }

    /// Returns the item at `address`.
    pub fn item(&self, address: Address) -> Result<&T> {
        let items = self.section(address.section)?;
        items
            .get(address.index)
            .ok_or_else(|| DataSourceError::index_out_of_range(address, items.len()))
    }

    /// Iterates over every item together with its address, section by section.
    pub fn iter(&self) -> impl Iterator<Item = (Address, &T)> + '_ {
        self.sections.iter().enumerate().flat_map(|(section, items)| {
            items
                .iter()
                .enumerate()
                .map(move |(index, item)| (Address::new(section, index), item))
        })
    }

    /// Inserts `item` before `address.index`, shifting later items right.
    ///
    /// `address.index` may equal the section's item count to append.
    pub fn insert(&mut self, item: T, address: Address) -> Result<()> {
        let items = self.section_mut(address.section)?;
        if address.index > items.len() {
            return Err(DataSourceError::index_out_of_range(address, items.len()));
        }
        items.insert(address.index, item);

        tracing::trace!(target: targets::STORE, %address, "item inserted");
        self.signals.item_inserted.emit(address);
        Ok(())
    }

    /// Appends `item` to the end of `section` and returns its address.
    pub fn push(&mut self, section: usize, item: T) -> Result<Address> {
        let index = self.item_count(section)?;
        let address = Address::new(section, index);
        self.insert(item, address)?;
        Ok(address)
    }

    /// Removes and returns the item at `address`, shifting later items left.
    pub fn delete(&mut self, address: Address) -> Result<T> {
        let items = self.section_mut(address.section)?;
        if address.index >= items.len() {
            return Err(DataSourceError::index_out_of_range(address, items.len()));
        }
        let item = items.remove(address.index);

        tracing::trace!(target: targets::STORE, %address, "item removed");
        self.signals.item_removed.emit(address);
        Ok(item)
    }

    /// Moves the item at `from` so that it ends up at `to`.
    ///
    /// This behaves exactly like deleting the item at `from` and inserting it
    /// at `to`: `to.index` is interpreted against the section *after* the
    /// item has been removed. Moving `(0, 1)` to `(0, 2)` in `[a, b, c, d]`
    /// therefore yields `[a, c, b, d]`.
    ///
    /// The destination is checked before anything is removed, so an invalid
    /// move leaves the store unchanged.
    pub fn move_item(&mut self, from: Address, to: Address) -> Result<()> {
        let source_count = self.item_count(from.section)?;
        if from.index >= source_count {
            return Err(DataSourceError::index_out_of_range(from, source_count));
        }

        let destination_count = if to.section == from.section {
            source_count - 1
        } else {
            self.item_count(to.section)?
        };
        if to.index > destination_count {
            return Err(DataSourceError::index_out_of_range(to, destination_count));
        }

        let item = self.sections[from.section].remove(from.index);
        self.sections[to.section].insert(to.index, item);

        tracing::trace!(target: targets::STORE, %from, %to, "item moved");
        self.signals.item_moved.emit((from, to));
        Ok(())
    }

    /// Mutates the item at `address` in place and returns the closure's result.
    pub fn modify<F, R>(&mut self, address: Address, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let items = self.section_mut(address.section)?;
        let item_count = items.len();
        let item = items
            .get_mut(address.index)
            .ok_or_else(|| DataSourceError::index_out_of_range(address, item_count))?;
        let result = f(item);

        self.signals.item_changed.emit(address);
        Ok(result)
    }

    /// Appends a new section and returns its position.
    pub fn append_section(&mut self, items: Vec<T>) -> usize {
        let section = self.sections.len();
        self.sections.push(items);

        tracing::trace!(target: targets::STORE, section, "section inserted");
        self.signals.section_inserted.emit(section);
        section
    }

    /// Inserts a new section before `section`.
    ///
    /// `section` may equal the section count to append.
    pub fn insert_section(&mut self, section: usize, items: Vec<T>) -> Result<()> {
        if section > self.sections.len() {
            return Err(DataSourceError::section_out_of_range(
                section,
                self.sections.len(),
            ));
        }
        self.sections.insert(section, items);

        tracing::trace!(target: targets::STORE, section, "section inserted");
        self.signals.section_inserted.emit(section);
        Ok(())
    }

    /// Removes and returns the section at `section`.
    pub fn remove_section(&mut self, section: usize) -> Result<Vec<T>> {
        if section >= self.sections.len() {
            return Err(DataSourceError::section_out_of_range(
                section,
                self.sections.len(),
            ));
        }
        let items = self.sections.remove(section);

        tracing::trace!(target: targets::STORE, section, "section removed");
        self.signals.section_removed.emit(section);
        Ok(items)
    }

    /// Replaces every section.
    pub fn set_sections(&mut self, sections: Vec<Vec<T>>) {
        self.sections = sections;

        tracing::trace!(target: targets::STORE, sections = self.sections.len(), "store reset");
        self.signals.reset.emit(());
    }

    /// Consumes the store and returns its sections.
    pub fn into_sections(self) -> Vec<Vec<T>> {
        self.sections
    }

    fn section_mut(&mut self, section: usize) -> Result<&mut Vec<T>> {
        let section_count = self.sections.len();
        self.sections
            .get_mut(section)
            .ok_or_else(|| DataSourceError::section_out_of_range(section, section_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn letters() -> ItemStore<&'static str> {
        ItemStore::new(vec![vec!["a", "b", "c"], vec!["d", "e"]])
    }

    #[test]
    fn test_counts() {
        let store = letters();
        assert_eq!(store.section_count(), 2);
        assert_eq!(store.item_count(0).unwrap(), 3);
        assert_eq!(store.item_count(1).unwrap(), 2);
        assert_eq!(store.total_items(), 5);
        assert!(!store.is_empty());
        assert_eq!(
            store.item_count(2),
            Err(DataSourceError::section_out_of_range(2, 2))
        );
    }

    #[test]
    fn test_single_section() {
        let store = ItemStore::from(vec![1, 2, 3]);
        assert_eq!(store.section_count(), 1);
        assert_eq!(store.sections(), &[vec![1, 2, 3]]);
    }

    #[test]
    fn test_empty() {
        let store = ItemStore::<u8>::empty();
        assert_eq!(store.section_count(), 0);
        assert!(store.is_empty());
        assert!(ItemStore::new(vec![Vec::<u8>::new()]).is_empty());
    }

    #[test]
    fn test_item_lookup() {
        let store = letters();
        assert_eq!(store.item(Address::new(1, 1)).unwrap(), &"e");
        assert_eq!(
            store.item(Address::new(1, 2)),
            Err(DataSourceError::index_out_of_range(Address::new(1, 2), 2))
        );
        assert!(store.item(Address::new(5, 0)).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_insert_and_append() {
        let mut store = letters();
        store.insert("x", Address::new(0, 1)).unwrap();
        store.insert("y", Address::new(1, 2)).unwrap();

        assert_eq!(store.sections(), &[vec!["a", "x", "b", "c"], vec!["d", "e", "y"]]);
        assert!(store.insert("z", Address::new(1, 4)).is_err());
        assert!(store.insert("z", Address::new(2, 0)).is_err());
    }

    #[test]
    fn test_push() {
        let mut store = letters();
        let address = store.push(1, "f").unwrap();
        assert_eq!(address, Address::new(1, 2));
        assert_eq!(store.item(address).unwrap(), &"f");
    }

    #[test]
    fn test_delete() {
        let mut store = letters();
        assert_eq!(store.delete(Address::new(0, 0)).unwrap(), "a");
        assert_eq!(store.sections(), &[vec!["b", "c"], vec!["d", "e"]]);
        assert!(store.delete(Address::new(0, 2)).is_err());
    }

    #[test]
    fn test_insert_then_delete_restores() {
        let mut store = letters();
        store.insert("x", Address::new(1, 0)).unwrap();
        store.delete(Address::new(1, 0)).unwrap();
        assert_eq!(store.sections(), letters().sections());
    }

    #[test]
    fn test_move_across_sections() {
        let mut store = letters();
        store
            .move_item(Address::new(0, 1), Address::new(1, 2))
            .unwrap();

        assert_eq!(store.sections(), &[vec!["a", "c"], vec!["d", "e", "b"]]);
        assert_eq!(store.item_count(0).unwrap(), 2);
        assert_eq!(store.item_count(1).unwrap(), 3);
        assert_eq!(store.item(Address::new(1, 2)).unwrap(), &"b");
    }

    #[test]
    fn test_move_one_step_right_uses_post_delete_index() {
        let mut store = ItemStore::single_section(vec!["a", "b", "c", "d"]);
        store
            .move_item(Address::new(0, 1), Address::new(0, 2))
            .unwrap();
        assert_eq!(store.sections(), &[vec!["a", "c", "b", "d"]]);
    }

    #[test]
    fn test_move_to_end_of_same_section() {
        let mut store = ItemStore::single_section(vec!["a", "b", "c"]);
        store
            .move_item(Address::new(0, 0), Address::new(0, 2))
            .unwrap();
        assert_eq!(store.sections(), &[vec!["b", "c", "a"]]);

        // Past the post-delete end.
        assert!(store
            .move_item(Address::new(0, 0), Address::new(0, 3))
            .is_err());
    }

    #[test]
    fn test_failed_move_leaves_store_untouched() {
        let mut store = letters();
        let err = store
            .move_item(Address::new(0, 0), Address::new(1, 3))
            .unwrap_err();
        assert_eq!(
            err,
            DataSourceError::index_out_of_range(Address::new(1, 3), 2)
        );
        assert_eq!(store.sections(), letters().sections());

        assert!(store
            .move_item(Address::new(0, 0), Address::new(4, 0))
            .is_err());
        assert!(store
            .move_item(Address::new(0, 3), Address::new(1, 0))
            .is_err());
        assert_eq!(store.sections(), letters().sections());
    }

    #[test]
    fn test_move_round_trip() {
        let mut store = letters();
        store
            .move_item(Address::new(0, 1), Address::new(1, 2))
            .unwrap();
        store
            .move_item(Address::new(1, 2), Address::new(0, 1))
            .unwrap();
        assert_eq!(store.sections(), letters().sections());
    }

    #[test]
    fn test_modify() {
        let mut store = ItemStore::single_section(vec![String::from("draft")]);
        let len = store
            .modify(Address::new(0, 0), |item| {
                item.push_str("-final");
                item.len()
            })
            .unwrap();
        assert_eq!(len, 11);
        assert_eq!(store.item(Address::new(0, 0)).unwrap(), "draft-final");
        assert!(store.modify(Address::new(0, 1), |_| ()).is_err());
    }

    #[test]
    fn test_section_operations() {
        let mut store = letters();
        assert_eq!(store.append_section(vec!["f"]), 2);
        store.insert_section(0, vec![]).unwrap();
        assert_eq!(store.section_count(), 4);
        assert_eq!(store.item_count(0).unwrap(), 0);

        assert_eq!(store.remove_section(1).unwrap(), vec!["a", "b", "c"]);
        assert_eq!(store.sections(), &[vec![], vec!["d", "e"], vec!["f"]]);

        assert!(store.insert_section(5, vec![]).is_err());
        assert!(store.remove_section(3).is_err());
    }

    #[test]
    fn test_iter() {
        let store = letters();
        let collected: Vec<_> = store.iter().map(|(a, item)| (a.section, a.index, *item)).collect();
        assert_eq!(
            collected,
            vec![(0, 0, "a"), (0, 1, "b"), (0, 2, "c"), (1, 0, "d"), (1, 1, "e")]
        );
    }

    #[test]
    fn test_mutation_signals() {
        let mut store = letters();
        let events = Arc::new(Mutex::new(Vec::new()));

        let recv = events.clone();
        store
            .signals()
            .item_inserted
            .connect(move |address| recv.lock().push(format!("inserted {address}")));
        let recv = events.clone();
        store
            .signals()
            .item_removed
            .connect(move |address| recv.lock().push(format!("removed {address}")));
        let recv = events.clone();
        store
            .signals()
            .item_moved
            .connect(move |(from, to)| recv.lock().push(format!("moved {from} -> {to}")));

        store.insert("x", Address::new(0, 0)).unwrap();
        store.delete(Address::new(0, 0)).unwrap();
        store
            .move_item(Address::new(0, 0), Address::new(1, 0))
            .unwrap();
        // Failed mutations are silent.
        let _ = store.delete(Address::new(9, 9));

        assert_eq!(
            *events.lock(),
            vec![
                "inserted (0, 0)".to_string(),
                "removed (0, 0)".to_string(),
                "moved (0, 0) -> (1, 0)".to_string(),
            ]
        );
    }

    #[test]
    fn test_blocked_signals() {
        let mut store = letters();
        let count = Arc::new(Mutex::new(0));

        let recv = count.clone();
        store.signals().item_inserted.connect(move |_| *recv.lock() += 1);

        store.signals().set_blocked(true);
        store.push(0, "x").unwrap();
        store.signals().set_blocked(false);
        store.push(0, "y").unwrap();

        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_reset_signal() {
        let mut store = letters();
        let reset = Arc::new(Mutex::new(false));

        let recv = reset.clone();
        store.signals().reset.connect(move |_| *recv.lock() = true);

        store.set_sections(vec![vec!["z"]]);

        assert!(*reset.lock());
        assert_eq!(store.into_sections(), vec![vec!["z"]]);
    }
}
