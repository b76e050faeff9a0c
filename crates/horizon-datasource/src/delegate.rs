//! Selective overrides of the engine's default behavior.

use crate::address::Address;
use crate::error::Result;
use crate::host::ViewHost;
use crate::store::ItemStore;

/// Optional overrides consulted before every data-source query.
///
/// Each method is independent. Returning `Some` makes the answer
/// authoritative and the engine skips its own logic for that call, including
/// template registration. Returning `None` (the default for every method)
/// lets the engine fall back to its store and configurations.
///
/// # Example
///
/// ```
/// use horizon_datasource::{Address, DataSourceDelegate, ItemStore, Result};
///
/// /// Pins the first item of every section and routes other moves to the store.
/// struct PinFirst;
///
/// impl DataSourceDelegate<String, String> for PinFirst {
///     fn can_move_item(&self, address: Address) -> Option<bool> {
///         Some(address.index > 0)
///     }
///
///     fn move_item(
///         &self,
///         items: &mut ItemStore<String>,
///         from: Address,
///         to: Address,
///     ) -> Option<Result<()>> {
///         Some(items.move_item(from, to))
///     }
/// }
/// ```
pub trait DataSourceDelegate<T, V>: Send + Sync {
    /// Whether the item at `address` may be reordered.
    fn can_move_item(&self, address: Address) -> Option<bool> {
        let _ = address;
        None
    }

    /// Supplies the cell for `address`.
    fn cell_for(&self, host: &mut dyn ViewHost<View = V>, address: Address) -> Option<V> {
        let _ = (host, address);
        None
    }

    /// Handles a reorder from `from` to `to`.
    ///
    /// The engine performs no mutation of its own for moves; a delegate that
    /// wants the items reordered applies the change to `items`, usually with
    /// [`ItemStore::move_item`].
    fn move_item(&self, items: &mut ItemStore<T>, from: Address, to: Address) -> Option<Result<()>> {
        let _ = (items, from, to);
        None
    }

    /// Supplies the number of items in `section`.
    fn item_count(&self, section: usize) -> Option<usize> {
        let _ = section;
        None
    }

    /// Supplies the supplementary view of `kind` for `address`.
    fn supplementary_view(
        &self,
        host: &mut dyn ViewHost<View = V>,
        kind: &str,
        address: Address,
    ) -> Option<V> {
        let _ = (host, kind, address);
        None
    }

    /// Supplies the number of sections.
    fn section_count(&self) -> Option<usize> {
        None
    }
}
