//! The binding engine.
//!
//! [`BindingEngine`] answers the queries a virtualized list or grid makes of
//! its data source. Every query first offers the attached
//! [`DataSourceDelegate`] a chance to answer; only when the delegate declines
//! does the engine fall back to its [`ItemStore`] and configurations.
//!
//! # Example
//!
//! ```
//! use horizon_datasource::prelude::*;
//!
//! #[derive(Default)]
//! struct Labels;
//!
//! impl ViewHost for Labels {
//!     type View = String;
//!
//!     fn register_template(&mut self, _: &TemplateSource, _: &ReuseId, _: Option<&str>) {}
//!
//!     fn dequeue_cell(&mut self, _: &ReuseId, _: Address) -> String {
//!         String::new()
//!     }
//!
//!     fn dequeue_supplementary(&mut self, _: &str, _: &ReuseId, _: Address) -> String {
//!         String::new()
//!     }
//!
//!     fn placeholder_supplementary(&mut self, _: &str, _: Address) -> String {
//!         String::new()
//!     }
//! }
//!
//! let cells = CellConfiguration::new(ViewClass::named("Label"))
//!     .with_presenter(|label: &mut String, item: &&str| label.push_str(item));
//!
//! let mut engine = BindingEngine::new(vec![vec!["a", "b", "c"], vec!["d", "e"]], cells);
//! engine.move_from(Address::new(0, 1), Address::new(1, 2))?;
//!
//! let mut host = Labels;
//! assert_eq!(engine.cell_for(&mut host, Address::new(1, 2))?, "b");
//! assert_eq!(engine.item_count(0)?, 2);
//! # Ok::<(), horizon_datasource::DataSourceError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_datasource_core::{datasource_debug, datasource_trace, datasource_warn, PerfSpan};

use crate::address::Address;
use crate::configuration::{CellConfiguration, SupplementaryConfiguration};
use crate::delegate::DataSourceDelegate;
use crate::error::{fatal, DataSourceError, Result};
use crate::host::ViewHost;
use crate::options::{DataSourceOptions, MissingSupplementaryPolicy};
use crate::registrar::ReuseRegistrar;
use crate::registry::ConfigurationRegistry;
use crate::store::ItemStore;

/// A shared, optional override for engine queries.
pub type SharedDelegate<T, V> = Arc<dyn DataSourceDelegate<T, V>>;

/// Binds a sectioned [`ItemStore`] to a [`ViewHost`].
///
/// `T` is the item type and `V` the view type the host hands out.
pub struct BindingEngine<T, V> {
    items: ItemStore<T>,
    cell_configuration: Option<CellConfiguration<T, V>>,
    registry: ConfigurationRegistry<V>,
    registrar: ReuseRegistrar,
    delegate: Option<SharedDelegate<T, V>>,
    options: DataSourceOptions,
}

impl<T, V> BindingEngine<T, V> {
    /// Returns a builder for an engine with supplementary views, a delegate or
    /// non-default options.
    pub fn builder() -> BindingEngineBuilder<T, V> {
        BindingEngineBuilder::new()
    }

    /// Creates an engine over `sections` that renders cells with
    /// `cell_configuration`.
    pub fn new(sections: Vec<Vec<T>>, cell_configuration: CellConfiguration<T, V>) -> Self {
        Self::from_parts(
            ItemStore::new(sections),
            Some(cell_configuration),
            ConfigurationRegistry::default(),
            None,
            DataSourceOptions::default(),
        )
    }

    /// Creates an engine over a single section of `items`.
    pub fn with_items(items: Vec<T>, cell_configuration: CellConfiguration<T, V>) -> Self {
        Self::new(vec![items], cell_configuration)
    }

    fn from_parts(
        items: ItemStore<T>,
        cell_configuration: Option<CellConfiguration<T, V>>,
        registry: ConfigurationRegistry<V>,
        delegate: Option<SharedDelegate<T, V>>,
        options: DataSourceOptions,
    ) -> Self {
        let registrar = match &options.reuse_id_prefix {
            Some(prefix) => ReuseRegistrar::with_prefix(prefix.clone()),
            None => ReuseRegistrar::new(),
        };
        Self {
            items,
            cell_configuration,
            registry,
            registrar,
            delegate,
            options,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        if let Some(count) = self.delegate.as_ref().and_then(|d| d.section_count()) {
            datasource_trace!(count, "section count supplied by delegate");
            return count;
        }
        self.items.section_count()
    }

    /// Returns the number of items in `section`.
    pub fn item_count(&self, section: usize) -> Result<usize> {
        if let Some(count) = self.delegate.as_ref().and_then(|d| d.item_count(section)) {
            datasource_trace!(section, count, "item count supplied by delegate");
            return Ok(count);
        }
        self.items.item_count(section)
    }

    /// Returns the cell for `address`.
    ///
    /// Unless the delegate supplies the cell, the item is looked up, the cell
    /// template is registered with `host` on first use, a cell is dequeued and
    /// the presenter binds the item into it.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error if `address` does not resolve to an item.
    ///
    /// # Panics
    ///
    /// Panics if the cell has to be materialized but the engine has no cell
    /// configuration or the configuration has no template source.
    pub fn cell_for(&mut self, host: &mut dyn ViewHost<View = V>, address: Address) -> Result<V> {
        if let Some(delegate) = &self.delegate {
            if let Some(view) = delegate.cell_for(host, address) {
                datasource_trace!(%address, "cell supplied by delegate");
                return Ok(view);
            }
        }

        let _perf = PerfSpan::new("cell_for");
        let item = self.items.item(address)?;
        let Some(configuration) = self.cell_configuration.as_mut() else {
            fatal(DataSourceError::MissingMaterializationSource { kind: None });
        };

        let reuse_id = self
            .registrar
            .resolve(&mut *host, configuration.registration_mut(), None);
        let mut view = host.dequeue_cell(&reuse_id, address);
        configuration.present(&mut view, item);
        Ok(view)
    }

    /// Returns the supplementary view of `kind` for `address`.
    ///
    /// Only `address.section` is meaningful to the default path; it is
    /// checked against [`BindingEngine::section_count`], so a delegate that
    /// reports more sections than the store holds still gets default headers
    /// and footers for them, and the section is handed to the presenter.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error if the section does not exist.
    ///
    /// # Panics
    ///
    /// Panics if `kind` has no configuration and the
    /// [`MissingSupplementaryPolicy`] is `Fatal`, or if the configuration has
    /// to be registered but has no template source.
    pub fn supplementary_view(
        &mut self,
        host: &mut dyn ViewHost<View = V>,
        kind: &str,
        address: Address,
    ) -> Result<V> {
        if let Some(delegate) = &self.delegate {
            if let Some(view) = delegate.supplementary_view(host, kind, address) {
                datasource_trace!(kind, %address, "supplementary view supplied by delegate");
                return Ok(view);
            }
        }

        let _perf = PerfSpan::new("supplementary_view");
        let section_count = self.section_count();
        if address.section >= section_count {
            return Err(DataSourceError::section_out_of_range(
                address.section,
                section_count,
            ));
        }

        let Some(configuration) = self.registry.lookup_mut(kind) else {
            return match self.options.missing_supplementary {
                MissingSupplementaryPolicy::Fatal => fatal(DataSourceError::UnconfiguredKind {
                    kind: kind.to_string(),
                }),
                MissingSupplementaryPolicy::Placeholder => {
                    datasource_warn!(kind, %address, "no configuration for supplementary kind, using placeholder");
                    Ok(host.placeholder_supplementary(kind, address))
                }
            };
        };

        let reuse_id = self
            .registrar
            .resolve(&mut *host, configuration.registration_mut(), Some(kind));
        let mut view = host.dequeue_supplementary(kind, &reuse_id, address);
        configuration.present(&mut view, address.section);
        Ok(view)
    }

    /// Returns whether the item at `address` may be reordered.
    ///
    /// Every item is movable unless the delegate says otherwise.
    pub fn can_move_item(&self, address: Address) -> bool {
        match self.delegate.as_ref().and_then(|d| d.can_move_item(address)) {
            Some(movable) => {
                datasource_trace!(%address, movable, "movability supplied by delegate");
                movable
            }
            None => true,
        }
    }

    /// Offers a reorder from `from` to `to` to the delegate.
    ///
    /// The engine never reorders items on its own here: without a delegate
    /// that handles the move, nothing changes and `Ok(false)` is returned.
    /// Returns `Ok(true)` when the delegate handled the move and propagates
    /// any error it reports.
    pub fn move_item(&mut self, from: Address, to: Address) -> Result<bool> {
        let Some(delegate) = self.delegate.clone() else {
            datasource_trace!(%from, %to, "move ignored without delegate");
            return Ok(false);
        };
        match delegate.move_item(&mut self.items, from, to) {
            Some(result) => {
                result?;
                datasource_trace!(%from, %to, "move handled by delegate");
                Ok(true)
            }
            None => {
                datasource_trace!(%from, %to, "move declined by delegate");
                Ok(false)
            }
        }
    }

    /// Moves the item at `source` to `destination` in the store.
    ///
    /// See [`ItemStore::move_item`] for how `destination` is interpreted.
    pub fn move_from(&mut self, source: Address, destination: Address) -> Result<()> {
        self.items.move_item(source, destination)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the item store.
    pub fn items(&self) -> &ItemStore<T> {
        &self.items
    }

    /// Returns the item store mutably.
    pub fn items_mut(&mut self) -> &mut ItemStore<T> {
        &mut self.items
    }

    /// Returns the delegate, if any.
    pub fn delegate(&self) -> Option<&SharedDelegate<T, V>> {
        self.delegate.as_ref()
    }

    /// Attaches a delegate, replacing any previous one.
    pub fn set_delegate(&mut self, delegate: SharedDelegate<T, V>) {
        self.delegate = Some(delegate);
    }

    /// Detaches the delegate.
    pub fn clear_delegate(&mut self) -> Option<SharedDelegate<T, V>> {
        self.delegate.take()
    }

    /// Returns the cell configuration, if any.
    pub fn cell_configuration(&self) -> Option<&CellConfiguration<T, V>> {
        self.cell_configuration.as_ref()
    }

    /// Replaces the cell configuration and returns the previous one.
    ///
    /// The new configuration is registered on its next use unless it already
    /// carries a reuse identifier.
    pub fn set_cell_configuration(
        &mut self,
        configuration: Option<CellConfiguration<T, V>>,
    ) -> Option<CellConfiguration<T, V>> {
        std::mem::replace(&mut self.cell_configuration, configuration)
    }

    /// Returns the supplementary configurations.
    pub fn registry(&self) -> &ConfigurationRegistry<V> {
        &self.registry
    }

    /// Returns the supplementary configurations mutably.
    pub fn registry_mut(&mut self) -> &mut ConfigurationRegistry<V> {
        &mut self.registry
    }

    /// Returns the options the engine was built with.
    pub fn options(&self) -> &DataSourceOptions {
        &self.options
    }
}

impl<T, V> fmt::Debug for BindingEngine<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingEngine")
            .field("section_count", &self.items.section_count())
            .field("total_items", &self.items.total_items())
            .field("cell_configuration", &self.cell_configuration)
            .field("registry", &self.registry)
            .field("has_delegate", &self.delegate.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Builder for [`BindingEngine`].
pub struct BindingEngineBuilder<T, V> {
    items: ItemStore<T>,
    cell_configuration: Option<CellConfiguration<T, V>>,
    supplementary: Vec<SupplementaryConfiguration<V>>,
    delegate: Option<SharedDelegate<T, V>>,
    options: DataSourceOptions,
}

impl<T, V> Default for BindingEngineBuilder<T, V> {
    fn default() -> Self {
        Self {
            items: ItemStore::empty(),
            cell_configuration: None,
            supplementary: Vec::new(),
            delegate: None,
            options: DataSourceOptions::default(),
        }
    }
}

impl<T, V> BindingEngineBuilder<T, V> {
    /// Creates a builder with no items, no configurations and no delegate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the items, either as a flat `Vec<T>` (one section), as
    /// `Vec<Vec<T>>` or as a ready [`ItemStore`].
    pub fn items(mut self, items: impl Into<ItemStore<T>>) -> Self {
        self.items = items.into();
        self
    }

    /// Sets the cell configuration.
    ///
    /// Without one, every cell must come from the delegate.
    pub fn cell_configuration(mut self, configuration: CellConfiguration<T, V>) -> Self {
        self.cell_configuration = Some(configuration);
        self
    }

    /// Adds a supplementary configuration.
    pub fn supplementary(mut self, configuration: SupplementaryConfiguration<V>) -> Self {
        self.supplementary.push(configuration);
        self
    }

    /// Adds several supplementary configurations.
    pub fn supplementary_configurations(
        mut self,
        configurations: impl IntoIterator<Item = SupplementaryConfiguration<V>>,
    ) -> Self {
        self.supplementary.extend(configurations);
        self
    }

    /// Sets the delegate.
    pub fn delegate(mut self, delegate: SharedDelegate<T, V>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Sets the options.
    pub fn options(mut self, options: DataSourceOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the engine.
    ///
    /// # Panics
    ///
    /// Panics with [`DataSourceError::DuplicateKind`] if two supplementary
    /// configurations share a kind.
    pub fn build(self) -> BindingEngine<T, V> {
        let registry = ConfigurationRegistry::new(self.supplementary);
        datasource_debug!(
            sections = self.items.section_count(),
            kinds = ?registry.kinds(),
            delegate = self.delegate.is_some(),
            "binding engine built"
        );
        BindingEngine::from_parts(
            self.items,
            self.cell_configuration,
            registry,
            self.delegate,
            self.options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{ReuseId, TemplateSource, ViewClass, SECTION_HEADER};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct TestHost {
        registered: usize,
        dequeued: usize,
    }

    impl ViewHost for TestHost {
        type View = String;

        fn register_template(&mut self, _: &TemplateSource, _: &ReuseId, _: Option<&str>) {
            self.registered += 1;
        }

        fn dequeue_cell(&mut self, reuse_id: &ReuseId, _: Address) -> String {
            self.dequeued += 1;
            format!("{reuse_id}:")
        }

        fn dequeue_supplementary(&mut self, kind: &str, _: &ReuseId, _: Address) -> String {
            self.dequeued += 1;
            format!("{kind}:")
        }

        fn placeholder_supplementary(&mut self, _: &str, _: Address) -> String {
            String::new()
        }
    }

    fn engine() -> BindingEngine<&'static str, String> {
        BindingEngine::new(
            vec![vec!["a", "b", "c"], vec!["d", "e"]],
            CellConfiguration::registered("row")
                .with_presenter(|view: &mut String, item: &&str| view.push_str(item)),
        )
    }

    #[test]
    fn test_default_counts() {
        let engine = engine();
        assert_eq!(engine.section_count(), 2);
        assert_eq!(engine.item_count(1).unwrap(), 2);
        assert!(engine.item_count(2).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_cell_for_presents_item() {
        let mut engine = engine();
        let mut host = TestHost::default();

        let view = engine.cell_for(&mut host, Address::new(1, 0)).unwrap();

        assert_eq!(view, "row:d");
        assert_eq!(host.registered, 0);
    }

    #[test]
    fn test_cell_for_out_of_range_dequeues_nothing() {
        let mut engine = engine();
        let mut host = TestHost::default();

        let err = engine.cell_for(&mut host, Address::new(0, 3)).unwrap_err();

        assert_eq!(err, DataSourceError::index_out_of_range(Address::new(0, 3), 3));
        assert_eq!(host.dequeued, 0);
    }

    #[test]
    fn test_supplementary_section_checked() {
        let mut engine = BindingEngine::<&str, String>::builder()
            .items(vec![vec!["a"]])
            .supplementary(SupplementaryConfiguration::new(
                SECTION_HEADER,
                ViewClass::named("Header"),
            ))
            .build();
        let mut host = TestHost::default();

        let err = engine
            .supplementary_view(&mut host, SECTION_HEADER, Address::section_start(1))
            .unwrap_err();

        assert_eq!(err, DataSourceError::section_out_of_range(1, 1));
        assert_eq!(host.registered, 0);
    }

    #[test]
    fn test_prefix_option_reaches_registrar() {
        let mut engine = BindingEngine::<&str, String>::builder()
            .items(vec!["a"])
            .cell_configuration(CellConfiguration::new(ViewClass::named("Row")))
            .options(DataSourceOptions::new().reuse_id_prefix("rows"))
            .build();
        let mut host = TestHost::default();

        let view = engine.cell_for(&mut host, Address::new(0, 0)).unwrap();

        assert!(view.starts_with("rows-"));
        assert!(engine
            .cell_configuration()
            .and_then(|c| c.reuse_id())
            .is_some_and(|id| id.as_str().starts_with("rows-")));
    }

    #[test]
    fn test_move_from_emits_single_signal() {
        let mut engine = engine();
        let moves = Arc::new(Mutex::new(Vec::new()));
        let moves_clone = moves.clone();
        engine
            .items()
            .signals()
            .item_moved
            .connect(move |&(from, to)| moves_clone.lock().push((from, to)));

        engine
            .move_from(Address::new(0, 1), Address::new(1, 2))
            .unwrap();

        assert_eq!(
            *moves.lock(),
            vec![(Address::new(0, 1), Address::new(1, 2))]
        );
        assert_eq!(engine.items().sections(), &[vec!["a", "c"], vec!["d", "e", "b"]]);
    }

    #[test]
    fn test_set_cell_configuration() {
        let mut engine = engine();
        let previous = engine.set_cell_configuration(Some(CellConfiguration::registered("other")));
        assert_eq!(previous.and_then(|c| c.reuse_id().cloned()), Some(ReuseId::from("row")));

        let mut host = TestHost::default();
        assert_eq!(engine.cell_for(&mut host, Address::new(0, 0)).unwrap(), "other:");
    }

    #[test]
    fn test_clear_delegate() {
        struct Fixed;
        impl DataSourceDelegate<&'static str, String> for Fixed {
            fn section_count(&self) -> Option<usize> {
                Some(9)
            }
        }

        let mut engine = engine();
        engine.set_delegate(Arc::new(Fixed));
        assert_eq!(engine.section_count(), 9);
        assert!(engine.clear_delegate().is_some());
        assert_eq!(engine.section_count(), 2);
        assert!(engine.delegate().is_none());
    }
}
