//! Supplementary view configurations keyed by kind.

use std::collections::HashMap;

use horizon_datasource_core::logging::targets;

use crate::configuration::SupplementaryConfiguration;
use crate::error::{fatal, DataSourceError, Result};

/// Maps each supplementary kind to its configuration.
///
/// There is at most one configuration per kind. The registry owns the
/// configurations, so the reuse identifiers the registrar assigns are written
/// into the single copy that later lookups see.
pub struct ConfigurationRegistry<V> {
    entries: HashMap<String, SupplementaryConfiguration<V>>,
}

impl<V> Default for ConfigurationRegistry<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> ConfigurationRegistry<V> {
    /// Builds a registry from `configurations`.
    ///
    /// # Panics
    ///
    /// Panics with [`DataSourceError::DuplicateKind`] if two configurations
    /// share a kind.
    pub fn new(configurations: impl IntoIterator<Item = SupplementaryConfiguration<V>>) -> Self {
        let mut registry = Self::default();
        for configuration in configurations {
            if let Err(error) = registry.register(configuration) {
                fatal(error);
            }
        }
        registry
    }

    /// Adds a configuration for a kind that is not registered yet.
    ///
    /// Unlike [`ConfigurationRegistry::new`], a duplicate kind here is
    /// reported as an error and the registry is left unchanged.
    pub fn register(&mut self, configuration: SupplementaryConfiguration<V>) -> Result<()> {
        if self.entries.contains_key(configuration.kind()) {
            return Err(DataSourceError::duplicate_kind(configuration.kind()));
        }
        tracing::trace!(target: targets::ENGINE, kind = configuration.kind(), "supplementary kind registered");
        self.entries
            .insert(configuration.kind().to_string(), configuration);
        Ok(())
    }

    /// Replaces the configuration for the configuration's kind, or adds it if
    /// the kind is new. Returns the previous configuration.
    ///
    /// A reuse identifier carried by the new configuration is kept as is;
    /// the registry does not copy identifiers across replacements.
    pub fn update(
        &mut self,
        configuration: SupplementaryConfiguration<V>,
    ) -> Option<SupplementaryConfiguration<V>> {
        self.entries
            .insert(configuration.kind().to_string(), configuration)
    }

    /// Returns the configuration for `kind`.
    pub fn lookup(&self, kind: &str) -> Option<&SupplementaryConfiguration<V>> {
        self.entries.get(kind)
    }

    /// Returns the configuration for `kind` mutably.
    pub fn lookup_mut(&mut self, kind: &str) -> Option<&mut SupplementaryConfiguration<V>> {
        self.entries.get_mut(kind)
    }

    /// Removes and returns the configuration for `kind`.
    pub fn remove(&mut self, kind: &str) -> Option<SupplementaryConfiguration<V>> {
        self.entries.remove(kind)
    }

    /// Returns `true` if `kind` has a configuration.
    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Returns the registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Returns the number of registered kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no kind is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> std::fmt::Debug for ConfigurationRegistry<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
