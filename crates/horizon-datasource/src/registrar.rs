//! Lazy template registration.
//!
//! The [`ReuseRegistrar`] makes sure a view host knows a configuration's
//! template before the engine dequeues from it. The first resolution
//! generates a fresh [`ReuseId`], registers the template and writes the id
//! back into the configuration's [`Registration`]; every later resolution
//! returns the stored id without touching the host.

use horizon_datasource_core::logging::targets;
use uuid::Uuid;

use crate::configuration::{Registration, ReuseId};
use crate::error::{fatal, DataSourceError};
use crate::host::ViewHost;

/// Resolves configurations to registered reuse identifiers.
#[derive(Debug, Clone, Default)]
pub struct ReuseRegistrar {
    prefix: Option<String>,
}

impl ReuseRegistrar {
    /// Creates a registrar that generates bare UUID identifiers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registrar whose generated identifiers start with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Returns the identifier prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Generates a fresh, collision-resistant reuse identifier.
    pub fn generate(&self) -> ReuseId {
        let uuid = Uuid::new_v4();
        match &self.prefix {
            Some(prefix) => ReuseId::new(format!("{prefix}-{uuid}")),
            None => ReuseId::new(uuid.to_string()),
        }
    }

    /// Returns the reuse identifier for `registration`, registering its
    /// template with `host` first if that has not happened yet.
    ///
    /// `kind` is passed through to the host and is `None` for cells.
    ///
    /// # Panics
    ///
    /// Panics with [`DataSourceError::MissingMaterializationSource`] if the
    /// registration has neither a reuse identifier nor a template source.
    pub fn resolve<H: ViewHost + ?Sized>(
        &self,
        host: &mut H,
        registration: &mut Registration,
        kind: Option<&str>,
    ) -> ReuseId {
        if let Some(reuse_id) = registration.reuse_id() {
            return reuse_id.clone();
        }

        let Some(source) = registration.source() else {
            fatal(DataSourceError::MissingMaterializationSource {
                kind: kind.map(str::to_string),
            });
        };

        let reuse_id = self.generate();
        host.register_template(source, &reuse_id, kind);
        tracing::debug!(
            target: targets::REGISTRAR,
            reuse_id = %reuse_id,
            template = source.name(),
            kind = kind.unwrap_or("cell"),
            "registered template"
        );

        registration.assign(reuse_id.clone());
        reuse_id
    }
}
