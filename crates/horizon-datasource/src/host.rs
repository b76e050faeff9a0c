//! The view host contract.
//!
//! A view host is the virtualized list or grid that owns the visible views
//! and recycles them. The engine only ever asks it to register a template
//! under a reuse identifier and to hand back a recycled (or fresh) view for
//! that identifier.

use crate::address::Address;
use crate::configuration::{ReuseId, TemplateSource};

/// A virtualization surface that registers and dequeues recyclable views.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use horizon_datasource::{Address, ReuseId, TemplateSource, ViewHost};
///
/// #[derive(Default)]
/// struct ConsoleHost {
///     templates: HashMap<ReuseId, TemplateSource>,
/// }
///
/// impl ViewHost for ConsoleHost {
///     type View = String;
///
///     fn register_template(&mut self, source: &TemplateSource, reuse_id: &ReuseId, _kind: Option<&str>) {
///         self.templates.insert(reuse_id.clone(), source.clone());
///     }
///
///     fn dequeue_cell(&mut self, reuse_id: &ReuseId, _address: Address) -> String {
///         self.templates[reuse_id].name().to_string()
///     }
///
///     fn dequeue_supplementary(&mut self, kind: &str, reuse_id: &ReuseId, _address: Address) -> String {
///         format!("{kind}:{}", self.templates[reuse_id].name())
///     }
///
///     fn placeholder_supplementary(&mut self, _kind: &str, _address: Address) -> String {
///         String::new()
///     }
/// }
/// ```
pub trait ViewHost {
    /// The view type the host hands out.
    type View;

    /// Registers `source` under `reuse_id`.
    ///
    /// `kind` is `None` for cells and the supplementary kind otherwise. The
    /// engine calls this at most once per configuration.
    fn register_template(&mut self, source: &TemplateSource, reuse_id: &ReuseId, kind: Option<&str>);

    /// Returns a cell for `address` built from the template registered under
    /// `reuse_id`.
    fn dequeue_cell(&mut self, reuse_id: &ReuseId, address: Address) -> Self::View;

    /// Returns a supplementary view of `kind` for `address` built from the
    /// template registered under `reuse_id`.
    fn dequeue_supplementary(&mut self, kind: &str, reuse_id: &ReuseId, address: Address)
    -> Self::View;

    /// Returns an empty view standing in for an unconfigured supplementary kind.
    ///
    /// Only called under
    /// [`MissingSupplementaryPolicy::Placeholder`](crate::MissingSupplementaryPolicy::Placeholder).
    fn placeholder_supplementary(&mut self, kind: &str, address: Address) -> Self::View;
}
