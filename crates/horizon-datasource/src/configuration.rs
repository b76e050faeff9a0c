//! View configurations: how cells and supplementary views are materialized
//! and bound to data.
//!
//! A configuration has two parts:
//!
//! - an immutable description fixed at construction: the [`TemplateSource`]
//!   the host should instantiate, the presenter that binds data into a
//!   dequeued view and, for supplementary views, the kind string;
//! - a [`Registration`] slot holding the [`ReuseId`] the template was
//!   registered under. The slot starts empty (unless the caller already
//!   registered the template with the host) and is filled exactly once by
//!   the [`ReuseRegistrar`](crate::ReuseRegistrar).

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Conventional kind for section headers.
pub const SECTION_HEADER: &str = "section-header";

/// Conventional kind for section footers.
pub const SECTION_FOOTER: &str = "section-footer";

/// An opaque identifier under which a template is registered with a view host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReuseId(String);

impl ReuseId {
    /// Wraps an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReuseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReuseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ReuseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ReuseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A reference to a view type the host can instantiate directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewClass {
    name: String,
    type_id: Option<TypeId>,
}

impl ViewClass {
    /// Creates a class reference for the Rust type `V`.
    pub fn of<V: 'static>() -> Self {
        Self {
            name: std::any::type_name::<V>().to_string(),
            type_id: Some(TypeId::of::<V>()),
        }
    }

    /// Creates a class reference the host resolves by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: None,
        }
    }

    /// Returns the class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the Rust type ID when the class was created with [`ViewClass::of`].
    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// Returns `true` if this class refers to the Rust type `V`.
    pub fn is<V: 'static>(&self) -> bool {
        self.type_id == Some(TypeId::of::<V>())
    }
}

/// A serialized layout document the host inflates into a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayoutTemplate {
    name: String,
    contents: Arc<[u8]>,
}

impl LayoutTemplate {
    /// Creates a layout template from its serialized contents.
    pub fn new(name: impl Into<String>, contents: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Creates a layout template the host loads by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Vec::<u8>::new())
    }

    /// Returns the template name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the serialized layout (empty for templates loaded by name).
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// How the host materializes a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateSource {
    /// Instantiate a view type.
    Class(ViewClass),
    /// Inflate a serialized layout.
    Layout(LayoutTemplate),
}

impl TemplateSource {
    /// Returns the class or layout name.
    pub fn name(&self) -> &str {
        match self {
            Self::Class(class) => class.name(),
            Self::Layout(layout) => layout.name(),
        }
    }
}

impl From<ViewClass> for TemplateSource {
    fn from(class: ViewClass) -> Self {
        Self::Class(class)
    }
}

impl From<LayoutTemplate> for TemplateSource {
    fn from(layout: LayoutTemplate) -> Self {
        Self::Layout(layout)
    }
}

/// The template source of a configuration and the reuse identifier it was
/// registered under, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    source: Option<TemplateSource>,
    reuse_id: Option<ReuseId>,
}

impl Registration {
    /// A registration that still has to be performed for `source`.
    pub fn pending(source: TemplateSource) -> Self {
        Self {
            source: Some(source),
            reuse_id: None,
        }
    }

    /// A registration the caller already performed with the host.
    pub fn registered(reuse_id: ReuseId) -> Self {
        Self {
            source: None,
            reuse_id: Some(reuse_id),
        }
    }

    /// A registration with nothing to materialize. Resolving it is fatal, so
    /// every view it covers must come from the delegate.
    pub fn unsourced() -> Self {
        Self::default()
    }

    /// Returns the template source.
    pub fn source(&self) -> Option<&TemplateSource> {
        self.source.as_ref()
    }

    /// Returns the assigned reuse identifier.
    pub fn reuse_id(&self) -> Option<&ReuseId> {
        self.reuse_id.as_ref()
    }

    /// Returns `true` once a reuse identifier has been assigned.
    pub fn is_registered(&self) -> bool {
        self.reuse_id.is_some()
    }

    pub(crate) fn assign(&mut self, reuse_id: ReuseId) {
        debug_assert!(self.reuse_id.is_none(), "reuse identifier assigned twice");
        self.reuse_id = Some(reuse_id);
    }
}

/// Binds an item into a dequeued cell.
pub type CellPresenter<T, V> = Arc<dyn Fn(&mut V, &T) + Send + Sync>;

/// Binds a section index into a dequeued supplementary view.
pub type SupplementaryPresenter<V> = Arc<dyn Fn(&mut V, usize) + Send + Sync>;

/// Describes how cells are materialized and bound to items.
///
/// # Example
///
/// ```
/// use horizon_datasource::{CellConfiguration, ViewClass};
///
/// struct TextCell {
///     text: String,
/// }
///
/// let configuration = CellConfiguration::<String, TextCell>::new(ViewClass::of::<TextCell>())
///     .with_presenter(|cell, item| cell.text = item.clone());
///
/// assert!(configuration.reuse_id().is_none());
/// ```
pub struct CellConfiguration<T, V> {
    registration: Registration,
    presenter: Option<CellPresenter<T, V>>,
}

impl<T, V> CellConfiguration<T, V> {
    /// Creates a configuration that registers `source` on first use.
    pub fn new(source: impl Into<TemplateSource>) -> Self {
        Self::with_registration(Registration::pending(source.into()))
    }

    /// Creates a configuration for a template the caller already registered
    /// with the host under `reuse_id`.
    pub fn registered(reuse_id: impl Into<ReuseId>) -> Self {
        Self::with_registration(Registration::registered(reuse_id.into()))
    }

    /// Creates a configuration with no template source.
    ///
    /// Cells must then be supplied by the delegate; falling back to the
    /// default path is a fatal error.
    pub fn unsourced() -> Self {
        Self::with_registration(Registration::unsourced())
    }

    fn with_registration(registration: Registration) -> Self {
        Self {
            registration,
            presenter: None,
        }
    }

    /// Sets the presenter that binds an item into a dequeued cell.
    pub fn with_presenter<F>(mut self, presenter: F) -> Self
    where
        F: Fn(&mut V, &T) + Send + Sync + 'static,
    {
        self.presenter = Some(Arc::new(presenter));
        self
    }

    /// Returns the reuse identifier, once assigned.
    pub fn reuse_id(&self) -> Option<&ReuseId> {
        self.registration.reuse_id()
    }

    /// Returns the template source.
    pub fn source(&self) -> Option<&TemplateSource> {
        self.registration.source()
    }

    /// Returns the registration state.
    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub(crate) fn registration_mut(&mut self) -> &mut Registration {
        &mut self.registration
    }

    /// Runs the presenter, if any.
    pub fn present(&self, view: &mut V, item: &T) {
        if let Some(presenter) = &self.presenter {
            presenter(view, item);
        }
    }
}

impl<T, V> Clone for CellConfiguration<T, V> {
    fn clone(&self) -> Self {
        Self {
            registration: self.registration.clone(),
            presenter: self.presenter.clone(),
        }
    }
}

impl<T, V> fmt::Debug for CellConfiguration<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellConfiguration")
            .field("registration", &self.registration)
            .field("has_presenter", &self.presenter.is_some())
            .finish()
    }
}

/// Describes how supplementary views of one kind are materialized and bound.
pub struct SupplementaryConfiguration<V> {
    kind: String,
    registration: Registration,
    presenter: Option<SupplementaryPresenter<V>>,
}

impl<V> SupplementaryConfiguration<V> {
    /// Creates a configuration for `kind` that registers `source` on first use.
    pub fn new(kind: impl Into<String>, source: impl Into<TemplateSource>) -> Self {
        Self::with_registration(kind, Registration::pending(source.into()))
    }

    /// Creates a configuration for a template the caller already registered
    /// with the host under `reuse_id`.
    pub fn registered(kind: impl Into<String>, reuse_id: impl Into<ReuseId>) -> Self {
        Self::with_registration(kind, Registration::registered(reuse_id.into()))
    }

    /// Creates a configuration for `kind` with no template source.
    pub fn unsourced(kind: impl Into<String>) -> Self {
        Self::with_registration(kind, Registration::unsourced())
    }

    fn with_registration(kind: impl Into<String>, registration: Registration) -> Self {
        Self {
            kind: kind.into(),
            registration,
            presenter: None,
        }
    }

    /// Sets the presenter that binds a section index into a dequeued view.
    pub fn with_presenter<F>(mut self, presenter: F) -> Self
    where
        F: Fn(&mut V, usize) + Send + Sync + 'static,
    {
        self.presenter = Some(Arc::new(presenter));
        self
    }

    /// Returns the kind of supplementary view this configuration covers.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns the reuse identifier, once assigned.
    pub fn reuse_id(&self) -> Option<&ReuseId> {
        self.registration.reuse_id()
    }

    /// Returns the template source.
    pub fn source(&self) -> Option<&TemplateSource> {
        self.registration.source()
    }

    /// Returns the registration state.
    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub(crate) fn registration_mut(&mut self) -> &mut Registration {
        &mut self.registration
    }

    /// Runs the presenter, if any.
    pub fn present(&self, view: &mut V, section: usize) {
        if let Some(presenter) = &self.presenter {
            presenter(view, section);
        }
    }
}

impl<V> Clone for SupplementaryConfiguration<V> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            registration: self.registration.clone(),
            presenter: self.presenter.clone(),
        }
    }
}

impl<V> fmt::Debug for SupplementaryConfiguration<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupplementaryConfiguration")
            .field("kind", &self.kind)
            .field("registration", &self.registration)
            .field("has_presenter", &self.presenter.is_some())
            .finish()
    }
}
