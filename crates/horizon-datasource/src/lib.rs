//! Horizon DataSource - sectioned data sources for virtualized list and grid views.
//!
//! A [`BindingEngine`] owns items grouped into sections and answers the
//! queries a recycling view host makes: how many sections and items there
//! are, which cell shows an item, which header or footer shows a section,
//! and whether and how items move.
//!
//! The engine talks to the outside world through two traits:
//!
//! - [`ViewHost`] registers templates under reuse identifiers and dequeues
//!   recycled views. Templates are registered lazily, once per
//!   configuration, the first time a view is needed.
//! - [`DataSourceDelegate`] may answer any query before the engine does.
//!
//! # Example
//!
//! ```
//! use horizon_datasource::prelude::*;
//! use horizon_datasource::SECTION_HEADER;
//!
//! struct Row;
//!
//! let engine = BindingEngine::<String, String>::builder()
//!     .items(vec![vec!["Alaska".to_string()], vec!["Brazil".to_string()]])
//!     .cell_configuration(CellConfiguration::new(ViewClass::of::<Row>()))
//!     .supplementary(
//!         SupplementaryConfiguration::new(SECTION_HEADER, ViewClass::named("Header"))
//!             .with_presenter(|view: &mut String, section| *view = format!("Section {section}")),
//!     )
//!     .build();
//!
//! assert_eq!(engine.section_count(), 2);
//! assert!(engine.registry().contains(SECTION_HEADER));
//! # Ok::<(), DataSourceError>(())
//! ```

pub mod address;
pub mod configuration;
pub mod delegate;
pub mod engine;
pub mod error;
pub mod host;
pub mod options;
pub mod prelude;
pub mod registrar;
pub mod registry;
pub mod store;

pub use address::Address;
pub use configuration::{
    CellConfiguration, CellPresenter, LayoutTemplate, Registration, ReuseId,
    SupplementaryConfiguration, SupplementaryPresenter, TemplateSource, ViewClass,
    SECTION_FOOTER, SECTION_HEADER,
};
pub use delegate::DataSourceDelegate;
pub use engine::{BindingEngine, BindingEngineBuilder, SharedDelegate};
pub use error::{DataSourceError, ErrorCategory, Result};
pub use host::ViewHost;
pub use options::{DataSourceOptions, MissingSupplementaryPolicy};
pub use registrar::ReuseRegistrar;
pub use registry::ConfigurationRegistry;
pub use store::{ItemStore, StoreSignals};

pub use horizon_datasource_core::{ConnectionGuard, ConnectionId, Signal};
