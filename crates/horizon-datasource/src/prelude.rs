//! Prelude module for Horizon DataSource.
//!
//! ```ignore
//! use horizon_datasource::prelude::*;
//! ```

// ============================================================================
// Engine
// ============================================================================

pub use crate::engine::{BindingEngine, BindingEngineBuilder};
pub use crate::options::{DataSourceOptions, MissingSupplementaryPolicy};

// ============================================================================
// Items and Addressing
// ============================================================================

pub use crate::address::Address;
pub use crate::store::ItemStore;

// ============================================================================
// Configurations
// ============================================================================

pub use crate::configuration::{
    CellConfiguration, LayoutTemplate, ReuseId, SupplementaryConfiguration, TemplateSource,
    ViewClass,
};

// ============================================================================
// Host and Delegate Contracts
// ============================================================================

pub use crate::delegate::DataSourceDelegate;
pub use crate::host::ViewHost;

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::DataSourceError;
