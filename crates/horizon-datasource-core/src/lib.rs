//! Core plumbing for Horizon DataSource.
//!
//! This crate provides the pieces the data-source engine builds on:
//!
//! - **Signal/Slot System**: Type-safe change notification ([`Signal`])
//! - **Logging**: `tracing` targets, performance spans and macros ([`logging`])
//!
//! # Signal Example
//!
//! ```
//! use horizon_datasource_core::Signal;
//!
//! let item_count_changed = Signal::<usize>::new();
//!
//! let conn_id = item_count_changed.connect(|count| {
//!     println!("Now showing {} items", count);
//! });
//!
//! item_count_changed.emit(12);
//! item_count_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
