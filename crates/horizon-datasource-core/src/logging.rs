//! Logging facilities for Horizon DataSource.
//!
//! Horizon DataSource uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_datasource=debug")
//!         .init();
//!
//!     // Build data sources here...
//! }
//! ```
//!
//! Every event emitted by the workspace uses one of the targets in
//! [`targets`], so a filter such as `horizon_datasource::registrar=debug`
//! shows template registrations without the per-query noise.

/// Target names for log filtering.
pub mod targets {
    /// Item store mutations.
    pub const STORE: &str = "horizon_datasource::store";
    /// Template registration and reuse identifier assignment.
    pub const REGISTRAR: &str = "horizon_datasource::registrar";
    /// Data-source queries and delegate overrides.
    pub const ENGINE: &str = "horizon_datasource::engine";
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_datasource::signal";
    /// Performance spans.
    pub const PERF: &str = "horizon_datasource::perf";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// Wrap an operation in a `PerfSpan` to measure it with a timing-aware
/// subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Wrappers around the `tracing` macros with the engine target.
#[macro_export]
macro_rules! datasource_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: $crate::logging::targets::ENGINE, $($arg)*)
    };
}

#[macro_export]
macro_rules! datasource_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: $crate::logging::targets::ENGINE, $($arg)*)
    };
}

#[macro_export]
macro_rules! datasource_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: $crate::logging::targets::ENGINE, $($arg)*)
    };
}

#[macro_export]
macro_rules! datasource_error {
    ($($arg:tt)*) => {
        tracing::error!(target: $crate::logging::targets::ENGINE, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

    #[test]
    fn test_perf_span() {
        let _default = tracing::subscriber::set_default(
            tracing_subscriber::fmt().with_test_writer().finish(),
        );
        let _span = PerfSpan::new("test_operation");
        crate::datasource_debug!(operation = "test_operation", "inside span");
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn output(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    #[test]
    fn test_macros_use_engine_target() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_target(true)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("capture");
            crate::datasource_trace!("trace event");
            crate::datasource_debug!("debug event");
            crate::datasource_warn!("warn event");
            crate::datasource_error!("error event");
        });

        let output = capture.output();
        for event in ["trace event", "debug event", "warn event", "error event"] {
            let line = output
                .lines()
                .find(|line| line.contains(event))
                .unwrap_or_else(|| panic!("missing {event} in {output}"));
            assert!(line.contains(targets::ENGINE), "{line}");
        }
        assert!(output.contains("operation=\"capture\""), "{output}");
    }

    #[test]
    fn test_targets_share_prefix() {
        for target in [
            targets::STORE,
            targets::REGISTRAR,
            targets::ENGINE,
            targets::SIGNAL,
            targets::PERF,
        ] {
            assert!(target.starts_with("horizon_datasource::"));
        }
    }
}
