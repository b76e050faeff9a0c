//! Error types for the data-source engine.

use crate::address::Address;
use horizon_datasource_core::datasource_error;

/// Result type alias for data-source operations.
pub type Result<T> = std::result::Result<T, DataSourceError>;

/// Errors that can occur while reading, mutating or binding a data source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataSourceError {
    /// The section does not exist.
    #[error("section {section} is out of range (section count is {section_count})")]
    SectionOutOfRange { section: usize, section_count: usize },

    /// The section exists but the index does not resolve to an item (or, for
    /// insertion, lies past the end of the section).
    #[error("index {} is out of range for section {} ({item_count} items)", .address.index, .address.section)]
    IndexOutOfRange { address: Address, item_count: usize },

    /// Two supplementary configurations were supplied for the same kind.
    #[error("a supplementary view configuration for kind '{kind}' is already registered")]
    DuplicateKind { kind: String },

    /// A supplementary view was requested for a kind with neither a delegate
    /// override nor a registered configuration.
    #[error(
        "no supplementary view configuration is registered for kind '{kind}' and the delegate \
         did not return a view"
    )]
    UnconfiguredKind { kind: String },

    /// A template had to be registered but the configuration carries neither
    /// a view class nor a layout template.
    #[error(
        "a {} could not be registered because no view class or layout template was provided \
         and the delegate did not return a view",
        describe_kind(.kind.as_deref())
    )]
    MissingMaterializationSource { kind: Option<String> },
}

/// Broad classes of [`DataSourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// An address did not resolve to a valid section or item.
    OutOfRange,
    /// The engine was configured inconsistently.
    ConfigurationConflict,
    /// A template could not be materialized.
    MissingMaterializationSource,
}

impl DataSourceError {
    /// Create a section error.
    pub fn section_out_of_range(section: usize, section_count: usize) -> Self {
        Self::SectionOutOfRange {
            section,
            section_count,
        }
    }

    /// Create an index error.
    pub fn index_out_of_range(address: Address, item_count: usize) -> Self {
        Self::IndexOutOfRange {
            address,
            item_count,
        }
    }

    /// Create a duplicate kind error.
    pub fn duplicate_kind(kind: impl Into<String>) -> Self {
        Self::DuplicateKind { kind: kind.into() }
    }

    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SectionOutOfRange { .. } | Self::IndexOutOfRange { .. } => {
                ErrorCategory::OutOfRange
            }
            Self::DuplicateKind { .. } | Self::UnconfiguredKind { .. } => {
                ErrorCategory::ConfigurationConflict
            }
            Self::MissingMaterializationSource { .. } => ErrorCategory::MissingMaterializationSource,
        }
    }

    /// Returns `true` for address errors.
    pub fn is_out_of_range(&self) -> bool {
        self.category() == ErrorCategory::OutOfRange
    }
}

fn describe_kind(kind: Option<&str>) -> String {
    match kind {
        Some(kind) => format!("supplementary view of kind '{kind}'"),
        None => "cell".to_string(),
    }
}

/// Logs a setup precondition violation and panics with its message.
#[track_caller]
pub(crate) fn fatal(error: DataSourceError) -> ! {
    datasource_error!(category = ?error.category(), "{error}");
    panic!("{error}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            DataSourceError::section_out_of_range(3, 2).category(),
            ErrorCategory::OutOfRange
        );
        assert!(DataSourceError::index_out_of_range(Address::new(0, 9), 3).is_out_of_range());
        assert_eq!(
            DataSourceError::duplicate_kind("header").category(),
            ErrorCategory::ConfigurationConflict
        );
        assert_eq!(
            DataSourceError::UnconfiguredKind {
                kind: "footer".into()
            }
            .category(),
            ErrorCategory::ConfigurationConflict
        );
        assert_eq!(
            DataSourceError::MissingMaterializationSource { kind: None }.category(),
            ErrorCategory::MissingMaterializationSource
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            DataSourceError::index_out_of_range(Address::new(1, 5), 2).to_string(),
            "index 5 is out of range for section 1 (2 items)"
        );
        let cell = DataSourceError::MissingMaterializationSource { kind: None }.to_string();
        assert!(cell.starts_with("a cell could not be registered"));
        let header = DataSourceError::MissingMaterializationSource {
            kind: Some("header".into()),
        }
        .to_string();
        assert!(header.contains("supplementary view of kind 'header'"));
    }
}
