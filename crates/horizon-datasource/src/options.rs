//! Engine options.

use serde::{Deserialize, Serialize};

/// What the engine does when a supplementary view is requested for a kind
/// with no configuration and no delegate override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSupplementaryPolicy {
    /// Log the error and panic.
    #[default]
    Fatal,
    /// Log a warning and return the host's placeholder view.
    Placeholder,
}

/// Options for a [`BindingEngine`](crate::BindingEngine).
///
/// Options can be embedded in a host application's settings file:
///
/// ```
/// use horizon_datasource::{DataSourceOptions, MissingSupplementaryPolicy};
///
/// let options = DataSourceOptions::new()
///     .missing_supplementary(MissingSupplementaryPolicy::Placeholder)
///     .reuse_id_prefix("feed");
///
/// assert_eq!(options.reuse_id_prefix.as_deref(), Some("feed"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceOptions {
    /// Handling of unconfigured supplementary kinds.
    pub missing_supplementary: MissingSupplementaryPolicy,
    /// Prefix for generated reuse identifiers.
    pub reuse_id_prefix: Option<String>,
}

impl DataSourceOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the missing supplementary policy.
    pub fn missing_supplementary(mut self, policy: MissingSupplementaryPolicy) -> Self {
        self.missing_supplementary = policy;
        self
    }

    /// Set the reuse identifier prefix.
    pub fn reuse_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reuse_id_prefix = Some(prefix.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DataSourceOptions::default();
        assert_eq!(options.missing_supplementary, MissingSupplementaryPolicy::Fatal);
        assert_eq!(options.reuse_id_prefix, None);
    }

    #[test]
    fn test_toml() {
        let options: DataSourceOptions = toml::from_str(
            r#"
            missing_supplementary = "placeholder"
            reuse_id_prefix = "gallery"
            "#,
        )
        .unwrap();

        assert_eq!(
            options,
            DataSourceOptions::new()
                .missing_supplementary(MissingSupplementaryPolicy::Placeholder)
                .reuse_id_prefix("gallery")
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let options: DataSourceOptions = toml::from_str("reuse_id_prefix = \"rows\"").unwrap();
        assert_eq!(options.missing_supplementary, MissingSupplementaryPolicy::Fatal);

        let empty: DataSourceOptions = toml::from_str("").unwrap();
        assert_eq!(empty, DataSourceOptions::default());
    }

    #[test]
    fn test_json() {
        let json = serde_json::to_string(&DataSourceOptions::default()).unwrap();
        assert_eq!(json, r#"{"missing_supplementary":"fatal","reuse_id_prefix":null}"#);
    }
}
