//! Configuration types for the DDL parser

use crate::error::Result;
use crate::naming::NameCase;
use serde::{Deserialize, Serialize};

/// Parser and projection configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DdlParseConfig {
    /// Case applied to field names on target schema projection
    pub name_case: NameCase,

    /// Apply table-level constraints after all columns are known, so a
    /// constraint may name a column declared later in the body
    pub resolve_forward_references: bool,
}

impl DdlParseConfig {
    /// Load configuration from a YAML document
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the document is not a valid configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a JSON document
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the document is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the output name case
    #[must_use]
    pub fn with_name_case(mut self, name_case: NameCase) -> Self {
        self.name_case = name_case;
        self
    }

    /// Enable or disable two-pass constraint resolution
    #[must_use]
    pub fn with_forward_references(mut self, enabled: bool) -> Self {
        self.resolve_forward_references = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DdlParseError;

    #[test]
    fn test_defaults() {
        let config = DdlParseConfig::default();
        assert_eq!(config.name_case, NameCase::Original);
        assert!(!config.resolve_forward_references);
    }

    #[test]
    fn test_from_yaml() {
        let config = DdlParseConfig::from_yaml_str(
            "name_case: upper\nresolve_forward_references: true\n",
        )
        .unwrap();
        assert_eq!(config.name_case, NameCase::Upper);
        assert!(config.resolve_forward_references);
    }

    #[test]
    fn test_from_json_partial() {
        let config = DdlParseConfig::from_json_str(r#"{"name_case": "lower"}"#).unwrap();
        assert_eq!(config.name_case, NameCase::Lower);
        assert!(!config.resolve_forward_references);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = DdlParseConfig::from_yaml_str("name_cse: lower\n").unwrap_err();
        assert!(matches!(err, DdlParseError::SerializationError(_)));
    }

    #[test]
    fn test_rejects_unknown_case() {
        assert!(DdlParseConfig::from_json_str(r#"{"name_case": "camel"}"#).is_err());
    }
}
