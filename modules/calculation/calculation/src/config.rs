//! Configuration for the Calculation module.
//!
//! A host passes the module its raw JSON section, found under
//! `modules.calculation.config`. A host that has no such section gets the
//! defaults; a section that does not match [`CalculationConfig`] is an error.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::limits::{ComplexityLimits, DEFAULT_MAX_OPERATIONS};

/// Name of the module section in host configuration.
pub const MODULE_NAME: &str = "calculation";

/// Configuration for the Calculation module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CalculationConfig {
    /// Maximum operations emitted for one expression; values <= 0 select
    /// the default.
    /// Default: `100`
    pub max_operations_per_expression: i64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            max_operations_per_expression: i64::try_from(DEFAULT_MAX_OPERATIONS)
                .unwrap_or(i64::MAX),
        }
    }
}

impl CalculationConfig {
    /// Effective limits for the decomposition service.
    #[must_use]
    pub fn limits(&self) -> ComplexityLimits {
        ComplexityLimits::new().with_max_operations(self.max_operations_per_expression)
    }
}

/// The module section exists but does not deserialize.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config for module '{module}': {source}")]
    InvalidConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of raw per-module sections, implemented by whatever hosts the
/// module (the CLI's layered `AppConfig`, test doubles).
pub trait ConfigProvider: Send + Sync {
    /// Raw JSON stored under `modules.<module_name>`, if present.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

/// Reads `modules.<module_name>.config` into `T`.
///
/// Anything short of a `config` object (no module entry, a non-object entry,
/// no `config` key) yields `T::default()`.
///
/// # Errors
/// Returns `ConfigError::InvalidConfig` when the `config` value does not
/// deserialize into `T`.
pub fn module_config_or_default<T: DeserializeOwned + Default>(
    provider: &dyn ConfigProvider,
    module_name: &str,
) -> Result<T, ConfigError> {
    let Some(section) = provider
        .get_module_config(module_name)
        .and_then(serde_json::Value::as_object)
        .and_then(|module| module.get("config"))
    else {
        return Ok(T::default());
    };

    T::deserialize(section).map_err(|source| ConfigError::InvalidConfig {
        module: module_name.to_owned(),
        source,
    })
}

/// Loads [`CalculationConfig`] from the host.
///
/// # Errors
/// Returns `ConfigError::InvalidConfig` if the section is present but invalid.
pub fn load_config(provider: &dyn ConfigProvider) -> Result<CalculationConfig, ConfigError> {
    module_config_or_default(provider, MODULE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct MockConfigProvider {
        modules: HashMap<String, serde_json::Value>,
    }

    impl MockConfigProvider {
        fn new() -> Self {
            Self {
                modules: HashMap::new(),
            }
        }

        fn with(mut self, name: &str, value: serde_json::Value) -> Self {
            self.modules.insert(name.to_owned(), value);
            self
        }
    }

    impl ConfigProvider for MockConfigProvider {
        fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
            self.modules.get(module_name)
        }
    }

    #[test]
    fn test_default_config() {
        let cfg = CalculationConfig::default();
        assert_eq!(cfg.max_operations_per_expression, 100);
        assert_eq!(cfg.limits(), ComplexityLimits::default());
    }

    #[test]
    fn test_non_positive_limit_falls_back() {
        for value in [0, -1] {
            let cfg = CalculationConfig {
                max_operations_per_expression: value,
            };
            assert_eq!(cfg.limits().max_operations, 100);
        }
        let cfg = CalculationConfig {
            max_operations_per_expression: 8,
        };
        assert_eq!(cfg.limits().max_operations, 8);
    }

    #[test]
    fn test_missing_module_uses_defaults() {
        let provider = MockConfigProvider::new();
        let cfg = load_config(&provider).unwrap();
        assert_eq!(cfg, CalculationConfig::default());
    }

    #[test]
    fn test_missing_config_section_uses_defaults() {
        let provider = MockConfigProvider::new().with(MODULE_NAME, json!({ "other": 1 }));
        assert_eq!(load_config(&provider).unwrap(), CalculationConfig::default());

        let provider = MockConfigProvider::new().with(MODULE_NAME, json!("not an object"));
        assert_eq!(load_config(&provider).unwrap(), CalculationConfig::default());
    }

    #[test]
    fn test_config_section() {
        let provider = MockConfigProvider::new().with(
            MODULE_NAME,
            json!({ "config": { "max_operations_per_expression": 5 } }),
        );
        let cfg = load_config(&provider).unwrap();
        assert_eq!(cfg.max_operations_per_expression, 5);

        let provider = MockConfigProvider::new().with(MODULE_NAME, json!({ "config": {} }));
        assert_eq!(load_config(&provider).unwrap(), CalculationConfig::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let provider = MockConfigProvider::new()
            .with(MODULE_NAME, json!({ "config": { "max_nesting_depth": 5 } }));
        let err = load_config(&provider).unwrap_err();
        assert!(err.to_string().contains("calculation"));
    }
}
