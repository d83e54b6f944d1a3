//! Layered host configuration.
//!
//! Order of precedence, lowest first:
//! 1) built-in defaults
//! 2) YAML file (`--config`)
//! 3) environment (`CALCULATION__*`, `__` separates nesting levels)
//! 4) CLI overrides

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use calculation::config::{ConfigProvider, MODULE_NAME};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "CALCULATION__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `warn` or `calculation=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
        }
    }
}

/// Host configuration: logging plus raw per-module sections shaped as
/// `modules.<name>.config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub modules: HashMap<String, serde_json::Value>,
}

impl AppConfig {
    /// Loads defaults, then the optional YAML file, then the environment.
    ///
    /// # Errors
    /// Returns an error if the file is missing or any layer fails to deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    /// Defaults plus the optional YAML file, without the environment layer.
    fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        Ok(figment)
    }

    /// Applies the `--max-operations` CLI override to the calculation module section.
    pub fn apply_max_operations(&mut self, max_operations: i64) {
        let section = self
            .modules
            .entry(MODULE_NAME.to_owned())
            .or_insert_with(|| json!({}));
        if !section.is_object() {
            *section = json!({});
        }
        if !section["config"].is_object() {
            section["config"] = json!({});
        }
        section["config"]["max_operations_per_expression"] = json!(max_operations);
    }
}

impl ConfigProvider for AppConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.modules.get(module_name)
    }
}
