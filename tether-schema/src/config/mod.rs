//! Configuration file parsing for `tether.toml`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{SchemaError, SchemaResult};

/// Default maximum number of relation hops resolved for one expand path.
pub const DEFAULT_MAX_EXPAND_DEPTH: usize = 6;

/// Default number of ids passed to a fetcher in one batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Main configuration structure for `tether.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TetherConfig {
    /// Relation expansion settings.
    #[serde(default)]
    pub expand: ExpandConfig,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,

    /// Environment-specific overrides.
    #[serde(default)]
    pub environments: HashMap<String, EnvironmentOverride>,
}

impl TetherConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SchemaResult<Self> {
        let expanded = expand_env_vars(content);

        let config: Self =
            toml::from_str(&expanded).map_err(|e| SchemaError::TomlError { source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> SchemaResult<()> {
        self.expand.validate()
    }

    /// Apply environment-specific overrides.
    pub fn with_environment(mut self, env: &str) -> SchemaResult<Self> {
        if let Some(overrides) = self.environments.remove(env) {
            if let Some(expand) = overrides.expand {
                if let Some(max_depth) = expand.max_depth {
                    self.expand.max_depth = max_depth;
                }
                if let Some(batch_size) = expand.batch_size {
                    self.expand.batch_size = batch_size;
                }
                if let Some(dedup_ids) = expand.dedup_ids {
                    self.expand.dedup_ids = dedup_ids;
                }
            }
            if let Some(debug) = overrides.debug {
                if let Some(log_expansions) = debug.log_expansions {
                    self.debug.log_expansions = log_expansions;
                }
            }
            self.validate()?;
        }
        Ok(self)
    }
}

/// Relation expansion settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExpandConfig {
    /// Maximum number of relation hops per expand path.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Number of ids passed to the fetcher per call when batching.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Remove repeated ids before fetching.
    #[serde(default)]
    pub dedup_ids: bool,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            batch_size: default_batch_size(),
            dedup_ids: false,
        }
    }
}

impl ExpandConfig {
    /// Check value ranges.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.max_depth == 0 {
            return Err(SchemaError::config("expand.max_depth must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(SchemaError::config("expand.batch_size must be at least 1"));
        }
        Ok(())
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_EXPAND_DEPTH
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

/// Debug/logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Emit a debug event for every expansion level.
    #[serde(default)]
    pub log_expansions: bool,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentOverride {
    /// Expansion overrides.
    pub expand: Option<ExpandOverride>,
    /// Debug overrides.
    pub debug: Option<DebugOverride>,
}

/// Expansion overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExpandOverride {
    /// Maximum expand depth.
    pub max_depth: Option<usize>,
    /// Fetch batch size.
    pub batch_size: Option<usize>,
    /// Id de-duplication.
    pub dedup_ids: Option<bool>,
}

/// Debug overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugOverride {
    /// Expansion logging.
    pub log_expansions: Option<bool>,
}

/// Replace `${VAR}` references with environment values; unknown variables are left as-is.
fn expand_env_vars(content: &str) -> String {
    let Ok(re) = regex_lite::Regex::new(r"\$\{([^}]+)\}") else {
        return content.to_string();
    };

    let mut result = content.to_string();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let full_match = &cap[0];

        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(full_match, &value);
        }
    }

    result
}
