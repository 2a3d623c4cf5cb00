use crate::cli::OutputFormat;
use crate::query::{Clause, ClauseKey, is_valid_key};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Free-form label for the loaded profile.
    pub profile_name: String,
    /// Keys the backend understands. Empty disables unknown-key warnings.
    pub known_keys: Vec<String>,
    /// Output format used when `--format` is not given.
    pub format: Option<OutputFormat>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            profile_name: "base".to_string(),
            known_keys: Vec::new(),
            format: None,
        }
    }
}

impl QueryConfig {
    pub fn has_key_hints(&self) -> bool {
        !self.known_keys.is_empty()
    }
}

pub fn load_config(path: Option<&Path>) -> Result<QueryConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<QueryConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<QueryConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static QueryConfig {
    static DEFAULT_CONFIG: LazyLock<QueryConfig> = LazyLock::new(QueryConfig::default);
    &DEFAULT_CONFIG
}

/// Warnings for keys the profile does not know about
///
/// This helps users spot typos before the query reaches the backend.
pub fn query_warnings(clauses: &[Clause], config: &QueryConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    for key in config.known_keys.iter().filter(|k| !is_valid_key(k)) {
        warnings.push(format!(
            "Configured key '{}' can never be typed in a query",
            key
        ));
    }

    if !config.has_key_hints() {
        return warnings;
    }

    let known: HashSet<String> = config.known_keys.iter().map(|k| k.to_lowercase()).collect();
    let mut seen = HashSet::new();

    for clause in clauses {
        let ClauseKey::Field(key) = &clause.key else {
            continue;
        };
        if !known.contains(&key.to_lowercase()) && seen.insert(key.as_str()) {
            warnings.push(format!(
                "Unknown key '{}' at offset {}. Known keys are: {}",
                key,
                clause.offset_start,
                config.known_keys.join(", ")
            ));
        }
    }

    warnings
}
