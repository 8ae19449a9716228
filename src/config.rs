//! Configuration file support for component-recorder.
//!
//! Provides YAML-based configuration through `component-recorder.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

use crate::shared::{RecorderError, Result};

const CONFIG_FILENAME: &str = "component-recorder.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct RecorderConfig {
    /// Roots are the components detectors mark as explicit (default), or
    /// components nothing depends on when disabled.
    pub enable_manual_tracking_of_explicit_references: Option<bool>,
    /// Warn when detectors fill fields the recorder owns. Defaults to on in debug builds.
    pub warn_on_prepopulated_fields: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl RecorderConfig {
    pub fn manual_tracking_enabled(&self) -> bool {
        self.enable_manual_tracking_of_explicit_references.unwrap_or(true)
    }

    pub fn warn_on_prepopulated_fields(&self) -> bool {
        self.warn_on_prepopulated_fields.unwrap_or(cfg!(debug_assertions))
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<RecorderConfig> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: RecorderConfig = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<RecorderConfig>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &RecorderConfig) -> Result<()> {
    // Common misspelling that would otherwise be silently ignored
    if config.unknown_fields.contains_key("enable_manual_tracking") {
        return Err(RecorderError::Validation {
            message: "'enable_manual_tracking' is not a recognised config field.\n\n\
                      💡 Hint: Use 'enable_manual_tracking_of_explicit_references: true|false'."
                .to_string(),
        }
        .into());
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &RecorderConfig) {
    for key in config.unknown_fields.keys() {
        warn!(field = %key, "Unknown config field will be ignored");
    }
}
