//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.vscfg/config.yaml)
//! 3. Environment variables (VSCFG_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::{RuntimeConfig, SourceConfig};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::env;
use std::fs;
use tracing::debug;

/// File name of the user configuration inside the config directory
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a new hierarchical config loader rooted at ~/.vscfg
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Directory the loader reads `config.yaml` from
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the standard config directory (~/.vscfg)
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| Error::invalid_config("Could not determine home directory"))?;

        Ok(Utf8PathBuf::from(home).join(".vscfg"))
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        // Start with embedded defaults
        let mut config = Self::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")?;

        let user_config_path = self.config_dir.join(CONFIG_FILENAME);
        if user_config_path.exists() {
            debug!("Loading user config from {}", user_config_path);
            let file_config = self.load_yaml_file::<RuntimeConfig>(&user_config_path)?;
            config = Self::merge_runtime_config(config, file_config);
        }

        config = self.apply_env_overrides(config)?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })?;

        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Merge two runtime configs (base is overridden by overlay)
    ///
    /// An overlay without sources keeps the base source list.
    fn merge_runtime_config(base: RuntimeConfig, overlay: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            sources: if overlay.sources.is_empty() {
                base.sources
            } else {
                overlay.sources
            },
            network: overlay.network,
            extensions: overlay.extensions,
            editor: overlay.editor,
            backup: overlay.backup,
        }
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(&self, mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Ok(val) = env::var("VSCFG_EDITOR_COMMAND") {
            config.editor.command = val;
        }

        if let Ok(val) = env::var("VSCFG_CONFIG_DIR") {
            config.editor.config_dir = Some(val);
        }

        if let Ok(val) = env::var("VSCFG_HTTP_USER_AGENT") {
            config.network.user_agent = val;
        }

        if let Ok(val) = env::var("VSCFG_MAX_CONCURRENT") {
            config.extensions.max_concurrent = val.parse().map_err(|_| {
                Error::invalid_config("VSCFG_MAX_CONCURRENT must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("VSCFG_MAX_RETRIES") {
            config.extensions.max_retries = val
                .parse()
                .map_err(|_| Error::invalid_config("VSCFG_MAX_RETRIES must be a valid number"))?;
        }

        if let Ok(val) = env::var("VSCFG_RETRY_DELAY_MS") {
            config.extensions.retry_delay_ms = val.parse().map_err(|_| {
                Error::invalid_config("VSCFG_RETRY_DELAY_MS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("VSCFG_INSTALL_TIMEOUT_MS") {
            config.extensions.install_timeout_ms = val.parse().map_err(|_| {
                Error::invalid_config("VSCFG_INSTALL_TIMEOUT_MS must be a valid number")
            })?;
        }

        Ok(config)
    }

    /// Check the source list is usable
    pub fn validate(config: &RuntimeConfig) -> Result<()> {
        if config.sources.is_empty() {
            return Err(Error::invalid_config("at least one source must be configured"));
        }

        let mut seen = HashSet::new();
        for source in &config.sources {
            if !seen.insert(source.name.as_str()) {
                return Err(Error::invalid_source(&source.name, "duplicate source name"));
            }
            Self::validate_source(source)?;
        }

        Ok(())
    }

    fn validate_source(source: &SourceConfig) -> Result<()> {
        let url = url::Url::parse(&source.base_url)
            .map_err(|e| Error::invalid_source(&source.name, format!("invalid base URL: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_source(
                &source.name,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if source.timeout_ms == 0 {
            return Err(Error::invalid_source(&source.name, "timeout must be non-zero"));
        }

        Ok(())
    }
}
