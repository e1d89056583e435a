//! Runtime configuration types for operational parameters
//!
//! These types define configuration that controls runtime behavior like
//! remote sources, network identity, extension install limits and backups.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Remote sources in priority order (primary first)
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Extension reconciliation limits
    #[serde(default)]
    pub extensions: ExtensionsConfig,

    /// Editor binary and directory settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Backup policies
    #[serde(default)]
    pub backup: BackupConfig,
}

/// A named remote endpoint hosting configuration artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceConfig {
    /// Unique source name (used by `--source`)
    pub name: String,

    /// Base URL that artifact paths are resolved against
    pub base_url: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_source_timeout")]
    pub timeout_ms: u64,
}

impl SourceConfig {
    /// Create a new source definition
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    /// Per-request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_source_timeout() -> u64 {
    10_000
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of redirects followed per fetch
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "vscfg/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
fn default_max_redirects() -> usize {
    5
}

/// Extension reconciliation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtensionsConfig {
    /// Installs running at the same time (batch size)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Retries after the first failed install attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between install attempts in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Timeout for a single install invocation in milliseconds
    #[serde(default = "default_install_timeout")]
    pub install_timeout_ms: u64,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
            install_timeout_ms: default_install_timeout(),
        }
    }
}

fn default_max_concurrent() -> usize {
    2
}
fn default_max_retries() -> u32 {
    1
}
fn default_retry_delay() -> u64 {
    2000
}
fn default_install_timeout() -> u64 {
    30_000
}

/// Editor binary and directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EditorConfig {
    /// Editor command used as the extension package manager
    #[serde(default = "default_editor_command")]
    pub command: String,

    /// Explicit user config directory (platform default when unset)
    #[serde(default)]
    pub config_dir: Option<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: default_editor_command(),
            config_dir: None,
        }
    }
}

fn default_editor_command() -> String {
    if cfg!(windows) {
        "code.cmd".to_string()
    } else {
        "code".to_string()
    }
}

/// Backup policies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BackupConfig {
    /// Age in days after which `backup clean` removes a snapshot
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
        }
    }
}

fn default_retention_days() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_defaults() {
        let config = ExtensionsConfig::default();
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.retry_delay_ms, 2000);
        assert_eq!(config.install_timeout_ms, 30_000);
    }

    #[test]
    fn test_user_agent_identifies_client() {
        let network = NetworkConfig::default();
        assert!(network.user_agent.starts_with("vscfg/"));
        assert_eq!(network.max_redirects, 5);
    }

    #[test]
    fn test_source_timeout_default_when_missing() {
        let yaml = "name: primary\nbase-url: https://example.com/cfg\n";
        let source: SourceConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(source.timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "extensions:\n  max-concurrent: 4\n";
        let config: RuntimeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.extensions.max_concurrent, 4);
        assert_eq!(config.extensions.max_retries, 1);
        assert!(config.sources.is_empty());
        assert_eq!(config.backup.retention_days, 30);
    }
}
