//! CLI command implementations

pub mod backup;
pub mod install;
pub mod status;

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing::debug;
use vscfg_core::utils::resolve_editor_dir;
use vscfg_core::{HierarchicalConfigLoader, LogConfig, RuntimeConfig};

use crate::cli::Cli;

/// Resolved settings shared by every command
pub struct Context {
    pub runtime: RuntimeConfig,
    /// Editor user directory
    pub config_dir: PathBuf,
    pub log: LogConfig,
}

impl Context {
    /// Load runtime configuration and apply global CLI overrides
    pub fn load(cli: &Cli, log: LogConfig) -> Result<Self> {
        let loader = match &cli.config_home {
            Some(dir) => HierarchicalConfigLoader::with_dir(dir.clone()),
            None => HierarchicalConfigLoader::new()?,
        };

        let mut runtime = loader
            .load_runtime_config()
            .with_context(|| format!("Failed to load configuration from {}", loader.config_dir()))?;

        if let Some(editor) = &cli.editor {
            runtime.editor.command = editor.clone();
        }
        if let Some(dir) = &cli.config_dir {
            runtime.editor.config_dir = Some(dir.to_string());
        }

        let config_dir = resolve_editor_dir(runtime.editor.config_dir.as_deref())
            .context("Could not determine the editor's user directory; pass --config-dir")?;
        debug!(
            "Editor directory {}, {} source(s) configured",
            config_dir.display(),
            runtime.sources.len()
        );

        Ok(Self {
            runtime,
            config_dir,
            log,
        })
    }
}
