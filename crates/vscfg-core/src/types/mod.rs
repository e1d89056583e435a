//! Type definitions shared across vscfg crates

mod runtime_config;

pub use runtime_config::{
    BackupConfig, EditorConfig, ExtensionsConfig, NetworkConfig, RuntimeConfig, SourceConfig,
};
