//! Common test utilities for vscfg-installer

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mocks;

pub use mocks::*;

use std::time::Duration;
use vscfg_core::LogConfig;
use vscfg_extensions::ReconcileConfig;
use vscfg_installer::InstallOptions;

pub const SETTINGS: &str = r#"{"editor.fontSize": 14, "editor.formatOnSave": true}"#;
pub const KEYBINDINGS: &str = r#"[{"key": "ctrl+d", "command": "editor.action.copyLinesDownAction"}]"#;
pub const EXTENSIONS_JSON: &str = r#"{"recommendations": ["vue.volar", "esbenp.prettier-vscode", "dbaeumer.vscode-eslint"]}"#;

pub fn fast_options() -> InstallOptions {
    InstallOptions {
        reconcile: ReconcileConfig {
            max_concurrent: 2,
            max_retries: 1,
            retry_delay: Duration::ZERO,
            install_timeout: Duration::from_secs(5),
        },
        ..Default::default()
    }
}

pub fn quiet_log() -> LogConfig {
    LogConfig::from_flags(0, true)
}

/// Fetcher serving the full configuration set
pub fn full_fetcher() -> MockFetcher {
    MockFetcher::new()
        .serve("settings.json", SETTINGS)
        .serve("keybindings.json", KEYBINDINGS)
        .serve("extensions.json", EXTENSIONS_JSON)
}
