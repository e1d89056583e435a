//! Builders for test inputs

use std::time::Duration;
use vscfg_core::LogConfig;
use vscfg_extensions::{ExtensionId, ReconcileConfig};

pub fn ids(values: &[&str]) -> Vec<ExtensionId> {
    values.iter().copied().map(ExtensionId::from).collect()
}

/// Reconcile config without retry delay so tests stay fast
pub fn fast_config(max_concurrent: usize, max_retries: u32) -> ReconcileConfig {
    ReconcileConfig {
        max_concurrent,
        max_retries,
        retry_delay: Duration::ZERO,
        install_timeout: Duration::from_secs(5),
    }
}

pub fn quiet_log() -> LogConfig {
    LogConfig::from_flags(0, true)
}
