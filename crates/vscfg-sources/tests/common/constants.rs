//! Shared constants for source tests

pub const SETTINGS_PATH: &str = "settings.json";
pub const EXTENSIONS_PATH: &str = "extensions.list";

pub const SETTINGS_BODY: &str = r#"{"editor.fontSize": 14}"#;
pub const MIRROR_SETTINGS_BODY: &str = r#"{"editor.fontSize": 16}"#;

pub const TEST_USER_AGENT: &str = "vscfg-test/0.0.0";

/// Source timeout used by most tests
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;

/// Source timeout used when the server is made to stall
pub const SHORT_TIMEOUT_MS: u64 = 150;
