//! Shared utility functions for vscfg crates

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that
/// sandboxed runs and tests can redirect it.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir().ok_or(Error::NoDirectory { what: "home" })
}

/// Default location of the editor's user configuration directory
///
/// - Linux: `~/.config/Code/User`
/// - macOS: `~/Library/Application Support/Code/User`
/// - Windows: `%APPDATA%\Code\User`
pub fn editor_user_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(Error::NoDirectory { what: "config" })?;
    Ok(base.join("Code").join("User"))
}

/// Resolve the editor directory, honouring an explicit override
pub fn resolve_editor_dir(explicit: Option<&str>) -> Result<PathBuf> {
    match explicit {
        Some(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => editor_user_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_home_dir_from_env() {
        if std::env::var("HOME").is_ok() {
            let home = get_home_dir().unwrap();
            assert!(!home.as_os_str().is_empty());
        }
    }

    #[test]
    fn test_editor_dir_ends_with_code_user() {
        if let Ok(dir) = editor_user_dir() {
            assert!(dir.ends_with("Code/User") || dir.ends_with("Code\\User"));
        }
    }

    #[test]
    fn test_explicit_override() {
        let dir = resolve_editor_dir(Some("/tmp/editor-user")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/editor-user"));
    }
}
