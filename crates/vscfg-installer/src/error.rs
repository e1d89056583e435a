//! Fatal installer errors
//!
//! Anything not listed here is recorded in the `InstallReport` instead of
//! aborting the run.

use std::path::PathBuf;
use thiserror::Error;
use vscfg_extensions::PackageManagerError;
use vscfg_sources::FetchError;

#[derive(Error, Debug)]
pub enum InstallerError {
    /// The editor CLI is not usable
    #[error("package manager '{command}' is not available: {source}")]
    PackageManagerMissing {
        command: String,
        #[source]
        source: PackageManagerError,
    },

    /// `settings.json` could not be fetched from any source
    #[error("failed to fetch settings: {0}")]
    Settings(#[source] FetchError),

    /// The editor directory could not be created
    #[error("failed to create config directory {}: {source}", path.display())]
    ConfigDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing settings failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InstallerError {
    /// Troubleshooting hints for console output
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            InstallerError::PackageManagerMissing { .. } => &[
                "Make sure the editor is installed",
                "Add the editor's shell command to PATH (Command Palette: \"Shell Command: Install 'code' command in PATH\")",
                "Or pass --editor <command>",
            ],
            InstallerError::Settings(_) => &[
                "Check your network connection",
                "Try a single mirror with --source <name>",
                "Increase source timeouts in ~/.vscfg/config.yaml",
            ],
            InstallerError::ConfigDir { .. } | InstallerError::Write { .. } => &[
                "Check permissions on the editor's user directory",
                "Or pass --config-dir <path>",
            ],
        }
    }
}
