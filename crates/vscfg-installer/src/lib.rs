//! Configuration install orchestration for vscfg
//!
//! Runs the install pipeline in a fixed order: probe the package manager,
//! fetch settings, back up, write settings and keybindings, then resolve and
//! reconcile extensions. The outcome of each step is collected into an
//! `InstallReport` so partial success stays visible.

pub mod error;
pub mod installer;
pub mod report;

pub use error::InstallerError;
pub use installer::{ConfigInstaller, InstallOptions, SettingsMode, KEYBINDINGS_FILE, SETTINGS_FILE};
pub use report::{BackupStep, ExtensionStep, FileStep, InstallReport};
