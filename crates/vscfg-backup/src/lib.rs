//! Editor configuration backups
//!
//! Snapshots live next to the configuration they protect, as
//! `backup-<unix-millis>/` directories inside the editor's user directory.
//! A snapshot holds copies of `settings.json`, `keybindings.json` and the
//! `snippets/` directory, whichever of them exist.
//!
//! # Example
//!
//! ```no_run
//! use vscfg_backup::{BackupManager, BackupOutcome};
//!
//! fn main() -> anyhow::Result<()> {
//!     let manager = BackupManager::new("/home/me/.config/Code/User");
//!
//!     if let BackupOutcome::Created(info) = manager.snapshot()? {
//!         println!("Backup created at {}", info.path.display());
//!     }
//!
//!     for backup in manager.list()? {
//!         println!("{} ({} bytes)", backup.name, backup.size_bytes);
//!     }
//!     Ok(())
//! }
//! ```

pub mod manager;
mod copy;

pub use manager::{
    BackupInfo, BackupManager, BackupOutcome, PruneReport, RestoreReport, BACKUP_PREFIX,
    PROTECTED_ENTRIES, TEMP_BACKUP_MARKER,
};
