//! Snapshot, list, restore and prune editor configuration backups

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::copy::{copy_recursive, tree_size};

/// Directory name prefix of a snapshot
pub const BACKUP_PREFIX: &str = "backup-";

/// Entries of the user directory that are snapshotted and restored
pub const PROTECTED_ENTRIES: &[&str] = &["settings.json", "keybindings.json", "snippets"];

/// Infix of the copies made before a restore overwrites a file
pub const TEMP_BACKUP_MARKER: &str = ".temp-backup-";

/// A snapshot directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    /// Directory name, `backup-<unix-millis>`
    pub name: String,
    pub path: PathBuf,
    pub created: DateTime<Utc>,
    pub size_bytes: u64,
}

impl BackupInfo {
    /// Read a snapshot directory, `None` if the name is not a snapshot name
    fn from_dir(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_string();
        let millis: i64 = name.strip_prefix(BACKUP_PREFIX)?.parse().ok()?;
        let created = Utc.timestamp_millis_opt(millis).single()?;

        Some(Self {
            size_bytes: tree_size(path),
            name,
            path: path.to_path_buf(),
            created,
        })
    }

    /// Whether the snapshot was created before `cutoff`
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.created < cutoff
    }
}

/// Result of `BackupManager::snapshot`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Created(BackupInfo),
    /// None of the protected entries exist, no directory was created
    NothingToBackup,
}

/// Result of `BackupManager::restore`
#[derive(Debug, Clone, Default)]
pub struct RestoreReport {
    /// Entries copied back from the snapshot
    pub restored: Vec<String>,
    /// Copies of the files that were about to be overwritten
    pub set_aside: Vec<PathBuf>,
}

/// Result of `BackupManager::prune_older_than`
#[derive(Debug, Clone, Default)]
pub struct PruneReport {
    pub removed: Vec<BackupInfo>,
    pub failed: Vec<(BackupInfo, String)>,
    pub kept: usize,
}

impl PruneReport {
    /// Bytes released by the removed snapshots
    pub fn freed_bytes(&self) -> u64 {
        self.removed.iter().map(|b| b.size_bytes).sum()
    }
}

/// Manages snapshots inside one editor user directory
#[derive(Debug, Clone)]
pub struct BackupManager {
    config_dir: PathBuf,
}

impl BackupManager {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Copy the protected entries into a new `backup-<millis>` directory
    pub fn snapshot(&self) -> Result<BackupOutcome> {
        let present: Vec<&str> = PROTECTED_ENTRIES
            .iter()
            .copied()
            .filter(|entry| self.config_dir.join(entry).exists())
            .collect();

        if present.is_empty() {
            debug!("Nothing to back up in {}", self.config_dir.display());
            return Ok(BackupOutcome::NothingToBackup);
        }

        let backup_dir = self.next_backup_dir();
        fs::create_dir_all(&backup_dir)
            .with_context(|| format!("Failed to create backup directory {}", backup_dir.display()))?;

        for entry in &present {
            let copied = copy_recursive(&self.config_dir.join(entry), &backup_dir.join(entry));
            if let Err(e) = copied {
                // A partial snapshot must not show up in list() or latest()
                if let Err(cleanup) = fs::remove_dir_all(&backup_dir) {
                    warn!(
                        "Failed to remove incomplete backup {}: {}",
                        backup_dir.display(),
                        cleanup
                    );
                }
                return Err(e.context(format!("Failed to back up {}", entry)));
            }
        }

        let info = BackupInfo::from_dir(&backup_dir)
            .context("Backup directory name is not a valid snapshot name")?;
        info!("Backed up {} to {}", present.join(", "), backup_dir.display());
        Ok(BackupOutcome::Created(info))
    }

    /// All snapshots, newest first
    pub fn list(&self) -> Result<Vec<BackupInfo>> {
        if !self.config_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.config_dir)
            .with_context(|| format!("Failed to read {}", self.config_dir.display()))?;

        let mut backups: Vec<BackupInfo> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| BackupInfo::from_dir(&path))
            .collect();

        backups.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(backups)
    }

    /// Most recent snapshot, if any
    pub fn latest(&self) -> Result<Option<BackupInfo>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Restore the protected entries found in `backup_path`
    ///
    /// Every entry that would be overwritten is first copied to
    /// `<entry>.temp-backup-<millis>` next to it.
    pub fn restore(&self, backup_path: &Path) -> Result<RestoreReport> {
        if !backup_path.exists() {
            anyhow::bail!("Backup path does not exist: {}", backup_path.display());
        }
        if !backup_path.is_dir() {
            anyhow::bail!("Backup path is not a directory: {}", backup_path.display());
        }

        fs::create_dir_all(&self.config_dir)
            .with_context(|| format!("Failed to create {}", self.config_dir.display()))?;

        let stamp = Utc::now().timestamp_millis();
        let mut report = RestoreReport::default();

        for entry in PROTECTED_ENTRIES {
            let source = backup_path.join(entry);
            if !source.exists() {
                continue;
            }

            let target = self.config_dir.join(entry);
            if target.exists() {
                let aside = self
                    .config_dir
                    .join(format!("{}{}{}", entry, TEMP_BACKUP_MARKER, stamp));
                copy_recursive(&target, &aside)
                    .with_context(|| format!("Failed to set aside current {}", entry))?;
                debug!("Copied current {} to {}", entry, aside.display());
                report.set_aside.push(aside);
            }

            copy_recursive(&source, &target)
                .with_context(|| format!("Failed to restore {}", entry))?;
            report.restored.push(entry.to_string());
        }

        info!(
            "Restored {} entr(ies) from {}",
            report.restored.len(),
            backup_path.display()
        );
        Ok(report)
    }

    /// Delete snapshots created more than `days` days ago
    ///
    /// A snapshot that cannot be deleted is recorded and the rest are still
    /// processed. An age beyond the representable date range keeps every
    /// snapshot.
    pub fn prune_older_than(&self, days: u32) -> Result<PruneReport> {
        let cutoff = TimeDelta::try_days(i64::from(days))
            .and_then(|age| Utc::now().checked_sub_signed(age));
        if cutoff.is_none() {
            debug!("Cutoff of {} days is out of range, keeping all backups", days);
        }
        let mut report = PruneReport::default();

        for backup in self.list()? {
            if !cutoff.is_some_and(|cutoff| backup.is_older_than(cutoff)) {
                report.kept += 1;
                continue;
            }

            match fs::remove_dir_all(&backup.path) {
                Ok(()) => {
                    debug!("Removed {}", backup.path.display());
                    report.removed.push(backup);
                }
                Err(e) => {
                    warn!("Failed to remove {}: {}", backup.name, e);
                    report.failed.push((backup, e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// A fresh snapshot path, bumping the timestamp if one already exists
    fn next_backup_dir(&self) -> PathBuf {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let candidate = self
                .config_dir
                .join(format!("{}{}", BACKUP_PREFIX, millis));
            if !candidate.exists() {
                return candidate;
            }
            millis += 1;
        }
    }
}
