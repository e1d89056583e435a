//! Install report

use std::path::PathBuf;
use vscfg_backup::BackupInfo;
use vscfg_extensions::{ReconcilePlan, ReconcileSummary};

/// What happened to the pre-install backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupStep {
    Created(BackupInfo),
    /// No configuration existed yet
    NothingToBackup,
    /// `--force` was given
    SkippedByForce,
    DryRun,
    /// The backup failed and installation continued
    Failed(String),
}

/// What happened to one configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStep {
    Written(PathBuf),
    /// Left untouched because it already existed
    KeptExisting(PathBuf),
    WouldWrite(PathBuf),
    /// The artifact could not be fetched
    Unavailable(String),
    /// The artifact was fetched but could not be written
    Failed(String),
}

impl FileStep {
    /// Written, or would be written in a dry run
    pub fn is_written(&self) -> bool {
        matches!(self, FileStep::Written(_) | FileStep::WouldWrite(_))
    }
}

/// What happened to the extension set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionStep {
    Reconciled,
    /// Dry run: the plan that would be executed
    Planned(ReconcilePlan),
    /// Reconciliation did not run
    Skipped { reason: String },
}

/// Outcome of an install run
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub config_dir: PathBuf,
    pub dry_run: bool,
    pub editor_version: String,
    pub backup: BackupStep,
    pub settings: FileStep,
    pub keybindings: FileStep,
    pub extensions: ExtensionStep,
    /// Zeroed when reconciliation was skipped
    pub summary: ReconcileSummary,
    pub warnings: Vec<String>,
}

impl InstallReport {
    /// Every step succeeded
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
            && self.summary.failed == 0
            && !matches!(self.extensions, ExtensionStep::Skipped { .. })
    }

    /// Files written (or that would be written in a dry run)
    pub fn written_files(&self) -> Vec<&PathBuf> {
        [&self.settings, &self.keybindings]
            .into_iter()
            .filter_map(|step| match step {
                FileStep::Written(path) | FileStep::WouldWrite(path) => Some(path),
                _ => None,
            })
            .collect()
    }
}
