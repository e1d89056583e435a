//! Install pipeline
//!
//! Fatal steps return `InstallerError`. Soft steps (backup, keybindings,
//! extensions) record a warning in the report and the run continues.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use vscfg_backup::{BackupManager, BackupOutcome};
use vscfg_core::LogConfig;
use vscfg_extensions::{
    resolve_extension_list, PackageManager, ReconcileConfig, ReconcileSummary, Reconciler,
};
use vscfg_sources::ArtifactFetcher;

use crate::error::InstallerError;
use crate::report::{BackupStep, ExtensionStep, FileStep, InstallReport};

/// Settings artifact and file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Keybindings artifact and file name
pub const KEYBINDINGS_FILE: &str = "keybindings.json";

/// How settings are written when a file already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsMode {
    /// Replace the existing file
    #[default]
    Overwrite,
    /// Leave an existing file untouched
    SkipIfPresent,
}

/// Caller options for one install run
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Skip the pre-install backup
    pub force: bool,
    /// Plan only: no backup, no writes, no installs
    pub dry_run: bool,
    pub mode: SettingsMode,
    pub reconcile: ReconcileConfig,
}

/// Installs the shared configuration into one editor directory
pub struct ConfigInstaller<'a, F: ?Sized, P: ?Sized> {
    fetcher: &'a F,
    package_manager: &'a P,
    config_dir: PathBuf,
    options: InstallOptions,
    log: LogConfig,
}

impl<'a, F, P> ConfigInstaller<'a, F, P>
where
    F: ArtifactFetcher + ?Sized,
    P: PackageManager + ?Sized,
{
    pub fn new(
        fetcher: &'a F,
        package_manager: &'a P,
        config_dir: impl Into<PathBuf>,
        options: InstallOptions,
        log: LogConfig,
    ) -> Self {
        Self {
            fetcher,
            package_manager,
            config_dir: config_dir.into(),
            options,
            log,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Run the install pipeline
    pub async fn install(&self) -> Result<InstallReport, InstallerError> {
        let dry_run = self.options.dry_run;

        let editor_version = self.package_manager.version().await.map_err(|source| {
            InstallerError::PackageManagerMissing {
                command: self.package_manager.command().to_string(),
                source,
            }
        })?;
        info!(
            "Using {} {}",
            self.package_manager.command(),
            editor_version
        );

        let settings = self
            .fetcher
            .fetch_artifact(SETTINGS_FILE)
            .await
            .map_err(InstallerError::Settings)?;

        if !dry_run {
            fs::create_dir_all(&self.config_dir).map_err(|source| InstallerError::ConfigDir {
                path: self.config_dir.clone(),
                source,
            })?;
        }

        let mut warnings = Vec::new();
        let backup = self.backup(&mut warnings);
        let settings = self.write_settings(&settings)?;
        let keybindings = self.install_keybindings(&mut warnings).await;
        let (extensions, summary) = self.reconcile_extensions(&mut warnings).await;

        Ok(InstallReport {
            config_dir: self.config_dir.clone(),
            dry_run,
            editor_version,
            backup,
            settings,
            keybindings,
            extensions,
            summary,
            warnings,
        })
    }

    fn backup(&self, warnings: &mut Vec<String>) -> BackupStep {
        if self.options.dry_run {
            return BackupStep::DryRun;
        }
        if self.options.force {
            debug!("Skipping backup (--force)");
            return BackupStep::SkippedByForce;
        }

        match BackupManager::new(&self.config_dir).snapshot() {
            Ok(BackupOutcome::Created(info)) => BackupStep::Created(info),
            Ok(BackupOutcome::NothingToBackup) => BackupStep::NothingToBackup,
            Err(e) => {
                let message = format!("Backup failed, continuing without one: {:#}", e);
                warn!("{}", message);
                warnings.push(message);
                BackupStep::Failed(format!("{:#}", e))
            }
        }
    }

    fn write_settings(&self, content: &str) -> Result<FileStep, InstallerError> {
        let path = self.config_dir.join(SETTINGS_FILE);

        if self.options.mode == SettingsMode::SkipIfPresent && path.exists() {
            info!("Keeping existing {}", path.display());
            return Ok(FileStep::KeptExisting(path));
        }
        if self.options.dry_run {
            return Ok(FileStep::WouldWrite(path));
        }

        fs::write(&path, content).map_err(|source| InstallerError::Write {
            path: path.clone(),
            source,
        })?;
        info!("Wrote {}", path.display());
        Ok(FileStep::Written(path))
    }

    async fn install_keybindings(&self, warnings: &mut Vec<String>) -> FileStep {
        let content = match self.fetcher.fetch_artifact(KEYBINDINGS_FILE).await {
            Ok(content) => content,
            Err(e) => {
                let message = format!("Keybindings not installed: {}", e);
                warn!("{}", message);
                warnings.push(message);
                return FileStep::Unavailable(e.to_string());
            }
        };

        let path = self.config_dir.join(KEYBINDINGS_FILE);
        if self.options.dry_run {
            return FileStep::WouldWrite(path);
        }

        match fs::write(&path, content) {
            Ok(()) => {
                info!("Wrote {}", path.display());
                FileStep::Written(path)
            }
            Err(e) => {
                let message = format!("Failed to write {}: {}", path.display(), e);
                warn!("{}", message);
                warnings.push(message);
                FileStep::Failed(e.to_string())
            }
        }
    }

    async fn reconcile_extensions(
        &self,
        warnings: &mut Vec<String>,
    ) -> (ExtensionStep, ReconcileSummary) {
        let desired = match resolve_extension_list(self.fetcher).await {
            Ok(desired) => desired,
            Err(e) => return skipped(warnings, e.to_string()),
        };

        let installed = match self.package_manager.list_installed().await {
            Ok(installed) => installed,
            Err(e) => {
                return skipped(
                    warnings,
                    format!("could not query installed extensions: {}", e),
                )
            }
        };

        let reconciler = Reconciler::new(
            self.package_manager,
            self.options.reconcile.clone(),
            self.log,
        );
        let plan = reconciler.plan(&desired, &installed);

        if self.options.dry_run {
            let summary = ReconcileSummary::nothing_to_install(plan.already_installed.len());
            let summary = ReconcileSummary {
                total: plan.total(),
                ..summary
            };
            return (ExtensionStep::Planned(plan), summary);
        }

        let summary = reconciler.execute(&plan).await;
        if summary.failed > 0 {
            warnings.push(format!(
                "{} of {} extension(s) failed to install",
                summary.failed,
                plan.to_install.len()
            ));
        }
        (ExtensionStep::Reconciled, summary)
    }
}

fn skipped(warnings: &mut Vec<String>, reason: String) -> (ExtensionStep, ReconcileSummary) {
    warn!("Skipping extensions: {}", reason);
    warnings.push(reason.clone());
    (
        ExtensionStep::Skipped { reason },
        ReconcileSummary::default(),
    )
}
