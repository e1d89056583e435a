//! Extension reconciliation
//!
//! Brings the installed extension set in line with the desired list:
//!
//! 1. Diff the (deduplicated) desired list against the installed list
//! 2. Install the missing extensions in sequential batches of
//!    `max_concurrent`, each batch awaited as a whole
//! 3. Retry failed installs with a fixed delay, then verify each successful
//!    install by re-querying the installed list
//! 4. Aggregate the per-extension results into a `ReconcileSummary`

use futures::future::join_all;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};
use vscfg_core::logging::LogConfig;
use vscfg_core::retry::{RetryExecutor, RetryPolicy, TracingObserver};
use vscfg_core::types::ExtensionsConfig;

use crate::error::InstallError;
use crate::id::ExtensionId;
use crate::package_manager::{PackageManager, ProcessOutcome};
use crate::summary::{InstallResult, ReconcileSummary};

/// Reconciliation tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Installs per batch (0 is treated as 1)
    pub max_concurrent: usize,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    pub retry_delay: Duration,
    /// Timeout for a single install process
    pub install_timeout: Duration,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self::from(&ExtensionsConfig::default())
    }
}

impl From<&ExtensionsConfig> for ReconcileConfig {
    fn from(config: &ExtensionsConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            install_timeout: Duration::from_millis(config.install_timeout_ms),
        }
    }
}

impl ReconcileConfig {
    /// Override only the install timeout
    pub fn with_install_timeout_secs(mut self, secs: u64) -> Self {
        self.install_timeout = Duration::from_secs(secs);
        self
    }

    /// Effective batch size
    pub fn batch_size(&self) -> usize {
        self.max_concurrent.max(1)
    }

    /// Retry policy for a single install
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.max_retries.saturating_add(1), self.retry_delay)
    }
}

/// The diff between desired and installed extensions
///
/// Both lists follow desired order and are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub already_installed: Vec<ExtensionId>,
    pub to_install: Vec<ExtensionId>,
}

impl ReconcilePlan {
    /// Partition `desired` by membership in `installed`
    ///
    /// Duplicate desired entries are collapsed, keeping the first occurrence.
    pub fn compute(desired: &[ExtensionId], installed: &[ExtensionId]) -> Self {
        let installed: HashSet<&ExtensionId> = installed.iter().collect();
        let mut seen = HashSet::with_capacity(desired.len());
        let mut plan = ReconcilePlan::default();

        for id in desired {
            if !seen.insert(id) {
                continue;
            }
            if installed.contains(id) {
                plan.already_installed.push(id.clone());
            } else {
                plan.to_install.push(id.clone());
            }
        }

        plan
    }

    pub fn is_empty(&self) -> bool {
        self.to_install.is_empty()
    }

    /// Number of distinct desired extensions
    pub fn total(&self) -> usize {
        self.already_installed.len() + self.to_install.len()
    }
}

/// Drives reconciliation against a package manager
pub struct Reconciler<'a, P: PackageManager + ?Sized> {
    package_manager: &'a P,
    config: ReconcileConfig,
    log: LogConfig,
}

impl<'a, P: PackageManager + ?Sized> Reconciler<'a, P> {
    pub fn new(package_manager: &'a P, config: ReconcileConfig, log: LogConfig) -> Self {
        Self {
            package_manager,
            config,
            log,
        }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Compute the install plan
    pub fn plan(&self, desired: &[ExtensionId], installed: &[ExtensionId]) -> ReconcilePlan {
        ReconcilePlan::compute(desired, installed)
    }

    /// Plan and execute in one step
    pub async fn reconcile(
        &self,
        desired: &[ExtensionId],
        installed: &[ExtensionId],
    ) -> ReconcileSummary {
        let plan = self.plan(desired, installed);
        self.execute(&plan).await
    }

    /// Install everything in `plan.to_install`
    ///
    /// Batches run strictly one after another. Within a batch all installs
    /// are polled concurrently and the batch completes when every install
    /// has settled.
    pub async fn execute(&self, plan: &ReconcilePlan) -> ReconcileSummary {
        let skipped = plan.already_installed.len();

        if plan.is_empty() {
            info!("All {} extension(s) already installed", skipped);
            return ReconcileSummary::nothing_to_install(skipped);
        }

        let batch_size = self.config.batch_size();
        let batch_count = plan.to_install.len().div_ceil(batch_size);
        info!(
            "Installing {} extension(s) in {} batch(es) ({} already installed)",
            plan.to_install.len(),
            batch_count,
            skipped
        );

        let mut results = Vec::with_capacity(plan.to_install.len());
        for (index, batch) in plan.to_install.chunks(batch_size).enumerate() {
            debug!(
                "Batch {}/{}: {}",
                index + 1,
                batch_count,
                batch
                    .iter()
                    .map(ExtensionId::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            );

            let batch_results = join_all(batch.iter().map(|id| self.install_one(id))).await;
            results.extend(batch_results);
        }

        let summary = ReconcileSummary::from_results(skipped, results);
        info!(
            "Reconciliation finished: {} installed, {} failed, {} skipped",
            summary.installed, summary.failed, summary.skipped
        );
        summary
    }

    /// Install one extension with retry, then verify it
    async fn install_one(&self, id: &ExtensionId) -> InstallResult {
        let executor = RetryExecutor::new(self.config.retry_policy())
            .with_observer(TracingObserver::new(format!("install {}", id)));

        match executor.execute_counted(|| self.attempt(id)).await {
            Ok(((), attempts)) => {
                if self.verify(id).await {
                    info!("Installed {}", id);
                    InstallResult::installed(id.clone(), attempts)
                } else {
                    warn!("{} reported success but is not installed", id);
                    InstallResult::not_verified(id.clone(), attempts)
                }
            }
            Err(e) => {
                let attempts = e.attempts();
                let message = match e.into_source() {
                    Some(source) => source.to_string(),
                    None => "no install attempt was made".to_string(),
                };
                warn!("Failed to install {}: {}", id, message);
                InstallResult::failed(id.clone(), attempts, message)
            }
        }
    }

    /// One install attempt, translated into a retryable error
    async fn attempt(&self, id: &ExtensionId) -> Result<(), InstallError> {
        let timeout = self.config.install_timeout;

        match self.package_manager.install(id, timeout).await {
            ProcessOutcome::Completed {
                exit_code: Some(0),
                stdout,
                ..
            } => {
                self.log_output(id, &stdout);
                Ok(())
            }
            ProcessOutcome::Completed {
                exit_code,
                stdout,
                stderr,
            } => {
                self.log_output(id, &stdout);
                let output = if stderr.trim().is_empty() {
                    stdout.trim()
                } else {
                    stderr.trim()
                };
                Err(InstallError::ExitStatus {
                    id: id.clone(),
                    code: exit_code,
                    output: output.to_string(),
                })
            }
            ProcessOutcome::TimedOut => Err(InstallError::TimedOut {
                id: id.clone(),
                timeout,
            }),
            ProcessOutcome::SpawnFailed(message) => Err(InstallError::Spawn {
                id: id.clone(),
                message,
            }),
        }
    }

    /// Whether `id` shows up in a fresh installed-list query
    async fn verify(&self, id: &ExtensionId) -> bool {
        match self.package_manager.list_installed().await {
            Ok(installed) => installed.contains(id),
            Err(e) => {
                warn!("Could not verify {}: {}", id, e);
                false
            }
        }
    }

    fn log_output(&self, id: &ExtensionId, stdout: &str) {
        let stdout = stdout.trim();
        if stdout.is_empty() {
            return;
        }
        if self.log.show_process_output() {
            info!("[{}] {}", id, stdout);
        } else {
            debug!("[{}] {}", id, stdout);
        }
    }
}
