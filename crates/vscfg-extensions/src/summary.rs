//! Per-extension install results and the aggregated reconciliation summary

use std::fmt;

use crate::id::ExtensionId;

/// Maximum length of the error shown in console output
pub const DISPLAY_ERROR_LIMIT: usize = 120;

/// Message recorded when an install succeeded but the extension is not listed afterwards
pub const NOT_VERIFIED_MESSAGE: &str = "installed but not verified";

/// Why an extension ended up failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Every install attempt failed
    InstallFailed,
    /// The install process succeeded but the extension is not installed
    NotVerified,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::InstallFailed => write!(f, "install failed"),
            FailureReason::NotVerified => write!(f, "not verified"),
        }
    }
}

/// Outcome of installing one extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    pub id: ExtensionId,
    /// Installed and verified
    pub success: bool,
    pub error: Option<String>,
    /// Install attempts made (at least 1)
    pub attempts: u32,
    /// Present in the installed list after a successful install
    pub verified: bool,
    pub reason: Option<FailureReason>,
}

impl InstallResult {
    pub fn installed(id: ExtensionId, attempts: u32) -> Self {
        Self {
            id,
            success: true,
            error: None,
            attempts: attempts.max(1),
            verified: true,
            reason: None,
        }
    }

    pub fn not_verified(id: ExtensionId, attempts: u32) -> Self {
        Self {
            id,
            success: false,
            error: Some(NOT_VERIFIED_MESSAGE.to_string()),
            attempts: attempts.max(1),
            verified: false,
            reason: Some(FailureReason::NotVerified),
        }
    }

    pub fn failed(id: ExtensionId, attempts: u32, error: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            error: Some(error.into()),
            attempts: attempts.max(1),
            verified: false,
            reason: Some(FailureReason::InstallFailed),
        }
    }
}

/// Details of a failed extension for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedExtension {
    pub id: ExtensionId,
    pub publisher: String,
    pub name: String,
    /// Full error message
    pub error: String,
    /// Error truncated for console output
    pub display_error: String,
    pub attempts: u32,
    pub reason: FailureReason,
}

impl FailedExtension {
    fn from_result(result: &InstallResult) -> Self {
        let error = result.error.clone().unwrap_or_default();
        Self {
            id: result.id.clone(),
            publisher: result.id.publisher().to_string(),
            name: result.id.name().to_string(),
            display_error: truncate_error(&error, DISPLAY_ERROR_LIMIT),
            error,
            attempts: result.attempts,
            reason: result.reason.unwrap_or(FailureReason::InstallFailed),
        }
    }
}

/// Aggregated outcome of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Newly installed and verified
    pub installed: usize,
    pub failed: usize,
    /// Already installed before the run
    pub skipped: usize,
    /// `skipped` plus the number of install candidates
    pub total: usize,
    pub failed_details: Vec<FailedExtension>,
    /// Per-extension results in install order
    pub results: Vec<InstallResult>,
}

impl ReconcileSummary {
    /// Summary for a run where nothing needed installing
    pub fn nothing_to_install(skipped: usize) -> Self {
        Self {
            skipped,
            total: skipped,
            ..Default::default()
        }
    }

    /// Aggregate per-extension results
    pub fn from_results(skipped: usize, results: Vec<InstallResult>) -> Self {
        let installed = results.iter().filter(|r| r.success).count();
        let failed_details: Vec<FailedExtension> = results
            .iter()
            .filter(|r| !r.success)
            .map(FailedExtension::from_result)
            .collect();

        Self {
            installed,
            failed: failed_details.len(),
            skipped,
            total: skipped + results.len(),
            failed_details,
            results,
        }
    }

    /// Every candidate installed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Some but not all candidates installed
    pub fn is_partial(&self) -> bool {
        self.installed > 0 && self.failed > 0
    }
}

/// Truncate `message` to `limit` characters, appending `...` when shortened
pub fn truncate_error(message: &str, limit: usize) -> String {
    if message.chars().count() <= limit {
        return message.to_string();
    }
    let truncated: String = message.chars().take(limit).collect();
    format!("{}...", truncated)
}
