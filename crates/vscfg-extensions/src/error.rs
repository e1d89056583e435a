//! Error types for extension list resolution, package manager access and installs

use std::time::Duration;
use thiserror::Error;

use crate::id::ExtensionId;

/// The desired extension list could not be resolved
#[derive(Error, Debug)]
pub enum ExtensionListError {
    /// Neither artifact could be fetched or parsed
    #[error("extension list unavailable (extensions.json: {structured}; extensions.list: {fallback})")]
    Unavailable { structured: String, fallback: String },

    /// The line list was fetched but contained no identifiers
    #[error("extension list is empty (extensions.json: {structured}; extensions.list: no entries)")]
    Empty { structured: String },
}

/// The package manager could not be used
#[derive(Error, Debug)]
pub enum PackageManagerError {
    /// The command is not on PATH
    #[error("'{command}' not found on PATH")]
    NotFound { command: String },

    /// The command ran but did not succeed
    #[error("'{command} {args}' failed: {message}")]
    CommandFailed {
        command: String,
        args: String,
        message: String,
    },

    /// The command did not finish in time
    #[error("'{command} {args}' timed out after {}s", timeout.as_secs())]
    TimedOut {
        command: String,
        args: String,
        timeout: Duration,
    },
}

/// A single install attempt failed
#[derive(Error, Debug, Clone)]
pub enum InstallError {
    /// The install process exited unsuccessfully
    #[error("installing {id} exited with {}{}", exit_label(*code), detail_suffix(output))]
    ExitStatus {
        id: ExtensionId,
        code: Option<i32>,
        output: String,
    },

    /// The install process exceeded the install timeout
    #[error("installing {id} timed out after {}s", timeout.as_secs())]
    TimedOut { id: ExtensionId, timeout: Duration },

    /// The install process could not be started
    #[error("failed to start install of {id}: {message}")]
    Spawn { id: ExtensionId, message: String },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "a signal".to_string(),
    }
}

fn detail_suffix(output: &str) -> String {
    if output.is_empty() {
        String::new()
    } else {
        format!(": {}", output)
    }
}
