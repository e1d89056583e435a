//! Editor CLI as an extension package manager
//!
//! The editor binary is driven through a fixed argument contract:
//! `--version` to probe, `--list-extensions` to query and
//! `--install-extension <id>` to install. Every invocation is bounded by a
//! timeout and the child is killed if the timeout fires.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;
use vscfg_core::types::EditorConfig;

use crate::error::PackageManagerError;
use crate::id::ExtensionId;

/// Timeout for `--version` and `--list-extensions`
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(15);

/// Raw outcome of one package-manager process
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The process ran to completion
    Completed {
        /// Exit code, `None` when terminated by a signal
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The process was killed after exceeding its timeout
    TimedOut,
    /// The process could not be started
    SpawnFailed(String),
}

impl ProcessOutcome {
    /// Completed with a zero exit code
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ProcessOutcome::Completed {
                exit_code: Some(0),
                ..
            }
        )
    }

    /// Convenience constructor for a successful completion
    pub fn success(stdout: impl Into<String>) -> Self {
        ProcessOutcome::Completed {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Convenience constructor for a failed completion
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        ProcessOutcome::Completed {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Extension package manager
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Command used for display and error messages
    fn command(&self) -> &str;

    /// Probe for presence, returning the reported version
    async fn version(&self) -> Result<String, PackageManagerError>;

    /// Query the currently installed extensions
    async fn list_installed(&self) -> Result<Vec<ExtensionId>, PackageManagerError>;

    /// Install one extension, bounded by `timeout`
    async fn install(&self, id: &ExtensionId, timeout: Duration) -> ProcessOutcome;
}

/// Parse `--list-extensions` output
///
/// Keeps non-empty trimmed lines and strips an `@version` suffix, which the
/// editor emits when invoked with `--show-versions`.
pub fn parse_installed(stdout: &str) -> Vec<ExtensionId> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('@') {
            Some((id, _version)) => id,
            None => line,
        })
        .map(ExtensionId::from)
        .collect()
}

/// Run a command to completion, killing it after `timeout`
pub async fn run_with_timeout(mut cmd: Command, timeout: Duration) -> ProcessOutcome {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return ProcessOutcome::SpawnFailed(e.to_string()),
    };

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => ProcessOutcome::Completed {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Ok(Err(e)) => ProcessOutcome::SpawnFailed(e.to_string()),
        Err(_) => ProcessOutcome::TimedOut,
    }
}

/// The editor's own CLI (`code` by default)
#[derive(Debug, Clone)]
pub struct CodeCli {
    command: String,
    query_timeout: Duration,
}

impl CodeCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn from_config(editor: &EditorConfig) -> Self {
        Self::new(editor.command.clone())
    }

    /// Set the timeout used for version and list queries
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Executable to spawn, resolved through `PATH`
    ///
    /// On Windows this finds `.cmd` shims that a bare `Command::new` would
    /// not. Falls back to the raw command when it cannot be resolved.
    pub fn program(&self) -> PathBuf {
        which::which(&self.command).unwrap_or_else(|_| PathBuf::from(&self.command))
    }

    async fn query(
        &self,
        program: PathBuf,
        args: &[&str],
    ) -> Result<String, PackageManagerError> {
        let mut cmd = Command::new(program);
        cmd.args(args);

        match run_with_timeout(cmd, self.query_timeout).await {
            ProcessOutcome::Completed {
                exit_code: Some(0),
                stdout,
                ..
            } => Ok(stdout),
            ProcessOutcome::Completed {
                exit_code, stderr, ..
            } => Err(PackageManagerError::CommandFailed {
                command: self.command.clone(),
                args: args.join(" "),
                message: match exit_code {
                    Some(code) => format!("exit code {}: {}", code, stderr.trim()),
                    None => format!("terminated by signal: {}", stderr.trim()),
                },
            }),
            ProcessOutcome::TimedOut => Err(PackageManagerError::TimedOut {
                command: self.command.clone(),
                args: args.join(" "),
                timeout: self.query_timeout,
            }),
            ProcessOutcome::SpawnFailed(message) => Err(PackageManagerError::CommandFailed {
                command: self.command.clone(),
                args: args.join(" "),
                message,
            }),
        }
    }
}

#[async_trait]
impl PackageManager for CodeCli {
    fn command(&self) -> &str {
        &self.command
    }

    async fn version(&self) -> Result<String, PackageManagerError> {
        let program = which::which(&self.command).map_err(|_| PackageManagerError::NotFound {
            command: self.command.clone(),
        })?;
        debug!("Resolved {} to {}", self.command, program.display());

        let stdout = self.query(program, &["--version"]).await?;
        let version = stdout.lines().next().unwrap_or("").trim().to_string();
        debug!("{} version: {}", self.command, version);
        Ok(version)
    }

    async fn list_installed(&self) -> Result<Vec<ExtensionId>, PackageManagerError> {
        let stdout = self.query(self.program(), &["--list-extensions"]).await?;
        let installed = parse_installed(&stdout);
        debug!("{} extension(s) currently installed", installed.len());
        Ok(installed)
    }

    async fn install(&self, id: &ExtensionId, timeout: Duration) -> ProcessOutcome {
        let mut cmd = Command::new(self.program());
        cmd.arg("--install-extension").arg(id.as_str());
        run_with_timeout(cmd, timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_COMMAND: &str = "vscfg-test-no-such-editor";

    #[test]
    fn test_parse_installed_strips_versions() {
        let stdout = "ms-python.python@2024.2.1\n\n  vue.volar \nesbenp.prettier-vscode@10.1.0\n";
        assert_eq!(
            parse_installed(stdout),
            vec![
                ExtensionId::new("ms-python.python"),
                ExtensionId::new("vue.volar"),
                ExtensionId::new("esbenp.prettier-vscode"),
            ]
        );
    }

    #[test]
    fn test_outcome_success() {
        assert!(ProcessOutcome::success("").is_success());
        assert!(!ProcessOutcome::failure(1, "boom").is_success());
        assert!(!ProcessOutcome::TimedOut.is_success());
    }

    #[tokio::test]
    async fn test_missing_command_probe() {
        let cli = CodeCli::new(MISSING_COMMAND);
        let err = cli.version().await.unwrap_err();
        assert!(matches!(err, PackageManagerError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_command_install_is_spawn_failure() {
        let cli = CodeCli::new(MISSING_COMMAND);
        let outcome = cli
            .install(&ExtensionId::new("foo.bar"), Duration::from_secs(1))
            .await;
        assert!(matches!(outcome, ProcessOutcome::SpawnFailed(_)));
    }

    #[test]
    fn test_unresolved_program_falls_back_to_command() {
        let cli = CodeCli::new(MISSING_COMMAND);
        assert_eq!(cli.program(), PathBuf::from(MISSING_COMMAND));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_resolves_through_path() {
        let cli = CodeCli::new("sh");
        let program = cli.program();
        assert!(program.is_absolute());
        assert_eq!(program.file_name().unwrap(), "sh");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_version_spawns_resolved_program() {
        let cli = CodeCli::new("true");
        assert!(cli.version().await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_exit_and_output() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo installed; echo oops >&2; exit 3"]);

        let outcome = run_with_timeout(cmd, Duration::from_secs(5)).await;
        assert_eq!(
            outcome,
            ProcessOutcome::Completed {
                exit_code: Some(3),
                stdout: "installed\n".to_string(),
                stderr: "oops\n".to_string(),
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");

        let started = std::time::Instant::now();
        let outcome = run_with_timeout(cmd, Duration::from_millis(100)).await;
        assert_eq!(outcome, ProcessOutcome::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
