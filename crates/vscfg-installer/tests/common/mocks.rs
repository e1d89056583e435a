//! Mock fetcher and package manager recording every invocation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use vscfg_extensions::{ExtensionId, PackageManager, PackageManagerError, ProcessOutcome};
use vscfg_sources::{ArtifactFetcher, FetchError};

/// Scripted response for one artifact
#[derive(Debug, Clone)]
pub enum MockArtifact {
    Content(String),
    /// Every source timed out
    TimedOut,
}

/// In-memory fetcher; unregistered artifacts answer 404 from every source
#[derive(Default)]
pub struct MockFetcher {
    artifacts: HashMap<String, MockArtifact>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(mut self, resource: &str, content: &str) -> Self {
        self.artifacts.insert(
            resource.to_string(),
            MockArtifact::Content(content.to_string()),
        );
        self
    }

    pub fn time_out(mut self, resource: &str) -> Self {
        self.artifacts
            .insert(resource.to_string(), MockArtifact::TimedOut);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactFetcher for MockFetcher {
    async fn fetch_artifact(&self, resource: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(resource.to_string());

        let last_error = match self.artifacts.get(resource) {
            Some(MockArtifact::Content(content)) => return Ok(content.clone()),
            Some(MockArtifact::TimedOut) => FetchError::Timeout {
                url: format!("https://mirror.example.com/{}", resource),
                timeout: Duration::from_millis(100),
            },
            None => FetchError::Status {
                url: format!("https://mirror.example.com/{}", resource),
                status: 404,
            },
        };

        Err(FetchError::Exhausted {
            resource: resource.to_string(),
            attempted: 3,
            last_error: Box::new(last_error),
        })
    }
}

/// Package manager double
pub struct MockPackageManager {
    installed: Mutex<Vec<ExtensionId>>,
    installs: Mutex<Vec<String>>,
    missing: bool,
    list_fails: bool,
}

impl MockPackageManager {
    pub fn new(installed: &[&str]) -> Self {
        Self {
            installed: Mutex::new(installed.iter().copied().map(ExtensionId::from).collect()),
            installs: Mutex::new(Vec::new()),
            missing: false,
            list_fails: false,
        }
    }

    pub fn missing(mut self) -> Self {
        self.missing = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub fn installs(&self) -> Vec<String> {
        self.installs.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageManager for MockPackageManager {
    fn command(&self) -> &str {
        "mock-code"
    }

    async fn version(&self) -> Result<String, PackageManagerError> {
        if self.missing {
            return Err(PackageManagerError::NotFound {
                command: "mock-code".to_string(),
            });
        }
        Ok("1.95.0".to_string())
    }

    async fn list_installed(&self) -> Result<Vec<ExtensionId>, PackageManagerError> {
        if self.list_fails {
            return Err(PackageManagerError::CommandFailed {
                command: "mock-code".to_string(),
                args: "--list-extensions".to_string(),
                message: "exit code 1: boom".to_string(),
            });
        }
        Ok(self.installed.lock().unwrap().clone())
    }

    async fn install(&self, id: &ExtensionId, _timeout: Duration) -> ProcessOutcome {
        self.installs.lock().unwrap().push(id.to_string());
        self.installed.lock().unwrap().push(id.clone());
        ProcessOutcome::success("")
    }
}
