//! Mock implementations for testing
//!
//! Provides a package manager and an artifact fetcher that record every
//! invocation and never touch processes or the network.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use vscfg_extensions::{ExtensionId, PackageManager, PackageManagerError, ProcessOutcome};
use vscfg_sources::{ArtifactFetcher, FetchError};

/// Lifecycle event recorded by the mock package manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallEvent {
    Started(String),
    Finished(String),
}

/// Mock package manager
///
/// Installs succeed by default and add the extension to the installed set.
/// Per-extension outcome queues override that; once a queue is drained the
/// last outcome keeps being returned.
pub struct MockPackageManager {
    installed: Mutex<Vec<ExtensionId>>,
    outcomes: Mutex<HashMap<String, VecDeque<ProcessOutcome>>>,
    /// Extensions whose successful install never shows up in the installed list
    ghosts: Mutex<HashSet<String>>,
    invocations: Mutex<Vec<String>>,
    events: Mutex<Vec<InstallEvent>>,
    list_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    install_delay: Duration,
    missing: bool,
    list_fails: bool,
}

impl Default for MockPackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPackageManager {
    pub fn new() -> Self {
        Self {
            installed: Mutex::new(Vec::new()),
            outcomes: Mutex::new(HashMap::new()),
            ghosts: Mutex::new(HashSet::new()),
            invocations: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            install_delay: Duration::from_millis(20),
            missing: false,
            list_fails: false,
        }
    }

    /// Start with these extensions installed
    pub fn with_installed(self, installed: &[&str]) -> Self {
        *self.installed.lock().unwrap() = installed.iter().copied().map(ExtensionId::from).collect();
        self
    }

    /// Simulate an editor that is not on PATH
    pub fn missing(mut self) -> Self {
        self.missing = true;
        self
    }

    /// Make every `list_installed` call fail
    pub fn failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    /// Queue outcomes for one extension
    pub fn with_outcomes(self, id: &str, outcomes: Vec<ProcessOutcome>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .insert(id.to_string(), outcomes.into_iter().collect());
        self
    }

    /// Make one extension always fail to install
    pub fn always_failing(self, id: &str) -> Self {
        self.with_outcomes(id, vec![ProcessOutcome::failure(1, "install failed")])
    }

    /// Make one extension report success without ever being installed
    pub fn ghost(self, id: &str) -> Self {
        self.ghosts.lock().unwrap().insert(id.to_string());
        self
    }

    /// Install ids in call order
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn install_count(&self, id: &str) -> usize {
        self.invocations().iter().filter(|i| *i == id).count()
    }

    pub fn events(&self) -> Vec<InstallEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn installed(&self) -> Vec<ExtensionId> {
        self.installed.lock().unwrap().clone()
    }

    fn next_outcome(&self, id: &str) -> ProcessOutcome {
        let mut outcomes = self.outcomes.lock().unwrap();
        match outcomes.get_mut(id) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(ProcessOutcome::success("")),
            None => ProcessOutcome::success(format!("Extension '{}' was successfully installed.", id)),
        }
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
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.list_fails {
            return Err(PackageManagerError::CommandFailed {
                command: "mock-code".to_string(),
                args: "--list-extensions".to_string(),
                message: "exit code 1: list failed".to_string(),
            });
        }
        Ok(self.installed())
    }

    async fn install(&self, id: &ExtensionId, _timeout: Duration) -> ProcessOutcome {
        self.invocations.lock().unwrap().push(id.to_string());
        self.events
            .lock()
            .unwrap()
            .push(InstallEvent::Started(id.to_string()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.install_delay).await;

        let outcome = self.next_outcome(id.as_str());
        if outcome.is_success() && !self.ghosts.lock().unwrap().contains(id.as_str()) {
            let mut installed = self.installed.lock().unwrap();
            if !installed.contains(id) {
                installed.push(id.clone());
            }
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.events
            .lock()
            .unwrap()
            .push(InstallEvent::Finished(id.to_string()));
        outcome
    }
}

/// In-memory artifact fetcher
///
/// Artifacts that were not registered answer with a 404.
#[derive(Default)]
pub struct MockFetcher {
    artifacts: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artifact(mut self, resource: &str, content: &str) -> Self {
        self.artifacts
            .insert(resource.to_string(), content.to_string());
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
        self.artifacts
            .get(resource)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: format!("mock://{}", resource),
                status: 404,
            })
    }
}
