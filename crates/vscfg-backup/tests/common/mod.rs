//! Common test utilities for vscfg-backup

#![allow(dead_code)]

use chrono::{Duration, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SETTINGS: &str = r#"{"editor.tabSize": 2}"#;
pub const KEYBINDINGS: &str = r#"[{"key": "ctrl+s", "command": "workbench.action.files.save"}]"#;
pub const SNIPPET: &str = r#"{"log": {"prefix": "cl", "body": "console.log($1)"}}"#;

/// A temporary editor user directory
pub struct ConfigDirFixture {
    pub temp: TempDir,
}

impl ConfigDirFixture {
    pub fn empty() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// Directory with settings, keybindings and one snippet file
    pub fn populated() -> Self {
        let fixture = Self::empty();
        fixture.write("settings.json", SETTINGS);
        fixture.write("keybindings.json", KEYBINDINGS);
        fixture.write("snippets/javascript.json", SNIPPET);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).unwrap()
    }

    /// Create a snapshot directory dated `days_ago` days in the past
    pub fn aged_backup(&self, days_ago: i64) -> PathBuf {
        let millis = (Utc::now() - Duration::days(days_ago)).timestamp_millis();
        let dir = self.path().join(format!("backup-{}", millis));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("settings.json"), SETTINGS).unwrap();
        dir
    }

    /// Put a symlink to a missing file inside `snippets/`, so copying it fails
    #[cfg(unix)]
    pub fn dangling_snippet_link(&self) {
        let snippets = self.path().join("snippets");
        fs::create_dir_all(&snippets).unwrap();
        std::os::unix::fs::symlink(self.path().join("missing.json"), snippets.join("broken.json"))
            .unwrap();
    }

    /// Names of `backup-*` entries in the directory
    pub fn backup_dir_names(&self) -> Vec<String> {
        fs::read_dir(self.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("backup-"))
            .collect()
    }

    /// Names of files in the directory containing `.temp-backup-`
    pub fn set_aside_names(&self) -> Vec<String> {
        fs::read_dir(self.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.contains(".temp-backup-"))
            .collect()
    }
}
