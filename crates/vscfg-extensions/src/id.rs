//! Extension identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Publisher used when an identifier has no `.` separator
pub const UNKNOWN_PUBLISHER: &str = "unknown";

/// An extension identifier of the form `publisher.name`
///
/// Equality is exact string comparison. The publisher/name split is only
/// used for reporting; identifiers that don't contain a `.` are still valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionId(String);

impl ExtensionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Publisher part (before the first `.`), or `unknown`
    pub fn publisher(&self) -> &str {
        match self.0.split_once('.') {
            Some((publisher, _)) => publisher,
            None => UNKNOWN_PUBLISHER,
        }
    }

    /// Name part (after the first `.`), or the whole identifier
    pub fn name(&self) -> &str {
        match self.0.split_once('.') {
            Some((_, name)) => name,
            None => &self.0,
        }
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExtensionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ExtensionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ExtensionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
