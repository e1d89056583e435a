//! Desired extension list resolution
//!
//! The structured `extensions.json` is preferred. It is either a bare array
//! of identifiers or an object with a `recommendations` array. When it is
//! missing, malformed or empty, the plain-text `extensions.list` is used
//! instead.

use serde::Deserialize;
use tracing::{debug, info, warn};
use vscfg_sources::ArtifactFetcher;

use crate::error::ExtensionListError;
use crate::id::ExtensionId;

/// Structured extension list artifact
pub const EXTENSIONS_JSON: &str = "extensions.json";

/// Line-oriented extension list artifact
pub const EXTENSIONS_LIST: &str = "extensions.list";

#[derive(Deserialize)]
#[serde(untagged)]
enum StructuredList {
    Bare(Vec<String>),
    Recommendations { recommendations: Vec<String> },
}

/// Parse a structured extension list
///
/// Entries are trimmed and blank entries dropped. Any shape other than an
/// array of strings or `{"recommendations": [...]}` is an error.
pub fn parse_structured(content: &str) -> Result<Vec<ExtensionId>, serde_json::Error> {
    let ids = match serde_json::from_str::<StructuredList>(content)? {
        StructuredList::Bare(ids) => ids,
        StructuredList::Recommendations { recommendations } => recommendations,
    };

    Ok(ids
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(ExtensionId::from)
        .collect())
}

/// Parse a line-oriented extension list
///
/// Lines are trimmed; blank lines and lines starting with `#` or `//` are
/// comments. Order is preserved.
pub fn parse_line_list(content: &str) -> Vec<ExtensionId> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("//"))
        .map(ExtensionId::from)
        .collect()
}

/// Resolve the desired extension list from the configured sources
pub async fn resolve_extension_list<F>(fetcher: &F) -> Result<Vec<ExtensionId>, ExtensionListError>
where
    F: ArtifactFetcher + ?Sized,
{
    let structured_cause = match fetcher.fetch_artifact(EXTENSIONS_JSON).await {
        Ok(content) => match parse_structured(&content) {
            Ok(ids) if !ids.is_empty() => {
                info!("Resolved {} extension(s) from {}", ids.len(), EXTENSIONS_JSON);
                return Ok(ids);
            }
            Ok(_) => "no entries".to_string(),
            Err(e) => format!("invalid JSON: {}", e),
        },
        Err(e) => e.to_string(),
    };

    debug!(
        "{} not usable ({}), falling back to {}",
        EXTENSIONS_JSON, structured_cause, EXTENSIONS_LIST
    );

    let content = fetcher
        .fetch_artifact(EXTENSIONS_LIST)
        .await
        .map_err(|e| {
            warn!("Failed to fetch {}: {}", EXTENSIONS_LIST, e);
            ExtensionListError::Unavailable {
                structured: structured_cause.clone(),
                fallback: e.to_string(),
            }
        })?;

    let ids = parse_line_list(&content);
    if ids.is_empty() {
        return Err(ExtensionListError::Empty {
            structured: structured_cause,
        });
    }

    info!("Resolved {} extension(s) from {}", ids.len(), EXTENSIONS_LIST);
    Ok(ids)
}
