//! Recursive copy helpers

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copy a file or directory tree to `destination`
///
/// Directories are merged into an existing destination; files inside it are
/// overwritten.
pub(crate) fn copy_recursive(source: &Path, destination: &Path) -> Result<()> {
    if source.is_file() {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::copy(source, destination).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                destination.display()
            )
        })?;
        return Ok(());
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| anyhow::anyhow!("Failed to walk directory: {}", e))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| anyhow::anyhow!("Failed to compute relative path: {}", e))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Total size in bytes of the files under `path`
pub(crate) fn tree_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_tree_and_size() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("snippets");
        fs::create_dir_all(source.join("nested")).unwrap();
        fs::write(source.join("vue.json"), "{}").unwrap();
        fs::write(source.join("nested/ts.json"), "[1]").unwrap();

        let destination = temp.path().join("copy");
        copy_recursive(&source, &destination).unwrap();

        assert_eq!(fs::read_to_string(destination.join("vue.json")).unwrap(), "{}");
        assert_eq!(
            fs::read_to_string(destination.join("nested/ts.json")).unwrap(),
            "[1]"
        );
        assert_eq!(tree_size(&destination), 5);
    }
}
