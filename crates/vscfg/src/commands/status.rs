//! Status command

use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use vscfg_backup::BackupManager;
use vscfg_extensions::{CodeCli, PackageManager};

use super::Context;
use crate::cli::StatusArgs;
use crate::output;

const EXTENSION_PREVIEW: usize = 10;
const BACKUP_PREVIEW: usize = 5;

pub async fn run(args: StatusArgs, ctx: &Context) -> Result<()> {
    output::header("Editor configuration status");

    let package_manager = CodeCli::from_config(&ctx.runtime.editor);

    output::kv("Config dir", &ctx.config_dir.display().to_string());
    match package_manager.version().await {
        Ok(version) => output::kv("Editor", &format!("{} {}", package_manager.command(), version)),
        Err(e) => output::kv("Editor", &format!("not available ({})", e)),
    }

    output::header("Configuration files");
    for name in ["settings.json", "keybindings.json", "snippets"] {
        print_entry(&ctx.config_dir, name);
    }

    output::header("Extensions");
    let spinner = ctx
        .log
        .show_progress()
        .then(|| output::spinner("Querying installed extensions..."));
    let installed = package_manager.list_installed().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match installed {
        Ok(installed) if installed.is_empty() => output::info("No extensions installed"),
        Ok(installed) => {
            output::kv("Installed", &installed.len().to_string());
            let shown = if args.all {
                installed.len()
            } else {
                EXTENSION_PREVIEW
            };
            for id in installed.iter().take(shown) {
                output::item(id.as_str());
            }
            if installed.len() > shown {
                output::item(&format!("... and {} more", installed.len() - shown));
            }
        }
        Err(e) => output::warning(&format!("Could not list extensions: {}", e)),
    }

    output::header("Backups");
    let backups = BackupManager::new(&ctx.config_dir).list()?;
    if backups.is_empty() {
        output::info("No backups found");
    } else {
        let now = Utc::now();
        let shown = if args.all { backups.len() } else { BACKUP_PREVIEW };
        output::kv("Available", &backups.len().to_string());
        for backup in backups.iter().take(shown) {
            output::item(&format!(
                "{} ({}, {})",
                backup.name,
                output::format_age(backup.created, now),
                output::format_size(backup.size_bytes)
            ));
        }
        if backups.len() > shown {
            output::item(&format!("... and {} more", backups.len() - shown));
        }
    }

    Ok(())
}

fn print_entry(config_dir: &Path, name: &str) {
    let path = config_dir.join(name);
    let status = match std::fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => "present (directory)".to_string(),
        Ok(meta) => format!("present ({})", output::format_size(meta.len())),
        Err(_) => "missing".to_string(),
    };
    output::kv(name, &status);
}
