//! Backup commands

use anyhow::{Context as _, Result};
use chrono::Utc;
use tabled::{settings::Style, Table, Tabled};
use vscfg_backup::{BackupInfo, BackupManager};

use super::Context;
use crate::cli::BackupCommands;
use crate::output;

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "#")]
    index: usize,
    name: String,
    created: String,
    age: String,
    size: String,
}

pub fn run(command: BackupCommands, ctx: &Context) -> Result<()> {
    let manager = BackupManager::new(&ctx.config_dir);

    match command {
        BackupCommands::List => list(&manager),
        BackupCommands::Restore { backup } => restore(&manager, backup.as_ref().map(|p| p.as_std_path())),
        BackupCommands::Clean { older_than } => {
            clean(&manager, older_than.unwrap_or(ctx.runtime.backup.retention_days))
        }
    }
}

fn list(manager: &BackupManager) -> Result<()> {
    output::header("Configuration backups");

    let backups = manager.list()?;
    if backups.is_empty() {
        output::info("No backups found");
        return Ok(());
    }

    print_table(&backups);
    Ok(())
}

fn restore(manager: &BackupManager, explicit: Option<&std::path::Path>) -> Result<()> {
    output::header("Restore configuration backup");

    let backup_path = match explicit {
        Some(path) => {
            let path = std::path::absolute(path)
                .with_context(|| format!("Invalid backup path {}", path.display()))?;
            output::kv("Backup", &path.display().to_string());
            path
        }
        None => match manager.latest()? {
            Some(latest) => {
                output::kv(
                    "Backup",
                    &format!(
                        "{} (newest, {})",
                        latest.name,
                        output::format_age(latest.created, Utc::now())
                    ),
                );
                latest.path
            }
            None => {
                output::warning("No backups found");
                output::info("Run `vscfg install` to install a configuration and create one");
                return Ok(());
            }
        },
    };

    let spinner = output::spinner("Restoring configuration...");
    let report = match manager.restore(&backup_path) {
        Ok(report) => {
            spinner.finish_and_clear();
            report
        }
        Err(e) => {
            spinner.finish_and_clear();
            output::error("Restore failed");
            return Err(e);
        }
    };

    if report.restored.is_empty() {
        output::warning("The backup contains no configuration files");
        return Ok(());
    }

    output::success("Configuration restored");
    for entry in &report.restored {
        output::item(entry);
    }
    for aside in &report.set_aside {
        output::kv("Previous copy", &aside.display().to_string());
    }
    output::info("Restart the editor to apply the restored configuration");
    Ok(())
}

fn clean(manager: &BackupManager, days: u32) -> Result<()> {
    output::header("Clean old backups");
    output::kv("Older than", &format!("{} day(s)", days));

    let report = manager.prune_older_than(days)?;

    if report.removed.is_empty() && report.failed.is_empty() {
        output::success(&format!(
            "Nothing to clean, {} backup(s) are recent",
            report.kept
        ));
        return Ok(());
    }

    for backup in &report.removed {
        output::item(&format!(
            "removed {} ({})",
            backup.name,
            output::format_size(backup.size_bytes)
        ));
    }
    for (backup, error) in &report.failed {
        output::warning(&format!("Failed to remove {}: {}", backup.name, error));
    }

    output::success(&format!(
        "Removed {} backup(s), freed {}, kept {}",
        report.removed.len(),
        output::format_size(report.freed_bytes()),
        report.kept
    ));
    Ok(())
}

fn print_table(backups: &[BackupInfo]) {
    let now = Utc::now();
    let rows: Vec<BackupRow> = backups
        .iter()
        .enumerate()
        .map(|(i, b)| BackupRow {
            index: i + 1,
            name: b.name.clone(),
            created: b.created.format("%Y-%m-%d %H:%M:%S").to_string(),
            age: output::format_age(b.created, now),
            size: output::format_size(b.size_bytes),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}
