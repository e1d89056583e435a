//! Install command

use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};
use vscfg_extensions::{CodeCli, PackageManager, ReconcileConfig};
use vscfg_installer::{
    BackupStep, ConfigInstaller, ExtensionStep, FileStep, InstallOptions, InstallReport,
    InstallerError, SettingsMode,
};
use vscfg_sources::SourceResolver;

use super::Context;
use crate::cli::InstallArgs;
use crate::output;

/// Exit status after a fatal installer error has been printed
const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Tabled)]
struct FailedRow {
    extension: String,
    publisher: String,
    attempts: u32,
    reason: String,
    error: String,
}

pub async fn run(args: InstallArgs, ctx: &Context) -> Result<()> {
    output::header("Install editor configuration");

    let mut resolver = SourceResolver::from_config(&ctx.runtime)?;
    if let Some(name) = &args.source {
        resolver = resolver.only(name)?;
    }

    let package_manager = CodeCli::from_config(&ctx.runtime.editor);

    let mut reconcile = ReconcileConfig::from(&ctx.runtime.extensions);
    if let Some(secs) = args.timeout {
        reconcile = reconcile.with_install_timeout_secs(secs);
    }

    let options = InstallOptions {
        force: args.force,
        dry_run: args.dry_run,
        mode: args.mode.into(),
        reconcile,
    };

    output::kv("Config dir", &ctx.config_dir.display().to_string());
    output::kv("Editor", package_manager.command());
    output::kv("Sources", &resolver.source_names().join(" → "));
    output::kv(
        "Settings",
        match options.mode {
            SettingsMode::Overwrite => "overwrite",
            SettingsMode::SkipIfPresent => "keep existing",
        },
    );
    output::kv(
        "Extensions",
        &format!(
            "{} at a time, {} retr(ies), {}s timeout",
            options.reconcile.batch_size(),
            options.reconcile.max_retries,
            options.reconcile.install_timeout.as_secs()
        ),
    );
    if args.dry_run {
        output::info("Dry run: nothing will be changed");
    }

    let installer = ConfigInstaller::new(
        &resolver,
        &package_manager,
        &ctx.config_dir,
        options,
        ctx.log,
    );

    let report = match installer.install().await {
        Ok(report) => report,
        Err(e) => {
            let (message, hints) = failure_lines(&e);
            output::error(&message);
            for hint in hints {
                output::item(hint);
            }
            std::process::exit(FAILURE_EXIT_CODE);
        }
    };

    print_report(&report, package_manager.command());
    Ok(())
}

/// The error line and the hints printed for a fatal installer error
fn failure_lines(error: &InstallerError) -> (String, &'static [&'static str]) {
    (error.to_string(), error.hints())
}

fn print_report(report: &InstallReport, editor: &str) {
    output::header(if report.dry_run {
        "Plan"
    } else {
        "Summary"
    });

    output::kv("Editor version", &report.editor_version);

    match &report.backup {
        BackupStep::Created(info) => output::kv("Backup", &info.path.display().to_string()),
        BackupStep::NothingToBackup => output::kv("Backup", "nothing to back up"),
        BackupStep::SkippedByForce => output::kv("Backup", "skipped (--force)"),
        BackupStep::DryRun => output::kv("Backup", "would back up existing files"),
        BackupStep::Failed(e) => output::kv("Backup", &format!("failed: {}", e)),
    }

    print_file("settings.json", &report.settings);
    print_file("keybindings.json", &report.keybindings);

    match &report.extensions {
        ExtensionStep::Planned(plan) => {
            output::kv(
                "Extensions",
                &format!(
                    "{} to install, {} already installed",
                    plan.to_install.len(),
                    plan.already_installed.len()
                ),
            );
            for id in &plan.to_install {
                output::item(id.as_str());
            }
        }
        ExtensionStep::Skipped { reason } => {
            output::kv("Extensions", &format!("skipped: {}", reason));
        }
        ExtensionStep::Reconciled => {
            let summary = &report.summary;
            output::kv(
                "Extensions",
                &format!(
                    "{} installed, {} failed, {} already installed ({} total)",
                    summary.installed, summary.failed, summary.skipped, summary.total
                ),
            );

            if !summary.failed_details.is_empty() {
                let rows: Vec<FailedRow> = summary
                    .failed_details
                    .iter()
                    .map(|f| FailedRow {
                        extension: f.name.clone(),
                        publisher: f.publisher.clone(),
                        attempts: f.attempts,
                        reason: f.reason.to_string(),
                        error: f.display_error.clone(),
                    })
                    .collect();

                let mut table = Table::new(rows);
                table.with(Style::sharp());
                println!("{}", table);
                output::info(&format!(
                    "Retry manually with: {} --install-extension <id>",
                    editor
                ));
            }
        }
    }

    println!();
    for warning in &report.warnings {
        output::warning(warning);
    }

    if report.dry_run {
        output::info("Dry run complete, no changes were made");
    } else if report.is_complete() {
        output::success("Configuration installed. Restart the editor to apply it.");
    } else {
        output::warning("Configuration installed with warnings. Restart the editor to apply it.");
    }
}

fn print_file(name: &str, step: &FileStep) {
    let status = match step {
        FileStep::Written(path) => format!("written to {}", path.display()),
        FileStep::KeptExisting(_) => "kept existing file".to_string(),
        FileStep::WouldWrite(path) => format!("would write {}", path.display()),
        FileStep::Unavailable(e) => format!("not available: {}", e),
        FileStep::Failed(e) => format!("write failed: {}", e),
    };
    output::kv(name, &status);
}
