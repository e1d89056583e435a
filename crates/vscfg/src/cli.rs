//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use vscfg_installer::SettingsMode;

/// vscfg - install a shared editor configuration
#[derive(Parser, Debug)]
#[command(name = "vscfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding vscfg's own config.yaml [default: ~/.vscfg]
    #[arg(long, global = true, value_name = "DIR")]
    pub config_home: Option<Utf8PathBuf>,

    /// Editor user directory to install into
    #[arg(long, global = true, value_name = "PATH")]
    pub config_dir: Option<Utf8PathBuf>,

    /// Editor command used to manage extensions
    #[arg(long, global = true, value_name = "CMD")]
    pub editor: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install settings, keybindings and extensions
    Install(InstallArgs),

    /// Show the current editor configuration
    Status(StatusArgs),

    /// Manage configuration backups
    #[command(subcommand)]
    Backup(BackupCommands),
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Skip the backup of the existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Per-extension install timeout in seconds [default: 30]
    #[arg(short, long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Fetch only from this source, without fallback
    #[arg(short, long, value_name = "NAME")]
    pub source: Option<String>,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// How to handle an existing settings.json
    #[arg(long, value_enum, default_value = "overwrite")]
    pub mode: ModeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Replace the existing file
    Overwrite,
    /// Keep an existing file
    SkipExisting,
}

impl From<ModeArg> for SettingsMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Overwrite => SettingsMode::Overwrite,
            ModeArg::SkipExisting => SettingsMode::SkipIfPresent,
        }
    }
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// List every installed extension and backup
    #[arg(long)]
    pub all: bool,
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// List available backups
    List,

    /// Restore a backup (the newest by default)
    Restore {
        /// Backup directory to restore
        #[arg(long, value_name = "PATH")]
        backup: Option<Utf8PathBuf>,
    },

    /// Delete old backups
    Clean {
        /// Delete backups older than this many days [default: 30]
        #[arg(long, value_name = "DAYS")]
        older_than: Option<u32>,
    },
}
