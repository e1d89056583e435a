//! Extension management for vscfg
//!
//! This crate handles:
//! - Extension identifiers (`publisher.name`)
//! - Resolving the desired extension list from remote artifacts
//! - Driving the editor CLI as a package manager
//! - Reconciling installed extensions against the desired list with
//!   bounded concurrency, retry and post-install verification

pub mod error;
pub mod id;
pub mod list;
pub mod package_manager;
pub mod reconciler;
pub mod summary;

pub use error::{ExtensionListError, InstallError, PackageManagerError};
pub use id::ExtensionId;
pub use list::{
    parse_line_list, parse_structured, resolve_extension_list, EXTENSIONS_JSON, EXTENSIONS_LIST,
};
pub use package_manager::{parse_installed, CodeCli, PackageManager, ProcessOutcome};
pub use reconciler::{ReconcileConfig, ReconcilePlan, Reconciler};
pub use summary::{FailedExtension, FailureReason, InstallResult, ReconcileSummary};
