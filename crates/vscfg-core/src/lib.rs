//! # vscfg-core
//!
//! Core library for the vscfg CLI providing:
//! - Runtime configuration (embedded defaults, user file, environment)
//! - Fixed-delay retry engine
//! - Explicit logging configuration passed through the call chain
//! - Platform paths for the editor's user directory

pub mod config;
pub mod error;
pub mod logging;
pub mod retry;
pub mod types;
pub mod utils;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use logging::{LogConfig, Verbosity};
pub use types::RuntimeConfig;
pub use utils::{editor_user_dir, get_home_dir};
