//! Common test utilities for vscfg-extensions
//!
//! - Recording mock package manager and artifact fetcher
//! - Helpers for building identifier lists and configs

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod mocks;

pub use builders::*;
pub use mocks::*;
