//! Common test utilities for vscfg-sources
//!
//! - Constants shared by the resolver tests
//! - wiremock helpers for the response shapes sources produce

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod constants;
pub mod mock_server;

pub use constants::*;
pub use mock_server::*;
