//! Remote configuration sources for vscfg
//!
//! This crate handles:
//! - Source definitions (name, base URL, timeout) in fixed priority order
//! - Single bounded-timeout HTTP fetches with redirect following
//! - Fallback across sources until one yields the artifact
//!
//! Everything above this crate talks to the `ArtifactFetcher` trait, so
//! callers can swap in an in-memory fetcher for tests.

pub mod error;
pub mod fetcher;
pub mod source;

pub use error::FetchError;
pub use fetcher::{ArtifactFetcher, HttpFetcher, ACCEPT_VALUE};
pub use source::{Source, SourceResolver};
