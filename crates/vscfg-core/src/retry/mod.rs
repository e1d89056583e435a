//! Fixed-delay retry engine
//!
//! Used by the extension reconciler to re-run failed installs. Attempts are
//! observable through the `RetryObserver` trait, and `execute_counted`
//! reports how many attempts a success took.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use vscfg_core::retry::{RetryError, RetryExecutor, RetryPolicy};
//!
//! async fn example() -> Result<(String, u32), RetryError<std::io::Error>> {
//!     let policy = RetryPolicy::fixed(2, Duration::from_secs(2));
//!
//!     RetryExecutor::new(policy)
//!         .execute_counted(|| async { Ok("installed".to_string()) })
//!         .await
//! }
//! ```

mod error;
mod executor;
mod observer;
mod policy;

pub use error::RetryError;
pub use executor::RetryExecutor;
pub use observer::{NoOpObserver, RetryObserver, TracingObserver};
pub use policy::RetryPolicy;
