//! Refdata Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging setup for the refdata workspace.
//!
//! - **Error Handling**: [`RefdataError`] and the [`Result`] alias used for
//!   configuration and process setup
//! - **Logging**: [`logging::LogConfig`] and [`logging::init_logging`]
//!
//! # Example
//!
//! ```no_run
//! use refdata_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> refdata_common::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{RefdataError, Result};
