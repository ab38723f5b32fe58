//! Logging utilities.
//!
//! Centralizes logger initialization. Intentionally small and avoids imposing
//! a specific logging backend beyond the standard `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
