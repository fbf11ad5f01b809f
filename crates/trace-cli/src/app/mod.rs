//! Application-level utilities for the Trace CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config and data files
//! - Credential handling with retry logic
//! - Journal composition over the selected backend

mod context;
mod journal;
mod resolver;
mod session;

// Re-export public API
pub use context::AppContext;
pub use journal::{open_journal, Journal};
pub use session::{authenticate, open_remote_auth, unlock};
