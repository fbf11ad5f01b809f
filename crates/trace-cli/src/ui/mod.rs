//! UI primitives for the Trace CLI.
//!
//! This module provides:
//! - **Context**: Terminal detection and output mode (json, plain, pretty)
//! - **Theme**: Badge tokens and the light/dark color palette
//! - **Render**: Tables, headers, receipts, hints
//! - **Progress**: Spinner for remote round trips
//! - **Format**: String utilities (truncate, single line)

mod context;
pub mod format;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::{OutputMode, UiContext};
pub use theme::Badge;

pub use render::{
    badge, blank_line, divider, header, hint, kv, print, print_error, receipt, table, Column,
};

pub use progress::Spinner;

pub use format::{single_line, truncate};
