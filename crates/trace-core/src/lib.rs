//! # Trace Core
//!
//! Core library for Trace - a personal journal with one entry per day.
//!
//! This crate provides the domain logic, persistence abstractions, and data
//! models independent of any user interface.
//!
//! ## Architecture
//!
//! - **kv**: Key-value persistence interface and its file, SQLite and memory stores
//! - **entry**: Entry model, upsert/merge-by-date, sorting and search matching
//! - **codec**: Import/export of the portable JSON array format
//! - **credentials**: Device-bound username/salt/hash record
//! - **storage**: Entry backends (local key-value, remote data service)
//! - **remote**: Wire records and the relational data service contract
//! - **auth**: Local and hosted authentication flows
//! - **editor**: Active-date draft editing with debounced persistence
//! - **theme**: Light/dark preference

pub mod auth;
pub mod clock;
pub mod codec;
pub mod credentials;
pub mod editor;
pub mod entry;
pub mod error;
pub mod fs;
pub mod kv;
pub mod remote;
pub mod storage;
pub mod theme;

pub use entry::Entry;
pub use error::{Result, TraceError};
pub use kv::KeyValueStore;
pub use storage::EntryBackend;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Display name of the application.
pub const APP_TITLE: &str = "Trace Journal";
