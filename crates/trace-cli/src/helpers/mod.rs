//! Shared helpers for command handlers.

mod input;
mod parsing;

pub use input::{credentials_from_env, prompt_credentials, read_entry_body, Credentials};
pub use parsing::{parse_date, resolve_export_path};
