//! Trace CLI - a personal journal with one entry per day.
//!
//! This is the command-line interface for Trace. It provides a user-friendly
//! interface to the core library functionality.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{account, entries, misc, transfer};
use crate::constants::{env_vars, exit_codes};
use crate::errors::CliError;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_logging();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        // Get UI context for error formatting
        let ui_ctx = ctx.ui_context(false);

        let (code, error_msg, hint) = match e.downcast_ref::<CliError>() {
            Some(cli_err) => (
                cli_err.exit_code(),
                cli_err.to_string(),
                cli_err.hint().map(str::to_string),
            ),
            None => {
                let error_msg = format!("{}", e);
                let hint = extract_error_hint(&error_msg);
                (exit_codes::GENERAL, error_msg, hint)
            }
        };

        print_error(&ui_ctx, strip_hint(&error_msg), hint.as_deref());
        std::process::exit(code);
    }
}

/// Diagnostics go to stderr, filtered by `TRACE_LOG` (default `warn`).
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(env_vars::LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn strip_hint(error: &str) -> &str {
    error.split("\nHint:").next().unwrap_or(error)
}

/// Extract a hint from an error message if it contains "Hint:" or similar patterns,
/// or provide contextual hints for common error types.
fn extract_error_hint(error: &str) -> Option<String> {
    // Check for explicit hint patterns in error messages
    if let Some(idx) = error.find("\nHint:") {
        return Some(error[idx + 1..].to_string());
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("sync failed") {
        return Some(
            "Hint: Check the remote database path (`[remote] database` in the config file)."
                .to_string(),
        );
    }

    if error_lower.contains("failed to parse config") {
        return Some(
            "Hint: Valid backends are 'local' and 'remote'; valid local stores are 'file' and 'sqlite'."
                .to_string(),
        );
    }

    if error_lower.contains("$editor is not set") {
        return Some("Hint: Try `trace write --body \"...\"`.".to_string());
    }

    if error_lower.contains("storage error") {
        return Some(
            "Hint: Ensure the data directory is writable (see --data-dir or TRACE_DATA_DIR)."
                .to_string(),
        );
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Register => {
            account::handle_register(ctx)?;
        }
        Commands::Login => {
            account::handle_login(ctx)?;
        }
        Commands::Logout => {
            account::handle_logout(ctx)?;
        }
        Commands::Whoami(args) => {
            account::handle_whoami(ctx, args)?;
        }
        Commands::Write(args) => {
            entries::handle_write(ctx, args)?;
        }
        Commands::Show(args) => {
            entries::handle_show(ctx, args)?;
        }
        Commands::List(args) => {
            entries::handle_list(ctx, args)?;
        }
        Commands::Search(args) => {
            entries::handle_search(ctx, args)?;
        }
        Commands::Delete(args) => {
            entries::handle_delete(ctx, args)?;
        }
        Commands::Import(args) => {
            transfer::handle_import(ctx, args)?;
        }
        Commands::Export(args) => {
            transfer::handle_export(ctx, args)?;
        }
        Commands::Theme(args) => {
            misc::handle_theme(ctx, args)?;
        }
        Commands::Completions { shell } => {
            misc::handle_completions(*shell)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_explicit_hint() {
        let error = "Config not found at /x\nHint: Remove --config (or TRACE_CONFIG) to use defaults.";
        assert_eq!(
            extract_error_hint(error).as_deref(),
            Some("Hint: Remove --config (or TRACE_CONFIG) to use defaults.")
        );
        assert_eq!(strip_hint(error), "Config not found at /x");
    }

    #[test]
    fn test_contextual_hint() {
        let hint = extract_error_hint("Sync failed: could not load entries from the remote backend");
        assert!(hint.unwrap().contains("[remote] database"));
        assert!(extract_error_hint("something else").is_none());
    }
}
