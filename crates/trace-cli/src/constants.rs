//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error
/// - 2: Misuse of shell command (reserved by shells, used by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (account, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed (wrong credentials, too many attempts).
    pub const AUTH_FAILED: i32 = 5;

    /// Everything else.
    pub const GENERAL: i32 = 1;
}

/// Environment variables read by the CLI.
pub mod env_vars {
    pub const CONFIG: &str = "TRACE_CONFIG";
    pub const USERNAME: &str = "TRACE_USERNAME";
    pub const PASSWORD: &str = "TRACE_PASSWORD";
    pub const LOG: &str = "TRACE_LOG";
}

/// Prompt attempts before giving up on interactive login.
pub const MAX_AUTH_ATTEMPTS: usize = 3;
