//! Credential handling with retry logic.
//!
//! Local accounts are checked on every command. Hosted accounts resume the
//! cached session token and only ask for credentials when it is gone.

use std::sync::Arc;

use trace_core::auth::{AuthFailure, AuthGate, AuthMode, LocalAuth, RemoteAuth, SqliteAuthService};
use trace_core::storage::BackendKind;

use crate::constants::{env_vars, MAX_AUTH_ATTEMPTS};
use crate::errors::CliError;
use crate::helpers::{credentials_from_env, prompt_credentials};
use crate::ui::print_error;

use super::context::{AppContext, Store};

/// Hosted auth bound to the device store's session cache.
pub type RemoteSession = RemoteAuth<Arc<SqliteAuthService>, Store>;

pub fn open_remote_auth(ctx: &AppContext) -> anyhow::Result<RemoteSession> {
    let service = Arc::new(SqliteAuthService::open(&ctx.remote_database()?)?);
    Ok(RemoteAuth::new(service, ctx.store()?))
}

/// Prompt label for the account identifier.
pub fn user_label(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Local => "Username",
        BackendKind::Remote => "Email",
    }
}

/// Feed credentials to `submit` until it unlocks.
///
/// Environment credentials get exactly one try. Prompted credentials get
/// up to [`MAX_AUTH_ATTEMPTS`].
pub fn authenticate<F>(
    ctx: &AppContext,
    kind: BackendKind,
    confirm: bool,
    mut submit: F,
) -> anyhow::Result<AuthGate>
where
    F: FnMut(&str, &str) -> Result<AuthGate, AuthFailure>,
{
    if let Some(credentials) = credentials_from_env() {
        return submit(&credentials.username, credentials.password.as_str())
            .map_err(|failure| CliError::from(failure).into());
    }
    if !ctx.interactive() {
        return Err(CliError::auth_failed_with_hint(
            "Not signed in.",
            format!(
                "Hint: Set {} and {}, or run without --no-input.",
                env_vars::USERNAME,
                env_vars::PASSWORD
            ),
        )
        .into());
    }

    let mut attempts = 0;
    loop {
        let credentials = prompt_credentials(true, user_label(kind), confirm)?;
        match submit(&credentials.username, credentials.password.as_str()) {
            Ok(gate) => return Ok(gate),
            Err(failure) if is_retryable(&failure) => {
                attempts += 1;
                if attempts >= MAX_AUTH_ATTEMPTS {
                    return Err(CliError::auth_failed_with_hint(
                        "Too many failed attempts.",
                        "Hint: Check your credentials and try again.",
                    )
                    .into());
                }
                print_error(&ctx.ui_context(false), &failure.to_string(), None);
            }
            Err(failure) => return Err(CliError::from(failure).into()),
        }
    }
}

fn is_retryable(failure: &AuthFailure) -> bool {
    matches!(
        failure,
        AuthFailure::MissingFields | AuthFailure::IncorrectCredentials | AuthFailure::Service(_)
    )
}

/// Unlock the journal for the selected backend.
pub fn unlock(ctx: &AppContext) -> anyhow::Result<AuthGate> {
    match ctx.backend_kind()? {
        BackendKind::Local => {
            let auth = LocalAuth::new(ctx.store()?);
            if auth.account().map_err(CliError::from)?.is_none() {
                return Err(CliError::from(AuthFailure::NoAccount).into());
            }
            authenticate(ctx, BackendKind::Local, false, |username, password| {
                auth.submit(AuthMode::Login, username, password)
            })
        }
        BackendKind::Remote => {
            let auth = open_remote_auth(ctx)?;
            let gate = auth.restore().map_err(CliError::from)?;
            if gate.is_unlocked() {
                return Ok(gate);
            }
            authenticate(ctx, BackendKind::Remote, false, |email, password| {
                auth.submit(AuthMode::Login, email, password)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_failures() {
        assert!(is_retryable(&AuthFailure::IncorrectCredentials));
        assert!(is_retryable(&AuthFailure::Service(
            "Invalid login credentials".into()
        )));
        assert!(!is_retryable(&AuthFailure::NoAccount));
        assert!(!is_retryable(&AuthFailure::AccountExists));
    }

    #[test]
    fn test_user_labels() {
        assert_eq!(user_label(BackendKind::Local), "Username");
        assert_eq!(user_label(BackendKind::Remote), "Email");
    }
}
