//! Account commands: register, login, logout, whoami.

use trace_core::auth::{AuthFailure, AuthGate, AuthMode, LocalAuth};
use trace_core::storage::BackendKind;

use crate::app::{authenticate, open_remote_auth, unlock, AppContext};
use crate::cli::JsonArgs;
use crate::errors::CliError;
use crate::ui::{badge, hint, print, receipt, Badge, UiContext};

pub fn handle_register(ctx: &AppContext) -> anyhow::Result<()> {
    let kind = ctx.backend_kind()?;
    let gate = match kind {
        BackendKind::Local => {
            let auth = LocalAuth::new(ctx.store()?);
            if auth.account().map_err(CliError::from)?.is_some() {
                return Err(CliError::from(AuthFailure::AccountExists).into());
            }
            authenticate(ctx, kind, true, |username, password| {
                auth.submit(AuthMode::Register, username, password)
            })?
        }
        BackendKind::Remote => {
            let auth = open_remote_auth(ctx)?;
            authenticate(ctx, kind, true, |email, password| {
                auth.submit(AuthMode::Register, email, password)
            })?
        }
    };

    let ui = ctx.ui_context(false);
    if !ctx.quiet() {
        print_account(&ui, "Account created", kind, &gate);
        if kind == BackendKind::Local {
            print(
                &ui,
                &hint(&ui, "Set TRACE_USERNAME and TRACE_PASSWORD to skip prompts."),
            );
        }
    }
    Ok(())
}

pub fn handle_login(ctx: &AppContext) -> anyhow::Result<()> {
    let kind = ctx.backend_kind()?;
    let gate = match kind {
        BackendKind::Local => unlock(ctx)?,
        BackendKind::Remote => {
            let auth = open_remote_auth(ctx)?;
            authenticate(ctx, kind, false, |email, password| {
                auth.submit(AuthMode::Login, email, password)
            })?
        }
    };

    let ui = ctx.ui_context(false);
    if !ctx.quiet() {
        print_account(&ui, "Signed in", kind, &gate);
    }
    Ok(())
}

pub fn handle_logout(ctx: &AppContext) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    match ctx.backend_kind()? {
        BackendKind::Local => {
            if !ctx.quiet() {
                print(
                    &ui,
                    &badge(&ui, Badge::Info, "Local accounts do not keep a session."),
                );
            }
        }
        BackendKind::Remote => {
            let auth = open_remote_auth(ctx)?;
            let gate = auth.restore().map_err(CliError::from)?;
            if !gate.is_unlocked() {
                if !ctx.quiet() {
                    print(&ui, &badge(&ui, Badge::Info, "Not signed in."));
                }
                return Ok(());
            }
            auth.sign_out().map_err(CliError::from)?;
            if !ctx.quiet() {
                print(&ui, &badge(&ui, Badge::Ok, "Signed out"));
            }
        }
    }
    Ok(())
}

pub fn handle_whoami(ctx: &AppContext, args: &JsonArgs) -> anyhow::Result<()> {
    let kind = ctx.backend_kind()?;
    let gate = match kind {
        BackendKind::Local => {
            let auth = LocalAuth::new(ctx.store()?);
            match auth.account().map_err(CliError::from)? {
                Some(record) => AuthGate::from_local(&record),
                None => return Err(CliError::from(AuthFailure::NoAccount).into()),
            }
        }
        BackendKind::Remote => {
            let gate = open_remote_auth(ctx)?
                .restore()
                .map_err(CliError::from)?;
            if !gate.is_unlocked() {
                return Err(CliError::auth_failed_with_hint(
                    "Not signed in.",
                    "Hint: Run `trace login --backend remote`.",
                )
                .into());
            }
            gate
        }
    };

    let ui = ctx.ui_context(args.json);
    if ui.mode.is_json() {
        let output = serde_json::json!({
            "backend": kind.to_string(),
            "user_id": gate.user_id(),
            "display_name": gate.display_name(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let name = gate.display_name().unwrap_or_default();
    if ctx.quiet() {
        println!("{}", name);
    } else {
        print_account(&ui, name, kind, &gate);
    }
    Ok(())
}

fn print_account(ui: &UiContext, title: &str, kind: BackendKind, gate: &AuthGate) {
    let backend = kind.to_string();
    let mut items = vec![
        ("User", gate.display_name().unwrap_or_default()),
        ("Backend", backend.as_str()),
    ];
    if kind == BackendKind::Remote {
        items.push(("User ID", gate.user_id().unwrap_or_default()));
    }
    print(ui, &receipt(ui, title, &items));
}
