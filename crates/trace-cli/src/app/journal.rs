//! Journal composition over the selected backend.

use trace_core::auth::AuthGate;
use trace_core::clock::SystemClock;
use trace_core::editor::{EditorCoordinator, EditorStatus};
use trace_core::remote::SqliteDataService;
use trace_core::storage::{BackendKind, LocalBackend, RemoteBackend};
use trace_core::EntryBackend;

use crate::ui::{Spinner, UiContext};

use super::context::AppContext;
use super::session::unlock;

pub type Editor = EditorCoordinator<Box<dyn EntryBackend>, SystemClock>;

/// An unlocked journal.
pub struct Journal {
    pub gate: AuthGate,
    pub editor: Editor,
}

/// Unlock, then load every entry from the selected backend.
pub fn open_journal(ctx: &AppContext, ui: &UiContext) -> anyhow::Result<Journal> {
    let gate = unlock(ctx)?;
    let kind = ctx.backend_kind()?;

    let backend: Box<dyn EntryBackend> = match kind {
        BackendKind::Local => Box::new(LocalBackend::new(ctx.store()?)),
        BackendKind::Remote => {
            let user_id = gate
                .user_id()
                .ok_or_else(|| anyhow::anyhow!("Signed-in session has no user"))?
                .to_string();
            let service = SqliteDataService::open(&ctx.remote_database()?)?;
            Box::new(RemoteBackend::new(service, user_id))
        }
    };

    let spinner = (kind == BackendKind::Remote).then(|| Spinner::start(ui, "Syncing entries"));
    let editor = EditorCoordinator::open(backend, SystemClock, ctx.debounce_ms()?);
    if let Some(spinner) = spinner {
        spinner.finish();
    }

    if editor.status() == EditorStatus::SyncFailed {
        return Err(anyhow::anyhow!(
            "{}: could not load entries from the {} backend",
            EditorStatus::SyncFailed,
            kind
        ));
    }
    Ok(Journal { gate, editor })
}
