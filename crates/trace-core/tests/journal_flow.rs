use std::sync::Arc;

use trace_core::auth::{AuthGate, AuthMode, LocalAuth, RemoteAuth, SqliteAuthService};
use trace_core::clock::ManualClock;
use trace_core::codec::parse_entries_json;
use trace_core::editor::{EditorCoordinator, EditorStatus, DEFAULT_DEBOUNCE_MS};
use trace_core::kv::{keys, FileStore, SqliteStore};
use trace_core::remote::SqliteDataService;
use trace_core::storage::{LocalBackend, RemoteBackend};
use trace_core::theme::ThemeMode;
use trace_core::{EntryBackend, KeyValueStore};

// 2024-03-01T09:30:00Z
const START: i64 = 1_709_285_400_000;

#[test]
fn test_local_journal_survives_restart_on_file_store() {
    let dir = tempfile::tempdir().expect("tempdir should be created");

    {
        let store = FileStore::new(dir.path());
        let auth = LocalAuth::new(&store);
        auth.submit(AuthMode::Register, "alice", "p1")
            .expect("register should succeed");

        let clock = ManualClock::new(START);
        let mut editor =
            EditorCoordinator::open(LocalBackend::new(&store), clock.clone(), DEFAULT_DEBOUNCE_MS);
        editor.set_title("Morning");
        editor.set_body("Coffee on the porch.");
        clock.advance(DEFAULT_DEBOUNCE_MS);
        assert!(editor.tick());
        ThemeMode::Dark.save(&store).expect("theme should save");
    }

    let store = FileStore::new(dir.path());
    let gate = LocalAuth::new(&store)
        .submit(AuthMode::Login, "alice", "p1")
        .expect("login should succeed");
    assert_eq!(gate.display_name(), Some("alice"));
    assert_eq!(ThemeMode::load(&store).expect("theme should load"), ThemeMode::Dark);

    let editor = EditorCoordinator::open(
        LocalBackend::new(&store),
        ManualClock::new(START + 60_000),
        DEFAULT_DEBOUNCE_MS,
    );
    assert_eq!(editor.draft().title, "Morning");
    assert_eq!(editor.draft().updated_at, START + DEFAULT_DEBOUNCE_MS);
}

#[test]
fn test_empty_entry_leaves_sqlite_store_untouched() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = SqliteStore::open(&dir.path().join("trace.db")).expect("store should open");

    let clock = ManualClock::new(START);
    let mut editor =
        EditorCoordinator::open(LocalBackend::new(&store), clock.clone(), DEFAULT_DEBOUNCE_MS);
    editor.activate("2024-03-01");
    editor.set_title("");
    editor.set_body("   ");
    clock.advance(DEFAULT_DEBOUNCE_MS * 4);
    assert!(!editor.tick());
    editor.teardown();

    assert!(store.get(keys::ENTRIES).expect("read should succeed").is_none());
}

#[test]
fn test_export_then_import_into_fresh_store() {
    let source_dir = tempfile::tempdir().expect("tempdir should be created");
    let source = FileStore::new(source_dir.path());
    let mut editor = EditorCoordinator::open(
        LocalBackend::new(&source),
        ManualClock::new(START),
        DEFAULT_DEBOUNCE_MS,
    );
    for (date, title) in [("2024-02-10", "Ski"), ("2024-01-05", "Trip"), ("2024-03-01", "")] {
        editor.activate(date);
        editor.set_title(title);
        editor.set_body("notes");
        editor.save_now();
    }
    let payload = editor.export_json().expect("export should succeed");

    let target_dir = tempfile::tempdir().expect("tempdir should be created");
    let target = FileStore::new(target_dir.path());
    let mut imported = EditorCoordinator::open(
        LocalBackend::new(&target),
        ManualClock::new(START),
        DEFAULT_DEBOUNCE_MS,
    );
    assert_eq!(imported.import_json(&payload), 3);
    assert_eq!(imported.status(), EditorStatus::Imported(3));

    let restored = LocalBackend::new(&target).load_entries();
    let mut triples: Vec<(String, String, String)> = restored
        .into_iter()
        .map(|e| (e.date_iso, e.title, e.body))
        .collect();
    triples.sort();
    assert_eq!(
        triples,
        vec![
            ("2024-01-05".into(), "Trip".into(), "notes".into()),
            ("2024-02-10".into(), "Ski".into(), "notes".into()),
            ("2024-03-01".into(), "".into(), "notes".into()),
        ]
    );
}

#[test]
fn test_legacy_import_scenario() {
    let entries = parse_entries_json(r#"[{"date":"2024-01-05","title":"Trip","body":"Notes"}]"#);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].date_iso, "2024-01-05");
    assert_eq!(entries[0].title, "Trip");
    assert_eq!(entries[0].body, "Notes");
    assert!(!entries[0].id.is_empty());
}

#[test]
fn test_remote_journal_is_scoped_per_user() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let db = dir.path().join("remote.db");
    let cache = FileStore::new(dir.path().join("cache"));

    let auth_service =
        Arc::new(SqliteAuthService::open(&db).expect("auth service should open"));
    let auth = RemoteAuth::new(auth_service, &cache);
    let gate = auth
        .submit(AuthMode::Register, "alice@example.com", "secret1")
        .expect("sign up should succeed");
    let AuthGate::Unlocked { user_id, .. } = gate else {
        panic!("gate should unlock after sign up");
    };

    let data = SqliteDataService::open(&db).expect("data service should open");
    let clock = ManualClock::new(START);
    let mut editor = EditorCoordinator::open(
        RemoteBackend::new(&data, user_id.clone()),
        clock.clone(),
        DEFAULT_DEBOUNCE_MS,
    );
    editor.set_body("synced");
    assert!(editor.flush());
    assert_eq!(editor.status(), EditorStatus::Saved);

    let stored = RemoteBackend::new(&data, user_id)
        .fetch_all()
        .expect("fetch should succeed");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].body, "synced");
    assert_eq!(stored[0].updated_at, START);

    let other = RemoteBackend::new(&data, "someone-else")
        .fetch_all()
        .expect("fetch should succeed");
    assert!(other.is_empty());
}

#[test]
fn test_remote_session_resumes_from_cache() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let db = dir.path().join("remote.db");
    let cache = FileStore::new(dir.path().join("cache"));

    {
        let service = Arc::new(SqliteAuthService::open(&db).expect("auth service should open"));
        RemoteAuth::new(service, &cache)
            .submit(AuthMode::Register, "bob@example.com", "secret1")
            .expect("sign up should succeed");
    }

    let service = Arc::new(SqliteAuthService::open(&db).expect("auth service should open"));
    let auth = RemoteAuth::new(service, &cache);
    let gate = auth.restore().expect("restore should succeed");
    assert_eq!(gate.display_name(), Some("bob@example.com"));

    auth.sign_out().expect("sign out should succeed");
    assert!(cache.get(keys::SESSION).expect("read should succeed").is_none());
}
