//! SQLite-backed stand-in for a hosted auth provider.
//!
//! Passwords are hashed with Argon2id; access tokens are random hex strings
//! persisted in a `sessions` table so a later process can resume them.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::entry::new_entry_id;
use crate::error::{Result, TraceError};

use super::{AuthListener, AuthService, Session, SessionUser, SubscriptionId};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

const TOKEN_BYTES: usize = 32;

pub struct SqliteAuthService {
    conn: Mutex<Connection>,
    current: Mutex<Option<Session>>,
    listeners: Mutex<Vec<(SubscriptionId, AuthListener)>>,
    next_subscription: AtomicU64,
}

impl SqliteAuthService {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            current: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        })
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TraceError::Storage("SQLite connection poisoned".to_string()))
    }

    fn lock_current(&self) -> Result<MutexGuard<'_, Option<Session>>> {
        self.current
            .lock()
            .map_err(|_| TraceError::Other("Session state poisoned".to_string()))
    }

    /// Issue a token for `user` and make it the current session.
    fn start_session(&self, user: SessionUser) -> Result<Session> {
        let token = generate_token()?;
        self.lock_conn()?.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![token, user.id, Utc::now().to_rfc3339()],
        )?;
        let session = Session {
            access_token: token,
            user,
        };
        self.replace_current(Some(session.clone()))?;
        Ok(session)
    }

    fn replace_current(&self, session: Option<Session>) -> Result<()> {
        *self.lock_current()? = session.clone();
        self.notify(session.as_ref());
        Ok(())
    }

    /// Run listeners outside the lock so they may call back into the service.
    fn notify(&self, session: Option<&Session>) {
        let listeners: Vec<AuthListener> = match self.listeners.lock() {
            Ok(guard) => guard.iter().map(|(_, l)| l.clone()).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            listener(session);
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid_email {
        return Err(TraceError::Auth(
            "Unable to validate email address: invalid format".to_string(),
        ));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(TraceError::Auth(format!(
            "Password should be at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn generate_token() -> Result<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| TraceError::Other(format!("Failed to generate token: {}", e)))?;
    Ok(hex::encode(bytes))
}

fn hash_secret(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes)
        .map_err(|e| TraceError::Other(format!("Failed to generate salt: {}", e)))?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| TraceError::Other(format!("Failed to encode salt: {}", e)))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TraceError::Other(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_secret(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

impl AuthService for SqliteAuthService {
    fn session(&self) -> Result<Option<Session>> {
        Ok(self.lock_current()?.clone())
    }

    fn set_session(&self, access_token: &str) -> Result<Option<Session>> {
        let user = self
            .lock_conn()?
            .query_row(
                "SELECT u.id, u.email FROM sessions s JOIN users u ON u.id = s.user_id
                 WHERE s.token = ?1",
                params![access_token],
                |row| {
                    Ok(SessionUser {
                        id: row.get(0)?,
                        email: row.get(1)?,
                    })
                },
            )
            .optional()?;

        let Some(user) = user else {
            debug!("unknown access token");
            return Ok(None);
        };
        let session = Session {
            access_token: access_token.to_string(),
            user,
        };
        self.replace_current(Some(session.clone()))?;
        Ok(Some(session))
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        validate_credentials(&email, password)?;

        let user = SessionUser {
            id: new_entry_id(),
            email,
        };
        {
            let conn = self.lock_conn()?;
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
                params![user.email],
                |row| row.get(0),
            )?;
            if exists {
                return Err(TraceError::Auth("User already registered".to_string()));
            }
            conn.execute(
                "INSERT INTO users (id, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    user.id,
                    user.email,
                    hash_secret(password)?,
                    Utc::now().to_rfc3339()
                ],
            )?;
        }
        info!(user_id = %user.id, "signed up");
        self.start_session(user)
    }

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        let row = self
            .lock_conn()?
            .query_row(
                "SELECT id, password_hash FROM users WHERE email = ?1",
                params![email],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        match row {
            Some((id, hash)) if verify_secret(password, &hash) => {
                info!(user_id = %id, "signed in");
                self.start_session(SessionUser { id, email })
            }
            _ => Err(TraceError::Auth("Invalid login credentials".to_string())),
        }
    }

    fn sign_out(&self) -> Result<()> {
        let previous = self.lock_current()?.take();
        let Some(previous) = previous else {
            return Ok(());
        };
        self.lock_conn()?.execute(
            "DELETE FROM sessions WHERE token = ?1",
            params![previous.access_token],
        )?;
        info!(user_id = %previous.user.id, "signed out");
        self.notify(None);
        Ok(())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut guard) = self.listeners.lock() {
            guard.push((id, listener));
        }
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut guard) = self.listeners.lock() {
            guard.retain(|(existing, _)| *existing != id);
        }
    }
}
