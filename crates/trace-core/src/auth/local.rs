//! Device-local login and registration.

use tracing::{info, warn};

use crate::credentials::{CredentialStore, UserRecord};
use crate::kv::KeyValueStore;

use super::{require_fields, AuthFailure, AuthGate, AuthMode};

/// Login/register against the single local account record.
pub struct LocalAuth<K> {
    credentials: CredentialStore<K>,
}

impl<K: KeyValueStore> LocalAuth<K> {
    pub fn new(store: K) -> Self {
        Self {
            credentials: CredentialStore::new(store),
        }
    }

    /// Stored account, if one exists.
    pub fn account(&self) -> Result<Option<UserRecord>, AuthFailure> {
        self.credentials
            .get_user_record()
            .map_err(|e| AuthFailure::Unavailable(e.to_string()))
    }

    /// Login when an account exists, register otherwise.
    pub fn default_mode(&self) -> Result<AuthMode, AuthFailure> {
        Ok(if self.account()?.is_some() {
            AuthMode::Login
        } else {
            AuthMode::Register
        })
    }

    /// Handle a submitted form and unlock on success.
    ///
    /// Registration stores the trimmed username and refuses to replace an
    /// existing account.
    pub fn submit(
        &self,
        mode: AuthMode,
        username: &str,
        password: &str,
    ) -> Result<AuthGate, AuthFailure> {
        require_fields(username, password)?;
        let existing = self.account()?;

        match mode {
            AuthMode::Register => {
                if existing.is_some() {
                    return Err(AuthFailure::AccountExists);
                }
                let record = self
                    .credentials
                    .set_user_record(username.trim(), password)
                    .map_err(|e| AuthFailure::Unavailable(e.to_string()))?;
                info!(username = %record.username, "registered local account");
                Ok(AuthGate::from_local(&record))
            }
            AuthMode::Login => {
                let record = existing.ok_or(AuthFailure::NoAccount)?;
                if !record.verify(username, password) {
                    warn!("rejected local login");
                    return Err(AuthFailure::IncorrectCredentials);
                }
                info!(username = %record.username, "local login");
                Ok(AuthGate::from_local(&record))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{keys, MemoryStore};

    #[test]
    fn test_register_then_login() {
        let store = MemoryStore::new();
        let auth = LocalAuth::new(&store);
        assert_eq!(auth.default_mode().unwrap(), AuthMode::Register);

        let gate = auth.submit(AuthMode::Register, "alice", "p1").unwrap();
        assert_eq!(gate.display_name(), Some("alice"));
        assert_eq!(auth.default_mode().unwrap(), AuthMode::Login);

        assert!(auth.submit(AuthMode::Login, "alice", "p1").is_ok());
        assert_eq!(
            auth.submit(AuthMode::Login, "alice", "wrong"),
            Err(AuthFailure::IncorrectCredentials)
        );
    }

    #[test]
    fn test_register_trims_username() {
        let store = MemoryStore::new();
        let auth = LocalAuth::new(&store);
        auth.submit(AuthMode::Register, "  bob  ", "pw").unwrap();
        assert_eq!(auth.account().unwrap().unwrap().username, "bob");
        assert!(auth.submit(AuthMode::Login, "bob ", "pw").is_ok());
    }

    #[test]
    fn test_second_registration_is_refused() {
        let store = MemoryStore::new();
        let auth = LocalAuth::new(&store);
        auth.submit(AuthMode::Register, "alice", "p1").unwrap();
        assert_eq!(
            auth.submit(AuthMode::Register, "mallory", "p2"),
            Err(AuthFailure::AccountExists)
        );
        assert_eq!(auth.account().unwrap().unwrap().username, "alice");
    }

    #[test]
    fn test_login_without_account() {
        let store = MemoryStore::new();
        let auth = LocalAuth::new(&store);
        assert_eq!(
            auth.submit(AuthMode::Login, "alice", "p1"),
            Err(AuthFailure::NoAccount)
        );
    }

    #[test]
    fn test_missing_fields_checked_first() {
        let store = MemoryStore::new();
        let auth = LocalAuth::new(&store);
        assert_eq!(
            auth.submit(AuthMode::Register, " ", "p1"),
            Err(AuthFailure::MissingFields)
        );
        assert!(store.get(keys::USER).unwrap().is_none());
    }

    #[test]
    fn test_wrong_username_rejected() {
        let store = MemoryStore::new();
        let auth = LocalAuth::new(&store);
        auth.submit(AuthMode::Register, "alice", "p1").unwrap();
        assert_eq!(
            auth.submit(AuthMode::Login, "bob", "p1"),
            Err(AuthFailure::IncorrectCredentials)
        );
    }
}
