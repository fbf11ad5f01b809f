//! Authentication flows that gate access to the entry store.
//!
//! Two variants exist:
//!
//! - [`LocalAuth`]: a single device-bound account held by the
//!   [`CredentialStore`](crate::credentials::CredentialStore)
//! - [`RemoteAuth`]: accounts and sessions owned by an [`AuthService`]
//!
//! Both report failures as [`AuthFailure`] values whose `Display` is the
//! message shown to the user; nothing escapes the flow as a hard error.

mod local;
mod remote;
mod service;
mod sqlite;

pub use local::LocalAuth;
pub use remote::RemoteAuth;
pub use service::{AuthListener, AuthService, Session, SessionUser, SubscriptionId};
pub use sqlite::SqliteAuthService;

use thiserror::Error;

use crate::credentials::UserRecord;

/// Which form the user submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

/// User-facing authentication failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Enter a username and password.")]
    MissingFields,

    #[error("An account already exists on this device.")]
    AccountExists,

    #[error("No local account found. Please register first.")]
    NoAccount,

    #[error("Incorrect username or password.")]
    IncorrectCredentials,

    /// Message reported by the hosted auth service
    #[error("{0}")]
    Service(String),

    /// Account storage could not be read or written
    #[error("Account storage unavailable: {0}")]
    Unavailable(String),
}

/// Whether the journal is reachable, and for whom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthGate {
    #[default]
    Locked,
    Unlocked {
        user_id: String,
        display_name: String,
    },
}

impl AuthGate {
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(session) => AuthGate::Unlocked {
                user_id: session.user.id.clone(),
                display_name: session.user.email.clone(),
            },
            None => AuthGate::Locked,
        }
    }

    pub fn from_local(record: &UserRecord) -> Self {
        AuthGate::Unlocked {
            user_id: record.username.clone(),
            display_name: record.username.clone(),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        matches!(self, AuthGate::Unlocked { .. })
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthGate::Unlocked { user_id, .. } => Some(user_id),
            AuthGate::Locked => None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            AuthGate::Unlocked { display_name, .. } => Some(display_name),
            AuthGate::Locked => None,
        }
    }
}

/// Reject blank usernames and empty passwords before touching any store.
fn require_fields(username: &str, password: &str) -> Result<(), AuthFailure> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthFailure::MissingFields);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            AuthFailure::IncorrectCredentials.to_string(),
            "Incorrect username or password."
        );
        assert_eq!(
            AuthFailure::Service("Invalid login credentials".into()).to_string(),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_gate_from_session() {
        assert_eq!(AuthGate::from_session(None), AuthGate::Locked);
        let session = Session {
            access_token: "t".into(),
            user: SessionUser {
                id: "u1".into(),
                email: "a@example.com".into(),
            },
        };
        let gate = AuthGate::from_session(Some(&session));
        assert!(gate.is_unlocked());
        assert_eq!(gate.user_id(), Some("u1"));
        assert_eq!(gate.display_name(), Some("a@example.com"));
    }

    #[test]
    fn test_require_fields() {
        assert_eq!(require_fields("  ", "pw"), Err(AuthFailure::MissingFields));
        assert_eq!(require_fields("alice", ""), Err(AuthFailure::MissingFields));
        assert!(require_fields("alice", " ").is_ok());
    }
}
