//! Hosted authentication service interface.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Signed-in user as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: SessionUser,
}

/// Callback run with the new session (or `None`) after every change.
pub type AuthListener = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

/// Handle returned by [`AuthService::on_auth_state_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Account and session operations of a hosted auth provider.
///
/// Rejections (bad credentials, duplicate accounts) are reported as
/// [`TraceError::Auth`](crate::TraceError::Auth) carrying the provider's
/// message.
pub trait AuthService: Send + Sync {
    /// The current session, if signed in.
    fn session(&self) -> Result<Option<Session>>;

    /// Adopt a previously issued access token. Returns `None` when the
    /// token is unknown or revoked.
    fn set_session(&self, access_token: &str) -> Result<Option<Session>>;

    fn sign_up(&self, email: &str, password: &str) -> Result<Session>;

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    /// End the current session. Signing out while signed out is a no-op.
    fn sign_out(&self) -> Result<()>;

    fn on_auth_state_change(&self, listener: AuthListener) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId);
}

impl<T: AuthService + ?Sized> AuthService for Arc<T> {
    fn session(&self) -> Result<Option<Session>> {
        (**self).session()
    }

    fn set_session(&self, access_token: &str) -> Result<Option<Session>> {
        (**self).set_session(access_token)
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        (**self).sign_up(email, password)
    }

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        (**self).sign_in_with_password(email, password)
    }

    fn sign_out(&self) -> Result<()> {
        (**self).sign_out()
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> SubscriptionId {
        (**self).on_auth_state_change(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        (**self).unsubscribe(id)
    }
}
