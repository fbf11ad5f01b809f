//! Hosted login and registration.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::TraceError;
use crate::kv::{keys, KeyValueStore};

use super::{
    require_fields, AuthFailure, AuthGate, AuthMode, AuthService, Session, SubscriptionId,
};

/// Drives an [`AuthService`] and keeps an [`AuthGate`] in step with it.
///
/// The access token is cached under [`keys::SESSION`] so a later process
/// can resume the session with [`RemoteAuth::restore`].
pub struct RemoteAuth<S: AuthService, K> {
    service: S,
    store: K,
    gate: Arc<Mutex<AuthGate>>,
    subscription: SubscriptionId,
}

impl<S: AuthService, K: KeyValueStore> RemoteAuth<S, K> {
    pub fn new(service: S, store: K) -> Self {
        let gate = Arc::new(Mutex::new(AuthGate::Locked));
        let sink = gate.clone();
        let subscription = service.on_auth_state_change(Arc::new(move |session| {
            if let Ok(mut gate) = sink.lock() {
                *gate = AuthGate::from_session(session);
            }
        }));
        Self {
            service,
            store,
            gate,
            subscription,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Snapshot of the gate; a poisoned gate reads as locked.
    pub fn gate(&self) -> AuthGate {
        self.gate
            .lock()
            .map(|gate| gate.clone())
            .unwrap_or(AuthGate::Locked)
    }

    pub fn session(&self) -> Result<Option<Session>, AuthFailure> {
        self.service.session().map_err(into_failure)
    }

    /// Resume the cached session, dropping the cache if the service no
    /// longer recognizes it.
    pub fn restore(&self) -> Result<AuthGate, AuthFailure> {
        let cached = self.store.get(keys::SESSION).map_err(into_failure)?;
        let Some(token) = cached.filter(|t| !t.is_empty()) else {
            return Ok(self.gate());
        };
        match self.service.set_session(&token).map_err(into_failure)? {
            Some(session) => Ok(self.adopt(&session)),
            None => {
                debug!("cached session is no longer valid");
                if let Err(err) = self.store.delete(keys::SESSION) {
                    warn!(error = %err, "failed to clear cached session");
                }
                Ok(self.gate())
            }
        }
    }

    pub fn submit(
        &self,
        mode: AuthMode,
        email: &str,
        password: &str,
    ) -> Result<AuthGate, AuthFailure> {
        require_fields(email, password)?;
        let session = match mode {
            AuthMode::Register => self.service.sign_up(email, password),
            AuthMode::Login => self.service.sign_in_with_password(email, password),
        }
        .map_err(into_failure)?;

        if let Err(err) = self.store.set(keys::SESSION, &session.access_token) {
            warn!(error = %err, "failed to cache session");
        }
        Ok(self.adopt(&session))
    }

    /// Unlock the gate for `session` without waiting on the listener.
    fn adopt(&self, session: &Session) -> AuthGate {
        let unlocked = AuthGate::from_session(Some(session));
        if let Ok(mut gate) = self.gate.lock() {
            *gate = unlocked.clone();
        }
        unlocked
    }

    /// Sign out and forget the cached token. The gate locks even when the
    /// service call fails.
    pub fn sign_out(&self) -> Result<(), AuthFailure> {
        let result = self.service.sign_out().map_err(into_failure);
        if let Err(err) = self.store.delete(keys::SESSION) {
            warn!(error = %err, "failed to clear cached session");
        }
        if let Ok(mut gate) = self.gate.lock() {
            *gate = AuthGate::Locked;
        }
        result
    }
}

impl<S: AuthService, K> Drop for RemoteAuth<S, K> {
    fn drop(&mut self) {
        self.service.unsubscribe(self.subscription);
    }
}

fn into_failure(err: TraceError) -> AuthFailure {
    match err {
        TraceError::Auth(message) => AuthFailure::Service(message),
        other => AuthFailure::Unavailable(other.to_string()),
    }
}
