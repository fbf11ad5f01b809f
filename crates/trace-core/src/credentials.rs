//! Device-bound credential record.
//!
//! A single username/salt/hash record lives under [`keys::USER`]. The hash is
//! a 32-bit rolling fold over UTF-16 code units rendered in base 36. It is
//! reproducible by any implementation, which keeps records portable between
//! builds, but it is **not** a cryptographic password hash: it offers no
//! meaningful resistance to brute force and must only gate a local device
//! journal. Hosted accounts use [`crate::auth::SqliteAuthService`] instead.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TraceError};
use crate::kv::{keys, KeyValueStore};

/// Number of random bytes in a salt.
pub const SALT_BYTES: usize = 16;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The stored local account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub salt: String,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
}

impl UserRecord {
    /// Whether `username`/`password` unlock this record.
    ///
    /// The submitted username is trimmed and must match exactly.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        username.trim() == self.username
            && hash_password(password, &self.salt) == self.password_hash
    }
}

/// Deterministic hash of `password` with `salt`.
///
/// Folds `hash = (hash << 5) - hash + unit` over the UTF-16 code units of
/// `"{password}::{salt}"`, where the shift operates on the low 32 bits with
/// wrap-around and the subtraction uses the full accumulator. The absolute
/// value is rendered in base 36.
pub fn hash_password(password: &str, salt: &str) -> String {
    let input = format!("{}::{}", password, salt);
    let folded = input.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = i64::from((hash as i32).wrapping_shl(5));
        shifted - hash + i64::from(unit)
    });
    to_base36(folded.unsigned_abs())
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// 16 bytes from the operating system's CSPRNG, hex-encoded.
pub fn generate_salt() -> Result<String> {
    let mut bytes = [0u8; SALT_BYTES];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| TraceError::Other(format!("Failed to generate salt: {}", e)))?;
    Ok(hex::encode(bytes))
}

/// Reads and replaces the single local account record.
pub struct CredentialStore<K> {
    store: K,
}

impl<K: KeyValueStore> CredentialStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// The stored record, or `None` when absent or unreadable as JSON.
    pub fn get_user_record(&self) -> Result<Option<UserRecord>> {
        let Some(raw) = self.store.get(keys::USER)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!(error = %err, "ignoring malformed user record");
                Ok(None)
            }
        }
    }

    /// Create a record with a fresh salt, replacing any existing one.
    pub fn set_user_record(&self, username: &str, password: &str) -> Result<UserRecord> {
        let salt = generate_salt()?;
        let record = UserRecord {
            username: username.to_string(),
            password_hash: hash_password(password, &salt),
            salt,
        };
        self.store.set(keys::USER, &serde_json::to_string(&record)?)?;
        info!(username = %record.username, "stored local account");
        Ok(record)
    }
}
