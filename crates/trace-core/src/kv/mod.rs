//! Key-value persistence interface.
//!
//! Everything Trace persists locally (the credential record, the entries
//! array, the theme preference, a cached hosted-auth session) is a text
//! value under a fixed key. Implementations decide where the text lives.

mod file;
mod memory;
mod sqlite;

use std::sync::Arc;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;

/// Well-known keys.
pub mod keys {
    /// Local credential record (username/salt/hash).
    pub const USER: &str = "trace_user";
    /// Entries array (JSON).
    pub const ENTRIES: &str = "trace_entries";
    /// Theme preference (`"light"` or `"dark"`).
    pub const THEME: &str = "trace_theme";
    /// Cached hosted-auth session token.
    pub const SESSION: &str = "trace_session";
}

/// Text storage addressed by key.
///
/// `set` replaces the whole value; readers never observe a partial write.
pub trait KeyValueStore: Send + Sync {
    /// Read the value for `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<K: KeyValueStore>(store: K) {
        assert_eq!(store.get(keys::THEME).unwrap(), None);
        store.set(keys::THEME, "dark").unwrap();
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("dark"));
        store.delete(keys::THEME).unwrap();
        assert_eq!(store.get(keys::THEME).unwrap(), None);
    }

    #[test]
    fn test_reference_and_arc_delegate() {
        let store = MemoryStore::new();
        round_trip(&store);
        round_trip(Arc::new(MemoryStore::new()));
    }
}
