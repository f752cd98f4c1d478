//! Session token store
//!
//! Holds the current bearer credential. Read by every dispatch for auth
//! header injection; mutated in exactly three places: login success (`set`),
//! explicit logout (`clear`), and the dispatcher's unauthorized branch
//! (`clear`). Clearing an already-empty store is a no-op, which matters when
//! several in-flight requests each observe a 401 and all try to clear.

use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use serde_json::{json, Value};
use tracing::warn;

use findash_core::Session;

/// Storage for the process-wide session credential.
///
/// The dispatcher takes this as a trait object so tests can inject their own
/// store.
pub trait SessionStore: Send + Sync {
    /// Current session, if authenticated
    fn get(&self) -> Option<Session>;

    /// Replace the session (login success)
    fn set(&self, session: Session);

    /// Drop the session (logout or automatic invalidation); idempotent
    fn clear(&self);
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out already authenticated (e.g. rehydrated at startup)
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<Session> {
        self.inner.read().clone()
    }

    fn set(&self, session: Session) {
        *self.inner.write() = Some(session);
    }

    fn clear(&self) {
        *self.inner.write() = None;
    }
}

/// Two fixed keys inside the session file
const TOKEN_KEY: &str = "access_token";
const USERNAME_KEY: &str = "username";

/// File-backed session store.
///
/// The credential lives as a small JSON object under two fixed keys in a
/// client-local file. Each `get` reads the file fresh; nothing is cached
/// across requests.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<Session> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let value: Value = serde_json::from_str(&contents).ok()?;
        let access_token = value.get(TOKEN_KEY)?.as_str()?;
        let username = value.get(USERNAME_KEY)?.as_str()?;
        Some(Session::new(access_token, username))
    }

    fn set(&self, session: Session) {
        let value = json!({
            TOKEN_KEY: session.access_token,
            USERNAME_KEY: session.username,
        });
        if let Err(e) = fs::write(&self.path, value.to_string()) {
            warn!("Failed to persist session to {:?}: {}", self.path, e);
        }
    }

    fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove session file {:?}: {}", self.path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("findash-session-{}-{}", std::process::id(), name))
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.get().is_none());

        store.set(Session::new("tok", "alice"));
        let session = store.get().unwrap();
        assert_eq!(session.access_token, "tok");
        assert_eq!(session.username, "alice");

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemorySessionStore::new();
        store.clear();
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn file_store_roundtrip() {
        let path = temp_path("roundtrip");
        let store = FileSessionStore::new(&path);
        assert!(store.get().is_none());

        store.set(Session::new("tok", "bob"));
        assert_eq!(store.get().unwrap().username, "bob");

        store.clear();
        assert!(store.get().is_none());
        // clearing again must not error
        store.clear();
    }

    #[test]
    fn file_store_rejects_partial_contents() {
        let path = temp_path("partial");
        fs::write(&path, r#"{"access_token": "tok"}"#).unwrap();
        let store = FileSessionStore::new(&path);
        assert!(store.get().is_none());
        fs::remove_file(&path).unwrap();
    }
}
