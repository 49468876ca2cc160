use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::error::SessionError;

/// Persisted entry holding the bearer credential.
pub const TOKEN_KEY: &str = "gem_auth_token";
/// Persisted entry holding the serialized identity record.
pub const USER_KEY: &str = "gem_user_data";

/// Durable key/value storage for session entries.
///
/// Reads and writes are synchronous and local to the device. A backend that
/// cannot read a value returns `None` — the store treats every read failure
/// as "no session".
pub trait SessionStorage: Send + Sync {
    /// Read a value, or `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn write(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove a value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// Filesystem-backed storage: one file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }
}

impl SessionStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.join(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.dir.join(key));
    }
}

/// In-memory storage for tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}
