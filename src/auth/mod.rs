//! Persisted auth token storage
//!
//! The token slot is an injected capability rather than an ambient store,
//! so the client can be tested against an in-memory stand-in.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;

/// Storage slot for the bearer token. Its presence is the client's only
/// "logged in" signal until the startup identity probe settles it.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Token persisted as a single file, surviving restarts until an
/// explicit logout removes it.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `<config dir>/quill-cms/token`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("could not determine the user config directory"))?;
        Ok(dir.join("quill-cms").join("token"))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory stand-in used by tests
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn save(&self, token: &str) -> io::Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));

        assert_eq!(store.load(), None);
        store.save("tok-1").unwrap();
        assert_eq!(store.load(), Some("tok-1".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));

        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        store.save("tok-2").unwrap();
        assert_eq!(store.load(), Some("tok-2".to_string()));
    }

    #[test]
    fn test_file_store_ignores_surrounding_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  tok-3\n").unwrap();
        let store = FileTokenStore::new(path);

        assert_eq!(store.load(), Some("tok-3".to_string()));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::default();

        assert_eq!(store.load(), None);
        store.save("tok-4").unwrap();
        assert_eq!(store.load(), Some("tok-4".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }
}
