//! Pending-login store.
//!
//! Holds the identifier of the login currently waiting for its code. The
//! value is written when the credential step succeeds and read when the OTP
//! step is entered.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::config::{StorageConfig, paths};

/// Single-slot key-value store for the pending identifier.
pub trait PendingLoginStore {
    /// Stores `identifier`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the value cannot be persisted.
    fn save(&mut self, identifier: &str) -> Result<()>;

    /// Returns the stored identifier, if any.
    ///
    /// Never fails: unreadable or malformed storage counts as absent.
    fn load(&self) -> Option<String>;

    /// Removes the stored identifier. Clearing an empty store is fine.
    ///
    /// # Errors
    /// Returns an error if persisted storage cannot be updated.
    fn clear(&mut self) -> Result<()>;
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryPendingStore {
    value: Option<String>,
}

impl MemoryPendingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(identifier: impl Into<String>) -> Self {
        Self {
            value: Some(identifier.into()),
        }
    }
}

impl PendingLoginStore for MemoryPendingStore {
    fn save(&mut self, identifier: &str) -> Result<()> {
        self.value = Some(identifier.to_string());
        Ok(())
    }

    fn load(&self) -> Option<String> {
        self.value.clone().filter(|v| !v.is_empty())
    }

    fn clear(&mut self) -> Result<()> {
        self.value = None;
        Ok(())
    }
}

/// JSON-file store, one object of string values keyed like browser local storage.
///
/// Other keys in the file are preserved. The file is written atomically and,
/// on unix, readable only by the owner.
#[derive(Debug, Clone)]
pub struct FilePendingStore {
    path: PathBuf,
    key: String,
}

impl FilePendingStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Opens the store at its default location under `OTPGATE_HOME`.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be resolved.
    pub fn open_default(storage: &StorageConfig) -> Result<Self> {
        Ok(Self::new(
            paths::pending_login_path()?,
            storage.pending_login_key.clone(),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read pending login from {}", self.path.display())
                });
            }
        };

        serde_json::from_str(&contents).with_context(|| {
            format!("Failed to parse pending login from {}", self.path.display())
        })
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;

        let contents =
            serde_json::to_string_pretty(map).context("Failed to serialize pending login")?;

        // NamedTempFile is created owner-only (0600) on unix.
        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
        tmp.write_all(contents.as_bytes())
            .context("Failed to write pending login")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl PendingLoginStore for FilePendingStore {
    fn save(&mut self, identifier: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking the login.
        let mut map = self.read_map().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable pending login file: {e:#}");
            Map::new()
        });
        map.insert(self.key.clone(), Value::String(identifier.to_string()));
        self.write_map(&map)?;
        tracing::debug!(path = %self.path.display(), "saved pending login");
        Ok(())
    }

    fn load(&self) -> Option<String> {
        let map = match self.read_map() {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("{e:#}");
                return None;
            }
        };

        match map.get(&self.key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::String(_)) | None => None,
            Some(other) => {
                tracing::warn!(
                    key = %self.key,
                    "Ignoring non-string pending login value: {other}"
                );
                None
            }
        }
    }

    fn clear(&mut self) -> Result<()> {
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Removing unreadable pending login file: {e:#}");
                return remove_if_exists(&self.path);
            }
        };

        if map.remove(&self.key).is_none() {
            return Ok(());
        }

        if map.is_empty() {
            remove_if_exists(&self.path)
        } else {
            self.write_map(&map)
        }
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn store_in(dir: &Path) -> FilePendingStore {
        FilePendingStore::new(dir.join("pending_login.json"), "userEmail")
    }

    #[test]
    fn test_load_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        assert_eq!(store_in(dir.path()).load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());

        store.save("jdoe@example.com").unwrap();
        assert_eq!(store.load().as_deref(), Some("jdoe@example.com"));

        store.save("other@example.com").unwrap();
        assert_eq!(store.load().as_deref(), Some("other@example.com"));
    }

    #[test]
    fn test_save_writes_configured_key() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.save("jdoe@example.com").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["userEmail"], "jdoe@example.com");
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let mut store = FilePendingStore::new(dir.path().join("a/b/pending.json"), "userEmail");
        store.save("x@y.z").unwrap();
        assert_eq!(store.load().as_deref(), Some("x@y.z"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.save("jdoe@example.com").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_corrupt_file_is_absent() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_load_ignores_non_string_and_empty_values() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        fs::write(store.path(), r#"{"userEmail": 42}"#).unwrap();
        assert_eq!(store.load(), None);

        fs::write(store.path(), r#"{"userEmail": ""}"#).unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_clear_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        fs::write(store.path(), r#"{"theme": "dark"}"#).unwrap();

        store.save("jdoe@example.com").unwrap();
        store.clear().unwrap();

        assert_eq!(store.load(), None);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("theme"));
    }

    #[test]
    fn test_clear_removes_file_when_empty() {
        let dir = tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.save("jdoe@example.com").unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());

        // Clearing again is a no-op.
        store.clear().unwrap();
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryPendingStore::new();
        assert_eq!(store.load(), None);
        store.save("a@b.com").unwrap();
        assert_eq!(store.load().as_deref(), Some("a@b.com"));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }
}
