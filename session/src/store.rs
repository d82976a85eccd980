//! Key/value persistence for session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The portal keeps two kinds of client state: durable values that survive a
//! restart (token, user profile, language) and transient values scoped to a
//! single tab (last route before an error). Both sit behind
//! [`KeyValueStore`] so the browser build can back them with
//! `localStorage`/`sessionStorage` and native builds with memory or a file.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Durable key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";
/// Transient key holding the route active before the last request.
pub const LAST_ROUTE_KEY: &str = "lastUrlBeforeError";
/// Durable key holding the chosen UI language code.
pub const LANGUAGE_KEY: &str = "selectedLanguage";

/// Language used when none has been chosen.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Error raised by a [`KeyValueStore`] write.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing storage is not reachable (no window, private mode, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The backing storage rejected the write (quota, permissions, ...).
    #[error("storage write failed for `{key}`: {message}")]
    Write { key: String, message: String },
    /// An on-disk store could not be read.
    #[error("storage file {path} unreadable: {message}")]
    Corrupt { path: PathBuf, message: String },
}

/// String key/value storage shared by the session layer.
///
/// Reads are infallible by contract: an unreachable store reads as empty.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Whether `key` currently holds a value.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-lifetime store. Used for transient state on native targets and
/// throughout the tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().map_or(0, |values| values.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        values.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Durable store persisted as a single JSON object on disk.
///
/// The whole map is rewritten on every mutation; the file is tiny.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file opens as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the file exists but cannot be read
    /// or does not hold a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::Corrupt { path: path.clone(), message: e.to_string() })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::Corrupt { path, message: e.to_string() }),
        };
        Ok(Self { path, values: Mutex::new(values) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_err = |message: String| StoreError::Write { key: key.to_owned(), message };
        let raw = serde_json::to_string_pretty(values).map_err(|e| write_err(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        fs::write(&self.path, raw).map_err(|e| write_err(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let previous = values.insert(key.to_owned(), value.to_owned());
        if let Err(e) = self.flush(key, &values) {
            match previous {
                Some(old) => values.insert(key.to_owned(), old),
                None => values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let Some(previous) = values.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.flush(key, &values) {
            values.insert(key.to_owned(), previous);
            return Err(e);
        }
        Ok(())
    }
}

// =============================================================================
// PREFERENCES
// =============================================================================

/// UI preferences kept next to the session in durable storage.
pub struct Preferences<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> Preferences<'a> {
    #[must_use]
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The chosen language code, or [`DEFAULT_LANGUAGE`].
    #[must_use]
    pub fn language(&self) -> String {
        self.store
            .get(LANGUAGE_KEY)
            .map(|code| code.trim().to_owned())
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
    }

    /// Persist the chosen language code.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    pub fn set_language(&self, code: &str) -> Result<(), StoreError> {
        self.store.set(LANGUAGE_KEY, code.trim())
    }
}
