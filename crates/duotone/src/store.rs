//! Durable key/value storage for theme preferences.
//!
//! The controller persists two string-valued keys:
//!
//! - [`THEME_KEY`] — `"light"` or `"dark"`, present only after an explicit
//!   user toggle. Absence means "no explicit choice" and keeps the
//!   controller mirroring the OS preference.
//! - [`HOTKEY_HINT_KEY`] — `"true"` once the one-time hotkey hint has been
//!   emitted.
//!
//! Stores are infallible at the trait level: a write that cannot reach its
//! backing medium degrades to a logged warning and the in-memory snapshot
//! stays authoritative for the rest of the session. Only [`FileStore::open`]
//! returns an error, so hosts can report an unreadable or corrupt file once
//! at startup.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;
use crate::preference::ThemePreference;

/// Storage key for the persisted theme choice.
pub const THEME_KEY: &str = "theme";

/// Storage key for the one-time hotkey hint flag.
pub const HOTKEY_HINT_KEY: &str = "hotkeyHintShown";

/// A durable string key/value store for user preferences.
pub trait PreferenceStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key` and its value, if present.
    fn remove(&self, key: &str);
}

/// Reads the explicit theme choice from a store.
///
/// An unparseable value is treated the same as an absent one: the store
/// only ever holds `"light"` or `"dark"`, so anything else means the entry
/// did not come from this controller and carries no intent.
pub fn persisted_theme(store: &dyn PreferenceStore) -> Option<ThemePreference> {
    store.get(THEME_KEY).and_then(|value| value.parse().ok())
}

/// In-memory preference store.
///
/// Used by tests and by hosts that manage durability themselves. Starts
/// empty; [`MemoryStore::with_theme`] seeds an explicit choice.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with an explicit theme choice already persisted.
    pub fn with_theme(theme: ThemePreference) -> Self {
        let store = Self::new();
        store.set(THEME_KEY, theme.as_str());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// File-backed preference store.
///
/// Keeps the full key/value map in memory and writes it through to a JSON
/// file on every mutation. A missing file is not an error — the store
/// starts empty and the file appears on first write.
///
/// # Example
///
/// ```rust,ignore
/// use duotone::FileStore;
///
/// let store = FileStore::open(".duotone.json")?;
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, loading existing entries.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the file exists but cannot be read or
    /// does not contain a JSON string map.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_through(&self, entries: &HashMap<String, String>) {
        let json = match serde_json::to_string_pretty(entries) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "Failed to encode preference store");
                return;
            }
        };
        if let Err(error) = fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), %error, "Failed to persist preference store");
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value.to_string());
        self.write_through(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        self.write_through(&entries);
    }
}
