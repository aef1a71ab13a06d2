//! Error types for preference storage.

use std::io;
use std::path::PathBuf;

/// Errors that can occur when opening a file-backed preference store.
///
/// Runtime reads and writes never fail loudly: writes degrade to a logged
/// warning and reads fall back to the in-memory snapshot. Only opening a
/// store surfaces errors, so callers can distinguish a missing file (fine,
/// starts empty) from an unreadable or corrupt one.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store file exists but could not be read.
    #[error("Failed to read preference store {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The store file exists but is not a valid JSON string map.
    #[error("Preference store {} is corrupt: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
