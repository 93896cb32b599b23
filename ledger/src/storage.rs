//! Durable document storage: atomic JSON artifact read/write.
//!
//! # Artifact layout (per storage directory)
//!
//! ```text
//! <dir>/
//!   audit-log.json        — {"entries": [AuditEntry, ...]} in append order
//!   verified-scores.json  — phase → "attempt_<N>" → {scores, timestamp, passed}
//! ```
//!
//! Both documents are rewritten in full on every mutation. Writes go
//! through a temp file + rename so a failed write leaves the previous
//! persisted state intact; a partially written document would corrupt the
//! audit trail.
//!
//! # Fail-closed semantics
//!
//! - Absent file → empty state (a fresh directory is legitimate)
//! - Unreadable file → error
//! - Invalid JSON → error
//! - Structurally wrong document → error, no silent repair

use std::path::Path;

/// Filename of the append-only audit log document.
pub const AUDIT_LOG_FILENAME: &str = "audit-log.json";

/// Filename of the verified score store document.
pub const VERIFIED_SCORES_FILENAME: &str = "verified-scores.json";

/// Error writing a persisted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWriteError {
    /// I/O error during write.
    Io {
        /// Path of the document being written.
        path: String,
        /// Underlying cause.
        detail: String,
    },
    /// JSON serialization failed.
    Serialize {
        /// Underlying cause.
        detail: String,
    },
}

impl std::fmt::Display for StoreWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "I/O error writing {path}: {detail}"),
            Self::Serialize { detail } => write!(f, "serialization error: {detail}"),
        }
    }
}

impl std::error::Error for StoreWriteError {}

/// Error reading a persisted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreReadError {
    /// I/O error during read.
    Io {
        /// Path of the document being read.
        path: String,
        /// Underlying cause.
        detail: String,
    },
    /// The file is not valid JSON.
    Parse {
        /// Path of the document being read.
        path: String,
        /// Underlying cause.
        detail: String,
    },
    /// The document is valid JSON with the wrong structure.
    MalformedDocument {
        /// What was wrong.
        detail: String,
    },
}

impl std::fmt::Display for StoreReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "I/O error reading {path}: {detail}"),
            Self::Parse { path, detail } => write!(f, "parse error in {path}: {detail}"),
            Self::MalformedDocument { detail } => write!(f, "malformed document: {detail}"),
        }
    }
}

impl std::error::Error for StoreReadError {}

/// Write a JSON document to `path` via temp file + rename.
///
/// Pretty-printed so operators can read the artifacts directly. The rename
/// gives best-effort atomicity on Unix: the write either fully succeeds or
/// leaves the previous file untouched.
///
/// # Errors
///
/// Returns [`StoreWriteError`] on serialization or I/O failure.
pub fn write_json_atomic(path: &Path, document: &serde_json::Value) -> Result<(), StoreWriteError> {
    let mut bytes =
        serde_json::to_vec_pretty(document).map_err(|e| StoreWriteError::Serialize {
            detail: format!("{e}"),
        })?;
    bytes.push(b'\n');

    let dir = path.parent().ok_or_else(|| StoreWriteError::Io {
        path: path.display().to_string(),
        detail: "no parent directory".to_string(),
    })?;

    // Write to a temp file in the same directory, then rename.
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, &bytes).map_err(|e| StoreWriteError::Io {
        path: temp_path.display().to_string(),
        detail: format!("write: {e}"),
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| StoreWriteError::Io {
        path: path.display().to_string(),
        detail: format!("rename from {}: {e}", temp_path.display()),
    })?;

    Ok(())
}

/// Read a JSON document from `path`, or `None` if the file does not exist.
///
/// # Errors
///
/// Returns [`StoreReadError::Io`] if the file exists but cannot be read,
/// [`StoreReadError::Parse`] if it is not valid JSON.
pub fn read_json_optional(path: &Path) -> Result<Option<serde_json::Value>, StoreReadError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(StoreReadError::Io {
                path: path.display().to_string(),
                detail: format!("{e}"),
            });
        }
    };

    let value = serde_json::from_slice(&bytes).map_err(|e| StoreReadError::Parse {
        path: path.display().to_string(),
        detail: format!("{e}"),
    })?;

    Ok(Some(value))
}
