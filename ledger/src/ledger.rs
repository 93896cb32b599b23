//! The verification ledger: extract, stamp, append, project.
//!
//! `VerificationLedger` is an explicit context object bound to an injected
//! storage directory. No process-global state, so tests run against
//! temporary directories and callers can keep several ledgers side by side.
//!
//! # Pipeline (per `verify_and_log` call)
//!
//! ```text
//! extract() → build AuditEntryV1 → persist full audit log (atomic)
//!   → persist full verified-scores projection (atomic)
//!   → commit both to memory → return the new entry
//! ```
//!
//! The in-memory state is committed only after both documents are on disk;
//! a persistence failure surfaces the error and leaves the in-memory ledger
//! and store at their pre-call values.

use std::path::{Path, PathBuf};

use assay_extract::extractor::{PatternExtractor, ScoreExtractor};

use crate::discrepancy::{check_claim, ClaimVerdict};
use crate::entry::AuditEntryV1;
use crate::report::render_truth_report;
use crate::storage::{
    read_json_optional, write_json_atomic, StoreReadError, StoreWriteError, AUDIT_LOG_FILENAME,
    VERIFIED_SCORES_FILENAME,
};
use crate::store::{VerifiedScoreRecordV1, VerifiedScoreStore};

/// Append-only verification history plus its derived projection, bound to
/// one storage directory.
pub struct VerificationLedger {
    dir: PathBuf,
    extractor: Box<dyn ScoreExtractor>,
    entries: Vec<AuditEntryV1>,
    store: VerifiedScoreStore,
}

impl std::fmt::Debug for VerificationLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationLedger")
            .field("dir", &self.dir)
            .field("extractor", &"<dyn ScoreExtractor>")
            .field("entries", &self.entries)
            .field("store", &self.store)
            .finish()
    }
}

impl VerificationLedger {
    /// Open (or initialize) a ledger in `dir` with the fixed-template extractor.
    ///
    /// Absent documents mean empty state; malformed documents are fatal.
    ///
    /// # Errors
    ///
    /// Returns [`StoreReadError`] if either persisted document exists but
    /// is unreadable or structurally invalid.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreReadError> {
        Self::open_with_extractor(dir, Box::new(PatternExtractor::new()))
    }

    /// Open a ledger with a caller-supplied extraction strategy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreReadError`] if either persisted document exists but
    /// is unreadable or structurally invalid.
    pub fn open_with_extractor(
        dir: impl Into<PathBuf>,
        extractor: Box<dyn ScoreExtractor>,
    ) -> Result<Self, StoreReadError> {
        let dir = dir.into();

        let entries = match read_json_optional(&dir.join(AUDIT_LOG_FILENAME))? {
            Some(doc) => parse_audit_log(&doc)?,
            None => Vec::new(),
        };

        let store = match read_json_optional(&dir.join(VERIFIED_SCORES_FILENAME))? {
            Some(doc) => VerifiedScoreStore::from_json(&doc)?,
            None => VerifiedScoreStore::new(),
        };

        Ok(Self {
            dir,
            extractor,
            entries,
            store,
        })
    }

    /// Verify raw report text and append the result to the audit history.
    ///
    /// Extracts scores, defaults `timestamp` to the current UTC wall clock,
    /// derives pass/fail, persists both documents atomically, updates the
    /// verified score store for (phase, attempt), and returns the new
    /// entry. Empty or unrecognizable text still logs an entry with an
    /// empty score set: "we tried to verify and found nothing" is a
    /// legitimate, auditable outcome.
    ///
    /// No entry is ever edited or removed after this call returns; a
    /// correction is a new call with a new `attempt`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreWriteError`] if either document cannot be persisted.
    /// On error the in-memory ledger and store are unchanged.
    pub fn verify_and_log(
        &mut self,
        raw_text: &str,
        phase: &str,
        attempt: u32,
        timestamp: Option<String>,
    ) -> Result<AuditEntryV1, StoreWriteError> {
        let scores = self.extractor.extract(raw_text);
        let entry = AuditEntryV1 {
            timestamp: timestamp.unwrap_or_else(now_iso),
            phase: phase.to_string(),
            attempt,
            passed_threshold: scores.passed_threshold(),
            response_length: raw_text.chars().count(),
            scores,
        };

        let record = VerifiedScoreRecordV1 {
            scores: entry.scores.clone(),
            verification_timestamp: now_iso(),
            passed: entry.passed_threshold,
        };

        // Build both successor documents before touching disk, then write,
        // then commit to memory. Entire documents are rewritten, not deltas.
        let mut entry_values: Vec<serde_json::Value> =
            self.entries.iter().map(AuditEntryV1::to_json).collect();
        entry_values.push(entry.to_json());
        let audit_doc = serde_json::json!({ "entries": entry_values });

        let mut store_next = self.store.clone();
        store_next.update(phase, attempt, record);
        let store_doc = store_next.to_json();

        write_json_atomic(&self.dir.join(AUDIT_LOG_FILENAME), &audit_doc)?;
        write_json_atomic(&self.dir.join(VERIFIED_SCORES_FILENAME), &store_doc)?;

        let returned = entry.clone();
        self.entries.push(entry);
        self.store = store_next;
        Ok(returned)
    }

    /// All audit entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[AuditEntryV1] {
        &self.entries
    }

    /// The derived verified score store.
    #[must_use]
    pub fn store(&self) -> &VerifiedScoreStore {
        &self.store
    }

    /// Latest verified record for `phase` (largest attempt), if any.
    #[must_use]
    pub fn latest(&self, phase: &str) -> Option<&VerifiedScoreRecordV1> {
        self.store.latest(phase)
    }

    /// Check a claimed overall percentage against the verified store.
    #[must_use]
    pub fn check_claim(&self, claimed_percentage: u32, phase: &str) -> ClaimVerdict {
        check_claim(&self.store, claimed_percentage, phase)
    }

    /// Render the truth report over the full history.
    #[must_use]
    pub fn render_truth_report(&self) -> String {
        render_truth_report(&self.entries, &self.store)
    }

    /// The storage directory this ledger is bound to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Current UTC wall clock as an ISO-8601 string.
fn now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Parse the audit log document: `{"entries": [...]}`. Fail-closed.
fn parse_audit_log(doc: &serde_json::Value) -> Result<Vec<AuditEntryV1>, StoreReadError> {
    let entries = doc
        .get("entries")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| StoreReadError::MalformedDocument {
            detail: "audit log \"entries\" is not an array".to_string(),
        })?;
    entries.iter().map(AuditEntryV1::from_json).collect()
}
