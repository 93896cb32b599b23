//! Audit entries: the immutable records the ledger is made of.

use assay_extract::scores::ScoreSet;

use crate::storage::StoreReadError;

/// One verification event, exactly as it happened.
///
/// Created once per `verify_and_log` call and never mutated afterwards.
/// A correction is a new entry under a new attempt, never an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntryV1 {
    /// Report timestamp (ISO-8601): caller-supplied, or the wall clock at
    /// verification time when the caller had nothing better.
    pub timestamp: String,
    /// Free-form phase label (e.g. `"Phase 1"`), stable across calls that
    /// refer to the same phase.
    pub phase: String,
    /// Caller-supplied attempt number. Never auto-incremented: phases may
    /// be re-verified from historical text out of order.
    pub attempt: u32,
    /// What the extractor found in the raw text.
    pub scores: ScoreSet,
    /// True iff the stated overall percentage met the pass threshold.
    pub passed_threshold: bool,
    /// Character count of the raw text, for sanity auditing.
    pub response_length: usize,
}

impl AuditEntryV1 {
    /// JSON projection of this entry.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": self.timestamp,
            "phase": self.phase,
            "attempt": self.attempt,
            "scores": self.scores.to_json(),
            "passed_threshold": self.passed_threshold,
            "response_length": self.response_length,
        })
    }

    /// Rebuild an entry from its JSON projection. Fail-closed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreReadError::MalformedDocument`] if any field is
    /// missing or has the wrong shape.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, StoreReadError> {
        let timestamp = required_str(value, "timestamp")?;
        let phase = required_str(value, "phase")?;

        let attempt = value
            .get("attempt")
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| malformed("entry \"attempt\" is not a u32 integer"))?;

        let scores_value = value
            .get("scores")
            .ok_or_else(|| malformed("entry is missing \"scores\""))?;
        let scores = ScoreSet::from_json(scores_value)
            .map_err(|e| malformed(&format!("entry \"scores\": {e}")))?;

        let passed_threshold = value
            .get("passed_threshold")
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| malformed("entry \"passed_threshold\" is not a boolean"))?;

        let response_length = value
            .get("response_length")
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| malformed("entry \"response_length\" is not an integer"))?;

        Ok(Self {
            timestamp,
            phase,
            attempt,
            scores,
            passed_threshold,
            response_length,
        })
    }
}

fn required_str(value: &serde_json::Value, field: &str) -> Result<String, StoreReadError> {
    value
        .get(field)
        .and_then(serde_json::Value::as_str)
        .map(String::from)
        .ok_or_else(|| malformed(&format!("entry \"{field}\" is not a string")))
}

fn malformed(detail: &str) -> StoreReadError {
    StoreReadError::MalformedDocument {
        detail: detail.to_string(),
    }
}
