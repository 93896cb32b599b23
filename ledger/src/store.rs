//! Verified score store: the derived, overwritable (phase, attempt) projection.
//!
//! The store answers one question fast: "what is the latest verified score
//! for this phase?", where *latest* means the numerically largest attempt,
//! not the most recently written record. Verification may replay historical
//! reports in any order (attempts 5, then 2, then 8), and the answer must
//! still be attempt 8.

use std::collections::BTreeMap;

use assay_extract::scores::ScoreSet;

use crate::storage::StoreReadError;

/// The latest verification outcome for one (phase, attempt) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedScoreRecordV1 {
    /// What the extractor found.
    pub scores: ScoreSet,
    /// When the verification ran; distinct from the report's own timestamp.
    pub verification_timestamp: String,
    /// True iff the record's overall percentage met the pass threshold.
    pub passed: bool,
}

/// Derived projection keyed by phase, then by attempt.
///
/// At most one record per (phase, attempt) key. `update` overwrites freely
/// and is idempotent; history lives in the audit log, not here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VerifiedScoreStore {
    phases: BTreeMap<String, BTreeMap<u32, VerifiedScoreRecordV1>>,
}

impl VerifiedScoreStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for (phase, attempt).
    ///
    /// Idempotent: calling twice with identical inputs leaves the store in
    /// the same observable state as calling once.
    pub fn update(&mut self, phase: &str, attempt: u32, record: VerifiedScoreRecordV1) {
        self.phases
            .entry(phase.to_string())
            .or_default()
            .insert(attempt, record);
    }

    /// The record with the numerically largest attempt for `phase`.
    ///
    /// Independent of write order; `None` if the phase has no records.
    #[must_use]
    pub fn latest(&self, phase: &str) -> Option<&VerifiedScoreRecordV1> {
        self.phases
            .get(phase)
            .and_then(|attempts| attempts.last_key_value())
            .map(|(_, record)| record)
    }

    /// True iff no phase has any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// JSON projection: phase → `"attempt_<N>"` → `{scores, timestamp, passed}`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut doc = serde_json::Map::new();
        for (phase, attempts) in &self.phases {
            let mut phase_obj = serde_json::Map::new();
            for (attempt, record) in attempts {
                phase_obj.insert(
                    format!("attempt_{attempt}"),
                    serde_json::json!({
                        "scores": record.scores.to_json(),
                        "timestamp": record.verification_timestamp,
                        "passed": record.passed,
                    }),
                );
            }
            doc.insert(phase.clone(), serde_json::Value::Object(phase_obj));
        }
        serde_json::Value::Object(doc)
    }

    /// Rebuild the store from its JSON projection. Fail-closed.
    ///
    /// A stored attempt key that is not `attempt_<integer>` is a
    /// data-integrity error, not something to skip: the audit trail's
    /// trustworthiness depends on refusing corrupted history over guessing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreReadError::MalformedDocument`] if the document is not
    /// an object of objects, an attempt key is malformed, or a record is
    /// structurally invalid.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, StoreReadError> {
        let doc = value
            .as_object()
            .ok_or_else(|| malformed("store document is not an object"))?;

        let mut phases: BTreeMap<String, BTreeMap<u32, VerifiedScoreRecordV1>> = BTreeMap::new();
        for (phase, attempts_value) in doc {
            let attempts_obj = attempts_value
                .as_object()
                .ok_or_else(|| malformed(&format!("phase \"{phase}\" is not an object")))?;

            let mut attempts = BTreeMap::new();
            for (key, record_value) in attempts_obj {
                let attempt = key
                    .strip_prefix("attempt_")
                    .and_then(|n| n.parse::<u32>().ok())
                    .ok_or_else(|| {
                        malformed(&format!(
                            "phase \"{phase}\" has attempt key \"{key}\", expected attempt_<N>"
                        ))
                    })?;
                attempts.insert(attempt, parse_record(phase, attempt, record_value)?);
            }
            phases.insert(phase.clone(), attempts);
        }

        Ok(Self { phases })
    }
}

fn parse_record(
    phase: &str,
    attempt: u32,
    value: &serde_json::Value,
) -> Result<VerifiedScoreRecordV1, StoreReadError> {
    let context = format!("phase \"{phase}\" attempt {attempt}");

    let scores_value = value
        .get("scores")
        .ok_or_else(|| malformed(&format!("{context}: missing \"scores\"")))?;
    let scores = ScoreSet::from_json(scores_value)
        .map_err(|e| malformed(&format!("{context}: \"scores\": {e}")))?;

    let verification_timestamp = value
        .get("timestamp")
        .and_then(serde_json::Value::as_str)
        .map(String::from)
        .ok_or_else(|| malformed(&format!("{context}: \"timestamp\" is not a string")))?;

    let passed = value
        .get("passed")
        .and_then(serde_json::Value::as_bool)
        .ok_or_else(|| malformed(&format!("{context}: \"passed\" is not a boolean")))?;

    Ok(VerifiedScoreRecordV1 {
        scores,
        verification_timestamp,
        passed,
    })
}

fn malformed(detail: &str) -> StoreReadError {
    StoreReadError::MalformedDocument {
        detail: detail.to_string(),
    }
}
