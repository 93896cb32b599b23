//! The structured extraction result for one raw report.
//!
//! A `ScoreSet` is faithful transcription, not grading: a criterion the
//! report never mentioned is absent from the map (never defaulted to zero),
//! and out-of-range values are carried as written. The only place absence
//! collapses to zero is [`ScoreSet::passed_threshold`], which derives the
//! pass/fail boolean.

use std::collections::BTreeMap;

use crate::criteria::Criterion;
use crate::stamp::ContentHash;

/// The fixed overall-percentage bar for pass/fail derivation.
pub const PASS_THRESHOLD_PERCENT: u32 = 95;

/// Per-criterion scores plus the overall percentage and content fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSet {
    /// Per-criterion decimal scores. Absent criterion ⇒ absent key.
    pub criteria: BTreeMap<Criterion, f64>,
    /// Overall percentage as stated by the report, if stated.
    pub overall_percentage: Option<u32>,
    /// Integrity stamp of the raw text this set was extracted from.
    pub response_hash: ContentHash,
}

impl ScoreSet {
    /// An empty score set for the given source fingerprint.
    #[must_use]
    pub fn new(response_hash: ContentHash) -> Self {
        Self {
            criteria: BTreeMap::new(),
            overall_percentage: None,
            response_hash,
        }
    }

    /// The score for one criterion, if the report stated one.
    #[must_use]
    pub fn score(&self, criterion: Criterion) -> Option<f64> {
        self.criteria.get(&criterion).copied()
    }

    /// True iff the stated overall percentage meets [`PASS_THRESHOLD_PERCENT`].
    ///
    /// An absent percentage is treated as 0 here (and only here): a report
    /// that never stated an overall score cannot have passed.
    #[must_use]
    pub fn passed_threshold(&self) -> bool {
        self.overall_percentage.unwrap_or(0) >= PASS_THRESHOLD_PERCENT
    }

    /// True iff no criterion scores and no overall percentage were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty() && self.overall_percentage.is_none()
    }

    /// JSON projection: flat object with stable criterion keys,
    /// `overall_percentage` (omitted when absent), and `response_hash`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (criterion, score) in &self.criteria {
            obj.insert(criterion.key().to_string(), serde_json::json!(score));
        }
        if let Some(pct) = self.overall_percentage {
            obj.insert("overall_percentage".to_string(), serde_json::json!(pct));
        }
        obj.insert(
            "response_hash".to_string(),
            serde_json::json!(self.response_hash.as_str()),
        );
        serde_json::Value::Object(obj)
    }

    /// Rebuild a score set from its JSON projection.
    ///
    /// Fail-closed: a present-but-mistyped field is an error, never silently
    /// skipped. Unknown keys are ignored (they belong to future producers,
    /// not to us).
    ///
    /// # Errors
    ///
    /// Returns [`ScoreSetParseError`] if `response_hash` is missing or
    /// malformed, a criterion value is not a number, or
    /// `overall_percentage` is not an integer in `u32` range.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ScoreSetParseError> {
        let hash_str = value
            .get("response_hash")
            .and_then(serde_json::Value::as_str)
            .ok_or(ScoreSetParseError::MissingResponseHash)?;
        let response_hash =
            ContentHash::parse(hash_str).ok_or_else(|| ScoreSetParseError::InvalidField {
                field: "response_hash",
                detail: format!("not an algorithm:hex digest: {hash_str}"),
            })?;

        let mut criteria = BTreeMap::new();
        for criterion in Criterion::ALL {
            if let Some(raw) = value.get(criterion.key()) {
                let score =
                    raw.as_f64()
                        .ok_or_else(|| ScoreSetParseError::InvalidField {
                            field: criterion.key(),
                            detail: format!("not a number: {raw}"),
                        })?;
                criteria.insert(criterion, score);
            }
        }

        let overall_percentage = match value.get("overall_percentage") {
            None => None,
            Some(raw) => {
                let pct = raw
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| ScoreSetParseError::InvalidField {
                        field: "overall_percentage",
                        detail: format!("not a u32 integer: {raw}"),
                    })?;
                Some(pct)
            }
        };

        Ok(Self {
            criteria,
            overall_percentage,
            response_hash,
        })
    }
}

/// Typed failure for `ScoreSet` JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreSetParseError {
    /// The `response_hash` field is missing or not a string.
    MissingResponseHash,
    /// A known field is present but has the wrong shape.
    InvalidField {
        /// Stable key of the offending field.
        field: &'static str,
        /// What was found instead.
        detail: String,
    },
}

impl std::fmt::Display for ScoreSetParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingResponseHash => write!(f, "missing response_hash"),
            Self::InvalidField { field, detail } => {
                write!(f, "invalid field {field}: {detail}")
            }
        }
    }
}

impl std::error::Error for ScoreSetParseError {}
