//! Pattern-based score extraction from raw report text.
//!
//! Reports are free text; scores inside them follow fixed templates:
//!
//! ```text
//! <Criterion> score: <number>/10      (per-criterion, decimal allowed)
//! Overall score: <integer>%           (overall percentage)
//! ```
//!
//! Matching is case-insensitive, internal label whitespace is widened to
//! `\s+`, and only the first match per pattern counts: the earliest
//! statement in a report is authoritative, later duplicates are ignored.
//! A pattern with no match omits its key; extraction never fails.
//!
//! Extraction is a swappable strategy behind [`ScoreExtractor`], so an
//! alternative report format can be supported without touching the ledger.

use regex::Regex;

use crate::criteria::Criterion;
use crate::scores::ScoreSet;
use crate::stamp::integrity_stamp;

/// The narrow extraction seam: raw text in, structured scores out.
///
/// Implementations must be pure (same text, same `ScoreSet`) and must
/// stamp the result with the integrity fingerprint of the exact input.
pub trait ScoreExtractor: Send + Sync {
    /// Extract all recognized scores from `raw_text`.
    fn extract(&self, raw_text: &str) -> ScoreSet;
}

/// The fixed-template extractor used in production.
///
/// Patterns are compiled once at construction and reused across calls.
pub struct PatternExtractor {
    /// One compiled pattern per criterion, in [`Criterion::ALL`] order.
    criterion_patterns: Vec<(Criterion, Regex)>,
    /// The overall-percentage pattern.
    overall_pattern: Regex,
}

impl PatternExtractor {
    /// Compile the fixed pattern set.
    ///
    /// # Panics
    ///
    /// Panics if a built-in pattern fails to compile. The patterns are
    /// fixed string literals derived from [`Criterion::label`], so this is
    /// a compile-time invariant, not a runtime condition.
    #[must_use]
    pub fn new() -> Self {
        let criterion_patterns = Criterion::ALL
            .into_iter()
            .map(|criterion| {
                let label = criterion
                    .label()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(r"\s+");
                let pattern = format!(r"(?i){label}\s+score:\s*(\d+(?:\.\d+)?)/10");
                let regex = Regex::new(&pattern).expect("criterion pattern is a valid regex");
                (criterion, regex)
            })
            .collect();

        let overall_pattern =
            Regex::new(r"(?i)Overall\s+score:\s*(\d+)%").expect("overall pattern is a valid regex");

        Self {
            criterion_patterns,
            overall_pattern,
        }
    }

    /// First capture-group match of `pattern` in `text`, parsed as `T`.
    fn first_capture<T: std::str::FromStr>(pattern: &Regex, text: &str) -> Option<T> {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<T>().ok())
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreExtractor for PatternExtractor {
    fn extract(&self, raw_text: &str) -> ScoreSet {
        let mut set = ScoreSet::new(integrity_stamp(raw_text));

        for (criterion, pattern) in &self.criterion_patterns {
            if let Some(score) = Self::first_capture::<f64>(pattern, raw_text) {
                set.criteria.insert(*criterion, score);
            }
        }

        if let Some(pct) = Self::first_capture::<u32>(&self.overall_pattern, raw_text) {
            set.overall_percentage = Some(pct);
        }

        set
    }
}
