//! The closed vocabulary of tracked review criteria.
//!
//! Reports may say anything; the extractor only ever looks for these four
//! criteria. Each criterion has a stable snake_case key used in persisted
//! JSON and a human-facing label used to build the pattern templates.
//! Adding a criterion is a single change here: `ALL`, `key()`, `label()`,
//! and `from_key()` all dispatch over the same variant list.

/// A tracked review criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Criterion {
    /// Security posture of the reviewed change.
    Security,
    /// Architectural soundness.
    Architecture,
    /// Code quality (style, clarity, maintainability).
    CodeQuality,
    /// Completeness of the delivered work.
    Completeness,
}

impl Criterion {
    /// All criteria in declaration order.
    ///
    /// This order is the iteration order for extraction and for JSON
    /// projections (via `BTreeMap` keyed on the enum's `Ord`).
    pub const ALL: [Criterion; 4] = [
        Self::Security,
        Self::Architecture,
        Self::CodeQuality,
        Self::Completeness,
    ];

    /// Stable snake_case key used in persisted documents.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Architecture => "architecture",
            Self::CodeQuality => "code_quality",
            Self::Completeness => "completeness",
        }
    }

    /// Human-facing label as it appears in report text (e.g. `"Code Quality"`).
    ///
    /// Multi-word labels are single-space separated here; the extractor
    /// widens internal whitespace when building its patterns.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Architecture => "Architecture",
            Self::CodeQuality => "Code Quality",
            Self::Completeness => "Completeness",
        }
    }

    /// Parse a stable key back into a criterion.
    ///
    /// Returns `None` for unrecognized keys.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
