//! Discrepancy checking: does a claimed score match the verified one?
//!
//! Strict equality, no tolerance band. The point is to catch any divergence
//! between a claim and the ledger's derived truth, including rounding games.

use crate::store::VerifiedScoreStore;

/// The outcome of checking one claim against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimVerdict {
    /// True iff the claim exactly matches the latest verified percentage.
    pub truthful: bool,
    /// Human-readable explanation of the verdict.
    pub explanation: String,
}

/// Check a claimed overall percentage against the latest verified score.
///
/// A phase with no verified record yields a non-truthful verdict (a claim
/// about an unverified phase cannot be confirmed); an absent verified
/// percentage compares as 0.
#[must_use]
pub fn check_claim(
    store: &VerifiedScoreStore,
    claimed_percentage: u32,
    phase: &str,
) -> ClaimVerdict {
    let Some(latest) = store.latest(phase) else {
        return ClaimVerdict {
            truthful: false,
            explanation: format!("no verified score found for {phase}"),
        };
    };

    let actual = latest.scores.overall_percentage.unwrap_or(0);
    if claimed_percentage != actual {
        return ClaimVerdict {
            truthful: false,
            explanation: format!("claimed {claimed_percentage}% but actual is {actual}%"),
        };
    }

    ClaimVerdict {
        truthful: true,
        explanation: "score verified as accurate".to_string(),
    }
}
