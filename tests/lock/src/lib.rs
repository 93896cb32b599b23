//! Shared report fixtures for the lock-test suite.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

/// The canonical passing report from the end-to-end scenario.
#[must_use]
pub fn passing_report() -> String {
    "Security score: 9/10\nArchitecture score: 8/10\nOverall score: 95%".to_string()
}

/// A report whose overall percentage fails the threshold.
#[must_use]
pub fn failing_report(pct: u32) -> String {
    format!("Security score: 6/10\nCode Quality score: 5.5/10\nOverall score: {pct}%")
}

/// A report with prose only: no recognizable score statements.
#[must_use]
pub fn scoreless_report() -> String {
    "The reviewer was impressed overall but committed to no numbers.".to_string()
}
