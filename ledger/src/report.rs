//! Truth report rendering: derived, human-readable view over the ledger.
//!
//! Pure function of (entries, store), no clock and no I/O, so the same
//! history always renders the same report. Phases appear in
//! first-appearance order over the ledger, the order a reader of the
//! history would naturally encounter them, not alphabetically.

use std::collections::BTreeMap;

use crate::entry::AuditEntryV1;
use crate::store::VerifiedScoreStore;

/// Render the truth report across all phases and attempts.
///
/// Per phase: the attempt count, one line per logged entry in append order
/// (`Unknown` where the report never stated an overall percentage), then
/// the latest verified percentage and a status line. Phases with entries
/// but no store record render the history lines only.
#[must_use]
pub fn render_truth_report(entries: &[AuditEntryV1], store: &VerifiedScoreStore) -> String {
    let mut lines = vec!["# Verification Truth Report".to_string()];

    let mut phase_order: Vec<&str> = Vec::new();
    let mut by_phase: BTreeMap<&str, Vec<&AuditEntryV1>> = BTreeMap::new();
    for entry in entries {
        if !by_phase.contains_key(entry.phase.as_str()) {
            phase_order.push(entry.phase.as_str());
        }
        by_phase
            .entry(entry.phase.as_str())
            .or_default()
            .push(entry);
    }

    for phase in phase_order {
        let group = &by_phase[phase];
        lines.push(String::new());
        lines.push(format!("## {phase}"));
        lines.push(format!("Total attempts: {}", group.len()));
        for entry in group {
            let marker = if entry.passed_threshold {
                "PASSED"
            } else {
                "FAILED"
            };
            lines.push(format!(
                "- Attempt {}: {} {marker}",
                entry.attempt,
                percentage_or_unknown(entry.scores.overall_percentage)
            ));
        }

        if let Some(latest) = store.latest(phase) {
            lines.push(String::new());
            lines.push(format!(
                "Latest verified score: {}",
                percentage_or_unknown(latest.scores.overall_percentage)
            ));
            let status = if latest.passed {
                "ready for next phase"
            } else {
                "requires improvements"
            };
            lines.push(format!("Status: {status}"));
        }
    }

    lines.join("\n")
}

fn percentage_or_unknown(pct: Option<u32>) -> String {
    pct.map_or_else(|| "Unknown".to_string(), |p| format!("{p}%"))
}
