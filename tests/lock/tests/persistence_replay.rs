//! Persistence locks: history survives reopen byte-faithfully, replay order
//! never changes what `latest` answers, and re-verification is idempotent
//! at the store level while history keeps growing.

use assay_ledger::ledger::VerificationLedger;
use assay_ledger::storage::{AUDIT_LOG_FILENAME, VERIFIED_SCORES_FILENAME};
use lock_tests::{failing_report, passing_report};

#[test]
fn reopened_ledger_continues_the_same_history() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut ledger = VerificationLedger::open(dir.path()).unwrap();
        ledger
            .verify_and_log(&failing_report(80), "Phase 1", 1, None)
            .unwrap();
        ledger
            .verify_and_log(&passing_report(), "Phase 1", 2, None)
            .unwrap();
    }

    let mut reopened = VerificationLedger::open(dir.path()).unwrap();
    assert_eq!(reopened.entries().len(), 2);
    assert_eq!(
        reopened.latest("Phase 1").unwrap().scores.overall_percentage,
        Some(95)
    );

    // Appending after reopen extends, never rewrites, the history.
    let before: Vec<_> = reopened.entries().to_vec();
    reopened
        .verify_and_log(&failing_report(40), "Phase 2", 1, None)
        .unwrap();
    assert_eq!(reopened.entries().len(), 3);
    assert_eq!(&reopened.entries()[..2], &before[..]);
}

#[test]
fn out_of_order_replay_resolves_to_max_attempt_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut ledger = VerificationLedger::open(dir.path()).unwrap();
        for (attempt, pct) in [(5u32, 70u32), (2, 60), (8, 96)] {
            let text = format!("Overall score: {pct}%");
            ledger
                .verify_and_log(&text, "Phase 1", attempt, None)
                .unwrap();
        }
        assert_eq!(
            ledger.latest("Phase 1").unwrap().scores.overall_percentage,
            Some(96)
        );
    }

    let reopened = VerificationLedger::open(dir.path()).unwrap();
    assert_eq!(
        reopened.latest("Phase 1").unwrap().scores.overall_percentage,
        Some(96)
    );
}

#[test]
fn audit_log_document_grows_in_call_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = VerificationLedger::open(dir.path()).unwrap();
    for attempt in 1..=3 {
        ledger
            .verify_and_log(&failing_report(attempt * 10), "Phase 1", attempt, None)
            .unwrap();
    }

    let bytes = std::fs::read(dir.path().join(AUDIT_LOG_FILENAME)).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let entries = doc["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    let attempts: Vec<u64> = entries
        .iter()
        .map(|e| e["attempt"].as_u64().unwrap())
        .collect();
    assert_eq!(attempts, vec![1, 2, 3]);
}

#[test]
fn store_document_uses_attempt_keys_per_phase() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = VerificationLedger::open(dir.path()).unwrap();
    ledger
        .verify_and_log(&passing_report(), "Phase 1", 7, None)
        .unwrap();
    ledger
        .verify_and_log(&failing_report(50), "Phase 2", 1, None)
        .unwrap();

    let bytes = std::fs::read(dir.path().join(VERIFIED_SCORES_FILENAME)).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["Phase 1"]["attempt_7"]["passed"].as_bool().unwrap());
    assert!(!doc["Phase 2"]["attempt_1"]["passed"].as_bool().unwrap());
}

#[test]
fn identical_reverification_keeps_store_state_stable() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = VerificationLedger::open(dir.path()).unwrap();

    ledger
        .verify_and_log(&passing_report(), "Phase 1", 3, None)
        .unwrap();
    let first_latest = ledger.latest("Phase 1").unwrap().scores.clone();

    ledger
        .verify_and_log(&passing_report(), "Phase 1", 3, None)
        .unwrap();

    // Two audit entries, one store record, same observable scores.
    assert_eq!(ledger.entries().len(), 2);
    assert_eq!(ledger.latest("Phase 1").unwrap().scores, first_latest);

    let bytes = std::fs::read(dir.path().join(VERIFIED_SCORES_FILENAME)).unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(doc["Phase 1"].as_object().unwrap().len(), 1);
}
