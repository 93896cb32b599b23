//! End-to-end scenario lock: one passing verification drives extraction,
//! the audit entry, the verified store, the discrepancy checker, and the
//! truth report, all against a real temporary storage directory.

use assay_extract::criteria::Criterion;
use assay_extract::stamp::integrity_stamp;
use assay_ledger::ledger::VerificationLedger;
use lock_tests::{passing_report, scoreless_report};

#[test]
fn verify_check_and_report_agree_on_one_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = VerificationLedger::open(dir.path()).unwrap();

    let raw = passing_report();
    let entry = ledger.verify_and_log(&raw, "Phase 1", 7, None).unwrap();

    // The entry transcribes exactly what the report said.
    assert!((entry.scores.score(Criterion::Security).unwrap() - 9.0).abs() < f64::EPSILON);
    assert!((entry.scores.score(Criterion::Architecture).unwrap() - 8.0).abs() < f64::EPSILON);
    assert_eq!(entry.scores.score(Criterion::CodeQuality), None);
    assert_eq!(entry.scores.score(Criterion::Completeness), None);
    assert_eq!(entry.scores.overall_percentage, Some(95));
    assert!(entry.passed_threshold);
    assert_eq!(entry.scores.response_hash, integrity_stamp(&raw));
    assert_eq!(entry.response_length, raw.chars().count());

    // Claims are checked against the verified truth, strictly.
    let honest = ledger.check_claim(95, "Phase 1");
    assert!(honest.truthful);
    assert_eq!(honest.explanation, "score verified as accurate");

    let inflated = ledger.check_claim(92, "Phase 1");
    assert!(!inflated.truthful);
    assert_eq!(inflated.explanation, "claimed 92% but actual is 95%");

    let unverified = ledger.check_claim(95, "Phase 2");
    assert!(!unverified.truthful);
    assert_eq!(unverified.explanation, "no verified score found for Phase 2");

    // The report reflects the same single verification.
    let report = ledger.render_truth_report();
    assert!(report.contains("## Phase 1"));
    assert!(report.contains("Total attempts: 1"));
    assert!(report.contains("- Attempt 7: 95% PASSED"));
    assert!(report.contains("Latest verified score: 95%"));
    assert!(report.contains("Status: ready for next phase"));
}

#[test]
fn scoreless_report_is_logged_and_never_passes() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = VerificationLedger::open(dir.path()).unwrap();

    let entry = ledger
        .verify_and_log(&scoreless_report(), "Phase 1", 1, None)
        .unwrap();
    assert!(entry.scores.is_empty());
    assert!(!entry.passed_threshold);

    // The checker treats the absent percentage as 0.
    let verdict = ledger.check_claim(95, "Phase 1");
    assert!(!verdict.truthful);
    assert_eq!(verdict.explanation, "claimed 95% but actual is 0%");

    let report = ledger.render_truth_report();
    assert!(report.contains("- Attempt 1: Unknown FAILED"));
    assert!(report.contains("Status: requires improvements"));
}
