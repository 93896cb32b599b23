//! Cross-process determinism lock.
//!
//! Spawns the `ledger_fixture` binary under several environment variants
//! (different cwd, locale overrides) and asserts that all runs produce
//! identical output, including the SHA-256 of the persisted audit log and
//! of the rendered truth report. This proves that verification results are
//! not influenced by process-level state.

use std::process::Command;

/// Resolve the path to the compiled fixture binary.
///
/// `cargo test` puts test binaries in `target/debug/` (or the profile dir).
/// The `ledger_fixture` binary lives alongside them.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("ledger_fixture");
    path.to_string_lossy().to_string()
}

/// Run the fixture into a fresh storage dir with the given cwd and
/// environment overrides. Returns stdout as a string.
fn run_variant(work_dir: &std::path::Path, env_overrides: &[(&str, &str)]) -> String {
    let storage = tempfile::tempdir().expect("create storage dir");

    let mut command = Command::new(binary_path());
    command.arg(storage.path()).current_dir(work_dir);

    // Clear locale-related env to establish baseline, then apply overrides.
    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().expect("fixture binary runs");
    assert!(
        output.status.success(),
        "fixture failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("fixture output is UTF-8")
}

#[test]
fn fixture_output_is_identical_across_environments() {
    let cwd_a = tempfile::tempdir().unwrap();
    let cwd_b = tempfile::tempdir().unwrap();

    let baseline = run_variant(cwd_a.path(), &[]);
    let other_cwd = run_variant(cwd_b.path(), &[]);
    let turkish_locale = run_variant(cwd_a.path(), &[("LC_ALL", "tr_TR.UTF-8")]);
    let c_locale = run_variant(cwd_b.path(), &[("LANG", "C"), ("TZ", "America/New_York")]);

    assert_eq!(baseline, other_cwd, "cwd must not influence output");
    assert_eq!(baseline, turkish_locale, "locale must not influence output");
    assert_eq!(baseline, c_locale, "TZ must not influence output");
}

#[test]
fn fixture_output_reflects_replayed_history() {
    let cwd = tempfile::tempdir().unwrap();
    let out = run_variant(cwd.path(), &[]);

    assert!(out.contains("entry_count=4"), "unexpected output: {out}");
    assert!(out.contains("latest_phase1=96"), "max attempt wins: {out}");
    assert!(out.contains("claim_check=claimed 92% but actual is 96%"));
    assert!(out.contains("response_hash=sha256:"));
}
