//! Shared helpers for assay benchmark suites.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

use std::fmt::Write;

/// Build a synthetic review report: `paragraphs` of filler prose with the
/// score statements buried at the end, the way real reports state them.
#[must_use]
pub fn synthetic_report(paragraphs: usize) -> String {
    let mut report = String::new();
    for i in 0..paragraphs {
        let _ = writeln!(
            report,
            "Paragraph {i}: the reviewer examines module boundaries, input \
             validation, and error propagation, and finds the usual mix of \
             solid decisions and loose ends worth a follow-up pass.\n"
        );
    }
    report.push_str(
        "Security score: 8/10\n\
         Architecture score: 7.5/10\n\
         Code Quality score: 8/10\n\
         Completeness score: 9/10\n\
         Overall score: 82%\n",
    );
    report
}
