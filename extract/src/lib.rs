//! Assay Extract: the deterministic core of score verification.
//!
//! # API Surface
//!
//! The crate exposes three entry points:
//!
//! - [`extractor::ScoreExtractor::extract`] -- turn raw report text into a [`scores::ScoreSet`]
//! - [`stamp::integrity_stamp`] -- fingerprint raw report text for later tamper detection
//! - [`scores::ScoreSet::passed_threshold`] -- derive pass/fail from the overall percentage
//!
//! Everything here is pure: no filesystem, no clock, no network. Equal
//! inputs produce equal outputs, which is what makes extraction results
//! auditable after the fact.
//!
//! # Module Dependency Direction
//!
//! `criteria` ← `stamp` ← `scores` ← `extractor`
//!
//! One-way only. No cycles. `extractor` depends on `scores` and `stamp`.
//! `criteria` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod criteria;
pub mod extractor;
pub mod scores;
pub mod stamp;
