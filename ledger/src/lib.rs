//! Assay Ledger: append-only verification history and derived projections.
//!
//! The ledger consumes raw report text (origin irrelevant: API response,
//! file, pasted text) and produces persisted, structured judgments. It does
//! not fetch, render to remote systems, or transmit anything itself.
//!
//! # Two documents, two roles
//!
//! - The **audit log** is history: an ordered, append-only sequence of
//!   verification events. No operation edits or removes a past entry.
//! - The **verified score store** is current state: a derived projection
//!   keyed by (phase, attempt), overwritten freely, rebuilt from the same
//!   verification calls that extend the log.
//!
//! Single-threaded, single-writer by design: both documents are rewritten
//! wholesale on every mutation, so concurrent writers need an external
//! mutual-exclusion mechanism layered on top.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod discrepancy;
pub mod entry;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod store;
