//! Integrity stamping: content fingerprints for raw report text.
//!
//! Every extraction records a digest of the exact text it saw, so a later
//! mutation of the source report is detectable by re-stamping and comparing.
//! Algorithm: SHA-256 over the raw UTF-8 bytes, no normalization, no
//! prefixing. The stamp is a pure function of its input.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides (enforced by [`ContentHash::parse`]
/// and by construction in [`integrity_stamp`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    /// Full string in `"algorithm:hex_digest"` format.
    full: String,
    /// Byte offset of the `:` separator (cached from parse).
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the format is invalid (missing colon,
    /// empty algorithm, or empty digest).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

/// Compute the integrity stamp of raw report text.
///
/// SHA-256 over the exact UTF-8 bytes supplied, hex-encoded lowercase,
/// tagged with the algorithm: `"sha256:<hex>"`. Deterministic: equal inputs
/// produce equal stamps; any single-character change changes the stamp.
#[must_use]
pub fn integrity_stamp(raw_text: &str) -> ContentHash {
    let digest = Sha256::digest(raw_text.as_bytes());
    ContentHash {
        full: format!("sha256:{}", hex::encode(digest)),
        colon: "sha256".len(),
    }
}
