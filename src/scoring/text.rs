//! Text normalization applied before scoring.

use itertools::Itertools;

/// Collapse every whitespace run to a single space and trim the ends.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().join(" ")
}
