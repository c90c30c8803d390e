//! Case-insensitive substring lookup over a record's labeled spans.

use serde::Serialize;
use tracing::debug;

use crate::core::LabeledSpan;

/// A non-empty search query.
///
/// An empty query means "no search requested", so it cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            folded: raw.to_lowercase(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Spans whose text contains the query, in span order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHits<'a> {
    pub spans: Vec<&'a LabeledSpan>,
}

impl SearchHits<'_> {
    #[must_use]
    pub fn count(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Outcome of one lookup.
///
/// `EmptySearchTarget` ("nothing to search") is distinct from a
/// `Matches` with zero hits ("nothing found").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    EmptySearchTarget,
    Matches(SearchHits<'a>),
}

impl<'a> SearchOutcome<'a> {
    /// Number of matching spans; zero when there was nothing to search.
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::EmptySearchTarget => 0,
            Self::Matches(hits) => hits.count(),
        }
    }

    /// Matching spans; empty when there was nothing to search.
    #[must_use]
    pub fn spans(&self) -> &[&'a LabeledSpan] {
        match self {
            Self::EmptySearchTarget => &[],
            Self::Matches(hits) => &hits.spans,
        }
    }

    #[must_use]
    pub const fn is_empty_target(&self) -> bool {
        matches!(self, Self::EmptySearchTarget)
    }
}

/// Index over one record's spans with case folding done up front.
#[derive(Debug, Clone)]
pub struct EntityIndex<'a> {
    entries: Vec<(&'a LabeledSpan, String)>,
}

impl<'a> EntityIndex<'a> {
    /// Build from a span list. `None` and an empty list both leave nothing
    /// to search.
    #[must_use]
    pub fn build(spans: Option<&'a [LabeledSpan]>) -> Self {
        let entries = spans
            .unwrap_or_default()
            .iter()
            .map(|span| (span, span.text.to_lowercase()))
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> SearchOutcome<'a> {
        if self.entries.is_empty() {
            debug!(query = query.as_str(), "no span data to search");
            return SearchOutcome::EmptySearchTarget;
        }
        let spans: Vec<&'a LabeledSpan> = self
            .entries
            .iter()
            .filter(|(_, folded)| folded.contains(&query.folded))
            .map(|(span, _)| *span)
            .collect();
        debug!(
            query = query.as_str(),
            hits = spans.len(),
            "entity search"
        );
        SearchOutcome::Matches(SearchHits { spans })
    }
}

/// One-shot lookup without keeping the index around.
#[must_use]
pub fn search<'a>(spans: Option<&'a [LabeledSpan]>, query: &SearchQuery) -> SearchOutcome<'a> {
    EntityIndex::build(spans).search(query)
}
