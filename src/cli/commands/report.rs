//! Serializable views shared by several commands.

use serde::Serialize;

use crate::cli::output::HumanLayout;
use crate::core::{LabeledSpan, Record};
use crate::scoring::ScoreEvidence;
use crate::search::{SearchOutcome, SearchQuery};
use crate::storage::CorruptRecord;

/// Row in list-style output.
#[derive(Debug, Clone, Serialize)]
pub struct RecordRow<'a> {
    pub id: u64,
    pub name: &'a str,
    pub score: u64,
    pub uploaded_at: String,
    pub source: Option<&'a str>,
}

impl<'a> From<&'a Record> for RecordRow<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            id: record.id(),
            name: record.display_name(),
            score: record.score(),
            uploaded_at: record.uploaded_at_display(),
            source: record.source_name(),
        }
    }
}

/// Corrupt row as reported to the user.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidRow<'a> {
    pub row: usize,
    pub id: Option<u64>,
    pub name: Option<&'a str>,
    pub reason: &'a str,
}

impl<'a> From<&'a CorruptRecord> for InvalidRow<'a> {
    fn from(corrupt: &'a CorruptRecord) -> Self {
        Self {
            row: corrupt.row,
            id: corrupt.id,
            name: corrupt.display_name.as_deref(),
            reason: &corrupt.reason,
        }
    }
}

/// Search result with the empty-target case kept distinct.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport<'a> {
    pub query: &'a str,
    pub empty_target: bool,
    pub count: usize,
    pub hits: Vec<&'a LabeledSpan>,
}

impl<'a> SearchReport<'a> {
    pub fn new(query: &'a SearchQuery, outcome: &SearchOutcome<'a>) -> Self {
        Self {
            query: query.as_str(),
            empty_target: outcome.is_empty_target(),
            count: outcome.count(),
            hits: outcome.spans().to_vec(),
        }
    }

    /// Warning text for robot output when there was nothing to search.
    pub fn warning(&self) -> Option<&'static str> {
        self.empty_target
            .then_some("record has no span data to search")
    }

    pub fn render(&self, layout: &mut HumanLayout) {
        layout.section(&format!("Search: {}", self.query));
        if self.empty_target {
            layout.warning("record has no span data to search");
        } else if self.hits.is_empty() {
            layout.push_line("No matching entities");
        } else {
            for span in &self.hits {
                layout.bullet(&format!("{} ({})", span.text, span.label));
            }
        }
    }
}

pub fn render_evidence(layout: &mut HumanLayout, score: u64, evidence: &ScoreEvidence) {
    layout.kv("Score", &score.to_string());
    layout.kv("Experience", &format!("{} years", evidence.years_of_experience));
    let skills = if evidence.matched_skills.is_empty() {
        "-".to_string()
    } else {
        itertools::join(&evidence.matched_skills, ", ")
    };
    layout.kv("Skills", &skills);
}

pub fn render_entities(layout: &mut HumanLayout, entities: &[&LabeledSpan]) {
    layout.section("Entities");
    if entities.is_empty() {
        layout.push_line("No entities");
        return;
    }
    for span in entities {
        layout.push_line(format!("{:<12} {}", span.label, span.text));
    }
}
