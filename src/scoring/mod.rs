//! Skill and experience scoring.
//!
//! A document's score is the sum of two explainable parts:
//! - `2` points per year of experience, taken from the first
//!   "N years of experience" phrase in the text
//! - `2` points per distinct skill from the [`SkillVocabulary`] that appears
//!   as a whole word or phrase
//!
//! Scoring never fails. Empty or unrecognisable text scores `0` with empty
//! evidence, and the same text always produces the same result.

pub mod text;
pub mod vocabulary;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CvError, Result};

pub use text::normalize_text;
pub use vocabulary::{DEFAULT_SKILLS, SkillVocabulary};

/// Points awarded per year of experience.
pub const POINTS_PER_YEAR: u64 = 2;

/// Points awarded per distinct matched skill.
pub const POINTS_PER_SKILL: u64 = 2;

static EXPERIENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s+years of experience").expect("valid regex")
});

/// Sub-scores that justify a record's total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvidence {
    pub years_of_experience: u32,
    /// Canonical vocabulary spellings, each counted once.
    pub matched_skills: BTreeSet<String>,
}

impl ScoreEvidence {
    /// Total implied by this evidence.
    #[must_use]
    pub fn total(&self) -> u64 {
        let skills = u64::try_from(self.matched_skills.len()).unwrap_or(u64::MAX);
        u64::from(self.years_of_experience)
            .saturating_mul(POINTS_PER_YEAR)
            .saturating_add(skills.saturating_mul(POINTS_PER_SKILL))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years_of_experience == 0 && self.matched_skills.is_empty()
    }
}

/// Result of scoring one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: u64,
    pub evidence: ScoreEvidence,
}

/// Stateless scorer over an injected skill vocabulary.
///
/// The skill patterns are compiled once into a [`RegexSet`], so a single pass
/// over the text reports every matching term.
#[derive(Debug, Clone)]
pub struct Scorer {
    vocabulary: SkillVocabulary,
    skill_set: RegexSet,
}

impl Default for Scorer {
    fn default() -> Self {
        // The default vocabulary is static and always compiles.
        Self::new(SkillVocabulary::default()).expect("default vocabulary compiles")
    }
}

impl Scorer {
    pub fn new(vocabulary: SkillVocabulary) -> Result<Self> {
        let patterns: Vec<String> = vocabulary.terms().iter().map(|t| term_pattern(t)).collect();
        let skill_set = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()
            .map_err(|err| CvError::ValidationFailed(format!("compile skill vocabulary: {err}")))?;
        Ok(Self {
            vocabulary,
            skill_set,
        })
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Score already-normalized text.
    #[must_use]
    pub fn score(&self, text: &str) -> ScoreResult {
        let years_of_experience = extract_years(text);
        let terms = self.vocabulary.terms();
        let matched_skills: BTreeSet<String> = self
            .skill_set
            .matches(text)
            .into_iter()
            .map(|idx| terms[idx].clone())
            .collect();

        let evidence = ScoreEvidence {
            years_of_experience,
            matched_skills,
        };
        let score = evidence.total();
        debug!(
            score,
            years = evidence.years_of_experience,
            skills = evidence.matched_skills.len(),
            "scored document"
        );
        ScoreResult { score, evidence }
    }
}

/// Years from the first "N years of experience" phrase, or 0.
///
/// Only the first mention counts, even if later ones are larger.
#[must_use]
pub fn extract_years(text: &str) -> u32 {
    EXPERIENCE_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        // All-digit input can only fail to parse on overflow.
        .map_or(0, |m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
}

fn term_pattern(term: &str) -> String {
    let body = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let head = if term.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        r"(?:^|\W)"
    };
    let tail = if term.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        r"(?:$|\W)"
    };
    format!("{head}(?:{body}){tail}")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
