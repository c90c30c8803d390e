//! Ranking and filtering view over stored records.
//!
//! Filtering narrows by display name, then a stable sort orders the
//! survivors by one key. Records with equal keys keep creation order.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Record;
use crate::storage::Collection;

/// Ordering applied to a ranked view.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    ScoreDesc,
    ScoreAsc,
    TimeDesc,
    TimeAsc,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScoreDesc => "score-desc",
            Self::ScoreAsc => "score-asc",
            Self::TimeDesc => "time-desc",
            Self::TimeAsc => "time-asc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and ordering for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankQuery {
    /// Case-insensitive substring of the display name; empty keeps all.
    pub name_filter: String,
    /// Exact display name; takes precedence over `name_filter`.
    pub selected_name: Option<String>,
    pub sort: SortKey,
}

impl RankQuery {
    #[must_use]
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    fn admits(&self, record: &Record, folded_filter: &str) -> bool {
        match &self.selected_name {
            Some(selected) => record.display_name() == selected,
            None => name_matches(record.display_name(), folded_filter),
        }
    }
}

fn name_matches(name: &str, folded_filter: &str) -> bool {
    folded_filter.is_empty() || name.to_lowercase().contains(folded_filter)
}

/// Filter then stable-sort `records` per `query`.
pub fn rank<'a, I>(records: I, query: &RankQuery) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let folded = query.name_filter.to_lowercase();
    let mut ranked: Vec<&Record> = records
        .into_iter()
        .filter(|record| query.admits(record, &folded))
        .collect();

    match query.sort {
        SortKey::ScoreDesc => ranked.sort_by(|a, b| b.score().cmp(&a.score())),
        SortKey::ScoreAsc => ranked.sort_by_key(|r| r.score()),
        SortKey::TimeDesc => ranked.sort_by(|a, b| b.uploaded_at().cmp(&a.uploaded_at())),
        SortKey::TimeAsc => ranked.sort_by_key(|r| r.uploaded_at()),
    }
    ranked
}

/// Distinct display names containing `filter`, in creation order.
pub fn recommended_names<'a, I>(records: I, filter: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Record>,
{
    let folded = filter.to_lowercase();
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(Record::display_name)
        .filter(|name| name_matches(name, &folded))
        .filter(|name| seen.insert(*name))
        .collect()
}

/// A ranked projection of a loaded collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    /// Rows read from the store, including corrupt ones.
    pub total: usize,
    pub records: Vec<&'a Record>,
}

impl View<'_> {
    #[must_use]
    pub fn shown(&self) -> usize {
        self.records.len()
    }
}

#[must_use]
pub fn view<'a>(collection: &'a Collection, query: &RankQuery) -> View<'a> {
    View {
        total: collection.len(),
        records: rank(collection.records(), query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LabeledSpan, NamingPolicy, RecordDraft};
    use crate::scoring::Scorer;
    use chrono::NaiveDate;

    fn record(id: u64, name: &str, text: &str, minute: u32) -> Record {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, minute, 0)
            .unwrap();
        let draft = RecordDraft::analyze(
            &Scorer::default(),
            &NamingPolicy::default(),
            text,
            vec![LabeledSpan::new("PERSON", name)],
        )
        .with_uploaded_at(at);
        Record::from_draft(id, draft)
    }

    fn sample() -> Vec<Record> {
        vec![
            record(1, "Ada Lovelace", "Python", 0),
            record(2, "Grace Hopper", "3 years of experience with Java and SQL", 5),
            record(3, "Alan Turing", "SQL", 10),
            record(4, "Ada Lovelace", "no skills here", 15),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<u64> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn default_sort_is_score_desc_and_stable() {
        let records = sample();
        let ranked = rank(&records, &RankQuery::default());
        // Ada(1) and Alan(3) tie on 2 points.
        assert_eq!(ids(&ranked), vec![2, 1, 3, 4]);
    }

    #[test]
    fn score_asc_keeps_tie_order() {
        let records = sample();
        let ranked = rank(&records, &RankQuery::sorted_by(SortKey::ScoreAsc));
        assert_eq!(ids(&ranked), vec![4, 1, 3, 2]);
    }

    #[test]
    fn time_keys_ignore_score() {
        let records = sample();
        let newest = rank(&records, &RankQuery::sorted_by(SortKey::TimeDesc));
        assert_eq!(ids(&newest), vec![4, 3, 2, 1]);
        let oldest = rank(&records, &RankQuery::sorted_by(SortKey::TimeAsc));
        assert_eq!(ids(&oldest), vec![1, 2, 3, 4]);
    }

    #[test]
    fn substring_filter_is_case_insensitive() {
        let records = sample();
        let query = RankQuery {
            name_filter: "ADA".to_string(),
            ..RankQuery::default()
        };
        assert_eq!(ids(&rank(&records, &query)), vec![1, 4]);
    }

    #[test]
    fn whitespace_filter_is_not_trimmed() {
        let records = vec![
            record(1, "Jane Doe", "", 0),
            record(2, "JaneDoe", "", 1),
            record(3, "Bob", "", 2),
        ];
        let query = RankQuery {
            name_filter: " ".to_string(),
            ..RankQuery::default()
        };
        assert_eq!(ids(&rank(&records, &query)), vec![1]);
        assert_eq!(recommended_names(&records, " "), vec!["Jane Doe"]);
    }

    #[test]
    fn selected_name_is_exact() {
        let records = sample();
        let query = RankQuery {
            name_filter: "a".to_string(),
            selected_name: Some("Alan Turing".to_string()),
            sort: SortKey::ScoreDesc,
        };
        assert_eq!(ids(&rank(&records, &query)), vec![3]);

        let partial = RankQuery {
            selected_name: Some("Alan".to_string()),
            ..RankQuery::default()
        };
        assert!(rank(&records, &partial).is_empty());
    }

    #[test]
    fn recommended_names_deduplicate_in_creation_order() {
        let records = sample();
        assert_eq!(
            recommended_names(&records, "a"),
            vec!["Ada Lovelace", "Grace Hopper", "Alan Turing"]
        );
        assert_eq!(recommended_names(&records, "hopper"), vec!["Grace Hopper"]);
        assert!(recommended_names(&records, "zzz").is_empty());
    }

    #[test]
    fn sort_key_names_match_cli_values() {
        use clap::ValueEnum;

        for key in SortKey::value_variants() {
            let value = key.to_possible_value().unwrap();
            assert_eq!(value.get_name(), key.as_str());
            assert_eq!(key.to_string(), key.as_str());
        }
    }

    #[test]
    fn view_counts_all_rows() {
        use crate::storage::LoadedRecord;

        let collection = Collection::from_entries(
            sample().into_iter().map(LoadedRecord::Valid).collect(),
        );
        let query = RankQuery {
            name_filter: "grace".to_string(),
            ..RankQuery::default()
        };
        let view = view(&collection, &query);
        assert_eq!(view.total, 4);
        assert_eq!(view.shown(), 1);
    }
}
