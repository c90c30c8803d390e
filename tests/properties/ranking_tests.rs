use chrono::NaiveDate;
use proptest::prelude::*;

use cvrank::core::{LabeledSpan, NamingPolicy, Record, RecordDraft};
use cvrank::ranking::{RankQuery, SortKey, rank};
use cvrank::scoring::Scorer;
use cvrank::storage::{MemoryRecordStore, RecordStore};

const TEXTS: [&str; 4] = ["", "Python", "Python and SQL", "2 years of experience"];

fn records(picks: &[usize]) -> Vec<Record> {
    let store = MemoryRecordStore::new();
    let scorer = Scorer::default();
    for (i, pick) in picks.iter().enumerate() {
        store
            .append(RecordDraft::analyze(
                &scorer,
                &NamingPolicy::default(),
                TEXTS[*pick],
                vec![LabeledSpan::new("PERSON", format!("P{i}"))],
            ))
            .unwrap();
    }
    store.load_all().unwrap().records().cloned().collect()
}

/// Records whose upload times fall on a handful of shared seconds.
fn timed_records(seconds: &[u32]) -> Vec<Record> {
    let store = MemoryRecordStore::new();
    let scorer = Scorer::default();
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    for (i, second) in seconds.iter().enumerate() {
        let draft = RecordDraft::analyze(
            &scorer,
            &NamingPolicy::default(),
            TEXTS[i % TEXTS.len()],
            vec![LabeledSpan::new("PERSON", format!("P{i}"))],
        )
        .with_uploaded_at(day.and_hms_opt(9, 0, *second).unwrap());
        store.append(draft).unwrap();
    }
    store.load_all().unwrap().records().cloned().collect()
}

#[test]
fn test_same_second_uploads_keep_creation_order() {
    let records = timed_records(&[0, 0, 0]);
    for key in [SortKey::TimeAsc, SortKey::TimeDesc] {
        let ids: Vec<_> = rank(&records, &RankQuery::sorted_by(key))
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(ids, [1, 2, 3], "{key}");
    }
}

proptest! {
    #[test]
    fn test_time_keys_are_stable(seconds in prop::collection::vec(0u32..3, 0..20)) {
        let records = timed_records(&seconds);

        let oldest = rank(&records, &RankQuery::sorted_by(SortKey::TimeAsc));
        for pair in oldest.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.uploaded_at() <= b.uploaded_at());
            if a.uploaded_at() == b.uploaded_at() {
                prop_assert!(a.id() < b.id());
            }
        }

        let newest = rank(&records, &RankQuery::sorted_by(SortKey::TimeDesc));
        for pair in newest.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.uploaded_at() >= b.uploaded_at());
            if a.uploaded_at() == b.uploaded_at() {
                prop_assert!(a.id() < b.id());
            }
        }
    }


    #[test]
    fn test_score_desc_is_stable(picks in prop::collection::vec(0usize..4, 0..20)) {
        let records = records(&picks);
        let ranked = rank(&records, &RankQuery::sorted_by(SortKey::ScoreDesc));
        prop_assert_eq!(ranked.len(), records.len());
        for pair in ranked.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.score() >= b.score());
            if a.score() == b.score() {
                prop_assert!(a.id() < b.id());
            }
        }
    }

    #[test]
    fn test_score_asc_is_stable(picks in prop::collection::vec(0usize..4, 0..20)) {
        let records = records(&picks);
        let ranked = rank(&records, &RankQuery::sorted_by(SortKey::ScoreAsc));
        for pair in ranked.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.score() <= b.score());
            if a.score() == b.score() {
                prop_assert!(a.id() < b.id());
            }
        }
    }
}
