use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cvrank::core::{LabeledSpan, NamingPolicy, RecordDraft};
use cvrank::scoring::Scorer;
use cvrank::storage::{CsvRecordStore, LoadedRecord, RecordStore};
use cvrank::test_utils::fixtures::UnitTestFixture;
use cvrank::utils::RetryPolicy;

fn open(fixture: &UnitTestFixture) -> CsvRecordStore {
    CsvRecordStore::open(
        fixture.store_path(),
        RetryPolicy::default(),
        Duration::from_secs(10),
    )
    .unwrap()
}

fn draft(name: &str, text: &str) -> RecordDraft {
    RecordDraft::analyze(
        &Scorer::default(),
        &NamingPolicy::default(),
        text,
        vec![LabeledSpan::new("PERSON", name)],
    )
}

#[test]
fn test_concurrent_appends_lose_nothing() {
    let fixture = UnitTestFixture::new();
    let store: Arc<dyn RecordStore> = Arc::new(open(&fixture));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..10 {
                    store
                        .append(draft(&format!("w{worker}-{i}"), "Python"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let collection = store.load_all().unwrap();
    assert_eq!(collection.len(), 40);
    let mut ids: Vec<u64> = collection.records().map(|r| r.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=40).collect::<Vec<_>>());
}

#[test]
fn test_separate_store_handles_share_the_file_lock() {
    let fixture = UnitTestFixture::new();
    let first = Arc::new(open(&fixture));
    let second = Arc::new(open(&fixture));

    let a = {
        let store = Arc::clone(&first);
        thread::spawn(move || {
            for i in 0..10 {
                store.append(draft(&format!("a{i}"), "SQL")).unwrap();
            }
        })
    };
    let b = {
        let store = Arc::clone(&second);
        thread::spawn(move || {
            for i in 0..10 {
                store.append(draft(&format!("b{i}"), "SQL")).unwrap();
            }
        })
    };
    a.join().unwrap();
    b.join().unwrap();

    assert_eq!(first.load_all().unwrap().records().count(), 20);
}

#[test]
fn test_corruption_is_isolated_per_row() {
    let fixture = UnitTestFixture::new();
    let store = open(&fixture);
    for name in ["Ada", "Bob", "Cy"] {
        store.append(draft(name, "Python")).unwrap();
    }

    let contents = std::fs::read_to_string(fixture.store_path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    let broken = lines[2].replace("\"v\"", "\"version\"");
    let rewritten = [lines[0], lines[1], broken.as_str(), lines[3]].join("\n") + "\n";
    std::fs::write(fixture.store_path(), rewritten).unwrap();

    let collection = store.load_all().unwrap();
    assert_eq!(collection.len(), 3);
    let names: Vec<_> = collection.records().map(|r| r.display_name()).collect();
    assert_eq!(names, ["Ada", "Cy"]);
    match collection.find(2) {
        Some(LoadedRecord::Corrupt(corrupt)) => {
            assert_eq!(corrupt.row, 2);
            assert_eq!(corrupt.display_name.as_deref(), Some("Bob"));
        }
        other => panic!("expected corrupt row, got {other:?}"),
    }
}

#[test]
fn test_clear_then_append_restarts_ids() {
    let fixture = UnitTestFixture::new();
    let store = open(&fixture);
    store.append(draft("Ada", "Python")).unwrap();
    store.append(draft("Bob", "Python")).unwrap();

    store.clear().unwrap();
    assert!(store.load_all().unwrap().is_empty());
    assert_eq!(store.append(draft("Cy", "Python")).unwrap().id(), 1);
}

#[test]
fn test_records_round_trip_through_file() {
    let fixture = UnitTestFixture::new();
    let store = open(&fixture);
    let spans = vec![
        LabeledSpan::new("PERSON", "Jane, \"JD\" Doe"),
        LabeledSpan::new("ORG", "Acme"),
        LabeledSpan::new("ORG", "Acme"),
    ];
    let appended = store
        .append(RecordDraft::analyze(
            &Scorer::default(),
            &NamingPolicy::default(),
            "5 years of experience in Python and SQL",
            spans.clone(),
        ))
        .unwrap();

    let reopened = open(&fixture).load_all().unwrap();
    let record = reopened.records().next().unwrap();
    assert_eq!(record, &appended);
    assert_eq!(record.spans(), spans.as_slice());
    assert_eq!(record.score(), 14);
}
