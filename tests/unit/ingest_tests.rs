use cvrank::core::{Extraction, IngestOutcome, LabeledSpan, NamingPolicy};
use cvrank::scoring::Scorer;
use cvrank::test_utils::fixtures::UnitTestFixture;

#[test]
fn test_extraction_from_files() {
    let fixture = UnitTestFixture::new();
    let (text, spans) = fixture.create_extraction(
        "cv",
        "Jane  Doe\n5 years of experience",
        &[
            LabeledSpan::new("PERSON", "Jane Doe"),
            LabeledSpan::new("ORG", "Acme"),
        ],
    );

    let extraction = Extraction::from_files(&text, &spans).unwrap();
    assert_eq!(extraction.text, "Jane Doe 5 years of experience");
    assert_eq!(extraction.spans.len(), 2);

    let outcome =
        IngestOutcome::from_extraction(&Scorer::default(), &NamingPolicy::default(), Ok(extraction));
    assert_eq!(outcome.score(), 10);
    assert!(outcome.warning().is_none());
    match outcome {
        IngestOutcome::Scored(draft) => assert_eq!(draft.display_name(), "Jane Doe"),
        IngestOutcome::Unavailable { reason } => panic!("unexpected: {reason}"),
    }
}

#[test]
fn test_object_spans_are_accepted() {
    let fixture = UnitTestFixture::new();
    let text = fixture.create_file("cv.txt", "SQL");
    let spans = fixture.create_file("cv.json", r#"[{"label":"PERSON","text":"Ada"}]"#);
    let extraction = Extraction::from_files(&text, &spans).unwrap();
    assert_eq!(extraction.spans, vec![LabeledSpan::new("PERSON", "Ada")]);
}

#[test]
fn test_bad_spans_file_is_unavailable() {
    let fixture = UnitTestFixture::new();
    let text = fixture.create_file("cv.txt", "Python");
    let spans = fixture.create_file("cv.json", "{not json");

    let outcome = IngestOutcome::from_extraction(
        &Scorer::default(),
        &NamingPolicy::default(),
        Extraction::from_files(&text, &spans),
    );
    assert_eq!(outcome.score(), 0);
    assert!(outcome.evidence().is_empty());
    assert!(outcome.warning().unwrap().contains("cv.json"));
}
