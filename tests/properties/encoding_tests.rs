use proptest::prelude::*;

use cvrank::core::LabeledSpan;
use cvrank::storage::codec::{decode_spans, encode_spans};

fn span() -> impl Strategy<Value = LabeledSpan> {
    ("(PERSON|ORG|GPE|DATE|[A-Z_]{1,8})", "\\PC{0,24}")
        .prop_map(|(label, text)| LabeledSpan::new(label, text))
}

proptest! {
    #[test]
    fn test_spans_round_trip(spans in prop::collection::vec(span(), 0..12)) {
        let encoded = encode_spans(&spans).unwrap();
        prop_assert_eq!(decode_spans(&encoded).unwrap(), spans);
    }

    #[test]
    fn test_duplicates_survive_round_trip(span in span(), n in 1usize..5) {
        let spans = vec![span; n];
        let encoded = encode_spans(&spans).unwrap();
        prop_assert_eq!(decode_spans(&encoded).unwrap(), spans);
    }
}

#[test]
fn test_empty_spans_round_trip() {
    let encoded = encode_spans(&[]).unwrap();
    assert!(decode_spans(&encoded).unwrap().is_empty());
}
