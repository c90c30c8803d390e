use proptest::prelude::*;

use cvrank::scoring::{Scorer, normalize_text};

proptest! {
    #[test]
    fn test_score_is_deterministic(text in ".*") {
        let scorer = Scorer::default();
        prop_assert_eq!(scorer.score(&text), scorer.score(&text));
    }

    #[test]
    fn test_score_matches_evidence(text in "[A-Za-z0-9+#. ]{0,80}") {
        let result = Scorer::default().score(&text);
        prop_assert_eq!(result.score, result.evidence.total());
    }

    #[test]
    fn test_repetition_does_not_inflate_skills(word in "(Python|SQL|Docker|React)", n in 1usize..8) {
        let text = vec![word.as_str(); n].join(" ");
        prop_assert_eq!(Scorer::default().score(&text).score, 2);
    }

    #[test]
    fn test_normalize_is_idempotent(text in "\\PC*") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
    }
}
