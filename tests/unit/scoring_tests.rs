use cvrank::scoring::{Scorer, SkillVocabulary, extract_years, normalize_text};
use cvrank::test_utils::{TestCase, run_table_tests};

#[test]
fn test_score_table() {
    let scorer = Scorer::default();
    let cases = vec![
        TestCase::new("empty text", "", 0),
        TestCase::new("one skill", "Python developer", 2),
        TestCase::new("repeated skill counts once", "Python Python python PYTHON Python", 2),
        TestCase::new("experience only", "4 years of experience", 8),
        TestCase::new(
            "composite",
            "5 years of experience in Python and SQL",
            14,
        ),
        TestCase::new("substring is not a skill", "Javascripting", 0),
        TestCase::new("symbol skills", "C++, C# and Vue.js", 6),
        TestCase::new("multi-word skill", "strong Machine   Learning background", 2),
    ];
    run_table_tests(cases, |text: &str| scorer.score(text).score).unwrap();
}

#[test]
fn test_years_first_match_wins() {
    let cases = vec![
        TestCase::new("none", "no experience listed", 0),
        TestCase::new("single", "12 years of experience", 12),
        TestCase::new("first of two", "3 years of experience, then 9 years of experience", 3),
        TestCase::new("case insensitive", "7 YEARS OF EXPERIENCE", 7),
    ];
    run_table_tests(cases, extract_years).unwrap();
}

#[test]
fn test_injected_vocabulary_replaces_defaults() {
    let scorer = Scorer::new(SkillVocabulary::new(["Haskell"])).unwrap();
    assert_eq!(scorer.score("Haskell and Python").score, 2);
    let evidence = scorer.score("haskell").evidence;
    assert!(evidence.matched_skills.contains("Haskell"));
}

#[test]
fn test_normalized_text_scores_like_raw() {
    let scorer = Scorer::default();
    let raw = "5 years\nof   experience\tin Python";
    assert_eq!(
        scorer.score(&normalize_text(raw)).score,
        scorer.score("5 years of experience in Python").score
    );
}

#[test]
fn test_years_need_ascii_digits() {
    assert_eq!(extract_years("٥ years of experience"), 0);
    assert_eq!(extract_years("٥ years of experience, 2 years of experience"), 2);
}
