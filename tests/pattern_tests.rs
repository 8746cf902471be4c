use cipherforge::scorer::patterns::{has_middles, has_most_middles, has_prefix, has_suffix};
use fnv::FnvHashSet;
use rstest::rstest;

fn set(items: &[&str]) -> FnvHashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[rstest]
#[case("apple", true)]
#[case("banana", true)]
#[case("cherry", true)]
#[case("date", true)]
#[case("fig", true)]
#[case("grape", true)]
#[case("ban", false)]
#[case("bana", true)]
#[case("da", false)]
#[case("kiwi", false)]
fn test_has_prefix(#[case] word: &str, #[case] expected: bool) {
    let prefixes = set(&["ap", "ban", "che", "da", "fi", "gr"]);
    assert_eq!(has_prefix(word, &prefixes), expected);
}

#[rstest]
#[case("apple", true)]
#[case("banana", true)]
#[case("cherry", true)]
#[case("date", true)]
#[case("fig", true)]
#[case("grape", true)]
#[case("ana", false)]
#[case("anana", true)]
#[case("le", false)]
#[case("kiwi", false)]
fn test_has_suffix(#[case] word: &str, #[case] expected: bool) {
    let suffixes = set(&["le", "ana", "rry", "te", "ig", "pe"]);
    assert_eq!(has_suffix(word, &suffixes), expected);
}

#[test]
fn test_three_letter_words_only_use_two_letter_slices() {
    assert!(has_prefix("cat", &set(&["ca"])));
    assert!(!has_prefix("cat", &set(&["cat"])));
    assert!(has_suffix("cat", &set(&["at"])));
    assert!(!has_suffix("cat", &set(&["cat"])));
}

#[rstest]
#[case("apple", true)]
#[case("apples", false)]
#[case("cat", false)]
fn test_has_middles(#[case] word: &str, #[case] expected: bool) {
    assert_eq!(has_middles(word, &set(&["pp", "pl", "ppl"])), expected);
}

#[test]
fn test_most_middles_sixty_percent_boundary() {
    // 15 middles: 6 pairs, 5 triples, 4 quads
    let nine = set(&["bc", "cd", "de", "ef", "fg", "gh", "bcd", "cde", "def"]);
    assert!(has_most_middles("abcdefghi", &nine, 0.60));

    // 8 of 15 is 53%
    let eight = set(&["bc", "cd", "de", "ef", "fg", "gh", "bcd", "cde"]);
    assert!(!has_most_middles("abcdefghi", &eight, 0.60));
}

#[rstest]
#[case(0.60, true)]
#[case(0.6001, false)]
#[case(0.599, true)]
fn test_most_middles_tolerance_is_tight(#[case] ratio: f64, #[case] expected: bool) {
    // 9 of 15 known is exactly 0.60
    let nine = set(&["bc", "cd", "de", "ef", "fg", "gh", "bcd", "cde", "def"]);
    assert_eq!(has_most_middles("abcdefghi", &nine, ratio), expected);
}

#[test]
fn test_short_words_have_no_middles() {
    let everything = set(&["a", "ab", "abc"]);
    assert!(!has_most_middles("abc", &everything, 0.0));
    assert!(!has_middles("abc", &everything));
}
