use super::patterns::{
    consonant_groups, consonant_vowel_boundaries, middles, vowel_consonant_boundaries,
    vowel_groups, word_pattern, Letters,
};
use super::types::Dictionary;
use crate::cipher::ALPHABET;
use fnv::FnvHashSet;
use tracing::debug;

/// Read-only structural lookups derived from a word list.
///
/// Each `anti_*` set is the exact complement of its positive set over all
/// fixed-length strings of the alphabet (lengths 2-3 for affixes, 2-4 for
/// middles).
#[derive(Debug, Clone, Default)]
pub struct PatternTables {
    pub prefixes: FnvHashSet<String>,
    pub suffixes: FnvHashSet<String>,
    pub middles: FnvHashSet<String>,
    pub anti_prefixes: FnvHashSet<String>,
    pub anti_suffixes: FnvHashSet<String>,
    pub anti_middles: FnvHashSet<String>,
    pub word_patterns: FnvHashSet<String>,
    pub vowel_groups: FnvHashSet<String>,
    pub consonant_groups: FnvHashSet<String>,
    pub vowel_consonant_boundaries: FnvHashSet<String>,
    pub consonant_vowel_boundaries: FnvHashSet<String>,
}

impl PatternTables {
    pub fn from_dictionary(dict: &Dictionary) -> Self {
        let mut t = PatternTables::default();

        for (word, _) in dict.iter() {
            let letters = Letters::new(word);
            let n = letters.len();
            if n >= 3 {
                t.prefixes.insert(letters.slice(0, 2).to_string());
                t.suffixes.insert(letters.slice(n - 2, n).to_string());
            }
            if n >= 4 {
                t.prefixes.insert(letters.slice(0, 3).to_string());
                t.suffixes.insert(letters.slice(n - 3, n).to_string());
            }
            t.middles.extend(middles(word).into_iter().map(str::to_string));

            t.word_patterns.insert(word_pattern(word));
            insert_all(&mut t.vowel_groups, vowel_groups(word));
            insert_all(&mut t.consonant_groups, consonant_groups(word));
            insert_all(
                &mut t.vowel_consonant_boundaries,
                vowel_consonant_boundaries(word),
            );
            insert_all(
                &mut t.consonant_vowel_boundaries,
                consonant_vowel_boundaries(word),
            );
        }

        t.anti_prefixes = complement(&t.prefixes, 2..=3);
        t.anti_suffixes = complement(&t.suffixes, 2..=3);
        t.anti_middles = complement(&t.middles, 2..=4);

        debug!(
            "Tables: {} prefixes, {} suffixes, {} middles, {} anti-prefixes, {} anti-suffixes, {} anti-middles",
            t.prefixes.len(),
            t.suffixes.len(),
            t.middles.len(),
            t.anti_prefixes.len(),
            t.anti_suffixes.len(),
            t.anti_middles.len()
        );
        debug!(
            "Tables: {} word patterns, {} vowel groups, {} consonant groups, {} vc / {} cv boundaries",
            t.word_patterns.len(),
            t.vowel_groups.len(),
            t.consonant_groups.len(),
            t.vowel_consonant_boundaries.len(),
            t.consonant_vowel_boundaries.len()
        );

        t
    }
}

fn insert_all(set: &mut FnvHashSet<String>, items: Vec<&str>) {
    set.extend(items.into_iter().map(str::to_string));
}

/// Every alphabet string with a length in `lengths` that is not in `known`.
pub fn complement(
    known: &FnvHashSet<String>,
    lengths: std::ops::RangeInclusive<usize>,
) -> FnvHashSet<String> {
    let mut out = FnvHashSet::default();
    for len in lengths {
        for candidate in all_strings(len) {
            if !known.contains(&candidate) {
                out.insert(candidate);
            }
        }
    }
    out
}

/// All `26^len` lowercase strings of exactly `len` letters.
pub fn all_strings(len: usize) -> impl Iterator<Item = String> {
    let total = ALPHABET.len().pow(len as u32);
    (0..total).map(move |mut n| {
        let mut bytes = vec![0u8; len];
        for slot in bytes.iter_mut().rev() {
            *slot = ALPHABET[n % ALPHABET.len()];
            n /= ALPHABET.len();
        }
        bytes.into_iter().map(char::from).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_strings_counts() {
        assert_eq!(all_strings(1).count(), 26);
        assert_eq!(all_strings(2).count(), 676);
        let first: Vec<String> = all_strings(2).take(2).collect();
        assert_eq!(first, vec!["aa", "ab"]);
        assert_eq!(all_strings(2).last().as_deref(), Some("zz"));
    }

    #[test]
    fn test_anti_sets_partition_the_space() {
        let dict = Dictionary::from_counts([("apple", 10), ("banana", 5), ("cherry", 2)]);
        let t = PatternTables::from_dictionary(&dict);

        assert!(t.prefixes.contains("ap"));
        assert!(t.prefixes.contains("ban"));
        assert!(!t.anti_prefixes.contains("ap"));
        assert!(t.anti_prefixes.contains("zz"));
        assert_eq!(t.prefixes.len() + t.anti_prefixes.len(), 676 + 17_576);
        assert_eq!(t.suffixes.len() + t.anti_suffixes.len(), 676 + 17_576);
        assert_eq!(
            t.middles.len() + t.anti_middles.len(),
            676 + 17_576 + 456_976
        );
        assert!(t.prefixes.is_disjoint(&t.anti_prefixes));
        assert!(t.middles.is_disjoint(&t.anti_middles));
    }

    #[test]
    fn test_shape_tables() {
        let dict = Dictionary::from_counts([("apple", 10), ("street", 5)]);
        let t = PatternTables::from_dictionary(&dict);
        assert!(t.word_patterns.contains("vcv"));
        assert!(t.word_patterns.contains("cvc"));
        assert!(t.vowel_groups.contains("ee"));
        assert!(t.consonant_groups.contains("ppl"));
        assert!(t.consonant_groups.contains("str"));
        assert!(t.vowel_consonant_boundaries.contains("et"));
        assert!(t.consonant_vowel_boundaries.contains("re"));
    }
}
