// Structural heuristics over a single word.
//
// Words are normally lowercase ASCII, where character and byte offsets
// coincide. Anything else is sliced on char boundaries.

use super::tables::PatternTables;
use fnv::FnvHashSet;

pub const VOWELS: &str = "aeiouy";

#[inline(always)]
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Character-indexed view of a word.
pub(crate) struct Letters<'a> {
    word: &'a str,
    bounds: Option<Vec<usize>>,
}

impl<'a> Letters<'a> {
    pub(crate) fn new(word: &'a str) -> Self {
        let bounds = if word.is_ascii() {
            None
        } else {
            Some(
                word.char_indices()
                    .map(|(i, _)| i)
                    .chain(std::iter::once(word.len()))
                    .collect(),
            )
        };
        Self { word, bounds }
    }

    pub(crate) fn len(&self) -> usize {
        match &self.bounds {
            Some(b) => b.len() - 1,
            None => self.word.len(),
        }
    }

    /// Characters `start..end`.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        match &self.bounds {
            Some(b) => &self.word[b[start]..b[end]],
            None => &self.word[start..end],
        }
    }
}

/// Run-length vowel/consonant shape: "apple" -> "vcv", "street" -> "cvc".
pub fn word_pattern(word: &str) -> String {
    let mut pattern = String::new();
    let mut last = None;
    for c in word.chars() {
        let kind = if is_vowel(c) { 'v' } else { 'c' };
        if last != Some(kind) {
            pattern.push(kind);
            last = Some(kind);
        }
    }
    pattern
}

/// Distinct maximal vowel runs, in order of first appearance.
pub fn vowel_groups(word: &str) -> Vec<&str> {
    groups(word, true)
}

/// Distinct maximal consonant runs, in order of first appearance.
pub fn consonant_groups(word: &str) -> Vec<&str> {
    groups(word, false)
}

fn groups(word: &str, vowels: bool) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in word.char_indices() {
        if is_vowel(c) == vowels {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            push_unique(&mut found, &word[s..i]);
        }
    }
    if let Some(s) = start {
        push_unique(&mut found, &word[s..]);
    }
    found
}

/// Distinct two-letter pairs where a vowel is followed by a consonant.
/// "beautiful" -> ["ut", "if", "ul"].
pub fn vowel_consonant_boundaries(word: &str) -> Vec<&str> {
    boundaries(word, true)
}

/// Distinct two-letter pairs where a consonant is followed by a vowel.
/// "beautiful" -> ["be", "ti", "fu"].
pub fn consonant_vowel_boundaries(word: &str) -> Vec<&str> {
    boundaries(word, false)
}

fn boundaries(word: &str, vowel_first: bool) -> Vec<&str> {
    let letters = Letters::new(word);
    let mut found: Vec<&str> = Vec::new();
    let chars: Vec<char> = word.chars().collect();

    for i in 0..chars.len().saturating_sub(1) {
        if is_vowel(chars[i]) == vowel_first && is_vowel(chars[i + 1]) != vowel_first {
            push_unique(&mut found, letters.slice(i, i + 2));
        }
    }
    found
}

fn push_unique<'a>(found: &mut Vec<&'a str>, item: &'a str) {
    if !found.contains(&item) {
        found.push(item);
    }
}

/// Leading 2-letter slice (words of 3+) or 3-letter slice (words of 4+) is in `set`.
pub fn has_prefix(word: &str, set: &FnvHashSet<String>) -> bool {
    let letters = Letters::new(word);
    let n = letters.len();
    (n >= 3 && set.contains(letters.slice(0, 2))) || (n >= 4 && set.contains(letters.slice(0, 3)))
}

/// Trailing 2-letter slice (words of 3+) or 3-letter slice (words of 4+) is in `set`.
pub fn has_suffix(word: &str, set: &FnvHashSet<String>) -> bool {
    let letters = Letters::new(word);
    let n = letters.len();
    (n >= 3 && set.contains(letters.slice(n - 2, n)))
        || (n >= 4 && set.contains(letters.slice(n - 3, n)))
}

/// Interior substrings that never touch the first or last letter:
/// length 2 for words of 4+, length 3 for 5+, length 4 for 6+.
pub fn middles(word: &str) -> Vec<&str> {
    let letters = Letters::new(word);
    let n = letters.len();
    let mut out = Vec::new();
    for len in 2..=4 {
        if n < len + 2 {
            break;
        }
        for i in 1..(n - len) {
            out.push(letters.slice(i, i + len));
        }
    }
    out
}

/// True only if the word has middles and every one of them is in `set`.
pub fn has_middles(word: &str, set: &FnvHashSet<String>) -> bool {
    let found = middles(word);
    !found.is_empty() && found.iter().all(|m| set.contains(*m))
}

/// True if at least `ratio` of the word's middles are in `set`.
/// Words shorter than 4 letters have no middles and never qualify.
pub fn has_most_middles(word: &str, set: &FnvHashSet<String>, ratio: f64) -> bool {
    let found = middles(word);
    if found.is_empty() {
        return false;
    }
    let known = found.iter().filter(|m| set.contains(**m)).count();
    known as f64 + 1e-9 >= found.len() as f64 * ratio
}

/// English Pattern Count: the sum of independent +1/-1 structural checks.
pub fn english_pattern(word: &str, tables: &PatternTables, middles_ratio: f64) -> i32 {
    let mut epc = 0;

    if tables.word_patterns.contains(&word_pattern(word)) {
        epc += 1;
    }
    if vowel_groups(word)
        .iter()
        .all(|g| tables.vowel_groups.contains(*g))
    {
        epc += 1;
    }
    if consonant_groups(word)
        .iter()
        .all(|g| tables.consonant_groups.contains(*g))
    {
        epc += 1;
    }
    if vowel_consonant_boundaries(word)
        .iter()
        .all(|b| tables.vowel_consonant_boundaries.contains(*b))
    {
        epc += 1;
    }
    if consonant_vowel_boundaries(word)
        .iter()
        .all(|b| tables.consonant_vowel_boundaries.contains(*b))
    {
        epc += 1;
    }

    if has_prefix(word, &tables.prefixes) {
        epc += 1;
    } else if has_prefix(word, &tables.anti_prefixes) {
        epc -= 1;
    }

    if has_suffix(word, &tables.suffixes) {
        epc += 1;
    } else if has_suffix(word, &tables.anti_suffixes) {
        epc -= 1;
    }

    if has_most_middles(word, &tables.middles, middles_ratio) {
        epc += 1;
    } else if has_middles(word, &tables.anti_middles) {
        epc -= 1;
    }

    epc
}
