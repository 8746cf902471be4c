use fnv::FnvHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Word -> occurrence count.
///
/// Iteration is in word order so that float summation over the dictionary is
/// reproducible between runs.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<(String, u64)>,
    index: FnvHashMap<String, u64>,
}

impl Dictionary {
    /// Duplicate words have their counts summed.
    pub fn from_counts<S, I>(counts: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut index: FnvHashMap<String, u64> = FnvHashMap::default();
        for (word, count) in counts {
            *index.entry(word.into()).or_insert(0) += count;
        }

        let mut entries: Vec<(String, u64)> = index.iter().map(|(w, &c)| (w.clone(), c)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        Self { entries, index }
    }

    #[inline(always)]
    pub fn get(&self, word: &str) -> Option<u64> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One dictionary word and what the cipher turned it into.
#[derive(Debug, Clone, Serialize)]
pub struct Translation {
    pub word: String,
    pub encoded: String,
    /// `None` when the encoded word is itself a dictionary word.
    pub epc: Option<i32>,
    pub contribution: f64,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ScoreDetails {
    pub total: f64,
    pub exact_score: f64,
    pub pattern_score: f64,

    pub exact_matches: usize,
    pub pattern_words: usize,
    /// EPC value -> number of non-dictionary encodings with that count.
    pub epc_histogram: BTreeMap<i32, usize>,

    /// Highest contributions first.
    pub translations: Vec<Translation>,
}
