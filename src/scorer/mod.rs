pub mod loader;
pub mod patterns;
pub mod tables;
pub mod types;

pub use self::tables::PatternTables;
pub use self::types::{Dictionary, ScoreDetails, Translation};

use crate::cipher::{encode_word, Cipher};
use crate::config::ScoringWeights;
use crate::error::{CfResult, CipherForgeError};
use std::path::Path;

/// Frequency-weighted "Englishness" of a cipher over a dictionary.
///
/// A word whose encoding is itself a dictionary word earns the exact-match
/// reward; any other encoding earns the pattern reward scaled by the source
/// word's occurrence tier.
pub struct Scorer {
    pub dictionary: Dictionary,
    pub tables: PatternTables,
    pub weights: ScoringWeights,
}

enum Contribution {
    Exact(f64),
    Pattern { epc: i32, score: f64 },
}

impl Scorer {
    pub fn new(
        dictionary: Dictionary,
        tables: PatternTables,
        weights: ScoringWeights,
    ) -> CfResult<Self> {
        if dictionary.is_empty() {
            return Err(CipherForgeError::Validation(
                "Scorer requires a non-empty dictionary".to_string(),
            ));
        }
        Ok(Self {
            dictionary,
            tables,
            weights,
        })
    }

    /// Derives the pattern tables from the dictionary itself.
    pub fn from_dictionary(dictionary: Dictionary, weights: ScoringWeights) -> CfResult<Self> {
        let tables = PatternTables::from_dictionary(&dictionary);
        Self::new(dictionary, tables, weights)
    }

    pub fn load<P: AsRef<Path>>(words_path: P, weights: ScoringWeights) -> CfResult<Self> {
        let dictionary = loader::load_words(words_path)?;
        Self::from_dictionary(dictionary, weights)
    }

    /// Hot path used by the search.
    pub fn score(&self, cipher: &Cipher) -> f64 {
        self.dictionary
            .iter()
            .map(|(word, count)| match self.contribution(word, count, cipher).1 {
                Contribution::Exact(s) => s,
                Contribution::Pattern { score, .. } => score,
            })
            .sum()
    }

    /// Full breakdown for reports. Keeps the `top` best translations.
    pub fn score_details(&self, cipher: &Cipher, top: usize) -> ScoreDetails {
        let mut details = ScoreDetails::default();

        for (word, count) in self.dictionary.iter() {
            let (encoded, contribution) = self.contribution(word, count, cipher);
            let (epc, value) = match contribution {
                Contribution::Exact(s) => {
                    details.exact_score += s;
                    details.exact_matches += 1;
                    (None, s)
                }
                Contribution::Pattern { epc, score } => {
                    details.pattern_score += score;
                    details.pattern_words += 1;
                    *details.epc_histogram.entry(epc).or_insert(0) += 1;
                    (Some(epc), score)
                }
            };
            details.total += value;
            details.translations.push(Translation {
                word: word.to_string(),
                encoded,
                epc,
                contribution: value,
            });
        }

        details
            .translations
            .sort_by(|a, b| b.contribution.total_cmp(&a.contribution));
        details.translations.truncate(top);
        details
    }

    pub fn english_pattern(&self, word: &str) -> i32 {
        patterns::english_pattern(word, &self.tables, self.weights.middles_ratio)
    }

    #[inline(always)]
    fn contribution(&self, word: &str, count: u64, cipher: &Cipher) -> (String, Contribution) {
        let w = &self.weights;
        let encoded = encode_word(word, cipher);

        if let Some(encoded_count) = self.dictionary.get(&encoded) {
            let tier = w
                .occurrence_score(count)
                .max(w.occurrence_score(encoded_count));
            return (encoded, Contribution::Exact(w.exact_match_multiplier * tier));
        }

        let epc = self.english_pattern(&encoded);
        let score = w.adjust_epc(epc) * w.occurrence_score(count);
        (encoded, Contribution::Pattern { epc, score })
    }
}
