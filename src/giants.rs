use crate::cipher::Cipher;
use crate::error::{CfResult, CipherForgeError};
use crate::scorer::Scorer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownGiant {
    LonelyRemark,
    MoonPeer,
    WormHeld,
    WarmHold,
    WormHelp,
}

impl KnownGiant {
    /// Images of `a..z`, in alphabet order.
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::LonelyRemark => "ofdpagbyuxvrnmecjltsiwhzkq",
            Self::MoonPeer => "owdmagfyuvjnprebxltsichzkq",
            Self::WormHeld => "ocbnagpyuxvrdmefjltsizhwkq",
            Self::WarmHold => "owbnagpyuxvrdmefjltsichzkq",
            Self::WormHelp => "owdmagfyuxvnprebjltsichzkq",
        }
    }

    pub fn cipher(&self) -> Cipher {
        // The tables above are fixed 26-letter strings.
        Cipher::from_alphabet(self.get_str()).unwrap_or_default()
    }

    pub fn candidate(&self) -> GiantCandidate {
        GiantCandidate {
            name: to_camel(&self.to_string()),
            cipher: self.cipher(),
        }
    }
}

fn to_camel(snake: &str) -> String {
    snake
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn builtin_candidates() -> Vec<GiantCandidate> {
    KnownGiant::iter().map(|g| g.candidate()).collect()
}

/// An unscored reference cipher, as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiantCandidate {
    pub name: String,
    pub cipher: Cipher,
}

/// Loads a JSON array of `{ "name": ..., "cipher": { "a": "o", ... } }`.
/// Every entry must be a letter derangement.
pub fn load_candidates<P: AsRef<Path>>(path: P) -> CfResult<Vec<GiantCandidate>> {
    let content = fs::read_to_string(path.as_ref())?;
    let candidates: Vec<GiantCandidate> = serde_json::from_str(&content)?;
    for c in &candidates {
        if !c.cipher.is_derangement() {
            return Err(CipherForgeError::InvalidCipher(format!(
                "Giant '{}' is not a derangement of a..z",
                c.name
            )));
        }
    }
    Ok(candidates)
}

pub fn save_candidates<P: AsRef<Path>>(path: P, candidates: &[GiantCandidate]) -> CfResult<()> {
    let json = serde_json::to_string_pretty(candidates)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct Giant {
    pub name: String,
    pub cipher: Cipher,
    pub score: f64,
}

/// Scored, deduplicated reference ciphers.
#[derive(Debug, Clone)]
pub struct GiantSet {
    giants: Vec<Giant>,
    min_index: usize,
}

impl GiantSet {
    /// Scores every candidate and drops structural duplicates, keeping the
    /// first occurrence.
    pub fn build(scorer: &Scorer, candidates: Vec<GiantCandidate>) -> CfResult<Self> {
        info!("Loading {} giants...", candidates.len());

        let mut giants: Vec<Giant> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if let Some(existing) = giants.iter().find(|g| g.cipher == candidate.cipher) {
                warn!("Duplicate giant: {} == {}", candidate.name, existing.name);
                continue;
            }
            let score = scorer.score(&candidate.cipher);
            giants.push(Giant {
                name: candidate.name,
                cipher: candidate.cipher,
                score,
            });
        }

        if giants.is_empty() {
            return Err(CipherForgeError::Validation(
                "At least one giant is required".to_string(),
            ));
        }

        let min_index = giants
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.score.total_cmp(&b.1.score))
            .map(|(i, _)| i)
            .unwrap_or(0);

        Ok(Self { giants, min_index })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Giant> {
        self.giants.iter()
    }

    pub fn len(&self) -> usize {
        self.giants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.giants.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Giant> {
        self.giants.get(idx)
    }

    pub fn min_score(&self) -> f64 {
        self.giants[self.min_index].score
    }

    pub fn weakest(&self) -> &Giant {
        &self.giants[self.min_index]
    }

    pub fn contains(&self, cipher: &Cipher) -> bool {
        self.giants.iter().any(|g| &g.cipher == cipher)
    }

    /// A uniformly chosen giant other than the weakest. With a single giant,
    /// that giant is returned.
    pub fn pick_seed(&self, rng: &mut fastrand::Rng) -> &Giant {
        if self.giants.len() == 1 {
            return &self.giants[0];
        }
        let mut idx = rng.usize(0..self.giants.len() - 1);
        if idx >= self.min_index {
            idx += 1;
        }
        &self.giants[idx]
    }
}
