#![allow(dead_code)]

use cipherforge::cipher::{Cipher, ALPHABET};
use cipherforge::config::ScoringWeights;
use cipherforge::giants::GiantCandidate;
use cipherforge::scorer::{Dictionary, Scorer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Builds a letter cipher out of disjoint transpositions.
pub fn from_swaps(pairs: &[(char, char)]) -> Cipher {
    let mut map = BTreeMap::new();
    for &(a, b) in pairs {
        map.insert(a.to_string(), b.to_string());
        map.insert(b.to_string(), a.to_string());
    }
    assert_eq!(map.len(), ALPHABET.len(), "swaps must cover a..z");
    Cipher::from(map)
}

const FILLER: [(char, char); 10] = [
    ('b', 'e'),
    ('f', 'h'),
    ('i', 'j'),
    ('k', 'l'),
    ('m', 'n'),
    ('p', 'q'),
    ('r', 's'),
    ('u', 'v'),
    ('w', 'x'),
    ('y', 'z'),
];

/// cat <-> dog, tac <-> god.
pub fn cat_dog_cipher() -> Cipher {
    let mut pairs = vec![('c', 'd'), ('a', 'o'), ('t', 'g')];
    pairs.extend_from_slice(&FILLER);
    from_swaps(&pairs)
}

/// cat <-> god, tac <-> dog.
pub fn cat_god_cipher() -> Cipher {
    let mut pairs = vec![('c', 'g'), ('t', 'd'), ('a', 'o')];
    pairs.extend_from_slice(&FILLER);
    from_swaps(&pairs)
}

/// a -> b, b -> c, ..., z -> a
pub fn shift_cipher() -> Cipher {
    Cipher::from_alphabet("bcdefghijklmnopqrstuvwxyza").unwrap()
}

pub fn candidate(name: &str, cipher: Cipher) -> GiantCandidate {
    GiantCandidate {
        name: name.to_string(),
        cipher,
    }
}

pub fn pet_dictionary() -> Dictionary {
    Dictionary::from_counts([
        ("cat", 700_000),
        ("tac", 700_000),
        ("dog", 50_000),
        ("god", 50_000),
    ])
}

/// Pattern tables span every 2-4 letter string, so scorers are built once.
pub fn pet_scorer() -> &'static Scorer {
    static SCORER: OnceLock<Scorer> = OnceLock::new();
    SCORER.get_or_init(|| {
        Scorer::from_dictionary(pet_dictionary(), ScoringWeights::default()).unwrap()
    })
}

pub const ENGLISH_WORDS: &[(&str, u64)] = &[
    ("the", 23_000_000),
    ("and", 11_000_000),
    ("that", 4_000_000),
    ("with", 2_500_000),
    ("this", 2_000_000),
    ("from", 1_500_000),
    ("have", 1_400_000),
    ("they", 900_000),
    ("what", 700_000),
    ("there", 650_000),
    ("about", 500_000),
    ("would", 450_000),
    ("other", 300_000),
    ("people", 250_000),
    ("because", 200_000),
    ("should", 180_000),
    ("little", 150_000),
    ("house", 120_000),
    ("great", 110_000),
    ("water", 90_000),
    ("point", 80_000),
    ("mother", 60_000),
    ("string", 45_000),
    ("banana", 30_000),
    ("apple", 25_000),
    ("cherry", 20_000),
    ("street", 18_000),
    ("ones", 15_000),
    ("rebels", 9_000),
    ("square", 8_000),
    ("holes", 7_000),
    ("round", 6_000),
    ("crazy", 5_000),
    ("misfits", 1_000),
];

pub fn english_dictionary() -> Dictionary {
    Dictionary::from_counts(ENGLISH_WORDS.iter().copied())
}

pub fn english_scorer() -> &'static Scorer {
    static SCORER: OnceLock<Scorer> = OnceLock::new();
    SCORER.get_or_init(|| {
        Scorer::from_dictionary(english_dictionary(), ScoringWeights::default()).unwrap()
    })
}

pub fn write_words_csv(dir: &Path, rows: &[(&str, u64)]) -> PathBuf {
    let path = dir.join("words.csv");
    let mut content = String::from("word,count\n");
    for (word, count) in rows {
        content.push_str(&format!("{},{}\n", word, count));
    }
    std::fs::write(&path, content).unwrap();
    path
}
