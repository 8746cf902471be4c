pub mod codec;

pub use self::codec::{decode, decode_word, encode, encode_word};

use crate::error::{CfResult, CipherForgeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The operational alphabet. Production ciphers map exactly these letters.
pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// A substitution mapping from key strings to value strings.
///
/// Keys are kept ordered so that iteration (and therefore every seeded
/// random choice made over the keys) is reproducible.
///
/// Production ciphers are single-letter derangements over [`ALPHABET`]. For
/// those, a flat lookup table is cached and the codec bypasses the general
/// longest-match scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct Cipher {
    map: BTreeMap<String, String>,
    longest_key: usize,
    letters: Option<[u8; 26]>,
}

impl Cipher {
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let map: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from(map)
    }

    /// Builds a letter cipher from a 26-character value string, where the
    /// n-th character is the image of the n-th letter of the alphabet.
    pub fn from_alphabet(values: &str) -> CfResult<Self> {
        let values = values.trim().to_ascii_lowercase();
        if values.len() != ALPHABET.len() || !values.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(CipherForgeError::InvalidCipher(format!(
                "'{}' is not a 26-letter alphabet string",
                values
            )));
        }

        Ok(Self::from_pairs(
            ALPHABET
                .iter()
                .zip(values.bytes())
                .map(|(&k, v)| ((k as char).to_string(), (v as char).to_string())),
        ))
    }

    /// Inverse of [`Cipher::from_alphabet`]. `None` unless this is a full letter cipher.
    pub fn to_alphabet_string(&self) -> Option<String> {
        let table = self.letters?;
        if table.iter().any(|&b| b == 0) {
            return None;
        }
        Some(table.iter().map(|&b| b as char).collect())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Length in characters of the longest key.
    pub fn longest_key(&self) -> usize {
        self.longest_key
    }

    /// Flat `a..z` lookup (0 = unmapped), present when every key and value is
    /// a single lowercase ASCII letter.
    pub fn letter_table(&self) -> Option<&[u8; 26]> {
        self.letters.as_ref()
    }

    /// The value→key mapping used for decoding.
    pub fn inverse(&self) -> Cipher {
        Self::from_pairs(self.map.iter().map(|(k, v)| (v.clone(), k.clone())))
    }

    /// True for a bijection of the 26 letters onto themselves with no fixed point.
    pub fn is_derangement(&self) -> bool {
        let Some(table) = self.letters else {
            return false;
        };
        if self.map.len() != ALPHABET.len() {
            return false;
        }

        let mut seen = [false; 26];
        for (i, &value) in table.iter().enumerate() {
            if value == 0 || value == ALPHABET[i] {
                return false;
            }
            let slot = (value - b'a') as usize;
            if seen[slot] {
                return false;
            }
            seen[slot] = true;
        }
        true
    }

    /// Multi-character keys decode unambiguously only if no key is a prefix
    /// of another key.
    pub fn ensure_prefix_free(&self) -> CfResult<()> {
        // In sorted order, a key that prefixes any other key also prefixes
        // its immediate successor.
        let keys: Vec<&String> = self.map.keys().collect();
        for pair in keys.windows(2) {
            if pair[1].starts_with(pair[0].as_str()) {
                return Err(CipherForgeError::AmbiguousCipher {
                    prefix: pair[0].clone(),
                    key: pair[1].clone(),
                });
            }
        }
        Ok(())
    }

    /// Exchanges the values of two keys in place.
    pub(crate) fn swap_values(&mut self, a: &str, b: &str) {
        let (Some(va), Some(vb)) = (self.map.get(a).cloned(), self.map.get(b).cloned()) else {
            return;
        };
        self.map.insert(a.to_string(), vb);
        self.map.insert(b.to_string(), va);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.longest_key = self
            .map
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        self.letters = letter_table(&self.map);
    }
}

fn single_letter(s: &str) -> Option<u8> {
    match s.as_bytes() {
        [b] if b.is_ascii_lowercase() => Some(*b),
        _ => None,
    }
}

fn letter_table(map: &BTreeMap<String, String>) -> Option<[u8; 26]> {
    let mut table = [0u8; 26];
    for (k, v) in map {
        let key = single_letter(k)?;
        table[(key - b'a') as usize] = single_letter(v)?;
    }
    Some(table)
}

impl From<BTreeMap<String, String>> for Cipher {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut cipher = Cipher {
            map,
            longest_key: 0,
            letters: None,
        };
        cipher.refresh();
        cipher
    }
}

impl From<Cipher> for BTreeMap<String, String> {
    fn from(cipher: Cipher) -> Self {
        cipher.map
    }
}

/// Structural equality: same size and identical key→value pairs.
impl PartialEq for Cipher {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl Eq for Cipher {}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(alphabet) = self.to_alphabet_string() {
            return write!(f, "{}", alphabet);
        }
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{}->{}", k, v)).collect();
        write!(f, "{}", pairs.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_round_trip() {
        let cipher = Cipher::from_alphabet("ofdpagbyuxvrnmecjltsiwhzkq").unwrap();
        assert_eq!(cipher.get("a"), Some("o"));
        assert_eq!(cipher.get("z"), Some("q"));
        assert_eq!(
            cipher.to_alphabet_string().as_deref(),
            Some("ofdpagbyuxvrnmecjltsiwhzkq")
        );
        assert!(cipher.is_derangement());
    }

    #[test]
    fn test_rejects_bad_alphabet() {
        assert!(Cipher::from_alphabet("abc").is_err());
        assert!(Cipher::from_alphabet("ofdpagbyuxvrnmecjltsiwhzk1").is_err());
    }

    #[test]
    fn test_fixed_point_is_not_derangement() {
        // 'a' maps to itself
        let cipher = Cipher::from_alphabet("abdcfehgjilknmporqtsvuxwzy").unwrap();
        assert!(!cipher.is_derangement());
    }

    #[test]
    fn test_repeated_value_is_not_derangement() {
        let cipher = Cipher::from_alphabet("bbdcfehgjilknmporqtsvuxwzy").unwrap();
        assert!(!cipher.is_derangement());
    }

    #[test]
    fn test_structural_equality_ignores_insertion_order() {
        let a = Cipher::from_pairs([("a", "b"), ("b", "a")]);
        let b = Cipher::from_pairs([("b", "a"), ("a", "b")]);
        let c = Cipher::from_pairs([("a", "b")]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_prefix_detection() {
        let ok = Cipher::from_pairs([("ab", "x"), ("ba", "y"), ("c", "z")]);
        assert!(ok.ensure_prefix_free().is_ok());

        let bad = Cipher::from_pairs([("a", "x"), ("ab", "y"), ("ac", "z")]);
        assert!(matches!(
            bad.ensure_prefix_free(),
            Err(CipherForgeError::AmbiguousCipher { .. })
        ));
    }

    #[test]
    fn test_swap_values_keeps_table_in_sync() {
        let mut cipher = Cipher::from_alphabet("bcdefghijklmnopqrstuvwxyza").unwrap();
        cipher.swap_values("a", "c");
        assert_eq!(cipher.get("a"), Some("d"));
        assert_eq!(cipher.get("c"), Some("b"));
        assert_eq!(cipher.letter_table().unwrap()[0], b'd');
    }

    #[test]
    fn test_json_shape() {
        let cipher = Cipher::from_pairs([("a", "b"), ("b", "a")]);
        let json = serde_json::to_string(&cipher).unwrap();
        assert_eq!(json, r#"{"a":"b","b":"a"}"#);
        let back: Cipher = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cipher);
        assert!(back.letter_table().is_some());
    }
}
