// Longest-match substitution codec.
//
// Encoding scans left to right, decoding scans right to left over the
// inverse mapping. Both lookups are case-insensitive and re-case the output
// position by position from the matched input span.

use super::Cipher;

/// Encodes whitespace-separated tokens and rejoins them with single spaces.
pub fn encode(text: &str, cipher: &Cipher) -> String {
    text.split_whitespace()
        .map(|word| encode_word(word, cipher))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes whitespace-separated tokens and rejoins them with single spaces.
pub fn decode(text: &str, cipher: &Cipher) -> String {
    let inverse = cipher.inverse();
    text.split_whitespace()
        .map(|word| decode_with_inverse(word, &inverse))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn encode_word(word: &str, cipher: &Cipher) -> String {
    if let Some(table) = cipher.letter_table() {
        return substitute_letters(word, table);
    }

    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());
    let mut i = 0;

    while i < chars.len() {
        let longest = cipher.longest_key().min(chars.len() - i);
        match longest_match(cipher, &chars, i, longest) {
            Some((len, value)) => {
                push_recased(&mut out, value, &chars[i..i + len]);
                i += len;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }
    out
}

pub fn decode_word(encoded: &str, cipher: &Cipher) -> String {
    decode_with_inverse(encoded, &cipher.inverse())
}

fn decode_with_inverse(encoded: &str, inverse: &Cipher) -> String {
    if let Some(table) = inverse.letter_table() {
        return substitute_letters(encoded, table);
    }

    let chars: Vec<char> = encoded.chars().collect();
    let mut pieces: Vec<String> = Vec::new();
    let mut end = chars.len();

    while end > 0 {
        let longest = inverse.longest_key().min(end);
        let found = (1..=longest).rev().find_map(|len| {
            let start = end - len;
            lookup(inverse, &chars[start..end]).map(|key| (start, key))
        });
        match found {
            Some((start, key)) => {
                let mut piece = String::with_capacity(key.len());
                push_recased(&mut piece, key, &chars[start..end]);
                pieces.push(piece);
                end = start;
            }
            None => {
                pieces.push(chars[end - 1].to_string());
                end -= 1;
            }
        }
    }

    pieces.iter().rev().map(String::as_str).collect()
}

fn longest_match<'c>(
    cipher: &'c Cipher,
    chars: &[char],
    start: usize,
    longest: usize,
) -> Option<(usize, &'c str)> {
    (1..=longest)
        .rev()
        .find_map(|len| lookup(cipher, &chars[start..start + len]).map(|v| (len, v)))
}

fn lookup<'c>(cipher: &'c Cipher, span: &[char]) -> Option<&'c str> {
    let key: String = span.iter().collect::<String>().to_lowercase();
    cipher.get(&key)
}

/// Output character `j` is upper-cased when source character `j` was.
/// Positions past the end of the source stay as written.
fn push_recased(out: &mut String, value: &str, source: &[char]) {
    for (j, c) in value.chars().enumerate() {
        if source.get(j).is_some_and(|s| s.is_uppercase()) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
}

fn substitute_letters(word: &str, table: &[u8; 26]) -> String {
    word.chars()
        .map(|c| {
            if !c.is_ascii_alphabetic() {
                return c;
            }
            match table[(c.to_ascii_lowercase() as u8 - b'a') as usize] {
                0 => c,
                mapped if c.is_ascii_uppercase() => mapped.to_ascii_uppercase() as char,
                mapped => mapped as char,
            }
        })
        .collect()
}
