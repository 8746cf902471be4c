pub mod codec;
pub mod score;
pub mod search;

use cipherforge::cipher::Cipher;
use cipherforge::error::CfResult;
use cipherforge::giants::GiantCandidate;
use std::fs;
use std::path::Path;

pub const DEMO_QUOTE: &str = "Here's to the crazy ones. The misfits. The rebels. \
The troublemakers. The round pegs in the square holes.";

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accepts a giant name (`WarmHold`, `warm_hold`), a JSON cipher file, or a
/// 26-letter alphabet string.
pub fn resolve_cipher(query: &str, candidates: &[GiantCandidate]) -> CfResult<(String, Cipher)> {
    let wanted = normalize(query);
    if let Some(giant) = candidates.iter().find(|c| normalize(&c.name) == wanted) {
        return Ok((giant.name.clone(), giant.cipher.clone()));
    }

    let path = Path::new(query);
    if path.extension().is_some_and(|ext| ext == "json") {
        let content = fs::read_to_string(path)?;
        let cipher: Cipher = serde_json::from_str(&content)?;
        cipher.ensure_prefix_free()?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| query.to_string());
        return Ok((name, cipher));
    }

    Ok(("Custom".to_string(), Cipher::from_alphabet(query)?))
}
