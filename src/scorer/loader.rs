use super::types::Dictionary;
use crate::error::{CfResult, CipherForgeError};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads a `word,count` CSV. The first row is a header.
pub fn load_words<P: AsRef<Path>>(path: P) -> CfResult<Dictionary> {
    let path = path.as_ref();
    info!("📚 Loading words from: {}", path.display());
    let file = File::open(path)?;
    load_words_from_reader(file)
}

pub fn load_words_from_reader<R: Read>(reader: R) -> CfResult<Dictionary> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // A broken header fails the whole file; broken rows are only skipped.
    rdr.headers()?;

    let mut counts: Vec<(String, u64)> = Vec::new();
    let mut skipped = 0;

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                debug!("[Row {}] CSV Parse Error: {}", row_idx + 2, e);
                skipped += 1;
                continue;
            }
        };
        if rec.len() < 2 || rec[0].is_empty() {
            skipped += 1;
            continue;
        }
        match rec[1].parse::<u64>() {
            Ok(count) => counts.push((rec[0].to_lowercase(), count)),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("⚠️  Skipped {} invalid rows in word list.", skipped);
    }

    let dict = Dictionary::from_counts(counts);
    if dict.is_empty() {
        return Err(CipherForgeError::Validation(
            "Word list contains no usable rows".to_string(),
        ));
    }

    info!("   -> Loaded {} words", dict.len());
    Ok(dict)
}
