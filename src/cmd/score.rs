use super::resolve_cipher;
use crate::reports;
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use cipherforge::giants::{GiantCandidate, GiantSet};
use cipherforge::scorer::Scorer;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// Score this cipher (giant name, JSON file or alphabet string) instead of the giants.
    #[arg(long)]
    pub cipher: Option<String>,

    /// Translations to list per cipher.
    #[arg(short = 'n', long, default_value_t = 15)]
    pub top: usize,
}

pub fn run(
    args: &ScoreArgs,
    config: Config,
    words: &str,
    candidates: Vec<GiantCandidate>,
) -> CfResult<()> {
    let scorer = Scorer::load(words, config.weights.clone())?;

    let mut results = Vec::new();
    if let Some(query) = &args.cipher {
        let (name, cipher) = resolve_cipher(query, &candidates)?;
        reports::print_cipher_grid(&name, &cipher);
        results.push((name, scorer.score_details(&cipher, args.top)));
    } else {
        let giants = GiantSet::build(&scorer, candidates)?;
        println!("\n🔎 === GIANT AUDIT === 🔎");
        for giant in giants.iter() {
            reports::print_cipher_grid(&giant.name, &giant.cipher);
            results.push((
                giant.name.clone(),
                scorer.score_details(&giant.cipher, args.top),
            ));
        }
    }

    results.sort_by(|a, b| b.1.total.total_cmp(&a.1.total));

    reports::print_scoring_report(&results);
    reports::print_epc_report(&results);
    for (name, details) in &results {
        reports::print_translations(name, details);
    }
    Ok(())
}
