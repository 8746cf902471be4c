use super::DEMO_QUOTE;
use crate::reports;
use cipherforge::cipher::encode;
use cipherforge::config::Config;
use cipherforge::error::CfResult;
use cipherforge::giants::{self, GiantCandidate, GiantSet};
use cipherforge::optimizer::runner::{OptimizationOptions, Optimizer};
use cipherforge::scorer::Scorer;
use clap::Args;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    /// Independent searches to run in parallel.
    #[arg(short = 'a', long, default_value_t = 1)]
    pub attempts: usize,

    /// Write the result as a one-entry giants file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Name given to the result in `--output`.
    #[arg(long, default_value = "Discovered")]
    pub name: String,
}

pub fn run(
    args: &SearchArgs,
    config: Config,
    words: &str,
    candidates: Vec<GiantCandidate>,
) -> CfResult<()> {
    let scorer = Arc::new(Scorer::load(words, config.weights.clone())?);
    let giants = Arc::new(GiantSet::build(&scorer, candidates)?);
    info!(
        "🗿 {} giants, weakest: {} ({:.2})",
        giants.len(),
        giants.weakest().name,
        giants.min_score()
    );

    let mut options = OptimizationOptions::from(&config);
    options.attempts = args.attempts;

    let start = Instant::now();
    let result = Optimizer::new(scorer.clone(), giants.clone(), options).run()?;
    let elapsed = start.elapsed().as_secs_f32();

    println!("\n=== 🏆 FINAL RESULT ===");
    println!(
        "Score: {:.2} ({})",
        result.score,
        if result.achieved {
            "beats the weakest giant"
        } else {
            "objective not met"
        }
    );
    println!(
        "Cycles: {} | Evaluations: {} | {:.1}s",
        result.cycles, result.evaluations, elapsed
    );
    reports::print_cipher_grid(&args.name, &result.cipher);

    println!("\n{}", DEMO_QUOTE);
    println!("{}", encode(DEMO_QUOTE, &result.cipher));

    let details = scorer.score_details(&result.cipher, 15);
    reports::print_translations(&args.name, &details);

    if let Some(path) = &args.output {
        giants::save_candidates(
            path,
            &[GiantCandidate {
                name: args.name.clone(),
                cipher: result.cipher.clone(),
            }],
        )?;
        info!("💾 Saved result to {}", path);
    }

    Ok(())
}
