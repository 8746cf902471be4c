use crate::error::{CfResult, CipherForgeError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Iteration budget of the giant and elastic phases.
    #[arg(long, default_value_t = 10_000)]
    pub iterations: usize,

    /// Giant phase gives up after this many iterations without a new high.
    #[arg(long, default_value_t = 1000)]
    pub giant_patience: usize,

    /// Elastic phase gives up after this many iterations without a new high.
    #[arg(long, default_value_t = 1800)]
    pub elastic_patience: usize,

    /// Every n-th giant iteration mutates the current best instead of a giant.
    #[arg(long, default_value_t = 5)]
    pub best_mutation_interval: usize,

    /// Random phase target is `min giant score / factor`.
    #[arg(long, default_value_t = 2.7)]
    pub random_threshold_factor: f64,

    /// First elastic target is `min giant score / factor`.
    #[arg(long, default_value_t = 1.2)]
    pub elastic_threshold_factor: f64,

    /// First elastic target must be met within `iterations / divisor` steps.
    #[arg(long, default_value_t = 3)]
    pub elastic_budget_divisor: usize,

    /// Stop restarting after this many giant/random/elastic cycles.
    #[arg(long)]
    pub max_cycles: Option<usize>,

    /// Random phase gives up after this many draws. Unbounded when unset.
    #[arg(long)]
    pub random_draw_limit: Option<usize>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            giant_patience: 1000,
            elastic_patience: 1800,
            best_mutation_interval: 5,
            random_threshold_factor: 2.7,
            elastic_threshold_factor: 1.2,
            elastic_budget_divisor: 3,
            max_cycles: None,
            random_draw_limit: None,
            seed: None,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    // === EXACT MATCHES ===
    #[arg(long, default_value_t = 10.0)]
    pub exact_match_multiplier: f64,

    // === PATTERN CURVE ===
    // reward = max(epc - offset, 0) ^ exponent * scale
    #[arg(long, default_value_t = 4)]
    pub epc_offset: i32,
    #[arg(long, default_value_t = 1.5)]
    pub epc_exponent: f64,
    #[arg(long, default_value_t = 1.3)]
    pub epc_scale: f64,

    #[arg(long, default_value_t = 0.60)]
    pub middles_ratio: f64,

    // === OCCURRENCE TIERS ===
    #[arg(long, default_value_t = 600_000)]
    pub occurrence_cutoff_high: u64,
    #[arg(long, default_value_t = 160_000)]
    pub occurrence_cutoff_med: u64,
    #[arg(long, default_value_t = 40_000)]
    pub occurrence_cutoff_low: u64,

    #[arg(long, default_value_t = 5.0)]
    pub occurrence_weight_high: f64,
    #[arg(long, default_value_t = 2.0)]
    pub occurrence_weight_med: f64,
    #[arg(long, default_value_t = 1.5)]
    pub occurrence_weight_low: f64,
    #[arg(long, default_value_t = 1.0)]
    pub occurrence_weight_base: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_match_multiplier: 10.0,
            epc_offset: 4,
            epc_exponent: 1.5,
            epc_scale: 1.3,
            middles_ratio: 0.60,
            occurrence_cutoff_high: 600_000,
            occurrence_cutoff_med: 160_000,
            occurrence_cutoff_low: 40_000,
            occurrence_weight_high: 5.0,
            occurrence_weight_med: 2.0,
            occurrence_weight_low: 1.5,
            occurrence_weight_base: 1.0,
        }
    }
}

impl ScoringWeights {
    /// Coarse frequency tier of a word count.
    #[inline(always)]
    pub fn occurrence_score(&self, count: u64) -> f64 {
        if count > self.occurrence_cutoff_high {
            self.occurrence_weight_high
        } else if count > self.occurrence_cutoff_med {
            self.occurrence_weight_med
        } else if count > self.occurrence_cutoff_low {
            self.occurrence_weight_low
        } else {
            self.occurrence_weight_base
        }
    }

    /// Convex reward for an English pattern count; zero at or below the offset.
    #[inline(always)]
    pub fn adjust_epc(&self, epc: i32) -> f64 {
        let excess = (epc - self.epc_offset).max(0) as f64;
        excess.powf(self.epc_exponent) * self.epc_scale
    }

    pub fn merge_from_cli(&mut self, cli: &ScoringWeights, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(exact_match_multiplier);
        update_if_present!(epc_offset);
        update_if_present!(epc_exponent);
        update_if_present!(epc_scale);
        update_if_present!(middles_ratio);
        update_if_present!(occurrence_cutoff_high);
        update_if_present!(occurrence_cutoff_med);
        update_if_present!(occurrence_cutoff_low);
        update_if_present!(occurrence_weight_high);
        update_if_present!(occurrence_weight_med);
        update_if_present!(occurrence_weight_low);
        update_if_present!(occurrence_weight_base);
    }
}

impl SearchParams {
    /// Rejects values that would divide by zero or make a threshold meaningless.
    pub fn validate(&self) -> CfResult<()> {
        if self.best_mutation_interval == 0 || self.elastic_budget_divisor == 0 {
            return Err(CipherForgeError::Config(
                "best_mutation_interval and elastic_budget_divisor must be positive".to_string(),
            ));
        }
        if self.random_threshold_factor <= 0.0 || self.elastic_threshold_factor <= 0.0 {
            return Err(CipherForgeError::Config(
                "threshold factors must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn merge_from_cli(&mut self, cli: &SearchParams, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(iterations);
        update_if_present!(giant_patience);
        update_if_present!(elastic_patience);
        update_if_present!(best_mutation_interval);
        update_if_present!(random_threshold_factor);
        update_if_present!(elastic_threshold_factor);
        update_if_present!(elastic_budget_divisor);
        update_if_present!(max_cycles);
        update_if_present!(random_draw_limit);
        update_if_present!(seed);
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CipherForgeError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// File values form the base; flags given explicitly on the command line win.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        self.search.merge_from_cli(&cli.search, matches);
        self.weights.merge_from_cli(&cli.weights, matches);
    }

    pub fn validate(&self) -> CfResult<()> {
        self.search.validate()?;
        let w = &self.weights;
        if !(0.0..=1.0).contains(&w.middles_ratio) {
            return Err(CipherForgeError::Config(format!(
                "middles_ratio {} is outside 0..=1",
                w.middles_ratio
            )));
        }
        Ok(())
    }
}
