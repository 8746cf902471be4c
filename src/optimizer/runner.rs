use super::progress::{SearchObserver, TracingObserver};
use super::{Search, SearchResult};
use crate::config::{Config, SearchParams};
use crate::error::{CfResult, CipherForgeError};
use crate::giants::GiantSet;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

pub struct OptimizationOptions {
    pub attempts: usize,
    pub params: SearchParams,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            attempts: 1,
            params: cfg.search.clone(),
        }
    }
}

impl OptimizationOptions {
    /// Attempt `i` derives its seed from the base seed so runs are repeatable.
    pub fn params_for(&self, attempt: usize) -> SearchParams {
        let mut params = self.params.clone();
        params.seed = self.params.seed.map(|s| s.wrapping_add(attempt as u64));
        params
    }
}

pub struct Optimizer {
    scorer: Arc<Scorer>,
    giants: Arc<GiantSet>,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(scorer: Arc<Scorer>, giants: Arc<GiantSet>, options: OptimizationOptions) -> Self {
        Self {
            scorer,
            giants,
            options,
        }
    }

    /// Runs `attempts` independent searches in parallel and keeps the best.
    /// Searches that reached the objective rank above those that did not.
    pub fn run(&self) -> CfResult<SearchResult> {
        let attempts = self.options.attempts;
        if attempts == 0 {
            return Err(CipherForgeError::Validation(
                "attempts must be at least 1".to_string(),
            ));
        }
        info!("🚀 Running {} search attempt(s)...", attempts);

        let results = (0..attempts)
            .into_par_iter()
            .map(|i| {
                let observer = TracingObserver {
                    attempt: (attempts > 1).then_some(i),
                };
                self.run_attempt(i, &observer)
            })
            .collect::<CfResult<Vec<SearchResult>>>()?;

        best_of(results)
    }

    /// Same as [`Optimizer::run`] but reports through a caller-supplied observer.
    pub fn run_with_observer(&self, observer: &dyn SearchObserver) -> CfResult<SearchResult> {
        let attempts = self.options.attempts;
        if attempts == 0 {
            return Err(CipherForgeError::Validation(
                "attempts must be at least 1".to_string(),
            ));
        }

        let results = (0..attempts)
            .into_par_iter()
            .map(|i| self.run_attempt(i, observer))
            .collect::<CfResult<Vec<SearchResult>>>()?;

        best_of(results)
    }

    fn run_attempt(&self, attempt: usize, observer: &dyn SearchObserver) -> CfResult<SearchResult> {
        let mut search =
            Search::new(&self.scorer, &self.giants, self.options.params_for(attempt))?
                .with_observer(observer);
        Ok(search.run())
    }
}

fn best_of(results: Vec<SearchResult>) -> CfResult<SearchResult> {
    let total_evaluations: u64 = results.iter().map(|r| r.evaluations).sum();
    let best = results
        .into_iter()
        .max_by(|a, b| {
            a.achieved
                .cmp(&b.achieved)
                .then(a.score.total_cmp(&b.score))
        })
        .ok_or_else(|| CipherForgeError::Validation("no search results".to_string()))?;

    info!(
        "🏁 Best score {:.2} ({}), {} evaluations in total",
        best.score,
        if best.achieved { "objective met" } else { "objective not met" },
        total_evaluations
    );
    Ok(best)
}
