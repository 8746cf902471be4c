pub mod mutation;
pub mod progress;
pub mod runner;

use self::mutation::{random_derangement, vary};
use self::progress::{SearchEvent, SearchObserver};
use crate::cipher::Cipher;
use crate::config::SearchParams;
use crate::error::CfResult;
use crate::giants::GiantSet;
use crate::scorer::Scorer;
use serde::Serialize;
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Strategy {
    Giant,
    Random,
    Elastic,
}

/// A score that must be exceeded, optionally within a number of iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub score: f64,
    pub iterations: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PhaseOutcome {
    pub strategy: Strategy,
    pub cipher: Cipher,
    pub score: f64,
    pub achieved: bool,
    pub iterations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub cipher: Cipher,
    pub score: f64,
    pub achieved: bool,
    pub cycles: usize,
    pub evaluations: u64,
}

/// Acceptance compares whole points only.
#[inline(always)]
fn improves(candidate: f64, best: f64) -> bool {
    (candidate as i64) > (best as i64)
}

/// One independent search: its own RNG, counters and best-so-far.
///
/// The scorer and giants are borrowed read-only, so any number of searches
/// may share them.
pub struct Search<'a> {
    scorer: &'a Scorer,
    giants: &'a GiantSet,
    params: SearchParams,
    observer: &'a dyn SearchObserver,
    rng: fastrand::Rng,
    cycles: usize,
    evaluations: u64,
    best: Option<(Cipher, f64)>,
}

impl<'a> Search<'a> {
    pub fn new(scorer: &'a Scorer, giants: &'a GiantSet, params: SearchParams) -> CfResult<Self> {
        params.validate()?;
        let rng = if let Some(s) = params.seed {
            fastrand::Rng::with_seed(s)
        } else {
            fastrand::Rng::new()
        };

        Ok(Self {
            scorer,
            giants,
            params,
            observer: &(),
            rng,
            cycles: 0,
            evaluations: 0,
            best: None,
        })
    }

    pub fn with_observer(mut self, observer: &'a dyn SearchObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Best non-giant cipher seen by any phase so far.
    pub fn best(&self) -> Option<(&Cipher, f64)> {
        self.best.as_ref().map(|(c, s)| (c, *s))
    }

    pub fn random_threshold(&self) -> f64 {
        self.giants.min_score() / self.params.random_threshold_factor
    }

    pub fn elastic_thresholds(&self) -> [Threshold; 2] {
        let min = self.giants.min_score();
        [
            Threshold {
                score: min / self.params.elastic_threshold_factor,
                iterations: Some(self.params.iterations / self.params.elastic_budget_divisor),
            },
            Threshold {
                score: min,
                iterations: None,
            },
        ]
    }

    /// Alternates giant, random and elastic phases until a non-giant cipher
    /// beats the weakest giant, or `max_cycles` runs out.
    pub fn run(&mut self) -> SearchResult {
        let mut seed = random_derangement(&mut self.rng);
        let initial = seed.clone();

        loop {
            if let Some(max) = self.params.max_cycles {
                if self.cycles >= max {
                    return self.result(None, initial);
                }
            }
            self.cycles += 1;
            self.observer.on_event(&SearchEvent::CycleStarted { cycle: self.cycles });

            let giant = self.giant_phase(seed);
            if giant.achieved {
                return self.result(Some(giant), initial);
            }

            let random = self.random_phase(self.random_threshold());
            if !random.achieved {
                seed = random.cipher;
                continue;
            }

            let elastic = self.elastic_phase(random.cipher);
            if elastic.achieved {
                return self.result(Some(elastic), initial);
            }
            seed = elastic.cipher;
        }
    }

    /// Hill-climbs from `seed`, drawing most trials from mutated giants.
    pub fn giant_phase(&mut self, seed: Cipher) -> PhaseOutcome {
        let strategy = Strategy::Giant;
        let mut rng = self.phase_rng();
        let mut best_score = self.evaluate(&seed);
        let mut best = seed;
        self.observer.on_event(&SearchEvent::PhaseStarted {
            strategy,
            score: best_score,
        });

        let mut stale = 0;
        let mut iterations = 0;
        for i in 0..self.params.iterations {
            iterations = i + 1;
            let trial = if i % self.params.best_mutation_interval == 0 {
                vary(&best, 1, &mut rng)
            } else {
                let giant = self.giants.pick_seed(&mut rng);
                vary(&giant.cipher, rng.usize(1..=2), &mut rng)
            };

            let score = self.evaluate(&trial);
            if improves(score, best_score) {
                best = trial;
                best_score = score;
                stale = 0;
                self.observer.on_event(&SearchEvent::NewHighScore {
                    strategy,
                    iteration: i,
                    score,
                    cipher: &best,
                });
            } else {
                stale += 1;
                if stale >= self.params.giant_patience {
                    self.observer
                        .on_event(&SearchEvent::Stagnated { strategy, iteration: i });
                    break;
                }
            }
        }

        let achieved = best_score > self.giants.min_score() && !self.is_giant(strategy, &best);
        self.finish(strategy, best, best_score, achieved, iterations)
    }

    /// Draws fresh derangements until one scores above `threshold`.
    pub fn random_phase(&mut self, threshold: f64) -> PhaseOutcome {
        let strategy = Strategy::Random;
        let mut rng = self.phase_rng();
        let mut best = random_derangement(&mut rng);
        let mut best_score = self.evaluate(&best);
        self.observer.on_event(&SearchEvent::PhaseStarted {
            strategy,
            score: best_score,
        });

        let mut draws = 1;
        while best_score <= threshold {
            if let Some(limit) = self.params.random_draw_limit {
                if draws >= limit {
                    self.observer.on_event(&SearchEvent::ThresholdMissed {
                        strategy,
                        threshold,
                        score: best_score,
                        iteration: draws,
                    });
                    break;
                }
            }

            let trial = random_derangement(&mut rng);
            let score = self.evaluate(&trial);
            draws += 1;
            if score > best_score {
                best = trial;
                best_score = score;
                self.observer.on_event(&SearchEvent::NewHighScore {
                    strategy,
                    iteration: draws,
                    score,
                    cipher: &best,
                });
            }
        }

        let achieved = best_score > threshold;
        if achieved {
            self.observer.on_event(&SearchEvent::ThresholdReached {
                strategy,
                threshold,
                score: best_score,
                iteration: draws,
            });
        }
        self.finish(strategy, best, best_score, achieved, draws)
    }

    /// Local search from `seed` that must clear both elastic thresholds in
    /// order. Missing the first one's iteration budget fails the phase.
    pub fn elastic_phase(&mut self, seed: Cipher) -> PhaseOutcome {
        let strategy = Strategy::Elastic;
        let thresholds = self.elastic_thresholds();
        let mut rng = self.phase_rng();
        let mut best_score = self.evaluate(&seed);
        let mut best = seed;
        self.observer.on_event(&SearchEvent::PhaseStarted {
            strategy,
            score: best_score,
        });

        let mut stage = 0;
        let mut stale = 0;
        let mut iterations = 0;
        for i in 0..self.params.iterations {
            stage = self.advance(strategy, &thresholds, stage, best_score, i);
            if let Some(limit) = thresholds.get(stage).and_then(|t| t.iterations) {
                if i >= limit {
                    self.observer.on_event(&SearchEvent::ThresholdMissed {
                        strategy,
                        threshold: thresholds[stage].score,
                        score: best_score,
                        iteration: i,
                    });
                    return self.finish(strategy, best, best_score, false, iterations);
                }
            }

            iterations = i + 1;
            let trial = vary(&best, rng.usize(1..=2), &mut rng);
            let score = self.evaluate(&trial);
            if improves(score, best_score) {
                best = trial;
                best_score = score;
                stale = 0;
                self.observer.on_event(&SearchEvent::NewHighScore {
                    strategy,
                    iteration: i,
                    score,
                    cipher: &best,
                });
            } else {
                stale += 1;
                if stale >= self.params.elastic_patience {
                    self.observer
                        .on_event(&SearchEvent::Stagnated { strategy, iteration: i });
                    break;
                }
            }
        }

        stage = self.advance(strategy, &thresholds, stage, best_score, iterations);
        let achieved = stage == thresholds.len() && !self.is_giant(strategy, &best);
        self.finish(strategy, best, best_score, achieved, iterations)
    }

    fn advance(
        &self,
        strategy: Strategy,
        thresholds: &[Threshold],
        mut stage: usize,
        score: f64,
        iteration: usize,
    ) -> usize {
        while stage < thresholds.len() && score > thresholds[stage].score {
            self.observer.on_event(&SearchEvent::ThresholdReached {
                strategy,
                threshold: thresholds[stage].score,
                score,
                iteration,
            });
            stage += 1;
        }
        stage
    }

    fn phase_rng(&mut self) -> fastrand::Rng {
        fastrand::Rng::with_seed(self.rng.u64(..))
    }

    fn evaluate(&mut self, cipher: &Cipher) -> f64 {
        self.evaluations += 1;
        self.scorer.score(cipher)
    }

    fn is_giant(&self, strategy: Strategy, cipher: &Cipher) -> bool {
        match self.giants.iter().find(|g| &g.cipher == cipher) {
            Some(giant) => {
                self.observer.on_event(&SearchEvent::MatchedGiant {
                    strategy,
                    name: &giant.name,
                });
                true
            }
            None => false,
        }
    }

    fn finish(
        &mut self,
        strategy: Strategy,
        cipher: Cipher,
        score: f64,
        achieved: bool,
        iterations: usize,
    ) -> PhaseOutcome {
        self.observer.on_event(&SearchEvent::PhaseFinished {
            strategy,
            score,
            achieved,
        });

        let beats_best = self.best.as_ref().map_or(true, |(_, s)| score > *s);
        if beats_best && !self.giants.contains(&cipher) {
            self.best = Some((cipher.clone(), score));
        }

        PhaseOutcome {
            strategy,
            cipher,
            score,
            achieved,
            iterations,
        }
    }

    /// Falls back to the best non-giant seen, then to the starting derangement.
    fn result(&self, winner: Option<PhaseOutcome>, initial: Cipher) -> SearchResult {
        let (cipher, score, achieved) = match winner {
            Some(o) => (o.cipher, o.score, o.achieved),
            None => match &self.best {
                Some((c, s)) => (c.clone(), *s, false),
                None => {
                    let score = self.scorer.score(&initial);
                    (initial, score, false)
                }
            },
        };

        SearchResult {
            cipher,
            score,
            achieved,
            cycles: self.cycles,
            evaluations: self.evaluations,
        }
    }
}
