use super::Strategy;
use crate::cipher::Cipher;
use tracing::{debug, info};

/// Diagnostic events emitted while a search runs. Informational only.
#[derive(Debug, Clone)]
pub enum SearchEvent<'a> {
    CycleStarted {
        cycle: usize,
    },
    PhaseStarted {
        strategy: Strategy,
        score: f64,
    },
    NewHighScore {
        strategy: Strategy,
        iteration: usize,
        score: f64,
        cipher: &'a Cipher,
    },
    ThresholdReached {
        strategy: Strategy,
        threshold: f64,
        score: f64,
        iteration: usize,
    },
    ThresholdMissed {
        strategy: Strategy,
        threshold: f64,
        score: f64,
        iteration: usize,
    },
    Stagnated {
        strategy: Strategy,
        iteration: usize,
    },
    MatchedGiant {
        strategy: Strategy,
        name: &'a str,
    },
    PhaseFinished {
        strategy: Strategy,
        score: f64,
        achieved: bool,
    },
}

/// Receives search events. Shared across parallel attempts.
pub trait SearchObserver: Send + Sync {
    fn on_event(&self, event: &SearchEvent<'_>);
}

/// Silent.
impl SearchObserver for () {
    fn on_event(&self, _event: &SearchEvent<'_>) {}
}

/// Renders events as log lines, tagged with the attempt number.
pub struct TracingObserver {
    pub attempt: Option<usize>,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self { attempt: None }
    }

    fn tag(&self) -> String {
        match self.attempt {
            Some(a) => format!("[#{}] ", a),
            None => String::new(),
        }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchObserver for TracingObserver {
    fn on_event(&self, event: &SearchEvent<'_>) {
        let tag = self.tag();
        match event {
            SearchEvent::CycleStarted { cycle } => {
                info!("{}🔁 Cycle {}", tag, cycle);
            }
            SearchEvent::PhaseStarted { strategy, score } => {
                info!("{}▶️  {} phase (start score {:.2})", tag, strategy, score);
            }
            SearchEvent::NewHighScore {
                strategy,
                iteration,
                score,
                cipher,
            } => {
                info!(
                    "{}⭐ {} new high score {:.2} at iteration {}",
                    tag, strategy, score, iteration
                );
                debug!("{}   cipher: {}", tag, cipher);
            }
            SearchEvent::ThresholdReached {
                strategy,
                threshold,
                score,
                iteration,
            } => {
                info!(
                    "{}✅ {} passed {:.2} with {:.2} at iteration {}",
                    tag, strategy, threshold, score, iteration
                );
            }
            SearchEvent::ThresholdMissed {
                strategy,
                threshold,
                score,
                iteration,
            } => {
                info!(
                    "{}❌ {} stuck at {:.2}, needed {:.2} by iteration {}",
                    tag, strategy, score, threshold, iteration
                );
            }
            SearchEvent::Stagnated {
                strategy,
                iteration,
            } => {
                debug!("{}💤 {} stagnated at iteration {}", tag, strategy, iteration);
            }
            SearchEvent::MatchedGiant { strategy, name } => {
                info!("{}🪞 {} result is the giant {}, discarding", tag, strategy, name);
            }
            SearchEvent::PhaseFinished {
                strategy,
                score,
                achieved,
            } => {
                info!(
                    "{}⏹️  {} phase done: {:.2} ({})",
                    tag,
                    strategy,
                    score,
                    if *achieved { "achieved" } else { "failed" }
                );
            }
        }
    }
}
