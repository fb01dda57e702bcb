//! Monte-Carlo self-play trainer.
//!
//! Each training episode is played greedily from the current table with
//! random tie-breaks. When it ends, the single terminal reward is posted to
//! every (state, decision) pair the learner made, bust-causing draw included.
//! Evaluation plays more episodes from a frozen table and reports the win
//! fraction.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::blackjack::{Episode, Round};
use crate::cards::Deck;
use crate::error::GameError;
use crate::learning::action::Reward;
use crate::learning::config::{EvaluationReport, Tally, TrainingConfig, TrainingStats};
use crate::learning::policy::AgentStrategy;
use crate::learning::DecisionTable;

/// State classes to reserve room for in a fresh table.
const INITIAL_STATES: usize = 4_096;

/// Owns the experience table and drives training and evaluation.
///
/// # Example
/// ```
/// use blackjack_learner::learning::{Trainer, TrainingConfig};
///
/// let config = TrainingConfig::fast().with_seed(42);
/// let mut trainer = Trainer::new(config);
/// trainer.train(1_000).unwrap();
/// let report = trainer.evaluate(200).unwrap();
/// assert_eq!(report.episodes, 200);
/// ```
pub struct Trainer {
    /// Configuration for the run.
    config: TrainingConfig,

    /// Learned values.
    table: DecisionTable,

    /// Training episodes completed.
    episodes: u64,

    /// Statistics tracking.
    stats: TrainingStats,

    /// Random source for shuffling, tie-breaks and evaluation seeds.
    rng: StdRng,
}

impl Trainer {
    /// Create a trainer with an empty table.
    pub fn new(config: TrainingConfig) -> Self {
        Self::with_table(config, DecisionTable::with_capacity(INITIAL_STATES))
    }

    /// Create a trainer that continues from an existing table.
    pub fn with_table(config: TrainingConfig, table: DecisionTable) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            table,
            episodes: 0,
            stats: TrainingStats::new(),
            rng,
        }
    }

    /// Play one training episode with a freshly shuffled deck and update the table.
    pub fn run_episode(&mut self) -> Result<Episode, GameError> {
        let deck = Deck::shuffled(&mut self.rng);
        self.run_episode_with_deck(deck)
    }

    /// Play one training episode from a prepared deck and update the table.
    ///
    /// The table receives exactly one update carrying the whole episode.
    pub fn run_episode_with_deck(&mut self, deck: Deck) -> Result<Episode, GameError> {
        let mut round = Round::new(deck);
        let episode = {
            let mut agent = AgentStrategy::new(&self.table, &mut self.rng);
            round.play(&mut agent)?
        };

        self.table.update(&episode.steps, episode.reward);
        self.episodes += 1;
        self.stats.outcomes.record(episode.reward);

        Ok(episode)
    }

    /// Train for a number of episodes.
    pub fn train(&mut self, episodes: u64) -> Result<&TrainingStats, GameError> {
        let interval = self.config.progress_interval.max(1);
        self.train_with_callback(episodes, interval, |_| {})
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `episodes` - Number of episodes to run
    /// * `callback_interval` - How often to call the callback
    /// * `callback` - Function called every `callback_interval` episodes
    pub fn train_with_callback<F>(
        &mut self,
        episodes: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> Result<&TrainingStats, GameError>
    where
        F: FnMut(&TrainingStats),
    {
        log::info!("training for {} episodes", episodes);
        let start_time = Instant::now();
        let elapsed_before = self.stats.elapsed_seconds;
        let callback_interval = callback_interval.max(1);

        for i in 0..episodes {
            self.run_episode()?;

            if (i + 1) % callback_interval == 0 {
                self.refresh_stats(elapsed_before + start_time.elapsed().as_secs_f64());
                log::debug!(
                    "episode {:>10} states {:>6} win rate {:.3}",
                    self.stats.episodes,
                    self.stats.states,
                    self.stats.outcomes.win_rate()
                );
                callback(&self.stats);
            }
        }

        self.refresh_stats(elapsed_before + start_time.elapsed().as_secs_f64());
        log::info!(
            "trained {} episodes, {} states, {} entries in {:.2}s",
            self.stats.episodes,
            self.stats.states,
            self.stats.entries,
            self.stats.elapsed_seconds
        );

        Ok(&self.stats)
    }

    /// Play `episodes` evaluation episodes without touching the table.
    ///
    /// Episodes run in parallel. Each gets its own generator seeded from a
    /// value drawn from the trainer's generator plus the episode index, so the
    /// report depends only on the seed, not on the thread count.
    pub fn evaluate(&mut self, episodes: u64) -> Result<EvaluationReport, GameError> {
        log::info!("evaluating over {} episodes", episodes);
        let start_time = Instant::now();
        let base_seed: u64 = self.rng.gen();
        let table = &self.table;

        let run = || {
            (0..episodes)
                .into_par_iter()
                .map(|i| {
                    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i));
                    play_frozen(table, &mut rng)
                })
                .try_fold(Tally::default, |mut tally, reward| -> Result<Tally, GameError> {
                    tally.record(reward?);
                    Ok(tally)
                })
                .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))
        };

        let outcomes = match self.config.num_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(run)?,
            None => run()?,
        };

        let report = EvaluationReport::from_tally(outcomes, start_time.elapsed().as_secs_f64());
        log::info!(
            "evaluation: {} wins, {} ties, {} losses (win rate {:.3})",
            report.outcomes.wins,
            report.outcomes.ties,
            report.outcomes.losses,
            report.win_rate
        );
        Ok(report)
    }

    /// Run the configured training episodes, then the configured evaluation.
    pub fn run(&mut self) -> Result<EvaluationReport, GameError> {
        self.train(self.config.episodes)?;
        self.evaluate(self.config.eval_episodes)
    }

    fn refresh_stats(&mut self, elapsed_seconds: f64) {
        self.stats.episodes = self.episodes;
        self.stats.states = self.table.num_states();
        self.stats.entries = self.table.num_entries();
        self.stats.elapsed_seconds = elapsed_seconds;
        self.stats.update_rate();
    }

    /// The learned table.
    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    /// Give up ownership of the learned table.
    pub fn into_table(self) -> DecisionTable {
        self.table
    }

    /// Training episodes completed.
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Current statistics.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Reference to the configuration.
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Forget everything learned.
    pub fn reset(&mut self) {
        self.table.clear();
        self.episodes = 0;
        self.stats = TrainingStats::new();
    }
}

/// Play one episode greedily from `table` without updating it.
pub fn play_frozen<R: Rng + ?Sized>(table: &DecisionTable, rng: &mut R) -> Result<Reward, GameError> {
    let mut round = Round::new(Deck::shuffled(rng));
    let mut agent = AgentStrategy::new(table, rng);
    Ok(round.play(&mut agent)?.reward)
}
