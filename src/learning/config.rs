//! Configuration options for training and evaluation.
//!
//! Also holds the statistics types the trainer reports.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::learning::action::Reward;

/// Configuration for a training run.
///
/// # Example
/// ```
/// use blackjack_learner::learning::TrainingConfig;
///
/// let config = TrainingConfig::default().with_seed(7).with_episodes(5_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play episodes that update the table.
    pub episodes: u64,

    /// Number of episodes played after training, without updates, to measure
    /// the win fraction.
    pub eval_episodes: u64,

    /// How often (in episodes) progress is reported during training.
    pub progress_interval: u64,

    /// Number of threads for evaluation.
    ///
    /// Set to `None` to use all available cores.
    pub num_threads: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// If set, training and evaluation are reproducible. If `None`, a random
    /// seed is used.
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 100_000,
            eval_episodes: 10_000,
            progress_interval: 1_000,
            num_threads: None,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Small run for smoke tests.
    pub fn fast() -> Self {
        Self {
            episodes: 2_000,
            eval_episodes: 500,
            progress_interval: 100,
            ..Default::default()
        }
    }

    /// Builder method: set number of training episodes.
    pub fn with_episodes(mut self, episodes: u64) -> Self {
        self.episodes = episodes;
        self
    }

    /// Builder method: set number of evaluation episodes.
    pub fn with_eval_episodes(mut self, episodes: u64) -> Self {
        self.eval_episodes = episodes;
        self
    }

    /// Builder method: set progress interval.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.episodes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "episodes",
                message: "must be at least 1".to_string(),
            });
        }

        if self.eval_episodes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "eval_episodes",
                message: "must be at least 1".to_string(),
            });
        }

        if self.progress_interval == 0 {
            return Err(ConfigError::InvalidValue {
                field: "progress_interval",
                message: "must be at least 1".to_string(),
            });
        }

        if self.num_threads == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "num_threads",
                message: "must be at least 1 (omit for all cores)".to_string(),
            });
        }

        Ok(())
    }
}

/// Check a draw probability for the random strategy.
pub fn validate_probability(probability: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(ConfigError::InvalidValue {
            field: "probability",
            message: format!("{} is out of range [0, 1]", probability),
        })
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A field holds a value outside its allowed range.
    #[error("invalid {field}: {message}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(String),
    /// The config file is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Win/tie/loss tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Episodes won.
    pub wins: u64,
    /// Episodes tied.
    pub ties: u64,
    /// Episodes lost.
    pub losses: u64,
}

impl Tally {
    /// Count one outcome.
    pub fn record(&mut self, reward: Reward) {
        match reward {
            Reward::Win => self.wins += 1,
            Reward::Tie => self.ties += 1,
            Reward::Lose => self.losses += 1,
        }
    }

    /// Combine two tallies.
    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
        }
    }

    /// Episodes counted.
    pub fn total(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// Fraction of episodes won, 0.0 when empty.
    pub fn win_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.wins as f64 / n as f64,
        }
    }
}

/// Statistics tracked during training.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Total number of training episodes completed.
    pub episodes: u64,

    /// Number of distinct state classes in the table.
    pub states: usize,

    /// Number of (state, action) pairs in the table.
    pub entries: usize,

    /// Outcomes of training episodes.
    pub outcomes: Tally,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Episodes per second.
    pub episodes_per_second: f64,
}

impl TrainingStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update episodes per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.episodes_per_second = self.episodes as f64 / self.elapsed_seconds;
        }
    }
}

/// Result of playing evaluation episodes with a frozen table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Number of evaluation episodes.
    pub episodes: u64,

    /// Outcomes.
    pub outcomes: Tally,

    /// `wins / episodes`.
    pub win_rate: f64,

    /// Time spent evaluating (in seconds).
    pub elapsed_seconds: f64,
}

impl EvaluationReport {
    /// Build a report from an outcome tally.
    pub fn from_tally(outcomes: Tally, elapsed_seconds: f64) -> Self {
        Self {
            episodes: outcomes.total(),
            win_rate: outcomes.win_rate(),
            outcomes,
            elapsed_seconds,
        }
    }
}
