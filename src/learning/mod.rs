//! Tabular Monte-Carlo learning.
//!
//! This module holds the learning core: the state abstraction, the experience
//! table, the greedy policy and the trainer that ties them to the game.
//!
//! # Overview
//!
//! The learner improves by repeated self-play:
//! 1. At each decision point the hands are collapsed to an [`Environment`]
//! 2. The [`policy`] picks the action with the higher mean reward, tossing a
//!    coin on ties
//! 3. When the episode ends, its single reward is posted to every
//!    (state, action) pair visited, bust-causing draw included
//!
//! # Example
//!
//! ```
//! use blackjack_learner::learning::{Trainer, TrainingConfig};
//!
//! let mut trainer = Trainer::new(TrainingConfig::fast().with_seed(1));
//! let stats = trainer.train(2_000).unwrap();
//! println!("{} states after {} episodes", stats.states, stats.episodes);
//!
//! let report = trainer.evaluate(500).unwrap();
//! println!("win rate {:.3}", report.win_rate);
//! ```
//!
//! # Theory
//!
//! Each table entry keeps an exact running mean:
//! ```text
//! mean' = (mean * count + reward) / (count + 1)
//! count' = count + 1
//! ```
//! Every decision in an episode receives the same terminal reward. There is
//! no discounting and no eligibility trace.

pub mod action;
pub mod config;
pub mod environment;
pub mod game;
pub mod policy;
pub mod storage;
pub mod trainer;

// Re-export main types for convenient access
pub use action::{Decision, Reward};
pub use config::{
    validate_probability, ConfigError, EvaluationReport, Tally, TrainingConfig, TrainingStats,
};
pub use environment::{Environment, RankSet};
pub use game::{Action, StateClass};
pub use policy::{select_action, AgentStrategy, PromptStrategy, RandomStrategy, Strategy};
pub use storage::{Estimate, ExperienceTable};
pub use trainer::{play_frozen, Trainer};

/// The experience table used by the blackjack learner.
pub type DecisionTable = ExperienceTable<Environment, Decision>;
