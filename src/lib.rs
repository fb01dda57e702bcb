//! # Blackjack Learner
//!
//! A simplified two-player blackjack game and a tabular agent that learns
//! when to draw from repeated self-play.
//!
//! ## Features
//!
//! - **State Abstraction**: hands collapse to the sets of ranks each side shows
//! - **Experience Table**: exact running-mean reward per (state, action)
//! - **Greedy Policy**: higher mean wins, exact ties are a fair coin
//! - **Monte-Carlo Credit**: one terminal reward reaches every decision
//! - **Parallel Evaluation**: frozen-table win rate, reproducible under a seed
//!
//! ## Quick Start
//!
//! ```ignore
//! use blackjack_learner::learning::{Trainer, TrainingConfig};
//!
//! let mut trainer = Trainer::new(TrainingConfig::default().with_seed(42));
//! trainer.train(100_000)?;
//! let report = trainer.evaluate(10_000)?;
//! println!("win rate: {:.3}", report.win_rate);
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Card, deck and hand
//! - [`blackjack`]: Round driver and house rules
//! - [`learning`]: Table, policy and trainer
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Trainer                                  │
//! │  - Self-play episodes       - One update per episode            │
//! │  - Parallel evaluation      - Training statistics               │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!              ┌────────────────┼────────────────┐
//!              ▼                ▼                ▼
//!       ┌─────────────┐  ┌─────────────┐  ┌─────────────┐
//!       │    Round    │  │   Policy    │  │ Experience  │
//!       │  (driver)   │──│  (greedy)   │──│   Table     │
//!       └─────────────┘  └─────────────┘  └─────────────┘
//! ```

#![warn(missing_docs)]

/// Playing cards.
pub mod cards;

/// The game driver.
pub mod blackjack;

/// Errors outside the learning core.
pub mod error;

/// Tabular learning core.
///
/// State abstraction, experience table, policy and trainer.
pub mod learning;

/// Logger setup for the binaries.
pub mod logging;

// Re-export commonly used types at crate root for convenience
pub use error::GameError;
pub use learning::{
    Decision, DecisionTable, Environment, ExperienceTable, Reward, Strategy, Trainer,
    TrainingConfig,
};
