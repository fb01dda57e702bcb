//! Errors raised by the game driver and trainer.

use thiserror::Error;

/// Failures outside the learning core.
#[derive(Debug, Error)]
pub enum GameError {
    /// Tried to deal from an empty deck.
    #[error("deck is exhausted")]
    DeckExhausted,

    /// A card rank outside 1-13.
    #[error("rank {0} is not in 1-13")]
    InvalidRank(u8),

    /// A reward value outside {-1, 0, 1}.
    #[error("reward {0} is not one of -1, 0, 1")]
    InvalidReward(i32),

    /// Console I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The evaluation thread pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
