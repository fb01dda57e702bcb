//! The game itself: a player against a fixed-rule dealer.
//!
//! ## Rules
//!
//! - Cards count their rank, capped at 10. Aces count 1.
//! - Player, dealer, player, dealer are dealt in turn; the dealer's second
//!   card stays face down.
//! - The player draws until standing or going over 21 (an immediate loss).
//! - The dealer then draws while below 17. A dealer over 21 loses;
//!   otherwise the higher total wins and equal totals tie.
//!
//! No splits, doubling or insurance.

pub mod round;

pub use round::{
    dealer_should_draw, settle, Episode, Round, RoundEvent, Seat, BUST_LIMIT, DEALER_STAND_TOTAL,
};
