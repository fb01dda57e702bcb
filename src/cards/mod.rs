//! Playing cards: card, deck and hand types used by the game driver.

pub mod card;
pub mod deck;
pub mod hand;

pub use card::{Card, Suit};
pub use deck::{Deck, DECK_SIZE};
pub use hand::Hand;
