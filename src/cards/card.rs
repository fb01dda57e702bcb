//! Card representation.
//!
//! - `Suit`: one of the four French suits
//! - `Card`: a suit and a rank (1-13, ace low)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;

/// Lowest rank (ace).
pub const RANK_ACE: u8 = 1;
/// Jack.
pub const RANK_JACK: u8 = 11;
/// Queen.
pub const RANK_QUEEN: u8 = 12;
/// Highest rank (king).
pub const RANK_KING: u8 = 13;

/// Point value cap. Tens and court cards are all worth this much.
pub const MAX_POINT: u8 = 10;

/// Suit of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts
    Heart,
    /// Diamonds
    Diamond,
    /// Clubs
    Club,
    /// Spades
    Spade,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];

    /// Lowercase suit name used in card labels.
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Heart => "heart",
            Suit::Diamond => "diamond",
            Suit::Club => "club",
            Suit::Spade => "spade",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `rank` names a card (1-13).
#[inline]
pub fn is_valid_rank(rank: u8) -> bool {
    (RANK_ACE..=RANK_KING).contains(&rank)
}

/// A single playing card. The rank is always 1-13.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCard")]
pub struct Card {
    suit: Suit,
    rank: u8,
}

#[derive(Deserialize)]
struct RawCard {
    suit: Suit,
    rank: u8,
}

impl TryFrom<RawCard> for Card {
    type Error = GameError;

    fn try_from(raw: RawCard) -> Result<Self, Self::Error> {
        Card::new(raw.suit, raw.rank)
    }
}

impl Card {
    /// Create a card from a suit and a rank.
    ///
    /// Ranks outside 1-13 are rejected with [`GameError::InvalidRank`].
    pub fn new(suit: Suit, rank: u8) -> Result<Self, GameError> {
        if is_valid_rank(rank) {
            Ok(Self { suit, rank })
        } else {
            Err(GameError::InvalidRank(rank))
        }
    }

    /// The thirteen cards of one suit, ace first.
    pub fn suit_cards(suit: Suit) -> impl Iterator<Item = Card> {
        (RANK_ACE..=RANK_KING).map(move |rank| Card { suit, rank })
    }

    /// The card's suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// The card's rank (1-13, ace = 1).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Point value: the rank capped at 10. Aces always count 1.
    #[inline]
    pub fn point(&self) -> u8 {
        self.rank.min(MAX_POINT)
    }

    /// Rank label for display (A, 2-10, J, Q, K).
    pub fn rank_label(&self) -> String {
        rank_label(self.rank)
    }
}

/// Label for a bare rank value.
pub fn rank_label(rank: u8) -> String {
    match rank {
        RANK_ACE => "A".to_string(),
        RANK_JACK => "J".to_string(),
        RANK_QUEEN => "Q".to_string(),
        RANK_KING => "K".to_string(),
        n => n.to_string(),
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.suit, self.rank_label())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
