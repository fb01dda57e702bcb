//! State abstraction.
//!
//! A decision point is reduced to the set of ranks the learner holds and the
//! set of ranks the learner can see in the opponent's hand. Suits and draw
//! order are ignored, and a rank held twice counts the same as a rank held
//! once: `{5, 5}` and `{5}` are the same state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::card::{is_valid_rank, rank_label, RANK_ACE, RANK_KING};
use crate::cards::{Card, Hand};
use crate::error::GameError;
use crate::learning::game::StateClass;

/// Bits 1-13.
const RANK_BITS: u16 = 0b0011_1111_1111_1110;

/// A set of card ranks (1-13), stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16")]
pub struct RankSet(u16);

impl TryFrom<u16> for RankSet {
    type Error = GameError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits & !RANK_BITS {
            0 => Ok(RankSet(bits)),
            stray => Err(GameError::InvalidRank(stray.trailing_zeros() as u8)),
        }
    }
}

impl RankSet {
    /// The empty set.
    pub const EMPTY: RankSet = RankSet(0);

    /// Collect the ranks of some cards.
    pub fn from_cards<'a, I>(cards: I) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        cards
            .into_iter()
            .fold(Self::EMPTY, |set, card| set.insert(card.rank()))
    }

    /// Build a set from bare rank values. Fails on the first rank outside 1-13.
    pub fn from_ranks<I: IntoIterator<Item = u8>>(ranks: I) -> Result<Self, GameError> {
        ranks.into_iter().try_fold(Self::EMPTY, |set, rank| set.with(rank))
    }

    /// This set plus one rank.
    pub fn with(self, rank: u8) -> Result<Self, GameError> {
        if is_valid_rank(rank) {
            Ok(self.insert(rank))
        } else {
            Err(GameError::InvalidRank(rank))
        }
    }

    // `rank` is already known to be 1-13.
    #[inline]
    fn insert(self, rank: u8) -> Self {
        RankSet(self.0 | (1 << rank))
    }

    /// Whether the rank is a member.
    #[inline]
    pub fn contains(&self, rank: u8) -> bool {
        is_valid_rank(rank) && self.0 & (1 << rank) != 0
    }

    /// Number of distinct ranks.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no rank is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order.
    pub fn ranks(&self) -> impl Iterator<Item = u8> + '_ {
        (RANK_ACE..=RANK_KING).filter(move |&r| self.contains(r))
    }
}

impl fmt::Display for RankSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.ranks().map(rank_label).collect();
        write!(f, "{{{}}}", labels.join(","))
    }
}

/// The learner's view of a decision point, used as the table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    /// Ranks in the learner's hand.
    pub own: RankSet,
    /// Ranks visible in the opponent's hand.
    pub opponent: RankSet,
}

impl Environment {
    /// Build a state from the learner's cards and the opponent's visible cards.
    pub fn observe(own: &[Card], opponent_visible: &[Card]) -> Self {
        Self {
            own: RankSet::from_cards(own),
            opponent: RankSet::from_cards(opponent_visible),
        }
    }

    /// Build a state from two hands, hiding the opponent's most recent card.
    pub fn from_hands(own: &Hand, opponent: &Hand) -> Self {
        Self::observe(own.cards(), opponent.visible())
    }
}

impl StateClass for Environment {
    fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.own, self.opponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(env: &Environment) -> u64 {
        let mut hasher = DefaultHasher::new();
        env.hash(&mut hasher);
        hasher.finish()
    }

    fn cards(pairs: &[(Suit, u8)]) -> Vec<Card> {
        pairs.iter().map(|&(s, r)| Card::new(s, r).unwrap()).collect()
    }

    #[test]
    fn test_duplicate_ranks_collapse() {
        let a = Environment::observe(
            &cards(&[(Suit::Heart, 2), (Suit::Spade, 2)]),
            &cards(&[(Suit::Club, 9)]),
        );
        let b = Environment::observe(&cards(&[(Suit::Diamond, 2)]), &cards(&[(Suit::Club, 9)]));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_order_and_suit_ignored() {
        let a = Environment::observe(
            &cards(&[(Suit::Heart, 5), (Suit::Club, 13)]),
            &cards(&[(Suit::Spade, 1)]),
        );
        let b = Environment::observe(
            &cards(&[(Suit::Diamond, 13), (Suit::Spade, 5)]),
            &cards(&[(Suit::Heart, 1)]),
        );
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_sides_are_distinct() {
        let a = Environment::observe(&cards(&[(Suit::Heart, 5)]), &cards(&[(Suit::Heart, 9)]));
        let b = Environment::observe(&cards(&[(Suit::Heart, 9)]), &cards(&[(Suit::Heart, 5)]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_rank_ten_and_court_cards_differ() {
        // Only the point value is capped; the key keeps the rank.
        let ten = Environment::observe(&cards(&[(Suit::Heart, 10)]), &[]);
        let king = Environment::observe(&cards(&[(Suit::Heart, 13)]), &[]);
        assert_ne!(ten, king);
    }

    #[test]
    fn test_from_hands_hides_last_opponent_card() {
        let own: Hand = cards(&[(Suit::Heart, 4), (Suit::Club, 7)]).into_iter().collect();
        let dealer: Hand = cards(&[(Suit::Spade, 10), (Suit::Diamond, 6)])
            .into_iter()
            .collect();

        let env = Environment::from_hands(&own, &dealer);
        assert_eq!(env.own, RankSet::from_ranks([4, 7]).unwrap());
        assert_eq!(env.opponent, RankSet::from_ranks([10]).unwrap());
        assert!(!env.opponent.contains(6));
    }

    #[test]
    fn test_rank_set_rejects_out_of_range() {
        assert!(matches!(RankSet::from_ranks([0]), Err(GameError::InvalidRank(0))));
        assert!(matches!(RankSet::from_ranks([5, 14]), Err(GameError::InvalidRank(14))));
        assert!(matches!(RankSet::EMPTY.with(17), Err(GameError::InvalidRank(17))));
        assert!(!RankSet::from_ranks([1, 13]).unwrap().contains(0));

        // No rank outside 1-13 can alias an ace.
        assert!(Card::new(Suit::Heart, 17).is_err());
    }

    #[test]
    fn test_rank_set_deserialize_checks_bits() {
        let aces: RankSet = serde_json::from_str("2").unwrap();
        assert_eq!(aces, RankSet::from_ranks([1]).unwrap());
        assert!(serde_json::from_str::<RankSet>("1").is_err());
        assert!(serde_json::from_str::<RankSet>(&(1u16 << 14).to_string()).is_err());
    }

    #[test]
    fn test_label() {
        let env = Environment {
            own: RankSet::from_ranks([1, 10]).unwrap(),
            opponent: RankSet::from_ranks([13]).unwrap(),
        };
        assert_eq!(env.label(), "{A,10}|{K}");
    }

    #[test]
    fn test_rank_set_display() {
        let set = RankSet::from_ranks([13, 1, 5, 5]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "{A,5,K}");
        assert_eq!(RankSet::EMPTY.to_string(), "{}");
    }
}
