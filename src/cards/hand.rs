//! A participant's hand.

use std::fmt;

use crate::cards::card::Card;

/// Cards held by one participant, in the order they were drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create an empty hand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a drawn card.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Drop every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Sum of card points.
    pub fn total_points(&self) -> u32 {
        self.cards.iter().map(|c| c.point() as u32).sum()
    }

    /// All cards, oldest first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The cards an opponent can see: everything except the most recent card.
    pub fn visible(&self) -> &[Card] {
        match self.cards.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// The most recently drawn card.
    pub fn last(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Number of cards held.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the hand holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}] ({})", labels.join(", "), self.total_points())
    }
}
