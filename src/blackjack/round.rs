//! One round of the game: deal, player turn, dealer turn, settlement.
//!
//! The round records every (state, decision) pair the player makes, including
//! the draw that busts and the final stand, so the caller can post the single
//! terminal reward to all of them.

use crate::cards::{Card, Deck, Hand};
use crate::error::GameError;
use crate::learning::action::{Decision, Reward};
use crate::learning::environment::Environment;
use crate::learning::policy::Strategy;

/// A total above this busts.
pub const BUST_LIMIT: u32 = 21;

/// The dealer draws while below this total.
pub const DEALER_STAND_TOTAL: u32 = 17;

/// Which side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// The deciding player (human or learner).
    Player,
    /// The house.
    Dealer,
}

/// Things that happen during a round, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// A card was dealt face up.
    Dealt {
        /// Receiver.
        seat: Seat,
        /// The card.
        card: Card,
    },
    /// The dealer's hole card was dealt face down.
    DealtFaceDown,
    /// The player made a decision.
    Decided {
        /// What the player saw.
        state: Environment,
        /// What the player chose.
        decision: Decision,
    },
    /// The player went over the limit.
    PlayerBust {
        /// Player total.
        total: u32,
    },
    /// The dealer's hole card was turned over.
    HoleCardRevealed {
        /// The card.
        card: Card,
    },
    /// The dealer went over the limit.
    DealerBust {
        /// Dealer total.
        total: u32,
    },
    /// The round is over.
    Settled {
        /// Final player total.
        player_total: u32,
        /// Final dealer total.
        dealer_total: u32,
        /// Outcome for the player.
        reward: Reward,
    },
}

/// The record of a finished round.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Every (state, decision) pair the player made, in order.
    pub steps: Vec<(Environment, Decision)>,
    /// Outcome for the player.
    pub reward: Reward,
    /// Final player total.
    pub player_total: u32,
    /// Final dealer total.
    pub dealer_total: u32,
}

/// Whether the dealer takes another card at this total.
#[inline]
pub fn dealer_should_draw(total: u32) -> bool {
    total < DEALER_STAND_TOTAL
}

/// Outcome for a player who stood at `player_total` against `dealer_total`.
pub fn settle(player_total: u32, dealer_total: u32) -> Reward {
    if dealer_total > BUST_LIMIT || dealer_total < player_total {
        Reward::Win
    } else if dealer_total > player_total {
        Reward::Lose
    } else {
        Reward::Tie
    }
}

/// A table with one player, one dealer and a deck.
#[derive(Debug, Clone)]
pub struct Round {
    deck: Deck,
    player: Hand,
    dealer: Hand,
}

impl Round {
    /// Set up a round dealing from `deck`. The deck is not shuffled here.
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
        }
    }

    /// The player's hand.
    pub fn player(&self) -> &Hand {
        &self.player
    }

    /// The dealer's hand, hole card included.
    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    /// Cards left to deal.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Play the round to the end.
    pub fn play<S: Strategy + ?Sized>(&mut self, strategy: &mut S) -> Result<Episode, GameError> {
        self.play_with(strategy, |_| {})
    }

    /// Play the round to the end, reporting each event to `on_event`.
    pub fn play_with<S, F>(&mut self, strategy: &mut S, mut on_event: F) -> Result<Episode, GameError>
    where
        S: Strategy + ?Sized,
        F: FnMut(&RoundEvent),
    {
        self.player.clear();
        self.dealer.clear();

        self.deal(Seat::Player, &mut on_event)?;
        self.deal(Seat::Dealer, &mut on_event)?;
        self.deal(Seat::Player, &mut on_event)?;
        let hole = self.deck.pop()?;
        self.dealer.push(hole);
        on_event(&RoundEvent::DealtFaceDown);

        let mut steps = Vec::new();
        loop {
            let state = Environment::from_hands(&self.player, &self.dealer);
            let decision = Decision::from_draw(strategy.decide(&state));
            steps.push((state, decision));
            on_event(&RoundEvent::Decided { state, decision });

            if !decision.is_draw() {
                break;
            }

            self.deal(Seat::Player, &mut on_event)?;
            let total = self.player.total_points();
            if total > BUST_LIMIT {
                on_event(&RoundEvent::PlayerBust { total });
                return Ok(self.finish(steps, Reward::Lose, &mut on_event));
            }
        }

        on_event(&RoundEvent::HoleCardRevealed { card: hole });
        while dealer_should_draw(self.dealer.total_points()) {
            self.deal(Seat::Dealer, &mut on_event)?;
        }

        let dealer_total = self.dealer.total_points();
        if dealer_total > BUST_LIMIT {
            on_event(&RoundEvent::DealerBust { total: dealer_total });
        }

        let reward = settle(self.player.total_points(), dealer_total);
        Ok(self.finish(steps, reward, &mut on_event))
    }

    fn deal<F: FnMut(&RoundEvent)>(&mut self, seat: Seat, on_event: &mut F) -> Result<Card, GameError> {
        let card = self.deck.pop()?;
        match seat {
            Seat::Player => self.player.push(card),
            Seat::Dealer => self.dealer.push(card),
        }
        on_event(&RoundEvent::Dealt { seat, card });
        Ok(card)
    }

    fn finish<F: FnMut(&RoundEvent)>(
        &self,
        steps: Vec<(Environment, Decision)>,
        reward: Reward,
        on_event: &mut F,
    ) -> Episode {
        let player_total = self.player.total_points();
        let dealer_total = self.dealer.total_points();
        on_event(&RoundEvent::Settled {
            player_total,
            dealer_total,
            reward,
        });
        Episode {
            steps,
            reward,
            player_total,
            dealer_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;
    use crate::learning::environment::RankSet;

    /// Build a deck that deals `order` front to back.
    fn stacked(order: &[u8]) -> Deck {
        let mut cards: Vec<Card> = order.iter().map(|&r| Card::new(Suit::Club, r).unwrap()).collect();
        cards.reverse();
        Deck::from_cards(cards)
    }

    fn always(draw: bool) -> impl FnMut(&Environment) -> bool {
        move |_| draw
    }

    #[test]
    fn test_dealer_rule() {
        assert!(dealer_should_draw(16));
        assert!(!dealer_should_draw(17));
        assert!(!dealer_should_draw(21));
    }

    #[test]
    fn test_settle() {
        assert_eq!(settle(18, 22), Reward::Win);
        assert_eq!(settle(18, 17), Reward::Win);
        assert_eq!(settle(18, 19), Reward::Lose);
        assert_eq!(settle(18, 18), Reward::Tie);
    }

    #[test]
    fn test_bust_records_the_fatal_draw() {
        // Player 10, 9; dealer 4 up, 5 down; player draws 3 -> 22.
        let mut round = Round::new(stacked(&[10, 4, 9, 5, 3]));
        let episode = round.play(&mut always(true)).unwrap();

        assert_eq!(episode.reward, Reward::Lose);
        assert_eq!(episode.player_total, 22);
        assert_eq!(episode.steps.len(), 1);

        let (state, decision) = episode.steps[0];
        assert_eq!(decision, Decision::Draw);
        assert_eq!(state.own, RankSet::from_ranks([10, 9]).unwrap());
        assert_eq!(state.opponent, RankSet::from_ranks([4]).unwrap());
        // Dealer never drew past the hole card.
        assert_eq!(round.dealer().len(), 2);
    }

    #[test]
    fn test_stand_is_recorded_and_dealer_plays() {
        // Player 10, 8; dealer 9 up, 5 down (14) then draws 2 (16), then 4 (20).
        let mut round = Round::new(stacked(&[10, 9, 8, 5, 2, 4]));
        let episode = round.play(&mut always(false)).unwrap();

        assert_eq!(episode.steps.len(), 1);
        assert_eq!(episode.steps[0].1, Decision::Stand);
        assert_eq!(episode.player_total, 18);
        assert_eq!(episode.dealer_total, 20);
        assert_eq!(episode.reward, Reward::Lose);
    }

    #[test]
    fn test_dealer_bust_is_a_win() {
        // Player 2, 3; dealer 10 up, 6 down (16) then draws king (26).
        let mut round = Round::new(stacked(&[2, 10, 3, 6, 13]));
        let episode = round.play(&mut always(false)).unwrap();

        assert_eq!(episode.dealer_total, 26);
        assert_eq!(episode.reward, Reward::Win);
    }

    #[test]
    fn test_tie() {
        // Player 10, 7; dealer 10 up, 7 down; nobody draws.
        let mut round = Round::new(stacked(&[10, 10, 7, 7]));
        let episode = round.play(&mut always(false)).unwrap();
        assert_eq!(episode.reward, Reward::Tie);
    }

    #[test]
    fn test_multiple_draws_then_stand() {
        // Player 2, 3, draws 4, draws 5, stands at 14. Dealer 10 up, 8 down.
        let mut round = Round::new(stacked(&[2, 10, 3, 8, 4, 5]));
        let mut draws_left = 2;
        let mut strategy = |_: &Environment| {
            if draws_left > 0 {
                draws_left -= 1;
                true
            } else {
                false
            }
        };
        let episode = round.play(&mut strategy).unwrap();

        let decisions: Vec<Decision> = episode.steps.iter().map(|(_, d)| *d).collect();
        assert_eq!(decisions, vec![Decision::Draw, Decision::Draw, Decision::Stand]);
        assert_eq!(episode.steps[2].0.own, RankSet::from_ranks([2, 3, 4, 5]).unwrap());
        assert_eq!(episode.reward, Reward::Lose);
    }

    #[test]
    fn test_events_hide_hole_card_until_reveal() {
        let mut round = Round::new(stacked(&[10, 9, 8, 5, 2, 4]));
        let mut events = Vec::new();
        round
            .play_with(&mut always(false), |e| events.push(e.clone()))
            .unwrap();

        assert_eq!(events[3], RoundEvent::DealtFaceDown);
        let reveal = events
            .iter()
            .position(|e| matches!(e, RoundEvent::HoleCardRevealed { .. }))
            .unwrap();
        let decided = events
            .iter()
            .position(|e| matches!(e, RoundEvent::Decided { .. }))
            .unwrap();
        assert!(decided < reveal);
        assert!(matches!(
            events.last(),
            Some(RoundEvent::Settled { reward: Reward::Lose, .. })
        ));
    }

    #[test]
    fn test_replay_starts_from_empty_hands() {
        // First round: 10, 7 against 10, 7. Second round: 2, 3 against 10, 7.
        let mut round = Round::new(stacked(&[10, 10, 7, 7, 2, 10, 3, 7]));

        let first = round.play(&mut always(false)).unwrap();
        assert_eq!(first.reward, Reward::Tie);
        assert_eq!(round.deck().len(), 4);

        let second = round.play(&mut always(false)).unwrap();
        assert_eq!(round.player().len(), 2);
        assert_eq!(round.player().total_points(), 5);
        assert_eq!(round.dealer().len(), 2);
        assert_eq!(round.dealer().total_points(), 17);
        assert_eq!(second.player_total, 5);
        assert_eq!(second.reward, Reward::Lose);
        assert_eq!(second.steps[0].0.own, RankSet::from_ranks([2, 3]).unwrap());
        assert!(round.deck().is_empty());
    }

    #[test]
    fn test_short_deck_errors() {
        let mut round = Round::new(stacked(&[10, 9, 8]));
        assert!(matches!(
            round.play(&mut always(false)),
            Err(GameError::DeckExhausted)
        ));
    }
}
