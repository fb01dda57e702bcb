//! The learner's action set and the terminal reward signal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;
use crate::impl_action;
use crate::learning::game::Action;

/// What the learner does at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Take another card.
    Draw,
    /// Keep the current hand and end the turn.
    Stand,
}

impl_action!(Decision, [Decision::Draw => "draw", Decision::Stand => "stand"]);

impl Decision {
    /// Map a strategy's yes/no answer to a decision.
    #[inline]
    pub fn from_draw(draw: bool) -> Self {
        if draw {
            Decision::Draw
        } else {
            Decision::Stand
        }
    }

    /// Whether this decision takes a card.
    #[inline]
    pub fn is_draw(&self) -> bool {
        matches!(self, Decision::Draw)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal outcome of an episode, from the learner's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reward {
    /// The learner won.
    Win,
    /// Equal totals.
    Tie,
    /// The learner lost (including busting).
    Lose,
}

impl Reward {
    /// Integer value: win 1, tie 0, lose -1.
    #[inline]
    pub fn value(&self) -> i32 {
        match self {
            Reward::Win => 1,
            Reward::Tie => 0,
            Reward::Lose => -1,
        }
    }
}

impl TryFrom<i32> for Reward {
    type Error = GameError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Reward::Win),
            0 => Ok(Reward::Tie),
            -1 => Ok(Reward::Lose),
            other => Err(GameError::InvalidReward(other)),
        }
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reward::Win => write!(f, "win"),
            Reward::Tie => write!(f, "tie"),
            Reward::Lose => write!(f, "lose"),
        }
    }
}
