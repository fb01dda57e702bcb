//! Action selection.
//!
//! [`select_action`] is the greedy table policy: take the action with the
//! higher mean reward and break exact ties with a fair coin from the injected
//! random source. [`Strategy`] is the decision seam the game driver calls;
//! the table policy is one implementation next to a fixed-probability random
//! player and an interactive prompt.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::learning::action::Decision;
use crate::learning::environment::Environment;
use crate::learning::DecisionTable;

/// Tie-break threshold. A uniform sample strictly above it draws.
pub const TIE_BREAK_THRESHOLD: f64 = 0.5;

/// Choose an action for `state` from the table.
///
/// Consumes one `f64` from `rng` only when both actions have the same value.
pub fn select_action<R: Rng + ?Sized>(
    table: &DecisionTable,
    state: &Environment,
    rng: &mut R,
) -> Decision {
    let draw_value = table.value_of(state, Decision::Draw);
    let stand_value = table.value_of(state, Decision::Stand);

    if draw_value == stand_value {
        if rng.gen::<f64>() > TIE_BREAK_THRESHOLD {
            Decision::Draw
        } else {
            Decision::Stand
        }
    } else if draw_value > stand_value {
        Decision::Draw
    } else {
        Decision::Stand
    }
}

/// Something that decides whether the player takes another card.
pub trait Strategy {
    /// Return `true` to draw, `false` to stand.
    fn decide(&mut self, state: &Environment) -> bool;
}

impl<F> Strategy for F
where
    F: FnMut(&Environment) -> bool,
{
    fn decide(&mut self, state: &Environment) -> bool {
        self(state)
    }
}

/// Table-driven strategy backed by [`select_action`].
pub struct AgentStrategy<'a, R: Rng + ?Sized> {
    table: &'a DecisionTable,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> AgentStrategy<'a, R> {
    /// Play greedily from `table`, breaking ties with `rng`.
    pub fn new(table: &'a DecisionTable, rng: &'a mut R) -> Self {
        Self { table, rng }
    }
}

impl<R: Rng + ?Sized> Strategy for AgentStrategy<'_, R> {
    fn decide(&mut self, state: &Environment) -> bool {
        select_action(self.table, state, &mut *self.rng).is_draw()
    }
}

/// Draws with a fixed probability, ignoring the state.
pub struct RandomStrategy<R: Rng> {
    probability: f64,
    rng: R,
}

impl<R: Rng> RandomStrategy<R> {
    /// Default draw probability.
    pub const DEFAULT_PROBABILITY: f64 = 0.5;

    /// Draw with probability 0.5.
    pub fn new(rng: R) -> Self {
        Self::with_probability(rng, Self::DEFAULT_PROBABILITY)
    }

    /// Draw with the given probability (clamped to [0, 1]).
    pub fn with_probability(rng: R, probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            rng,
        }
    }

    /// Draw probability in use.
    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<R: Rng> Strategy for RandomStrategy<R> {
    fn decide(&mut self, _state: &Environment) -> bool {
        self.rng.gen::<f64>() < self.probability
    }
}

/// Asks a human on a reader/writer pair. Answering `y` draws.
///
/// Read or write failures and end of input are treated as standing.
pub struct PromptStrategy<In: BufRead, Out: Write> {
    input: In,
    output: Out,
}

impl<In: BufRead, Out: Write> PromptStrategy<In, Out> {
    /// Prompt text shown before each decision.
    pub const PROMPT: &'static str = "Draw another card? [y/n] ";

    /// Prompt on `output`, read answers from `input`.
    pub fn new(input: In, output: Out) -> Self {
        Self { input, output }
    }

    fn ask(&mut self) -> std::io::Result<bool> {
        self.output.write_all(Self::PROMPT.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        Ok(line.trim().eq_ignore_ascii_case("y"))
    }
}

impl<In: BufRead, Out: Write> Strategy for PromptStrategy<In, Out> {
    fn decide(&mut self, _state: &Environment) -> bool {
        match self.ask() {
            Ok(draw) => draw,
            Err(e) => {
                log::warn!("prompt failed, standing: {}", e);
                false
            }
        }
    }
}
