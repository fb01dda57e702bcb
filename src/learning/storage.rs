//! Storage for learned action values.
//!
//! The experience table maps a state class and an action to the running mean
//! of every reward posted for that pair, together with the number of
//! postings. Entries are created on first update with mean 0.0 and count 0.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::learning::action::Reward;
use crate::learning::game::{Action, StateClass};

/// Running mean of rewards for one (state, action) pair.
///
/// `mean` and `count` are only ever changed together by [`Estimate::observe`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Average of every reward observed so far.
    pub mean: f64,
    /// Number of rewards observed.
    pub count: u64,
}

impl Estimate {
    /// Fold one reward into the mean.
    ///
    /// `mean' = (mean * count + reward) / (count + 1)`
    #[inline]
    pub fn observe(&mut self, reward: f64) {
        let count = self.count as f64;
        self.mean = (self.mean * count + reward) / (count + 1.0);
        self.count += 1;
    }
}

/// Tabular value function: state class -> action -> running mean reward.
///
/// Reads never create entries; an unseen pair is worth 0.0. Updates go through
/// an explicit get-or-insert.
#[derive(Debug, Clone)]
pub struct ExperienceTable<S: StateClass, A: Action> {
    values: FxHashMap<S, FxHashMap<A, Estimate>>,
}

impl<S: StateClass, A: Action> Default for ExperienceTable<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateClass, A: Action> ExperienceTable<S, A> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
        }
    }

    /// Create a table with room for `capacity` state classes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Post one terminal reward to every (state, action) pair of an episode.
    ///
    /// Pairs are applied in order, one at a time, so a pair that occurs twice
    /// is updated twice from its then-current mean. An empty sequence is a
    /// no-op.
    pub fn update(&mut self, sequence: &[(S, A)], reward: Reward) {
        let reward = reward.value() as f64;
        for (state, action) in sequence {
            self.entry_mut(state, *action).observe(reward);
        }
    }

    /// Current mean reward for a pair, 0.0 if it was never updated.
    pub fn value_of(&self, state: &S, action: A) -> f64 {
        self.estimate(state, action).mean
    }

    /// Current estimate for a pair, the zero estimate if it was never updated.
    pub fn estimate(&self, state: &S, action: A) -> Estimate {
        self.values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or_default()
    }

    /// Values of every action at a state, in `A::ALL` order.
    pub fn action_values(&self, state: &S) -> Vec<(A, f64)> {
        A::ALL
            .iter()
            .map(|&action| (action, self.value_of(state, action)))
            .collect()
    }

    /// Get or insert the estimate for a pair.
    fn entry_mut(&mut self, state: &S, action: A) -> &mut Estimate {
        self.values
            .entry(state.clone())
            .or_default()
            .entry(action)
            .or_default()
    }

    /// Number of state classes with at least one update.
    pub fn num_states(&self) -> usize {
        self.values.len()
    }

    /// Number of (state, action) pairs with at least one update.
    pub fn num_entries(&self) -> usize {
        self.values.values().map(|actions| actions.len()).sum()
    }

    /// Sum of counts across all pairs.
    pub fn total_observations(&self) -> u64 {
        self.values
            .values()
            .flat_map(|actions| actions.values())
            .map(|e| e.count)
            .sum()
    }

    /// Whether a state class has been updated.
    pub fn contains(&self, state: &S) -> bool {
        self.values.contains_key(state)
    }

    /// Iterate over all (state, action, estimate) triples.
    pub fn iter(&self) -> impl Iterator<Item = (&S, A, Estimate)> + '_ {
        self.values
            .iter()
            .flat_map(|(state, actions)| actions.iter().map(move |(a, e)| (state, *a, *e)))
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::action::Decision;
    use crate::learning::environment::{Environment, RankSet};

    fn state(own: &[u8], opponent: &[u8]) -> Environment {
        Environment {
            own: RankSet::from_ranks(own.iter().copied()).unwrap(),
            opponent: RankSet::from_ranks(opponent.iter().copied()).unwrap(),
        }
    }

    #[test]
    fn test_running_mean_matches_arithmetic_mean() {
        let mut table = ExperienceTable::new();
        let s = state(&[5, 9], &[10]);

        for reward in [Reward::Win, Reward::Tie, Reward::Win, Reward::Lose] {
            table.update(&[(s, Decision::Draw)], reward);
        }

        let e = table.estimate(&s, Decision::Draw);
        assert!((e.mean - 0.25).abs() < 1e-12);
        assert_eq!(e.count, 4);
        assert!((table.value_of(&s, Decision::Draw) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_long_sequence_mean() {
        let mut table = ExperienceTable::new();
        let s = state(&[2], &[3]);
        let rewards = [1, -1, -1, 0, 1, 1, -1, 0, 0, 1, -1, -1];

        for &r in &rewards {
            table.update(&[(s, Decision::Stand)], Reward::try_from(r).unwrap());
        }

        let expected = rewards.iter().sum::<i32>() as f64 / rewards.len() as f64;
        let e = table.estimate(&s, Decision::Stand);
        assert!((e.mean - expected).abs() < 1e-12);
        assert_eq!(e.count, rewards.len() as u64);
    }

    #[test]
    fn test_every_pair_receives_the_reward() {
        let mut table = ExperienceTable::new();
        let a = state(&[2, 3], &[7]);
        let b = state(&[2, 3, 8], &[7]);
        let c = state(&[2, 3, 8, 10], &[7]);

        table.update(
            &[(a, Decision::Draw), (b, Decision::Draw), (c, Decision::Stand)],
            Reward::Lose,
        );

        assert_eq!(table.value_of(&a, Decision::Draw), -1.0);
        assert_eq!(table.value_of(&b, Decision::Draw), -1.0);
        assert_eq!(table.value_of(&c, Decision::Stand), -1.0);
        assert_eq!(table.num_entries(), 3);
    }

    #[test]
    fn test_repeated_pair_updated_sequentially() {
        let mut table = ExperienceTable::new();
        let s = state(&[5], &[6]);

        table.update(&[(s, Decision::Draw)], Reward::Lose);
        table.update(&[(s, Decision::Draw), (s, Decision::Draw)], Reward::Win);

        // Three postings: -1, 1, 1.
        let e = table.estimate(&s, Decision::Draw);
        assert_eq!(e.count, 3);
        assert!((e.mean - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_untouched_pair_reads_zero() {
        let mut table = ExperienceTable::new();
        let touched = state(&[4, 6], &[2]);
        let untouched = state(&[11], &[12]);

        for _ in 0..10 {
            table.update(&[(touched, Decision::Draw)], Reward::Win);
        }

        assert_eq!(table.value_of(&untouched, Decision::Draw), 0.0);
        assert_eq!(table.value_of(&untouched, Decision::Stand), 0.0);
        assert_eq!(table.value_of(&touched, Decision::Stand), 0.0);
        assert_eq!(table.estimate(&untouched, Decision::Draw), Estimate::default());
        assert!(!table.contains(&untouched));
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut table: ExperienceTable<Environment, Decision> = ExperienceTable::new();
        table.update(&[], Reward::Win);
        assert_eq!(table.num_states(), 0);

        let s = state(&[1], &[1]);
        table.update(&[(s, Decision::Stand)], Reward::Tie);
        let before = table.clone();
        table.update(&[], Reward::Lose);
        assert_eq!(table.estimate(&s, Decision::Stand), before.estimate(&s, Decision::Stand));
        assert_eq!(table.total_observations(), 1);
    }

    #[test]
    fn test_collapsed_states_share_an_entry() {
        let mut table = ExperienceTable::new();
        table.update(&[(state(&[2, 2], &[9]), Decision::Draw)], Reward::Win);
        table.update(&[(state(&[2], &[9]), Decision::Draw)], Reward::Lose);

        assert_eq!(table.num_states(), 1);
        assert_eq!(table.estimate(&state(&[2], &[9]), Decision::Draw).count, 2);
    }

    #[test]
    fn test_action_values_order() {
        let mut table = ExperienceTable::new();
        let s = state(&[7], &[7]);
        table.update(&[(s, Decision::Stand)], Reward::Win);

        assert_eq!(
            table.action_values(&s),
            vec![(Decision::Draw, 0.0), (Decision::Stand, 1.0)]
        );
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let mut table: ExperienceTable<Environment, Decision> = ExperienceTable::with_capacity(64);
        assert_eq!(table.num_states(), 0);
        table.update(&[(state(&[9], &[9]), Decision::Stand)], Reward::Win);
        assert_eq!(table.value_of(&state(&[9], &[9]), Decision::Stand), 1.0);
    }

    #[test]
    fn test_clear() {
        let mut table = ExperienceTable::new();
        table.update(&[(state(&[3], &[4]), Decision::Draw)], Reward::Win);
        assert_eq!(table.iter().count(), 1);
        table.clear();
        assert_eq!(table.num_states(), 0);
        assert_eq!(table.total_observations(), 0);
    }
}
