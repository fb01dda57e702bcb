//! Trait seams between the experience table and a concrete game.
//!
//! The table is generic over the state class it is keyed by and the action
//! set it scores. The blackjack driver supplies `Environment` and `Decision`.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for actions that can be scored in the table.
///
/// Actions form a small closed set, enumerated by `ALL`.
pub trait Action: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every action, in a fixed order.
    const ALL: &'static [Self];

    /// Short name for display.
    fn name(&self) -> &'static str;
}

/// Trait for state classes (equivalence classes of game positions).
///
/// Two positions that a learner should treat identically must produce equal
/// state classes with equal hashes; the table relies on nothing else.
pub trait StateClass: Clone + Eq + Hash + Debug + Send + Sync {
    /// Human-readable label used in logs and reports.
    fn label(&self) -> String {
        format!("{:?}", self)
    }
}

/// Macro to implement `Action` for a fieldless enum.
#[macro_export]
macro_rules! impl_action {
    ($type:ty, [$($variant:path => $name:expr),+ $(,)?]) => {
        impl $crate::learning::game::Action for $type {
            const ALL: &'static [Self] = &[$($variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $($variant => $name,)+
                }
            }
        }
    };
}
