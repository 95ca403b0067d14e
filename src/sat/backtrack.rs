#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Chronological backtracking over the trail.
//!
//! Assigned variables are visited in ascending index order. A variable whose polarities
//! have both been tried is unassigned and the scan moves on; the first variable with an
//! untried polarity is flipped to it and the scan stops. When the scan runs out of
//! assigned variables the search space is exhausted.

use crate::sat::literal::{Literal, Variable};
use crate::sat::state::SearchState;
use crate::sat::trail::Branch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backtrack {
    /// A variable was switched to its untried polarity, now held by `literal`.
    Flipped { literal: Literal, retracted: usize },
    /// Every assigned variable was unassigned; nothing is left to try.
    Exhausted { retracted: usize },
}

impl Backtrack {
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Number of variables unassigned during the scan.
    #[must_use]
    pub const fn retracted(&self) -> usize {
        match self {
            Self::Flipped { retracted, .. } | Self::Exhausted { retracted } => *retracted,
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
pub fn backtrack(state: &mut SearchState) -> Backtrack {
    let mut retracted = 0;

    for slot in 0..state.num_vars() {
        match state.trail[slot] {
            Branch::Free => {}
            Branch::Closed => {
                state.retract(slot);
                retracted += 1;
            }
            Branch::Open(_) => {
                if let Some(value) = state.flip_to_alternate(slot) {
                    return Backtrack::Flipped {
                        literal: Literal::new(slot as Variable + 1, value),
                        retracted,
                    };
                }
            }
        }
    }

    Backtrack::Exhausted { retracted }
}
