#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Mutable search state owned by the search driver.
//!
//! The assignment and the trail only ever change together through the three operations
//! below, which keeps them in lockstep: a variable is either unassigned with a `Free`
//! trail slot, or assigned with an `Open` or `Closed` slot.

use crate::sat::assignment::Assignment;
use crate::sat::trail::{Branch, Trail};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    pub assignment: Assignment,
    pub trail: Trail,
}

impl SearchState {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            assignment: Assignment::new(num_vars),
            trail: Trail::new(num_vars),
        }
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.assignment.len()
    }

    #[must_use]
    pub const fn num_assigned(&self) -> usize {
        self.assignment.num_assigned()
    }

    /// Assigns `value` to an unassigned slot and records `!value` as still untried.
    pub fn decide(&mut self, slot: usize, value: bool) {
        debug_assert!(self.assignment[slot].is_unassigned());
        self.assignment.assign(slot, value);
        self.trail.open(slot, !value);
    }

    /// Switches an `Open` slot to its untried polarity and closes it.
    ///
    /// Returns the new value, or `None` when the slot has nothing left to try.
    pub fn flip_to_alternate(&mut self, slot: usize) -> Option<bool> {
        let alternate = self.trail.take_alternate(slot)?;
        let flipped = self.assignment.flip(slot);
        debug_assert_eq!(flipped, Some(alternate));
        Some(alternate)
    }

    /// Unassigns a slot and forgets its trail entry.
    pub fn retract(&mut self, slot: usize) {
        self.assignment.unassign(slot);
        self.trail.clear(slot);
    }

    /// True when every slot satisfies the lockstep invariant.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.assignment.len() == self.trail.len()
            && (0..self.num_vars()).all(|slot| {
                self.assignment[slot].is_assigned() == (self.trail[slot] != Branch::Free)
            })
    }
}
