#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::{Literal, Variable};
use crate::sat::state::SearchState;

/// Polarity every decision tries first. Its opposite is left open on the trail.
pub const FIRST_POLARITY: bool = false;

/// Assigns the lowest-indexed unassigned variable to `false`.
///
/// Returns the decided literal, or `None` without touching the state when every variable
/// is already assigned.
#[allow(clippy::cast_possible_truncation)]
pub fn decide(state: &mut SearchState) -> Option<Literal> {
    let slot = state.assignment.first_unassigned()?;
    state.decide(slot, FIRST_POLARITY);
    Some(Literal::new(slot as Variable + 1, FIRST_POLARITY))
}
