#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::literal::Literal;
use crate::sat::solver::Solutions;
use core::ops::Index;

#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        !self.is_assigned()
    }

    #[must_use]
    pub const fn value(&self) -> Option<bool> {
        match self {
            Self::Assigned(b) => Some(*b),
            Self::Unassigned => None,
        }
    }
}

/// Per-variable ternary state, slot `i` holding variable `i + 1`.
///
/// `num_assigned` is maintained by every mutation and always equals the number of
/// `Assigned` slots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    states: Vec<VarState>,
    num_assigned: usize,
}

impl Index<usize> for Assignment {
    type Output = VarState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.states[index]
    }
}

impl Assignment {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; n],
            num_assigned: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub const fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.states.len()
    }

    pub fn assign(&mut self, slot: usize, value: bool) {
        if self.states[slot].is_unassigned() {
            self.num_assigned += 1;
        }
        self.states[slot] = VarState::Assigned(value);
    }

    /// Replaces an assigned value by its opposite and returns it. Unassigned slots are left
    /// alone and yield `None`.
    pub fn flip(&mut self, slot: usize) -> Option<bool> {
        let VarState::Assigned(b) = self.states[slot] else {
            return None;
        };
        self.states[slot] = VarState::Assigned(!b);
        Some(!b)
    }

    pub fn unassign(&mut self, slot: usize) {
        if self.states[slot].is_assigned() {
            self.num_assigned -= 1;
        }
        self.states[slot] = VarState::Unassigned;
    }

    #[must_use]
    pub fn value(&self, slot: usize) -> Option<bool> {
        self.states.get(slot).and_then(VarState::value)
    }

    /// `Some(true)` if `lit` is satisfied, `Some(false)` if it is falsified, `None` while
    /// its variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.value(lit.index()).map(|b| lit.evaluate(b))
    }

    #[must_use]
    pub fn first_unassigned(&self) -> Option<usize> {
        self.states.iter().position(VarState::is_unassigned)
    }

    /// The model, once every variable is assigned.
    #[must_use]
    pub fn to_solutions(&self) -> Option<Solutions> {
        self.states
            .iter()
            .map(VarState::value)
            .collect::<Option<Vec<_>>>()
            .map(Solutions::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(a: &Assignment) -> usize {
        (0..a.len()).filter(|&i| a[i].is_assigned()).count()
    }

    #[test]
    fn test_counter_tracks_assignments() {
        let mut a = Assignment::new(3);
        assert_eq!(a.num_assigned(), 0);

        a.assign(0, false);
        a.assign(2, true);
        assert_eq!(a.num_assigned(), 2);
        assert_eq!(a.num_assigned(), count(&a));

        a.assign(0, true);
        assert_eq!(a.num_assigned(), 2);

        assert_eq!(a.flip(2), Some(false));
        assert_eq!(a.value(2), Some(false));
        assert_eq!(a.num_assigned(), count(&a));

        a.unassign(0);
        a.unassign(0);
        assert_eq!(a.num_assigned(), 1);
        assert_eq!(a.num_assigned(), count(&a));
    }

    #[test]
    fn test_flip_unassigned_is_noop() {
        let mut a = Assignment::new(1);
        assert_eq!(a.flip(0), None);
        assert!(a[0].is_unassigned());
        assert_eq!(a.num_assigned(), 0);
    }

    #[test]
    fn test_literal_value() {
        let mut a = Assignment::new(2);
        let pos = Literal::from_i32(1).unwrap();
        let neg = Literal::from_i32(-1).unwrap();
        assert_eq!(a.literal_value(pos), None);

        a.assign(0, false);
        assert_eq!(a.literal_value(pos), Some(false));
        assert_eq!(a.literal_value(neg), Some(true));
    }

    #[test]
    fn test_first_unassigned() {
        let mut a = Assignment::new(3);
        assert_eq!(a.first_unassigned(), Some(0));
        a.assign(0, true);
        a.assign(2, true);
        assert_eq!(a.first_unassigned(), Some(1));
        a.assign(1, false);
        assert_eq!(a.first_unassigned(), None);
        assert!(a.is_complete());
    }

    #[test]
    fn test_to_solutions_requires_total_assignment() {
        let mut a = Assignment::new(2);
        a.assign(1, true);
        assert_eq!(a.to_solutions(), None);
        a.assign(0, false);
        assert_eq!(a.to_solutions(), Some(Solutions::new(vec![false, true])));
        assert_eq!(Assignment::new(0).to_solutions(), Some(Solutions::default()));
    }
}
