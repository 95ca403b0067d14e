#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use core::ops::Index;

/// What is left to try for one variable at its current assignment depth.
#[derive(Debug, Clone, PartialEq, Eq, Default, Copy, Hash, PartialOrd, Ord)]
pub enum Branch {
    /// The variable is unassigned.
    #[default]
    Free,
    /// The variable is assigned and the contained polarity has not been tried yet.
    Open(bool),
    /// Both polarities have been tried.
    Closed,
}

/// Backtrack memory: one `Branch` slot per variable, in lockstep with the assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    slots: Vec<Branch>,
}

impl Index<usize> for Trail {
    type Output = Branch;

    fn index(&self, index: usize) -> &Self::Output {
        &self.slots[index]
    }
}

impl Trail {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            slots: vec![Branch::Free; n],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Branch {
        self.slots[slot]
    }

    pub fn open(&mut self, slot: usize, alternate: bool) {
        self.slots[slot] = Branch::Open(alternate);
    }

    /// Hands out the untried polarity and closes the slot; `None` if there is none.
    pub fn take_alternate(&mut self, slot: usize) -> Option<bool> {
        match self.slots[slot] {
            Branch::Open(alternate) => {
                self.slots[slot] = Branch::Closed;
                Some(alternate)
            }
            Branch::Free | Branch::Closed => None,
        }
    }

    pub fn clear(&mut self, slot: usize) {
        self.slots[slot] = Branch::Free;
    }
}
