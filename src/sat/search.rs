#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The search driver: exhaustive depth-first search with chronological backtracking.
//!
//! Each step of the driver does exactly one of three things:
//! 1.  If some clause is falsified by the current partial assignment, backtrack. If the
//!     backtracker finds nothing left to flip, the formula is unsatisfiable.
//! 2.  Otherwise, if every variable is assigned, the assignment is a model.
//! 3.  Otherwise, assign the lowest unassigned variable `false` and continue.
//!
//! There is no propagation, learning, variable ordering heuristic or restart; the
//! decision order (lowest index first) and polarity order (`false` before `true`) are
//! fixed, so two runs on the same formula produce the same trace and the same model.
//!
//! The driver owns the only mutable state. The formula is read-only for the whole search,
//! and all storage is allocated once up front.

use crate::sat::backtrack::{backtrack, Backtrack};
use crate::sat::cnf::Cnf;
use crate::sat::conflict::find_conflict;
use crate::sat::decision::decide;
use crate::sat::solver::{SearchLimits, SolutionStats, Solver, Verdict};
use crate::sat::state::SearchState;
use tracing::{debug, info, trace};

/// Where the driver's state machine currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Searching,
    Sat,
    Unsat,
    /// The step budget ran out before a terminal state.
    Unknown,
}

impl Status {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Searching)
    }
}

#[derive(Debug, Clone)]
pub struct Backtracking {
    cnf: Cnf,
    state: SearchState,
    pub stats: SolutionStats,
    pub limits: SearchLimits,
    status: Status,
}

impl Solver for Backtracking {
    fn new(cnf: Cnf) -> Self {
        Self::with_limits(cnf, SearchLimits::unbounded())
    }

    fn solve(&mut self) -> Verdict {
        self.solve_with_progress(|_| {})
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Backtracking {
    #[must_use]
    pub fn with_limits(cnf: Cnf, limits: SearchLimits) -> Self {
        let state = SearchState::new(cnf.num_vars);
        Self {
            cnf,
            state,
            stats: SolutionStats::default(),
            limits,
            status: Status::Searching,
        }
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// The current partial assignment and trail; only the driver writes to them.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Runs the search to a terminal state.
    ///
    /// `on_progress` is called with the number of assigned variables every time it
    /// exceeds every earlier value in this run, so the reported depths strictly increase.
    /// Depth 0 is never reported. The callback observes only; it cannot change the result.
    pub fn solve_with_progress<F: FnMut(usize)>(&mut self, mut on_progress: F) -> Verdict {
        info!(
            vars = self.cnf.num_vars,
            clauses = self.cnf.num_clauses(),
            "starting search"
        );

        while !self.status.is_terminal() {
            if self.budget_spent() {
                self.status = Status::Unknown;
                break;
            }

            self.step();

            let depth = self.state.num_assigned();
            if depth > self.stats.max_depth {
                self.stats.max_depth = depth;
                on_progress(depth);
            }
        }

        let verdict = self.verdict();
        info!(
            result = %self.status_label(),
            steps = self.stats.steps,
            decisions = self.stats.decisions,
            conflicts = self.stats.conflicts,
            "search finished"
        );
        verdict
    }

    /// Executes a single transition of the state machine and returns the new status.
    ///
    /// Calling `step` on a terminal state does nothing.
    pub fn step(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }
        self.stats.steps += 1;

        if let Some(clause) = find_conflict(&self.cnf, &self.state.assignment) {
            self.stats.conflicts += 1;
            let result = backtrack(&mut self.state);
            self.stats.retractions += result.retracted() as u64;

            match result {
                Backtrack::Flipped { literal, retracted } => {
                    self.stats.flips += 1;
                    debug!(clause, %literal, retracted, "backtracked");
                }
                Backtrack::Exhausted { retracted } => {
                    debug!(clause, retracted, "search space exhausted");
                    self.status = Status::Unsat;
                }
            }
        } else if self.state.assignment.is_complete() {
            self.status = Status::Sat;
        } else if let Some(literal) = decide(&mut self.state) {
            self.stats.decisions += 1;
            trace!(%literal, depth = self.state.num_assigned(), "decided");
        }

        self.status
    }

    /// The verdict for the current status; `Unknown` while still searching.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match self.status {
            Status::Sat => self
                .state
                .assignment
                .to_solutions()
                .map_or(Verdict::Unknown, Verdict::Sat),
            Status::Unsat => Verdict::Unsat,
            Status::Searching | Status::Unknown => Verdict::Unknown,
        }
    }

    fn budget_spent(&self) -> bool {
        self.limits
            .max_steps
            .is_some_and(|max| self.stats.steps >= max)
    }

    const fn status_label(&self) -> &'static str {
        match self.status {
            Status::Searching => "searching",
            Status::Sat => "sat",
            Status::Unsat => "unsat",
            Status::Unknown => "unknown",
        }
    }
}

/// Solves `cnf` without a budget.
#[must_use]
pub fn solve(cnf: Cnf) -> Verdict {
    Backtracking::new(cnf).solve()
}
