//! Backtracking search over the constraint store.
//!
//! A plain recursive depth-first search: pick the unassigned slot with the
//! smallest live domain (MRV), break ties by degree, try its digits in
//! increasing order, forward-check, recurse, and roll back on failure. The
//! first complete consistent assignment wins; exhausting every branch is
//! the failure signal. Recursion depth is bounded by the 17 slots.
//!
//! Selection order, value order, and tie-breaking are all fixed, so the
//! same puzzle always produces the same outcome; there is no randomness
//! anywhere in the search.

use crate::csp::{Assignment, Csp};
use crate::variable::VarId;
use log::debug;

/// Terminal result of the search.
///
/// Exactly two outcomes exist: a full consistent assignment, or proof that
/// the whole space was exhausted. There is no "cut short" state: the
/// search carries no native time bound (a caller wanting one must impose
/// it externally).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Assignment),
    Failure,
}

impl SolveOutcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }
}

/// Search counters, reported for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Decision points expanded (one per slot selection).
    pub nodes: u64,
    /// Branches rolled back after a failed recursive descent.
    pub backtracks: u64,
}

/// Outcome of a full solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub outcome: SolveOutcome,
    pub stats: SolveStats,
}

/// Run the search to completion from an empty assignment.
///
/// Failed branches restore every domain and flag they touched, so a
/// `Failure` run leaves `csp` exactly as it started. A `Solved` run
/// returns with the winning branch still applied (all slots flagged,
/// domains pruned), which is what result rendering reads from.
pub fn solve(csp: &mut Csp) -> SolveResult {
    let mut assignment = csp.empty_assignment();
    let mut stats = SolveStats::default();

    let solved = backtrack(csp, &mut assignment, &mut stats);
    debug!(
        "search finished: solved={solved}, {} nodes, {} backtracks",
        stats.nodes, stats.backtracks
    );

    let outcome = if solved {
        SolveOutcome::Solved(assignment)
    } else {
        SolveOutcome::Failure
    };
    SolveResult { outcome, stats }
}

/// MRV with degree tie-break over *all* unassigned slots, carries
/// included, since carries take part in the same search as letters.
///
/// The smallest live domain wins; among ties the highest degree wins; a
/// remaining tie keeps the first slot in id order. Returns `None` only
/// when everything is assigned.
pub(crate) fn select_unassigned_variable(csp: &Csp) -> Option<VarId> {
    let min_len = csp
        .variables()
        .iter()
        .filter(|v| !v.is_assigned)
        .map(|v| csp.domain(v.id).len())
        .min()?;

    // degree is only computed for the slots that tie on domain size
    let mut choice: Option<(VarId, usize)> = None;
    for v in csp.variables().iter().filter(|v| !v.is_assigned) {
        if csp.domain(v.id).len() != min_len {
            continue;
        }
        let degree = csp.get_degree(v.id);
        match choice {
            Some((_, best)) if degree <= best => {}
            _ => choice = Some((v.id, degree)),
        }
    }
    choice.map(|(id, _)| id)
}

/// The recursive core. Returns true when `assignment` has been completed
/// to a consistent solution; false when every digit of the chosen slot
/// fails, which tells the caller to back out of its own trial.
fn backtrack(csp: &mut Csp, assignment: &mut Assignment, stats: &mut SolveStats) -> bool {
    if csp.assignment_is_complete() {
        return true;
    }

    let Some(id) = select_unassigned_variable(csp) else {
        // incomplete but nothing selectable; cannot happen, fail the branch
        return false;
    };
    stats.nodes += 1;

    let group = csp.group_of(id);
    for value in csp.domain(id).iter() {
        if !csp.is_consistent(id, value, assignment) {
            continue;
        }

        // tentative assignment: enter the digit, snapshot for rollback,
        // propagate, flag the group, descend
        assignment.set(group, value);
        let snapshot = csp.snapshot();
        csp.update_domains(id, value, assignment);
        csp.set_assigned(id);

        if backtrack(csp, assignment, stats) {
            // first solution wins; unwind without trying further digits
            return true;
        }

        assignment.clear(group);
        csp.set_unassigned(id);
        csp.restore(snapshot);
        stats.backtracks += 1;
    }

    false
}
