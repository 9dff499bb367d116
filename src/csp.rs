//! The constraint store and propagation engine.
//!
//! [`Csp`] owns the 17 variable slots, their candidate-digit domains, and
//! the fixed column constraints, and exposes the operations the search
//! loop drives: completeness/consistency checks, degree computation,
//! forward-checking domain updates, and group-atomic assignment flags.
//!
//! Positions sharing a letter are collapsed into a [`VarGroup`] at
//! construction. A digit is assigned per group (letters are the true
//! unknowns), and flag toggles always cover a whole group, so shared
//! letters can never drift apart.
//!
//! The search isolates branches by copy-on-descend: [`Csp::snapshot`]
//! captures everything a branch mutates in one `Copy` value, and
//! [`Csp::restore`] rolls it back. With domains stored as `u16` bitmasks
//! the snapshot is a flat stack copy, no allocation.

use crate::constraints::{column_constraints, ColumnConstraint};
use crate::domain::DigitSet;
use crate::variable::{Label, VarId, Variable, NUM_VARIABLES};

/// Index of a [`VarGroup`] (one per distinct label, in first-appearance
/// order).
pub type GroupId = usize;

/// The slots standing for one distinct label. Letter groups hold every
/// position where the letter occurs; carry groups are singletons.
#[derive(Debug, Clone)]
pub struct VarGroup {
    pub label: Label,
    pub members: Vec<VarId>,
}

impl VarGroup {
    pub fn is_letter(&self) -> bool {
        matches!(self.label, Label::Letter(_))
    }
}

/// The current letter→digit mapping, keyed by [`GroupId`].
///
/// Built incrementally by the search: a digit is entered before the
/// recursive descent into a branch and cleared when the branch fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<Option<u8>>,
}

impl Assignment {
    fn new(num_groups: usize) -> Self {
        Self {
            values: vec![None; num_groups],
        }
    }

    #[must_use]
    pub fn get(&self, group: GroupId) -> Option<u8> {
        self.values[group]
    }

    pub fn set(&mut self, group: GroupId, digit: u8) {
        self.values[group] = Some(digit);
    }

    pub fn clear(&mut self, group: GroupId) {
        self.values[group] = None;
    }
}

/// Copyable image of everything the search mutates: per-slot domains plus
/// the assigned flags. Restoring one undoes a branch completely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    domains: [DigitSet; NUM_VARIABLES],
    assigned: [bool; NUM_VARIABLES],
}

/// The constraint store: variables, domains, and the fixed column wiring.
#[derive(Debug, Clone)]
pub struct Csp {
    variables: Vec<Variable>,
    domains: [DigitSet; NUM_VARIABLES],
    columns: Vec<ColumnConstraint>,
    groups: Vec<VarGroup>,
    group_of: [GroupId; NUM_VARIABLES],
}

impl Csp {
    /// Build the store from the 17 slots and their initial domains.
    ///
    /// Precondition (documented, not checked in release builds): the
    /// slots arrive in id order 0..17 with well-formed domains. The
    /// column wiring is fixed for the 4+4=5 shape.
    pub fn new(variables: Vec<Variable>, domains: [DigitSet; NUM_VARIABLES]) -> Self {
        debug_assert_eq!(variables.len(), NUM_VARIABLES);
        debug_assert!(
            variables.iter().enumerate().all(|(i, v)| v.id == i),
            "slots must arrive in id order"
        );

        let mut groups: Vec<VarGroup> = Vec::new();
        let mut group_of = [0; NUM_VARIABLES];
        for v in &variables {
            match groups.iter().position(|g| g.label == v.label) {
                Some(g) => {
                    groups[g].members.push(v.id);
                    group_of[v.id] = g;
                }
                None => {
                    group_of[v.id] = groups.len();
                    groups.push(VarGroup {
                        label: v.label,
                        members: vec![v.id],
                    });
                }
            }
        }

        Self {
            variables,
            domains,
            columns: column_constraints(),
            groups,
            group_of,
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn groups(&self) -> &[VarGroup] {
        &self.groups
    }

    pub fn group_of(&self, id: VarId) -> GroupId {
        self.group_of[id]
    }

    /// The current domain of a slot (cheap copy).
    pub fn domain(&self, id: VarId) -> DigitSet {
        self.domains[id]
    }

    /// An all-unassigned mapping sized for this store's groups.
    pub fn empty_assignment(&self) -> Assignment {
        Assignment::new(self.groups.len())
    }

    /// Digit currently backing a slot, if its label has been assigned.
    pub fn assigned_digit(&self, id: VarId, assignment: &Assignment) -> Option<u8> {
        assignment.get(self.group_of[id])
    }

    /// True iff every slot, letter positions and carries alike, is assigned.
    pub fn assignment_is_complete(&self) -> bool {
        self.variables.iter().all(|v| v.is_assigned)
    }

    /// Degree heuristic: how many unassigned partners this slot
    /// constrains. Used only to break MRV ties (higher is better).
    ///
    /// Two tallies add up: for a letter slot, one per distinct unassigned
    /// *other* letter (the all-different constraint); plus, for every
    /// column containing this slot, each other unassigned slot, counted
    /// once even when shared between adjacent columns.
    pub fn get_degree(&self, id: VarId) -> usize {
        let own = self.group_of[id];
        let mut degree = 0;

        if self.groups[own].is_letter() {
            for (g, group) in self.groups.iter().enumerate() {
                if g == own || !group.is_letter() {
                    continue;
                }
                // shared-letter slots move together, so the first member's
                // flag speaks for the whole group
                if group.members.iter().any(|&m| !self.variables[m].is_assigned) {
                    degree += 1;
                }
            }
        }

        let mut counted = [false; NUM_VARIABLES];
        for col in &self.columns {
            if !col.contains(id) {
                continue;
            }
            for m in col.members() {
                if m != id && !self.variables[m].is_assigned && !counted[m] {
                    counted[m] = true;
                    degree += 1;
                }
            }
        }

        degree
    }

    /// Would assigning `value` to this slot's label keep the store
    /// consistent?
    ///
    /// Checks, short-circuiting on the first violation:
    /// 1. all-different: no *other* letter already holds `value`
    ///    (letter-based: carries are exempt and may repeat digits);
    /// 2. every column touching any slot of this label, with `value`
    ///    substituted across the whole label group. A column with another
    ///    unknown member left cannot be judged and passes for now.
    pub fn is_consistent(&self, id: VarId, value: u8, assignment: &Assignment) -> bool {
        let own = self.group_of[id];

        if self.groups[own].is_letter() {
            for (g, group) in self.groups.iter().enumerate() {
                if g != own && group.is_letter() && assignment.get(g) == Some(value) {
                    return false;
                }
            }
        }

        let value_of = |slot: VarId| {
            if self.group_of[slot] == own {
                Some(value)
            } else {
                assignment.get(self.group_of[slot])
            }
        };
        for col in &self.columns {
            if !col.members().any(|m| self.group_of[m] == own) {
                continue;
            }
            if col.holds(&value_of) == Some(false) {
                return false;
            }
        }

        true
    }

    /// Forward checking after tentatively assigning `value` to this
    /// slot's label. Domains only ever shrink here.
    ///
    /// 1. All-different: drop `value` from every unassigned letter slot
    ///    outside this label's group.
    /// 2. Single-unknown columns: for each column containing this slot
    ///    where exactly one other member is still unassigned, keep only
    ///    that member's values which satisfy the column equation.
    ///
    /// Called between entering the digit into `assignment` and flagging
    /// the group via [`Csp::set_assigned`]; the caller snapshots first,
    /// so all pruning is undone on backtrack.
    pub fn update_domains(&mut self, id: VarId, value: u8, assignment: &Assignment) {
        let own = self.group_of[id];

        if self.groups[own].is_letter() {
            for slot in 0..self.variables.len() {
                if !self.variables[slot].is_position()
                    || self.group_of[slot] == own
                    || self.variables[slot].is_assigned
                {
                    continue;
                }
                self.domains[slot].remove(value);
            }
        }

        for col in &self.columns {
            if !col.contains(id) {
                continue;
            }
            let mut open = col
                .members()
                .filter(|&m| m != id && !self.variables[m].is_assigned);
            let Some(target) = open.next() else {
                continue;
            };
            if open.next().is_some() {
                continue; // still more than one unknown, nothing to filter
            }

            let mut narrowed = self.domains[target];
            narrowed.retain(|candidate| {
                col.holds(|slot| {
                    if slot == target {
                        Some(candidate)
                    } else if self.group_of[slot] == own {
                        Some(value)
                    } else {
                        assignment.get(self.group_of[slot])
                    }
                })
                // an unjudgeable column never prunes
                .unwrap_or(true)
            });
            self.domains[target] = narrowed;
        }
    }

    /// Flag this slot's whole label group as assigned. Shared-letter
    /// positions transition atomically; carry groups are just the carry.
    pub fn set_assigned(&mut self, id: VarId) {
        let group = self.group_of[id];
        for &m in &self.groups[group].members {
            self.variables[m].is_assigned = true;
        }
    }

    /// Undo [`Csp::set_assigned`] for this slot's label group.
    pub fn set_unassigned(&mut self, id: VarId) {
        let group = self.group_of[id];
        for &m in &self.groups[group].members {
            self.variables[m].is_assigned = false;
        }
    }

    /// Capture the mutable state of the store for later [`Csp::restore`].
    pub fn snapshot(&self) -> Snapshot {
        let mut assigned = [false; NUM_VARIABLES];
        for v in &self.variables {
            assigned[v.id] = v.is_assigned;
        }
        Snapshot {
            domains: self.domains,
            assigned,
        }
    }

    /// Roll the store back to a previously captured [`Snapshot`].
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.domains = snapshot.domains;
        for v in &mut self.variables {
            v.is_assigned = snapshot.assigned[v.id];
        }
    }
}
