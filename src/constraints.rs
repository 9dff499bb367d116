//! Column-sum constraints for the fixed 4+4=5 addition.
//!
//! The constraint topology is data, not code: each column is a
//! [`ColumnConstraint`] record, and the CSP engine (`is_consistent`,
//! `update_domains`, `get_degree`) is written once over the records. The
//! wiring itself is fixed for this puzzle shape: two 4-letter addends,
//! one 5-letter sum, read least-significant column first.

use crate::variable::VarId;

/// One column of the letter addition:
///
/// ```text
/// carry_in + Σ addends = sum + 10 · carry_out
/// ```
///
/// Absent parts contribute zero, so the top column (no addends, no
/// carry-out) degenerates to `carry_in = sum`: the leading digit of the
/// sum word is exactly the final carry.
#[derive(Debug, Clone)]
pub struct ColumnConstraint {
    pub carry_in: Option<VarId>,
    pub addends: Vec<VarId>,
    pub sum: VarId,
    pub carry_out: Option<VarId>,
}

impl ColumnConstraint {
    /// Every slot taking part in this column.
    pub fn members(&self) -> impl Iterator<Item = VarId> + '_ {
        self.carry_in
            .into_iter()
            .chain(self.addends.iter().copied())
            .chain(std::iter::once(self.sum))
            .chain(self.carry_out)
    }

    pub fn contains(&self, id: VarId) -> bool {
        self.members().any(|m| m == id)
    }

    /// Evaluate the column equation under `value_of`.
    ///
    /// Returns `Some(true)`/`Some(false)` when every member has a value,
    /// `None` when at least one is still unknown (the column cannot be
    /// judged yet). Sums are widened to `u32` so `9 + 9 + 1` never wraps.
    pub fn holds(&self, value_of: impl Fn(VarId) -> Option<u8>) -> Option<bool> {
        let mut lhs: u32 = 0;
        if let Some(id) = self.carry_in {
            lhs += u32::from(value_of(id)?);
        }
        for &id in &self.addends {
            lhs += u32::from(value_of(id)?);
        }

        let mut rhs: u32 = u32::from(value_of(self.sum)?);
        if let Some(id) = self.carry_out {
            rhs += 10 * u32::from(value_of(id)?);
        }

        Some(lhs == rhs)
    }
}

/// The five fixed columns, least-significant first.
///
/// Slot ids: 0–3 addend one, 4–7 addend two, 8–12 sum, 13–16 carries
/// c0..c3.
pub fn column_constraints() -> Vec<ColumnConstraint> {
    vec![
        // units: x3 + x7 = x12 + 10*c0
        ColumnConstraint {
            carry_in: None,
            addends: vec![3, 7],
            sum: 12,
            carry_out: Some(13),
        },
        // tens: c0 + x2 + x6 = x11 + 10*c1
        ColumnConstraint {
            carry_in: Some(13),
            addends: vec![2, 6],
            sum: 11,
            carry_out: Some(14),
        },
        // hundreds: c1 + x1 + x5 = x10 + 10*c2
        ColumnConstraint {
            carry_in: Some(14),
            addends: vec![1, 5],
            sum: 10,
            carry_out: Some(15),
        },
        // thousands: c2 + x0 + x4 = x9 + 10*c3
        ColumnConstraint {
            carry_in: Some(15),
            addends: vec![0, 4],
            sum: 9,
            carry_out: Some(16),
        },
        // leading digit of the sum is the final carry: c3 = x8
        ColumnConstraint {
            carry_in: Some(16),
            addends: vec![],
            sum: 8,
            carry_out: None,
        },
    ]
}
