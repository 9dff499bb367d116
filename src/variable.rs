use std::fmt;
use std::fmt::{Display, Formatter};

/// Index of a variable slot in the CSP.
///
/// Slots 0–3 hold the first addend, 4–7 the second, 8–12 the sum word,
/// and 13–16 the four synthetic carries.
pub type VarId = usize;

/// Number of letter positions across the three words (4 + 4 + 5).
pub const NUM_POSITIONS: usize = 13;
/// Number of synthetic carry slots.
pub const NUM_CARRIES: usize = 4;
/// Total variable slots owned by the CSP.
pub const NUM_VARIABLES: usize = NUM_POSITIONS + NUM_CARRIES;

/// Label identifying the unknown a slot stands for.
///
/// Letter positions carry their puzzle letter; the carry slots get
/// `Carry(0)..=Carry(3)`, displayed as `c0..c3`. Keeping carries in a
/// separate variant means a puzzle containing the letter 'c' can never
/// collide with a carry label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Letter(char),
    Carry(u8),
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Label::Letter(c) => write!(f, "{c}"),
            Label::Carry(i) => write!(f, "c{i}"),
        }
    }
}

/// A single variable slot: identity plus an assignment flag.
///
/// Slots sharing a letter must always hold the same digit and the same
/// assigned/unassigned state. The slot itself does not enforce that; the
/// CSP keeps groups in sync through [`crate::csp::Csp::set_assigned`] and
/// [`crate::csp::Csp::set_unassigned`].
///
/// `Variable` deliberately has no ordering: the search selects slots with
/// an explicit (domain size, degree, id) priority, so no comparator is
/// needed on the slot type.
#[derive(Debug, Clone)]
pub struct Variable {
    pub id: VarId,
    pub label: Label,
    pub is_assigned: bool,
}

impl Variable {
    pub fn new(id: VarId, label: Label) -> Self {
        Self {
            id,
            label,
            is_assigned: false,
        }
    }

    /// Whether this slot is one of the 13 letter positions.
    pub fn is_position(&self) -> bool {
        matches!(self.label, Label::Letter(_))
    }

    /// Whether this slot is a synthetic carry.
    pub fn is_carry(&self) -> bool {
        matches!(self.label, Label::Carry(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_unassigned() {
        let v = Variable::new(3, Label::Letter('D'));
        assert_eq!(v.id, 3);
        assert_eq!(v.label, Label::Letter('D'));
        assert!(!v.is_assigned);
    }

    #[test]
    fn test_position_vs_carry() {
        let pos = Variable::new(0, Label::Letter('S'));
        let carry = Variable::new(13, Label::Carry(0));

        assert!(pos.is_position());
        assert!(!pos.is_carry());
        assert!(carry.is_carry());
        assert!(!carry.is_position());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Label::Letter('S').to_string(), "S");
        assert_eq!(Label::Carry(0).to_string(), "c0");
        assert_eq!(Label::Carry(3).to_string(), "c3");
    }

    #[test]
    fn test_carry_label_never_collides_with_letter() {
        // a puzzle letter 'c' and the carry c0 render alike only as text
        assert_ne!(Label::Letter('c'), Label::Carry(0));
    }

    #[test]
    fn test_slot_layout_constants() {
        assert_eq!(NUM_POSITIONS, 13); // 4 + 4 + 5
        assert_eq!(NUM_CARRIES, 4);
        assert_eq!(NUM_VARIABLES, 17);
    }
}
