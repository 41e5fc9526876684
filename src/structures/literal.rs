//! Literals are atoms paired with a (boolean) polarity.
//!
//! The canonical implementation of the literal trait is the [CLiteral] structure, a packed
//! integer code with the atom in the high bits and the polarity in the low bit.
//!
//! The packing gives three properties the rest of the library leans on:
//! - The two literals of an atom are adjacent, so any per-literal data can be held in a
//!   flat vector indexed by [index](Literal::index).
//! - Negation is a flip of the low bit.
//! - The derived order on codes is total, with the literals of an atom ordered
//!   positive before negative.
//!
//! ```rust
//! # use cnfident::structures::literal::{CLiteral, Literal};
//! let literal = CLiteral::new(79, true);
//!
//! assert!(literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert_eq!(literal.negate().as_int(), -79);
//! assert_eq!(literal.index() + 1, literal.negate().index());
//! ```
//!
//! In DIMACS form a literal is a signed integer, with the sign indicating the polarity.
//! Conversions to and from the integer form are via [as_int](Literal::as_int) and [From].

/// An atom, aka. a 'variable'.
///
/// Atoms are positive integers, with `0` reserved as the undefined atom.
pub type Atom = u32;

/// The undefined atom.
pub const ATOM_UNDEFINED: Atom = 0;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal: std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a polarity.
    ///
    /// A `true` polarity is the positive literal of the atom.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// The position of the literal in a flat per-literal vector.
    ///
    /// The index of the positive literal of atom *a* is 2*a*, and of the negative literal 2*a* + 1.
    fn index(&self) -> usize;

    /// The literal in its integer form, with sign indicating polarity.
    fn as_int(&self) -> isize;
}

/// The canonical representation of a literal as a packed code.
///
/// The code of a literal with atom *a* is 2*a* for the positive literal and 2*a* + 1 for
/// the negative literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CLiteral(u32);

impl CLiteral {
    /// The literal with the given code.
    ///
    /// Of use when per-literal vectors are scanned by index, otherwise prefer [Literal::new].
    pub fn from_code(code: u32) -> Self {
        CLiteral(code)
    }

    /// The code of the literal.
    pub fn code(&self) -> u32 {
        self.0
    }
}

impl Literal for CLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        match polarity {
            true => CLiteral(atom << 1),
            false => CLiteral((atom << 1) | 1),
        }
    }

    fn negate(&self) -> Self {
        CLiteral(self.0 ^ 1)
    }

    fn atom(&self) -> Atom {
        self.0 >> 1
    }

    fn polarity(&self) -> bool {
        self.0 & 1 == 0
    }

    fn index(&self) -> usize {
        self.0 as usize
    }

    fn as_int(&self) -> isize {
        match self.polarity() {
            true => self.atom() as isize,
            false => -(self.atom() as isize),
        }
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.polarity() {
            true => write!(f, "{}", self.atom()),
            false => write!(f, "-{}", self.atom()),
        }
    }
}

impl From<i32> for CLiteral {
    fn from(value: i32) -> Self {
        CLiteral::new(value.unsigned_abs(), value.is_positive())
    }
}

impl From<&i32> for CLiteral {
    fn from(value: &i32) -> Self {
        CLiteral::new(value.unsigned_abs(), value.is_positive())
    }
}

impl TryFrom<i64> for CLiteral {
    type Error = ();

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let atom = value.unsigned_abs();
        if atom < (Atom::MAX >> 1) as u64 {
            Ok(CLiteral::new(atom as Atom, value.is_positive()))
        } else {
            Err(())
        }
    }
}
