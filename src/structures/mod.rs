//! The abstract elements of a formula and their representations.
//!
//! - An [atom](literal::Atom) is a variable, identified by a positive integer.
//! - A [literal](literal::Literal) is an atom paired with a polarity.
//! - A [clause](clause::Clause) is a collection of literals, interpreted as their disjunction.
//!
//! A formula is a collection of clauses, interpreted as their conjunction.
//! Formulas are held in [clause stores](crate::db::store), which fix a memory layout.

pub mod clause;
pub mod literal;
