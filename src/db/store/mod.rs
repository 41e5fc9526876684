/*!
Clause stores, aka. the owned representation of a formula.

Three layouts are offered, trading iteration shape against memory overhead:

- [PointerStore](pointer::PointerStore): each clause is its own heap vector.
  The layout gate recognition uses, as clauses are addressed individually.
- [IntervalStore](interval::IntervalStore): a single literal array, with each clause
  prefixed by a length cell.
- [BucketStore](bucket::BucketStore): one literal array per clause length.
  The most compact layout, and the one the canonical hash configuration uses.

Every layout exposes the same capability: a variable count, and iteration over clauses as
contiguous literal slices.
Code which consumes a store is generic over the trait rather than dynamically dispatched,
so the iteration compiles down to the layout's natural loop.

The [Weisfeiler-Leman hash](crate::identify::wl) depends only on the multiset of clauses
held, never the layout (checked by the test suite across all three).
*/

pub mod bucket;
pub mod interval;
pub mod pointer;

pub use bucket::BucketStore;
pub use interval::IntervalStore;
pub use pointer::PointerStore;

use crate::structures::{
    clause::CClause,
    literal::{Atom, CLiteral, Literal},
};

/// Owned storage of a formula's clauses.
pub trait ClauseStore: Default {
    /// The maximum atom of any stored literal, aka. the variable count of a gapless formula.
    fn var_count(&self) -> Atom;

    /// The number of stored clauses.
    fn clause_count(&self) -> usize;

    /// Take ownership of a clause.
    ///
    /// The clause is expected in canonical form (sorted, no duplicates, no complementary
    /// pair) --- the [parser](crate::builder::dimacs) establishes this.
    fn add_clause(&mut self, clause: CClause);

    /// An iterator over all clauses as contiguous literal slices.
    ///
    /// The iteration order is fixed for a given store, though layouts differ on what that
    /// order is --- in particular, the bucket layout visits clauses by ascending length.
    fn clauses(&self) -> impl Iterator<Item = &[CLiteral]> + '_;

    /// Rename atoms to the gapless range `1..=n` in order of first occurrence,
    /// preserving polarities.
    fn normalize_variable_names(&mut self);
}

/// The rename table behind [ClauseStore::normalize_variable_names].
///
/// Shared by the store implementations: old atom to fresh atom, assigned in order of
/// first occurrence, starting at 1.
pub(super) struct RenameTable {
    names: Vec<Atom>,
    next: Atom,
}

impl RenameTable {
    pub fn new(var_count: Atom) -> Self {
        RenameTable {
            names: vec![crate::structures::literal::ATOM_UNDEFINED; var_count as usize + 1],
            next: 1,
        }
    }

    /// The fresh name of the given literal's atom, assigning one on first sight.
    pub fn rename(&mut self, literal: CLiteral) -> CLiteral {
        let entry = &mut self.names[literal.atom() as usize];
        if *entry == crate::structures::literal::ATOM_UNDEFINED {
            *entry = self.next;
            self.next += 1;
        }
        CLiteral::new(*entry, literal.polarity())
    }

    /// The count of atoms assigned a fresh name.
    pub fn assigned(&self) -> Atom {
        self.next - 1
    }
}
