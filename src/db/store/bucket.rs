//! The size-bucketed layout: one literal array per clause length.
//!
//! A clause of length *k* occupies *k* consecutive cells of bucket *k*, so the store
//! carries no per-clause marker at all.
//! Iteration visits lengths in ascending order, emitting fixed-width slices.
//!
//! This is the most compact of the layouts and the one the canonical
//! [hash configuration](crate::identify::wl) runs over.

use crate::{
    db::store::{ClauseStore, RenameTable},
    structures::{
        clause::CClause,
        literal::{Atom, CLiteral, Literal},
    },
};

/// A store bucketing clauses by their length.
#[derive(Debug, Default)]
pub struct BucketStore {
    /// Bucket `k` holds the literals of every clause of length `k`, concatenated.
    ///
    /// Bucket 0 is always empty (the parser discards empty clauses).
    buckets: Vec<Vec<CLiteral>>,
    var_count: Atom,
}

impl ClauseStore for BucketStore {
    fn var_count(&self) -> Atom {
        self.var_count
    }

    fn clause_count(&self) -> usize {
        self.buckets
            .iter()
            .enumerate()
            .skip(1)
            .map(|(length, bucket)| bucket.len() / length)
            .sum()
    }

    fn add_clause(&mut self, clause: CClause) {
        let length = clause.len();
        if length == 0 {
            return;
        }
        if let Some(literal) = clause.last() {
            self.var_count = std::cmp::max(self.var_count, literal.atom());
        }
        if self.buckets.len() <= length {
            self.buckets.resize_with(length + 1, Vec::default);
        }
        self.buckets[length].extend_from_slice(&clause);
    }

    fn clauses(&self) -> impl Iterator<Item = &[CLiteral]> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .skip(1)
            .flat_map(|(length, bucket)| bucket.chunks_exact(length))
    }

    fn normalize_variable_names(&mut self) {
        let mut table = RenameTable::new(self.var_count);
        for bucket in &mut self.buckets {
            for literal in bucket.iter_mut() {
                *literal = table.rename(*literal);
            }
        }
        self.var_count = table.assigned();
    }
}
