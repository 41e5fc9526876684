//! The interval-packed layout: one literal array, with a length cell before each clause.
//!
//! A clause occupies `1 + size` cells of the array.
//! Iteration advances by the length cell, so the store supports forward traversal and
//! nothing else --- which is all the hashes need.

use crate::{
    db::store::{ClauseStore, RenameTable},
    structures::{
        clause::CClause,
        literal::{Atom, CLiteral, Literal},
    },
};

/// A store packing every clause into a single cell array.
#[derive(Debug, Default)]
pub struct IntervalStore {
    /// Interleaved cells: a clause length, then that many literal codes.
    cells: Vec<u32>,
    clause_count: usize,
    var_count: Atom,
}

impl ClauseStore for IntervalStore {
    fn var_count(&self) -> Atom {
        self.var_count
    }

    fn clause_count(&self) -> usize {
        self.clause_count
    }

    fn add_clause(&mut self, clause: CClause) {
        if let Some(literal) = clause.last() {
            self.var_count = std::cmp::max(self.var_count, literal.atom());
        }
        self.cells.push(clause.len() as u32);
        self.cells
            .extend(clause.iter().map(|literal| literal.code()));
        self.clause_count += 1;
    }

    fn clauses(&self) -> impl Iterator<Item = &[CLiteral]> + '_ {
        IntervalIterator {
            cells: &self.cells,
            head: 0,
        }
    }

    fn normalize_variable_names(&mut self) {
        let mut table = RenameTable::new(self.var_count);
        let mut head = 0;
        while head < self.cells.len() {
            let length = self.cells[head] as usize;
            for cell in &mut self.cells[head + 1..head + 1 + length] {
                *cell = table.rename(CLiteral::from_code(*cell)).code();
            }
            head += 1 + length;
        }
        self.var_count = table.assigned();
    }
}

struct IntervalIterator<'s> {
    cells: &'s [u32],
    head: usize,
}

impl<'s> Iterator for IntervalIterator<'s> {
    type Item = &'s [CLiteral];

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.cells.len() {
            return None;
        }
        let length = self.cells[self.head] as usize;
        let begin = self.head + 1;
        self.head = begin + length;
        let cells = &self.cells[begin..begin + length];
        // CLiteral is a transparent wrapper of a u32 code, so a cell slice is a literal slice.
        let literals =
            unsafe { std::slice::from_raw_parts(cells.as_ptr().cast::<CLiteral>(), cells.len()) };
        Some(literals)
    }
}
