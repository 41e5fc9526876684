//! The per-clause layout: each clause is its own heap vector.
//!
//! The pointerful layout pays one allocation per clause, and in return clauses can be
//! addressed individually by [ClauseId](crate::db::ClauseId).
//! Gate recognition works over this store, as the [occurrence
//! index](crate::db::occurrence) and the [gate formula](crate::gates::formula) both hold
//! clause ids into it.

use crate::{
    db::store::{ClauseStore, RenameTable},
    structures::{
        clause::CClause,
        literal::{Atom, CLiteral, Literal},
    },
};

/// A store holding each clause as its own vector.
#[derive(Debug, Default)]
pub struct PointerStore {
    clauses: Vec<CClause>,
    var_count: Atom,
}

impl PointerStore {
    /// The clause with the given id.
    pub fn clause(&self, id: crate::db::ClauseId) -> &[CLiteral] {
        &self.clauses[id]
    }
}

impl ClauseStore for PointerStore {
    fn var_count(&self) -> Atom {
        self.var_count
    }

    fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    fn add_clause(&mut self, clause: CClause) {
        // Canonical clauses are sorted, so the maximum atom is the last literal's.
        if let Some(literal) = clause.last() {
            self.var_count = std::cmp::max(self.var_count, literal.atom());
        }
        self.clauses.push(clause);
    }

    fn clauses(&self) -> impl Iterator<Item = &[CLiteral]> + '_ {
        self.clauses.iter().map(|clause| clause.as_slice())
    }

    fn normalize_variable_names(&mut self) {
        let mut table = RenameTable::new(self.var_count);
        for clause in &mut self.clauses {
            for literal in clause.iter_mut() {
                *literal = table.rename(*literal);
            }
        }
        self.var_count = table.assigned();
    }
}
