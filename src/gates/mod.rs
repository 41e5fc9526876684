/*!
Gate recognition, aka. recovering a hierarchical gate structure from a CNF.

A CNF produced by encoding a circuit keeps the circuit's shape: each gate output *o* is
defined by the clauses mentioning *o*, and the definition bottoms out in the circuit's
inputs.
The analysis recovers that shape from the clauses alone.

At a high level:

1. [Root estimation](crate::db::occurrence::OccurrenceIndex::estimate_roots) claims
   top-level clauses; their literals are the first candidate outputs.
2. A breadth-first search visits candidate outputs layer by layer.
   A candidate *o* is recognized as a gate output when the clauses on *o*
   [block](crate::db::occurrence::OccurrenceIndex::is_blocked_set) the clauses on *¬o*
   and one of three certificates applies:
   - *nested monotonicity*: no ancestor constrains *o* in both polarities, so any blocked
     definition is safe;
   - a *pattern*: the clauses syntactically match an equivalence, an and/or gate, or a
     full encoding;
   - a *semantic check*: the [oracle](oracle::Oracle) proves the clauses uniquely define
     *o*.
   The inputs of a recognized gate join the next BFS layer.
3. Root estimation is repeated (up to a configured number of rounds), as recognized gates
   can expose fresh roots.

Recognition is linear-ish in practice: each recognized output removes its atom from the
index, so no clause is revisited as a definition.

The result is a [GateFormula](formula::GateFormula) partitioning the original clauses
into roots, per-gate definitions, and a remainder.
*/

pub mod formula;
pub mod oracle;

use std::time::Instant;

use crate::{
    config::GateConfig,
    db::{occurrence::OccurrenceIndex, store::PointerStore, ClauseId},
    gates::{
        formula::GateFormula,
        oracle::{Oracle, SolveResult},
    },
    misc::log::targets::{self},
    structures::{
        clause::Clause,
        literal::{Atom, CLiteral, Literal},
    },
    types::err::{self},
};

/// The driver of a gate analysis over one formula.
pub struct GateAnalyzer<'f> {
    formula: &'f PointerStore,
    index: OccurrenceIndex,
    gate_formula: GateFormula,
    oracle: Option<Oracle>,
    config: GateConfig,
    started: Instant,
}

impl<'f> GateAnalyzer<'f> {
    /// An analyzer over the given formula.
    ///
    /// If the semantic oracle cannot be opened and patterns are enabled the analyzer
    /// falls back to pattern-only recognition with a warning; with patterns disabled the
    /// error is surfaced, as no recognition rule would remain.
    pub fn new(formula: &'f PointerStore, config: GateConfig) -> Result<Self, err::ErrorKind> {
        use crate::db::store::ClauseStore;

        let oracle = match config.semantic {
            false => None,
            true => match Oracle::new() {
                Ok(oracle) => Some(oracle),
                Err(e) => {
                    if config.patterns {
                        log::warn!(target: targets::ORACLE, "Solver unavailable, pattern-only recognition: {e:?}");
                        None
                    } else {
                        return Err(err::ErrorKind::from(e));
                    }
                }
            },
        };

        Ok(GateAnalyzer {
            index: OccurrenceIndex::new(formula),
            gate_formula: GateFormula::new(formula.var_count()),
            formula,
            oracle,
            config,
            started: Instant::now(),
        })
    }

    /// Run the analysis and return the gate formula.
    pub fn analyze(mut self) -> GateFormula {
        self.started = Instant::now();

        for _round in 0..self.config.tries {
            if self.out_of_time() {
                break;
            }

            let roots = self.index.estimate_roots(self.formula);
            if roots.is_empty() {
                break;
            }

            let mut candidates: Vec<CLiteral> = Vec::default();
            for id in roots {
                for literal in self.formula.clause(id) {
                    self.gate_formula.set_used_as_input(*literal);
                    candidates.push(*literal);
                }
                self.gate_formula.roots.push(id);
            }

            log::debug!(target: targets::GATES, "Recognition pass from {} candidates", candidates.len());
            self.gate_recognition(candidates);
        }

        self.gate_formula.remainder = self.index.remaining();
        log::info!(
            target: targets::GATES,
            "Found {} gates of which {} are monotonic, {} roots, {} remainder clauses",
            self.gate_formula.gate_count(),
            self.gate_formula.monotonic_gate_count(),
            self.gate_formula.root_count(),
            self.gate_formula.remainder.len(),
        );
        self.gate_formula
    }

    /// Breadth-first recognition from the given candidate output literals.
    ///
    /// Breadth-first order matters: monotonicity marks set by one layer decide the fast
    /// path for the next.
    fn gate_recognition(&mut self, mut frontier: Vec<CLiteral>) {
        frontier.sort_unstable();
        let mut current: Vec<CLiteral> = Vec::default();

        while !frontier.is_empty() {
            if self.out_of_time() {
                return;
            }

            std::mem::swap(&mut current, &mut frontier);
            // Visit each candidate output once per layer.
            current.dedup();

            for position in 0..current.len() {
                let candidate = current[position];
                if self.is_gate(candidate) {
                    // The dedup above relies on sortedness, so the frontier is kept
                    // sorted by merging in the (sorted) inputs.
                    let middle = frontier.len();
                    frontier.extend_from_slice(&self.gate_formula.gate(candidate).inputs);
                    merge_sorted_tail(&mut frontier, middle);
                }
            }
            current.clear();
        }
    }

    /// Test whether the index holds a gate definition for the candidate output, and
    /// record the gate if so.
    fn is_gate(&mut self, out: CLiteral) -> bool {
        let not_out = out.negate();

        if self.index.occurrences(not_out).is_empty() {
            return false;
        }
        if !self.index.is_blocked_set(out, self.formula) {
            return false;
        }

        let monotonic = self.gate_formula.is_nested_monotonic(out);
        let recognized = monotonic
            || (self.config.patterns && self.pattern_check(out))
            || (self.oracle.is_some() && self.semantic_check(out));

        if recognized {
            let fwd: Vec<ClauseId> = self.index.occurrences(not_out).to_vec();
            let bwd: Vec<ClauseId> = self.index.occurrences(out).to_vec();
            log::trace!(target: targets::GATES, "Gate output {out}: {} fwd, {} bwd", fwd.len(), bwd.len());
            self.gate_formula.add_gate(out, fwd, bwd, self.formula);
            self.index.remove(out.atom(), self.formula);
        }

        recognized
    }

    /// Clause patterns of common encodings.
    ///
    /// Precondition: the clauses on `out` block the clauses on `¬out`.
    fn pattern_check(&self, out: CLiteral) -> bool {
        let not_out = out.negate();
        let fwd = self.index.occurrences(not_out);
        let bwd = self.index.occurrences(out);

        // The two sides must constrain exactly the same input atoms.
        let fwd_atoms = self.side_atoms(fwd, not_out);
        let bwd_atoms = self.side_atoms(bwd, out);
        if fwd_atoms != bwd_atoms {
            return false;
        }

        // Equivalence: o <-> l.
        if fwd.len() == 1
            && bwd.len() == 1
            && self.formula.clause(fwd[0]).size() == 2
            && self.formula.clause(bwd[0]).size() == 2
        {
            return true;
        }
        // Or: o <-> (l1 | ... | ln).
        if fwd.len() == 1 && self.fixed_clause_size(bwd, 2) {
            return true;
        }
        // And: o <-> (l1 & ... & ln).
        if bwd.len() == 1 && self.fixed_clause_size(fwd, 2) {
            return true;
        }
        // A full encoding constrains every input combination, each combined with one
        // output literal.
        if fwd.len() == bwd.len() && 2 * fwd.len() == 1 << (fwd_atoms.len() / 2) {
            let mut fwd_literals: Vec<CLiteral> = fwd
                .iter()
                .flat_map(|id| self.formula.clause(*id))
                .copied()
                .filter(|literal| *literal != not_out)
                .collect();
            fwd_literals.sort_unstable();
            fwd_literals.dedup();
            return 2 * fwd_atoms.len() == fwd_literals.len();
        }

        false
    }

    /// Sorted unique atoms of the given clauses, the output literal excluded.
    fn side_atoms(&self, side: &[ClauseId], output: CLiteral) -> Vec<Atom> {
        let mut atoms: Vec<Atom> = side
            .iter()
            .flat_map(|id| self.formula.clause(*id))
            .filter(|literal| **literal != output)
            .map(|literal| literal.atom())
            .collect();
        atoms.sort_unstable();
        atoms.dedup();
        atoms
    }

    fn fixed_clause_size(&self, side: &[ClauseId], size: usize) -> bool {
        side.iter().all(|id| self.formula.clause(*id).size() == size)
    }

    /// Ask the oracle whether the clauses on the candidate uniquely define it.
    ///
    /// The clauses of both sides are added with every literal of the output's atom
    /// replaced by `¬out`; if assuming `out` is then unsatisfiable, the encoding fixes
    /// the output from the inputs.
    /// The trailing unit `¬out` satisfies every clause this test added, so the clauses
    /// cannot constrain later queries.
    fn semantic_check(&mut self, out: CLiteral) -> bool {
        let not_out = out.negate();
        let oracle = match &mut self.oracle {
            Some(oracle) => oracle,
            None => return false,
        };

        let mut constraint: Vec<CLiteral> = Vec::default();
        for side in [self.index.occurrences(not_out), self.index.occurrences(out)] {
            for id in side {
                constraint.clear();
                for literal in self.formula.clause(*id) {
                    match literal.atom() == out.atom() {
                        true => constraint.push(not_out),
                        false => constraint.push(*literal),
                    }
                }
                oracle.add_clause(&constraint);
            }
        }

        oracle.assume(out);
        let result = oracle.solve();
        oracle.add_clause(&[not_out]);

        result == SolveResult::Unsat
    }

    fn out_of_time(&mut self) -> bool {
        match self.config.time_limit {
            Some(limit) if self.started.elapsed() >= limit => {
                log::warn!(target: targets::GATES, "Time limit hit, gate formula incomplete");
                self.gate_formula.complete = false;
                true
            }
            _ => false,
        }
    }
}

/// Merge the sorted tail beginning at `middle` into the sorted head before it.
fn merge_sorted_tail(values: &mut Vec<CLiteral>, middle: usize) {
    let tail = values.split_off(middle);
    let head = std::mem::take(values);
    values.reserve(head.len() + tail.len());

    let mut head = head.into_iter().peekable();
    let mut tail = tail.into_iter().peekable();
    loop {
        let from_head = match (head.peek(), tail.peek()) {
            (Some(h), Some(t)) => h <= t,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = match from_head {
            true => head.next(),
            false => tail.next(),
        };
        if let Some(literal) = next {
            values.push(literal);
        }
    }
}

#[cfg(test)]
mod merge_tests {
    use super::*;

    fn lits(ints: &[i32]) -> Vec<CLiteral> {
        ints.iter().map(CLiteral::from).collect()
    }

    #[test]
    fn merge_keeps_order() {
        let mut values = lits(&[1, 3, 5]);
        values.extend(lits(&[2, 3]));
        merge_sorted_tail(&mut values, 3);

        let mut expected = lits(&[1, 2, 3, 3, 5]);
        expected.sort_unstable();
        assert_eq!(values, expected);
    }

    #[test]
    fn merge_with_empty_sides() {
        let mut values = lits(&[1, 2]);
        merge_sorted_tail(&mut values, 2);
        assert_eq!(values, lits(&[1, 2]));

        let mut values = lits(&[1, 2]);
        merge_sorted_tail(&mut values, 0);
        assert_eq!(values, lits(&[1, 2]));
    }
}
