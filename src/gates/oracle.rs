/*!
The semantic gate oracle, aka. an embedded incremental SAT solver.

The oracle answers one kind of question: does a set of clauses uniquely define a
candidate output?
The [gate analyzer](crate::gates::GateAnalyzer) opens one oracle for its lifetime and
leans on incrementality --- clauses added for one query stay for the next, as every added
clause is made irrelevant by a trailing unit before the next query (see
[GateAnalyzer::semantic_check](crate::gates::GateAnalyzer)).

The backing solver is [varisat], which supports exactly the required assume/solve
interface.
Any incremental solver would do; the only part of the contract used is the correctness of
UNSAT answers.
*/

use varisat::{ExtendFormula, Lit, Solver};

use crate::{
    misc::log::targets::{self},
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

/// The answer of one oracle query, in the conventional encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveResult {
    Unknown = 0,
    Sat = 10,
    Unsat = 20,
}

/// An owned incremental solver with an add/assume/solve interface.
pub struct Oracle {
    solver: Solver<'static>,
}

impl Oracle {
    /// A fresh oracle.
    pub fn new() -> Result<Self, err::OracleError> {
        Ok(Oracle {
            solver: Solver::new(),
        })
    }

    /// Add a clause, permanently.
    pub fn add_clause(&mut self, clause: &[CLiteral]) {
        let literals: Vec<Lit> = clause
            .iter()
            .map(|literal| Lit::from_dimacs(literal.as_int()))
            .collect();
        self.solver.add_clause(&literals);
    }

    /// Assume a literal for the next solve.
    pub fn assume(&mut self, literal: CLiteral) {
        self.solver
            .assume(&[Lit::from_dimacs(literal.as_int())]);
    }

    /// Determine satisfiability under the current assumptions, then drop them.
    pub fn solve(&mut self) -> SolveResult {
        let result = match self.solver.solve() {
            Ok(true) => SolveResult::Sat,
            Ok(false) => SolveResult::Unsat,
            Err(e) => {
                log::warn!(target: targets::ORACLE, "Solver failure: {e:?}");
                SolveResult::Unknown
            }
        };
        self.solver.assume(&[]);
        result
    }
}
