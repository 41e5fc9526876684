/*!
The gate formula, aka. the hierarchical structure recovered from a CNF.

A [GateFormula] partitions the clauses of the analyzed formula:

- *root* clauses, taken as top-level constraints;
- the clauses of each recognized [Gate], split into the forward clauses (those containing
  the negated output, the implications toward the output) and the backward clauses (those
  containing the output);
- the *remainder*, clauses absorbed by nothing.

Every clause of the original formula lands in exactly one of the three (checked by the
test suite), so the gate formula is a reshaping of the input rather than a summary.

The formula also carries the used-as-input marks which decide [nested
monotonicity](GateFormula::is_nested_monotonic) during recognition.
*/

use crate::{
    db::{store::PointerStore, ClauseId},
    structures::literal::{Atom, CLiteral, Literal},
};

/// A recognized gate: the output is a function of the inputs.
#[derive(Clone, Debug, Default)]
pub struct Gate {
    /// The output literal, in the polarity recognition fixed.
    ///
    /// The undefined literal (atom 0) when no gate is recognized for the atom.
    pub out: Option<CLiteral>,

    /// The clauses containing the negated output.
    pub fwd: Vec<ClauseId>,

    /// The clauses containing the output.
    pub bwd: Vec<ClauseId>,

    /// Sorted, unique, non-output literals of the forward clauses.
    pub inputs: Vec<CLiteral>,

    /// Whether some ancestor constrains the output in both polarities.
    pub non_monotonic: bool,
}

impl Gate {
    /// Whether a gate was recognized.
    pub fn is_defined(&self) -> bool {
        self.out.is_some()
    }
}

/// The structure recovered by a [gate analysis](crate::gates::GateAnalyzer).
pub struct GateFormula {
    /// Top-level clauses.
    pub roots: Vec<ClauseId>,

    /// A gate per atom, defined or not, indexed by atom.
    gates: Vec<Gate>,

    /// Clauses absorbed by no gate and claimed by no root estimation.
    pub remainder: Vec<ClauseId>,

    /// Marks for literals used as input to some gate or root, indexed by literal code.
    inputs: Vec<bool>,

    /// Whether the analysis covered the whole formula within its budget.
    pub complete: bool,

    /// The artificial conjunction a [normalize_roots](GateFormula::normalize_roots) call
    /// introduced, if any: the fresh output atom and its forward clauses.
    artificial_root: Option<(Atom, Vec<Vec<CLiteral>>)>,
}

impl GateFormula {
    pub fn new(var_count: Atom) -> Self {
        GateFormula {
            roots: Vec::default(),
            gates: vec![Gate::default(); var_count as usize + 1],
            remainder: Vec::default(),
            inputs: vec![false; 2 * (var_count as usize + 1)],
            complete: true,
            artificial_root: None,
        }
    }

    /// Mark the literal as used as an input.
    pub fn set_used_as_input(&mut self, literal: CLiteral) {
        self.inputs[literal.index()] = true;
    }

    /// Whether the literal is marked as used as an input.
    pub fn is_used_as_input(&self, literal: CLiteral) -> bool {
        self.inputs[literal.index()]
    }

    /// Whether no ancestor constrains the literal in both polarities.
    ///
    /// A literal used upstream in only one polarity can be safely defined as an output.
    pub fn is_nested_monotonic(&self, literal: CLiteral) -> bool {
        !(self.is_used_as_input(literal) && self.is_used_as_input(literal.negate()))
    }

    /// Record a recognized gate for the output literal.
    ///
    /// The inputs are the sorted unique non-output literals of the forward clauses.
    /// Each is marked as used, in both polarities if the gate is non-monotonic.
    pub fn add_gate(
        &mut self,
        out: CLiteral,
        fwd: Vec<ClauseId>,
        bwd: Vec<ClauseId>,
        formula: &PointerStore,
    ) {
        let not_out = out.negate();
        let mut inputs: Vec<CLiteral> = fwd
            .iter()
            .flat_map(|id| formula.clause(*id))
            .copied()
            .filter(|literal| *literal != not_out)
            .collect();
        inputs.sort_unstable();
        inputs.dedup();

        let non_monotonic = !self.is_nested_monotonic(out);
        for input in &inputs {
            self.set_used_as_input(*input);
            if non_monotonic {
                self.set_used_as_input(input.negate());
            }
        }

        self.gates[out.atom() as usize] = Gate {
            out: Some(out),
            fwd,
            bwd,
            inputs,
            non_monotonic,
        };
    }

    /// The gate recorded for the given output literal's atom.
    pub fn gate(&self, output: CLiteral) -> &Gate {
        &self.gates[output.atom() as usize]
    }

    /// The gate recorded for the given atom.
    pub fn gate_of(&self, atom: Atom) -> &Gate {
        &self.gates[atom as usize]
    }

    /// Whether a gate is recorded for the given literal's atom.
    pub fn is_gate_output(&self, output: CLiteral) -> bool {
        self.gates[output.atom() as usize].is_defined()
    }

    /// An iterator over the recognized gates.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.gates.iter().filter(|gate| gate.is_defined())
    }

    /// The number of recognized gates.
    pub fn gate_count(&self) -> usize {
        self.gates().count()
    }

    /// The number of recognized gates with no non-monotonic ancestor.
    pub fn monotonic_gate_count(&self) -> usize {
        self.gates().filter(|gate| !gate.non_monotonic).count()
    }

    /// The number of root clauses.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Sorted, unique literals of the root clauses.
    pub fn root_literals(&self, formula: &PointerStore) -> Vec<CLiteral> {
        let mut literals: Vec<CLiteral> = self
            .roots
            .iter()
            .flat_map(|id| formula.clause(*id))
            .copied()
            .collect();
        literals.sort_unstable();
        literals.dedup();
        literals
    }

    /// Whether the gate structure was augmented with an artificial root.
    pub fn has_artificial_root(&self) -> bool {
        self.artificial_root.is_some()
    }

    /// Fold every root and remainder clause into one artificial and-gate.
    ///
    /// A fresh atom *r* becomes the single root: each folded clause *c* turns into the
    /// forward clause *c ∨ ¬r* of the gate for *r*, whose inputs are the literals of the
    /// folded clauses.
    /// After the call the formula has exactly one (unit, artificial) root and an empty
    /// remainder.
    pub fn normalize_roots(&mut self, formula: &PointerStore) {
        if self.artificial_root.is_some() {
            return;
        }

        let fresh = self.gates.len() as Atom;
        let out = CLiteral::new(fresh, true);
        let not_out = out.negate();

        let folded: Vec<ClauseId> = self
            .roots
            .drain(..)
            .chain(self.remainder.drain(..))
            .collect();

        let mut inputs: Vec<CLiteral> = Vec::default();
        let mut fwd_clauses: Vec<Vec<CLiteral>> = Vec::with_capacity(folded.len());
        for id in &folded {
            let mut clause: Vec<CLiteral> = formula.clause(*id).to_vec();
            inputs.extend_from_slice(&clause);
            clause.push(not_out);
            fwd_clauses.push(clause);
        }
        inputs.sort_unstable();
        inputs.dedup();

        self.gates.push(Gate {
            out: Some(out),
            fwd: folded,
            bwd: Vec::default(),
            inputs,
            non_monotonic: false,
        });
        self.inputs.resize(2 * (fresh as usize + 1), false);
        self.artificial_root = Some((fresh, fwd_clauses));
    }

    /// The artificial root's output literal, if roots were normalized.
    pub fn artificial_root_output(&self) -> Option<CLiteral> {
        self.artificial_root
            .as_ref()
            .map(|(atom, _)| CLiteral::new(*atom, true))
    }

    /// The artificial root's forward clauses, with the fresh output literal appended.
    pub fn artificial_root_clauses(&self) -> Option<&[Vec<CLiteral>]> {
        self.artificial_root
            .as_ref()
            .map(|(_, clauses)| clauses.as_slice())
    }
}
