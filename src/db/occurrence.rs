/*!
An occurrence index over a [PointerStore](crate::db::store::PointerStore).

For each literal the index holds the ids of the clauses containing it.
[Gate recognition](crate::gates) is the only consumer, and mutates the index as the
analysis proceeds: clauses leave the index when they are claimed as roots
([estimate_roots](OccurrenceIndex::estimate_roots)) or absorbed by a recognized gate
([remove](OccurrenceIndex::remove)).
Whatever is left at the end is the remainder of the analysis.

The index addresses clauses by id into the owning store, and is rebuilt rather than
moved, so no references into the store are held.
*/

use crate::{
    db::{store::PointerStore, ClauseId},
    generic::stamp::Stamp,
    structures::literal::{Atom, CLiteral, Literal},
};

/// Per-literal lists of the clauses containing the literal.
pub struct OccurrenceIndex {
    /// Clause ids, indexed by literal code.
    lists: Vec<Vec<ClauseId>>,

    /// Marker scratch for the blocked-set test, sized by literal code.
    literal_stamp: Stamp,

    /// Marker scratch for root deduplication, sized by clause id.
    clause_stamp: Stamp,
}

impl OccurrenceIndex {
    /// An index over every clause of the given store.
    pub fn new(formula: &PointerStore) -> Self {
        use crate::db::store::ClauseStore;

        let mut lists: Vec<Vec<ClauseId>> =
            vec![Vec::default(); 2 * (formula.var_count() as usize + 1)];
        for (id, clause) in formula.clauses().enumerate() {
            for literal in clause {
                lists[literal.index()].push(id);
            }
        }

        OccurrenceIndex {
            literal_stamp: Stamp::new(lists.len()),
            clause_stamp: Stamp::new(formula.clause_count()),
            lists,
        }
    }

    /// The clauses containing the given literal.
    pub fn occurrences(&self, literal: CLiteral) -> &[ClauseId] {
        &self.lists[literal.index()]
    }

    /// Whether any clause remains in the index.
    pub fn has_clauses(&self) -> bool {
        self.lists.iter().any(|list| !list.is_empty())
    }

    /// The ids of every clause still present, ascending.
    pub fn remaining(&self) -> Vec<ClauseId> {
        let mut ids: Vec<ClauseId> = self.lists.iter().flatten().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Estimate top-level clauses, and take them out of the index.
    ///
    /// Three signals, in order, each tried only when the previous found nothing:
    ///
    /// 1. *Purity*: clauses containing a literal whose complement has no occurrence.
    ///    Such a literal is constrained in one direction only, as a top-level constraint
    ///    would be.
    /// 2. *Units*: remaining unit clauses, the plainest top-level constraints.
    /// 3. *Rarity*: the occurrence list of the rarest literal (fewest occurrences,
    ///    smaller code on ties).
    ///    The output of an encoded circuit occurs only in its defining clauses, so
    ///    rarity is the last signal left once every literal occurs in both polarities.
    ///
    /// Without the later tiers, recognition would never start on a formula whose every
    /// literal occurs in both polarities.
    pub fn estimate_roots(&mut self, formula: &PointerStore) -> Vec<ClauseId> {
        let mut roots = Vec::default();
        self.clause_stamp.clear();

        for code in 2..self.lists.len() as u32 {
            let list = &self.lists[code as usize];
            let complement = &self.lists[(code ^ 1) as usize];
            if !list.is_empty() && complement.is_empty() {
                for id in list {
                    if !self.clause_stamp.marked(*id) {
                        self.clause_stamp.mark(*id);
                        roots.push(*id);
                    }
                }
            }
        }

        if roots.is_empty() {
            roots = self
                .remaining()
                .into_iter()
                .filter(|id| formula.clause(*id).len() == 1)
                .collect();
        }

        if roots.is_empty() {
            if let Some(rarest) = self.rarest_literal() {
                roots.extend_from_slice(&self.lists[rarest.index()]);
            }
        }

        roots.sort_unstable();
        for id in &roots {
            self.remove_clause(*id, formula);
        }

        log::debug!(target: crate::misc::log::targets::GATES, "Estimated {} root clauses", roots.len());
        roots
    }

    /// The literal with the fewest, though some, occurrences.
    fn rarest_literal(&self) -> Option<CLiteral> {
        let mut rarest: Option<(usize, u32)> = None;
        for (code, list) in self.lists.iter().enumerate().skip(2) {
            if list.is_empty() {
                continue;
            }
            match rarest {
                Some((count, _)) if count <= list.len() => {}
                _ => rarest = Some((list.len(), code as u32)),
            }
        }
        rarest.map(|(_, code)| CLiteral::from_code(code))
    }

    /// Whether the clauses on `¬o` are blocked by the clauses on `o`.
    ///
    /// True iff every pair of clauses, one containing `o` and one containing `¬o`,
    /// shares a second complementary literal pair besides `(o, ¬o)`.
    /// All resolvents of such a pairing are tautological, so the clauses on the two
    /// sides cannot interact except through `o`.
    ///
    /// Linear in the occurrence lists' total literal count per clause on the `o` side.
    pub fn is_blocked_set(&mut self, o: CLiteral, formula: &PointerStore) -> bool {
        let not_o = o.negate();

        for c_pos in &self.lists[o.index()] {
            self.literal_stamp.clear();
            for literal in formula.clause(*c_pos) {
                if *literal != o {
                    self.literal_stamp.mark(literal.negate().index());
                }
            }

            'negative_side: for c_neg in &self.lists[not_o.index()] {
                for literal in formula.clause(*c_neg) {
                    if *literal != not_o && self.literal_stamp.marked(literal.index()) {
                        continue 'negative_side;
                    }
                }
                return false;
            }
        }

        true
    }

    /// Drop every clause containing the given atom, in either polarity, from the index.
    pub fn remove(&mut self, atom: Atom, formula: &PointerStore) {
        for polarity in [true, false] {
            let ids = std::mem::take(&mut self.lists[CLiteral::new(atom, polarity).index()]);
            for id in ids {
                self.remove_clause(id, formula);
            }
        }
    }

    /// Drop one clause from every list mentioning it.
    fn remove_clause(&mut self, id: ClauseId, formula: &PointerStore) {
        for literal in formula.clause(id) {
            self.lists[literal.index()].retain(|entry| *entry != id);
        }
    }
}

#[cfg(test)]
mod occurrence_tests {
    use super::*;
    use crate::builder::dimacs::store_from_str;

    fn lit(int: i32) -> CLiteral {
        CLiteral::from(int)
    }

    #[test]
    fn pure_literal_roots() {
        // 1 occurs only positively, so both clauses on 1 are roots.
        let formula: PointerStore = store_from_str("1 2 0\n1 -2 0\n-2 3 -3 0\n").unwrap();
        let mut index = OccurrenceIndex::new(&formula);

        let roots = index.estimate_roots(&formula);
        assert_eq!(roots, vec![0, 1]);
        assert!(!index.has_clauses());
    }

    #[test]
    fn roots_leave_the_index() {
        let formula: PointerStore = store_from_str("1 0\n-2 3 0\n2 -3 0\n").unwrap();
        let mut index = OccurrenceIndex::new(&formula);

        let roots = index.estimate_roots(&formula);
        assert_eq!(roots, vec![0]);
        assert_eq!(index.remaining(), vec![1, 2]);
    }

    #[test]
    fn unit_clause_roots() {
        // No literal is pure, so the unit tier decides.
        let formula: PointerStore = store_from_str("1 0\n-1 2 0\n-1 3 0\n1 -2 -3 0\n").unwrap();
        let mut index = OccurrenceIndex::new(&formula);

        let roots = index.estimate_roots(&formula);
        assert_eq!(roots, vec![0]);
        assert_eq!(index.remaining(), vec![1, 2, 3]);
    }

    #[test]
    fn rarest_literal_fallback() {
        // Every literal occurs in both polarities, so rarity decides: the positive
        // literal of 1 occurs once, in the ternary clause.
        let formula: PointerStore = store_from_str("-1 2 0\n-1 3 0\n1 -2 -3 0\n").unwrap();
        let mut index = OccurrenceIndex::new(&formula);

        let roots = index.estimate_roots(&formula);
        assert_eq!(roots, vec![2]);
        assert_eq!(index.remaining(), vec![0, 1]);
    }

    #[test]
    fn blocked_set_on_and_encoding() {
        let formula: PointerStore = store_from_str("-1 2 0\n-1 3 0\n1 -2 -3 0\n").unwrap();
        let mut index = OccurrenceIndex::new(&formula);

        assert!(index.is_blocked_set(lit(1), &formula));
        assert!(index.is_blocked_set(lit(-1), &formula));
    }

    #[test]
    fn unblocked_pair() {
        // The two clauses resolve on 1 to (2 ∨ 3), which is no tautology.
        let formula: PointerStore = store_from_str("1 2 0\n-1 3 0\n").unwrap();
        let mut index = OccurrenceIndex::new(&formula);

        assert!(!index.is_blocked_set(lit(1), &formula));
    }

    #[test]
    fn removal_is_total() {
        let formula: PointerStore = store_from_str("-1 2 0\n-1 3 0\n1 -2 -3 0\n").unwrap();
        let mut index = OccurrenceIndex::new(&formula);

        index.remove(1, &formula);
        assert!(!index.has_clauses());
    }

    #[test]
    fn removal_is_selective() {
        let formula: PointerStore = store_from_str("-1 2 0\n2 3 0\n-2 -3 0\n").unwrap();
        let mut index = OccurrenceIndex::new(&formula);

        index.remove(1, &formula);
        assert_eq!(index.remaining(), vec![1, 2]);
        assert_eq!(index.occurrences(lit(2)), &[1]);
    }
}
