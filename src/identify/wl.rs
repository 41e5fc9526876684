/*!
The Weisfeiler-Leman hash, aka. an isomorphism-invariant signature of a CNF.

The hash runs color refinement on the literal hypergraph of the formula: every literal
starts with the same color, and each iteration refines literal colors by combining the
colors of incident clauses, where a clause's color is the (rehashed) combination of its
literals' colors.
Comparing the final hashes of two formulas is approximately as strong as running the
1-dimensional Weisfeiler-Leman algorithm on their literal hypergraphs.

Two structural moves make the hash invariant under the symmetries of a formula rather
than merely its graph shape:

- *Cross-referencing* replaces each variable's color pair `(p, n)` by
  `(hash(p, n), hash(n, p))`, so a literal's color tracks its complement's and the pair
  moves as one under a polarity flip.
- The *variable hash* canonicalizes each pair by order before hashing, erasing which side
  was positive.

Combination everywhere is through the [kernel](super::kernel)'s commutative combiner, so
clause order and literal order within clauses are erased too.

Refinement stops early when an iteration fails to split any variable color class --- the
count of distinct variable hashes is the progress measure --- and otherwise after
`depth / 2` iterations, ending on a variable-level hash for even depths and a
clause-level hash for odd ones.

Invariants, for any CNF:
- renaming variables does not change the hash;
- flipping the polarity of any set of variables does not change the hash;
- permuting clauses, or literals within a clause, does not change the hash.

The hash of the empty formula is 0.
*/

use std::collections::HashSet;

use crate::{
    config::WlConfig,
    db::store::ClauseStore,
    identify::kernel::{self, Hash},
    misc::log::targets::{self},
    structures::literal::Literal,
};

/// One Weisfeiler-Leman run over a store.
///
/// The hasher is transient, living for a single [run](WeisfeilerLemanHasher::run).
pub struct WeisfeilerLemanHasher<'s, S: ClauseStore> {
    cnf: &'s S,
    cfg: WlConfig,

    /// Old and new color vectors, swapped by parity each iteration, indexed by literal
    /// code.
    colors: [Vec<Hash>; 2],

    iteration: u32,

    /// Distinct variable hashes of the last progress check.
    unique_hashes: HashSet<Hash>,
    previous_unique_count: usize,
}

impl<'s, S: ClauseStore> WeisfeilerLemanHasher<'s, S> {
    /// A hasher over the given store.
    ///
    /// The store is expected variable-normalized; gaps in the variable range would
    /// contribute phantom colors to the variable-level hash.
    pub fn new(cnf: &'s S, cfg: &WlConfig) -> Self {
        let cells = 2 * (cnf.var_count() as usize + 1);
        WeisfeilerLemanHasher {
            cnf,
            cfg: cfg.clone(),
            colors: [vec![1; cells], vec![1; cells]],
            iteration: 0,
            unique_hashes: HashSet::default(),
            previous_unique_count: 1,
        }
    }

    fn in_optimized_iteration(&self) -> bool {
        self.iteration == 0 && self.cfg.optimize_first_iteration
    }

    /// The color vector written by the previous iteration.
    fn old_color(&self) -> &Vec<Hash> {
        &self.colors[(self.iteration % 2) as usize]
    }

    /// The old and new color vectors, borrowed apart.
    fn color_pair(&mut self) -> (&mut Vec<Hash>, &mut Vec<Hash>) {
        let (first, second) = self.colors.split_at_mut(1);
        match self.iteration % 2 {
            0 => (&mut first[0], &mut second[0]),
            _ => (&mut second[0], &mut first[0]),
        }
    }

    /// Couple each variable's pair of literal colors.
    fn cross_reference(&mut self) {
        if self.in_optimized_iteration() {
            return;
        }
        let (old, _) = self.color_pair();
        for pair in old.chunks_exact_mut(2).skip(1) {
            let positive = kernel::hash_pair(pair[0], pair[1]);
            let negative = kernel::hash_pair(pair[1], pair[0]);
            pair[0] = positive;
            pair[1] = negative;
        }
    }

    /// One refinement step: clause colors from old literal colors, folded into the new.
    fn iteration_step(&mut self) {
        self.cross_reference();

        let optimized = self.in_optimized_iteration();
        let cnf = self.cnf;
        let (old, new) = {
            let (first, second) = self.colors.split_at_mut(1);
            match self.iteration % 2 {
                0 => (&first[0], &mut second[0]),
                _ => (&second[0], &mut first[0]),
            }
        };

        for clause in cnf.clauses() {
            let clause_color = match optimized {
                // Every literal holds the same color in the first iteration, so the
                // clause size carries all the information the clause color would.
                true => kernel::hash_u64(clause.len() as u64),
                false => {
                    let sum = kernel::hash_sum(clause.iter(), |literal| old[literal.index()]);
                    // Rehash, so unit clauses do not collide with raw literal colors.
                    kernel::hash_u64(sum)
                }
            };
            for literal in clause {
                kernel::combine(&mut new[literal.index()], clause_color);
            }
        }

        self.iteration += 1;
    }

    /// The canonical hash of one variable's color pair.
    fn variable_color_hash(positive: Hash, negative: Hash) -> Hash {
        match negative > positive {
            true => kernel::hash_pair(negative, positive),
            false => kernel::hash_pair(positive, negative),
        }
    }

    /// The combination of every variable's canonical hash.
    fn variable_hash(&self) -> Hash {
        kernel::hash_sum(self.old_color().chunks_exact(2).skip(1), |pair| {
            Self::variable_color_hash(pair[0], pair[1])
        })
    }

    /// The combination of every clause's color, after one more cross-reference.
    fn cnf_hash(&mut self) -> Hash {
        self.cross_reference();
        let old = self.old_color();
        kernel::hash_sum(self.cnf.clauses(), |clause| {
            kernel::hash_u64(kernel::hash_sum(clause.iter(), |literal| {
                old[literal.index()]
            }))
        })
    }

    /// Detect a refinement fixed point, returning the final hash on one.
    ///
    /// Refinement only ever splits color classes, so when the count of distinct
    /// variable hashes stops growing the partition is stable and further iterations
    /// cannot separate more variables.
    fn check_progress(&mut self) -> Option<Hash> {
        // Few fixed points at the start, and the check is not free.
        if self.iteration < self.cfg.first_progress_check_iteration {
            return None;
        }

        self.unique_hashes.reserve(self.previous_unique_count);
        let old = &self.colors[(self.iteration % 2) as usize];
        let mut sum = 0;
        for pair in old.chunks_exact(2).skip(1) {
            let variable_hash = Self::variable_color_hash(pair[0], pair[1]);
            self.unique_hashes.insert(variable_hash);
            kernel::combine(&mut sum, variable_hash);
        }

        if self.unique_hashes.len() <= self.previous_unique_count {
            log::debug!(target: targets::WL, "Fixed point at iteration {}", self.iteration);
            return Some(sum);
        }
        self.previous_unique_count = self.unique_hashes.len();
        self.unique_hashes.clear();
        None
    }

    /// Run the refinement to a fixed point or the configured depth.
    pub fn run(&mut self) -> Hash {
        while self.iteration < self.cfg.depth / 2 {
            if let Some(result) = self.check_progress() {
                return result;
            }
            self.iteration_step();
        }
        match self.cfg.depth % 2 {
            0 => self.variable_hash(),
            _ => self.cnf_hash(),
        }
    }

    /// Completed iterations, capped by the configured depth.
    pub fn iterations(&self) -> u32 {
        std::cmp::min(self.iteration, self.cfg.depth / 2)
    }

    /// The heap footprint of the hasher's own state.
    pub fn state_bytes(&self) -> usize {
        let cells = self.colors[0].capacity() + self.colors[1].capacity();
        (cells + self.unique_hashes.capacity()) * std::mem::size_of::<Hash>()
    }
}

/// The Weisfeiler-Leman hash of a store.
pub fn wl_hash<S: ClauseStore>(cnf: &S, cfg: &WlConfig) -> Hash {
    WeisfeilerLemanHasher::new(cnf, cfg).run()
}

#[cfg(test)]
mod wl_tests {
    use super::*;
    use crate::{
        builder::dimacs::store_from_str,
        db::store::{BucketStore, IntervalStore, PointerStore},
    };

    fn hash_of(dimacs: &str) -> Hash {
        let mut store: BucketStore = store_from_str(dimacs).unwrap();
        store.normalize_variable_names();
        wl_hash(&store, &WlConfig::default())
    }

    #[test]
    fn empty_formula_hashes_to_zero() {
        assert_eq!(hash_of("p cnf 0 0\n"), 0);
    }

    #[test]
    fn clause_order_is_erased() {
        assert_eq!(hash_of("1 0\n-2 0\n"), hash_of("-2 0\n1 0\n"));
    }

    #[test]
    fn layouts_agree() {
        let dimacs = "1 2 3 0\n-1 -2 0\n2 -3 0\n3 0\n";
        let cfg = WlConfig::default();

        let mut pointer: PointerStore = store_from_str(dimacs).unwrap();
        let mut interval: IntervalStore = store_from_str(dimacs).unwrap();
        let mut bucket: BucketStore = store_from_str(dimacs).unwrap();
        pointer.normalize_variable_names();
        interval.normalize_variable_names();
        bucket.normalize_variable_names();

        let hash = wl_hash(&pointer, &cfg);
        assert_eq!(hash, wl_hash(&interval, &cfg));
        assert_eq!(hash, wl_hash(&bucket, &cfg));
    }

    #[test]
    fn distinct_formulas_differ() {
        // Not guaranteed for every pair, though these two must separate in one
        // iteration: the clause sizes differ.
        assert_ne!(hash_of("1 2 0\n"), hash_of("1 2 3 0\n"));
    }

    #[test]
    fn odd_and_even_depths_differ_in_kind() {
        let dimacs = "1 2 0\n-1 2 0\n-2 3 0\n";
        let mut store: BucketStore = store_from_str(dimacs).unwrap();
        store.normalize_variable_names();

        let even = wl_hash(&store, &WlConfig { depth: 2, ..WlConfig::default() });
        let odd = wl_hash(&store, &WlConfig { depth: 3, ..WlConfig::default() });
        assert_ne!(even, odd);
    }
}
