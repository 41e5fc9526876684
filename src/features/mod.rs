/*!
Feature extraction: named float vectors over a formula and its gate structure.

Straightforward reductions over already-loaded data, kept apart from the analyses that
produce the data.
Feature names are stable, as downstream consumers key records by them.
*/

use std::path::Path;

use crate::{
    builder,
    config::GateConfig,
    db::store::{ClauseStore, PointerStore},
    gates::{formula::GateFormula, GateAnalyzer},
    structures::literal::Literal,
    types::err::{self},
};

/// A named feature record.
pub type FeatureRecord = Vec<(&'static str, f64)>;

/// Structural statistics of the formula itself.
pub fn base_features(store: &PointerStore) -> FeatureRecord {
    let mut size_counts = [0_usize; 10];
    let mut horn = 0_usize;
    let mut inverted_horn = 0_usize;
    let mut positive_literals = 0_usize;
    let mut negative_literals = 0_usize;
    let mut literal_total = 0_usize;

    for clause in store.clauses() {
        let bucket = std::cmp::min(clause.len(), 10) - 1;
        size_counts[bucket] += 1;

        let positive = clause.iter().filter(|literal| literal.polarity()).count();
        let negative = clause.len() - positive;
        if positive <= 1 {
            horn += 1;
        }
        if negative <= 1 {
            inverted_horn += 1;
        }
        positive_literals += positive;
        negative_literals += negative;
        literal_total += clause.len();
    }

    let clause_count = store.clause_count();
    let mean_length = match clause_count {
        0 => 0.0,
        _ => literal_total as f64 / clause_count as f64,
    };

    vec![
        ("clauses", clause_count as f64),
        ("variables", store.var_count() as f64),
        ("clause_size_1", size_counts[0] as f64),
        ("clause_size_2", size_counts[1] as f64),
        ("clause_size_3", size_counts[2] as f64),
        ("clause_size_4", size_counts[3] as f64),
        ("clause_size_5", size_counts[4] as f64),
        ("clause_size_6", size_counts[5] as f64),
        ("clause_size_7", size_counts[6] as f64),
        ("clause_size_8", size_counts[7] as f64),
        ("clause_size_9", size_counts[8] as f64),
        ("clause_size_10p", size_counts[9] as f64),
        ("horn_clauses", horn as f64),
        ("inverted_horn_clauses", inverted_horn as f64),
        ("positive_literals", positive_literals as f64),
        ("negative_literals", negative_literals as f64),
        ("literals_per_clause_mean", mean_length),
    ]
}

/// Statistics of a recognized gate structure.
pub fn gate_features(gates: &GateFormula, store: &PointerStore) -> FeatureRecord {
    let gate_count = gates.gate_count();
    let absorbed: usize = gates.gates().map(|gate| gate.fwd.len() + gate.bwd.len()).sum();
    let input_total: usize = gates.gates().map(|gate| gate.inputs.len()).sum();

    let clause_count = store.clause_count();
    let absorbed_fraction = match clause_count {
        0 => 0.0,
        _ => absorbed as f64 / clause_count as f64,
    };
    let input_mean = match gate_count {
        0 => 0.0,
        _ => input_total as f64 / gate_count as f64,
    };

    vec![
        ("gates", gate_count as f64),
        ("monotonic_gates", gates.monotonic_gate_count() as f64),
        ("roots", gates.root_count() as f64),
        ("remainder_clauses", gates.remainder.len() as f64),
        ("gate_inputs_mean", input_mean),
        ("gate_clause_fraction", absorbed_fraction),
    ]
}

/// Parse the file at the given path and extract [base_features].
pub fn extract_base_features(path: &Path) -> Result<FeatureRecord, err::ErrorKind> {
    let store: PointerStore = builder::store_from_path(path)?;
    Ok(base_features(&store))
}

/// Parse the file at the given path, run gate recognition, and extract [gate_features].
///
/// Recognition runs with patterns and the semantic oracle enabled and a single root
/// selection round.
pub fn extract_gate_features(path: &Path) -> Result<FeatureRecord, err::ErrorKind> {
    let store: PointerStore = builder::store_from_path(path)?;
    let analyzer = GateAnalyzer::new(
        &store,
        GateConfig {
            patterns: true,
            semantic: true,
            tries: 1,
            time_limit: None,
        },
    )?;
    let gates = analyzer.analyze();
    Ok(gate_features(&gates, &store))
}

#[cfg(test)]
mod feature_tests {
    use super::*;
    use crate::builder::dimacs::store_from_str;

    #[test]
    fn base_counts() {
        let store: PointerStore = store_from_str("1 0\n-1 2 0\n-2 -3 1 0\n").unwrap();
        let features = base_features(&store);

        let value = |name: &str| {
            features
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| *v)
                .unwrap()
        };

        assert_eq!(value("clauses"), 3.0);
        assert_eq!(value("variables"), 3.0);
        assert_eq!(value("clause_size_1"), 1.0);
        assert_eq!(value("clause_size_2"), 1.0);
        assert_eq!(value("clause_size_3"), 1.0);
        assert_eq!(value("horn_clauses"), 3.0);
        assert_eq!(value("positive_literals"), 3.0);
        assert_eq!(value("negative_literals"), 3.0);
        assert_eq!(value("literals_per_clause_mean"), 2.0);
    }
}
