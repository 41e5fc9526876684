use cnfident::{
    builder::dimacs::store_from_str,
    config::WlConfig,
    db::store::{BucketStore, ClauseStore},
    identify::{self, wl::wl_hash},
};

fn hash_of(dimacs: &str) -> u64 {
    let mut store: BucketStore = store_from_str(dimacs).unwrap();
    store.normalize_variable_names();
    wl_hash(&store, &WlConfig::default())
}

// A small pigeonhole-flavored formula with some structure to preserve.
const BASE: &str = "1 2 0\n-1 -2 0\n1 3 4 0\n-3 2 0\n-4 -2 0\n3 -4 0\n";

mod invariance {
    use super::*;

    #[test]
    fn variable_renaming() {
        // The permutation 1 -> 4 -> 2 -> 3 -> 1 applied throughout.
        let renamed = "4 3 0\n-4 -3 0\n4 1 2 0\n-1 3 0\n-2 -3 0\n1 -2 0\n";
        assert_eq!(hash_of(BASE), hash_of(renamed));
    }

    #[test]
    fn polarity_flip_of_one_variable() {
        // Variable 2 complemented throughout.
        let flipped = "1 -2 0\n-1 2 0\n1 3 4 0\n-3 -2 0\n-4 2 0\n3 -4 0\n";
        assert_eq!(hash_of(BASE), hash_of(flipped));
    }

    #[test]
    fn polarity_flip_of_every_variable() {
        let flipped = "-1 -2 0\n1 2 0\n-1 -3 -4 0\n3 -2 0\n4 2 0\n-3 4 0\n";
        assert_eq!(hash_of(BASE), hash_of(flipped));
    }

    #[test]
    fn clause_and_literal_order() {
        let shuffled = "3 -4 0\n-2 -4 0\n2 -3 0\n4 3 1 0\n-2 -1 0\n2 1 0\n";
        assert_eq!(hash_of(BASE), hash_of(shuffled));
    }

    #[test]
    fn renaming_and_flip_combined() {
        // Variables renamed 1 <-> 3 and 2 <-> 4, then variable 2 flipped.
        let original = "1 2 0\n3 4 0\n-1 -3 0\n2 -4 0\n";
        let transformed = "3 4 0\n1 -2 0\n-3 -1 0\n4 2 0\n";
        assert_eq!(hash_of(original), hash_of(transformed));
    }

    #[test]
    fn unit_swap_and_flip() {
        // Two unit clauses: swapping the clauses and flipping variable 2.
        assert_eq!(hash_of("1 0\n-2 0\n"), hash_of("2 0\n1 0\n"));
    }
}

mod separation {
    use super::*;

    #[test]
    fn different_clause_counts() {
        assert_ne!(hash_of("1 2 0\n"), hash_of("1 2 0\n-1 -2 0\n"));
    }

    #[test]
    fn different_polarity_structure() {
        // (1 | 2) & (1 | -2) is not isomorphic to (1 | 2) & (-1 | -2).
        assert_ne!(hash_of("1 2 0\n1 -2 0\n"), hash_of("1 2 0\n-1 -2 0\n"));
    }

    #[test]
    fn determinism() {
        assert_eq!(hash_of(BASE), hash_of(BASE));
    }
}

mod surface {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("cnfident_iso_{name}_{}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn empty_formula_hash_is_zero() {
        let path = temp_file("empty.cnf", b"p cnf 0 0\n");
        let result = identify::iso_hash(&path, &WlConfig::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(result, "0");
    }

    #[test]
    fn measurement_fields() {
        let path = temp_file("measured.cnf", BASE.as_bytes());
        let config = WlConfig {
            measurements: true,
            ..WlConfig::default()
        };
        let result = identify::iso_hash(&path, &config).unwrap();
        std::fs::remove_file(&path).ok();

        // hash,parse_ns,calc_ns,mem_bytes,iterations
        let fields: Vec<&str> = result.split(',').collect();
        assert_eq!(fields.len(), 5);
        for field in fields {
            assert!(field.parse::<u128>().is_ok());
        }
    }

    #[test]
    fn hash_matches_direct_computation() {
        let path = temp_file("direct.cnf", BASE.as_bytes());
        let result = identify::iso_hash(&path, &WlConfig::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(result, hash_of(BASE).to_string());
    }

    #[test]
    fn gbd_hash_is_hex() {
        let path = temp_file("gbd.cnf", BASE.as_bytes());
        let result = identify::gbd_hash(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(result.len(), 64);
        assert!(result.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

mod depth {
    use super::*;

    fn hash_at_depth(dimacs: &str, depth: u32) -> u64 {
        let mut store: BucketStore = store_from_str(dimacs).unwrap();
        store.normalize_variable_names();
        wl_hash(
            &store,
            &WlConfig {
                depth,
                ..WlConfig::default()
            },
        )
    }

    #[test]
    fn invariance_holds_at_odd_depths() {
        let original = "1 2 0\n3 4 0\n-1 -3 0\n2 -4 0\n";
        let transformed = "3 4 0\n1 -2 0\n-3 -1 0\n4 2 0\n";

        for depth in [3, 5, 7, 13] {
            assert_eq!(
                hash_at_depth(original, depth),
                hash_at_depth(transformed, depth),
                "depth {depth}"
            );
        }
    }

    #[test]
    fn invariance_holds_at_even_depths() {
        let original = "1 2 0\n3 4 0\n-1 -3 0\n2 -4 0\n";
        let transformed = "3 4 0\n1 -2 0\n-3 -1 0\n4 2 0\n";

        for depth in [2, 4, 6, 12] {
            assert_eq!(
                hash_at_depth(original, depth),
                hash_at_depth(transformed, depth),
                "depth {depth}"
            );
        }
    }

    #[test]
    fn variable_count_alone_separates_nothing_at_depth_zero() {
        // Depth 0 runs no refinement at all: the final variable hash sees only the
        // initial colors, so any two formulas with equal variable counts collide.
        assert_eq!(
            hash_at_depth("1 2 0\n", 0),
            hash_at_depth("1 0\n2 0\n", 0)
        );
    }
}
