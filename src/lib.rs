//! A library for identifying and analyzing propositional formulas written in conjunctive
//! normal form.
//!
//! cnfident reads DIMACS CNF files and produces artifacts which identify a formula
//! without solving it:
//!
//! - The [GBD hash](identify::gbd_hash): a cryptographic digest of the name-normalized
//!   clause text, the primary key of external benchmark databases.
//! - The [Weisfeiler-Leman hash](identify::iso_hash): a 64-bit value equal for formulas
//!   differing only by variable renaming or polarity flips, computed by color refinement
//!   over the literal hypergraph.
//! - A [gate formula](gates::formula::GateFormula): the hierarchical gate structure of
//!   the clauses, recovered by [gate recognition](gates) through syntactic patterns and,
//!   optionally, semantic checks against an embedded SAT solver.
//! - [Feature vectors](features) over both of the above.
//!
//! # Orientation
//!
//! The library is designed around [clause stores](db::store): a formula is parsed once
//! into whichever memory layout the analysis at hand prefers, and the analyses read the
//! store without mutating it.
//!
//! Useful starting points:
//! - The [builder] to parse a DIMACS file, with transparent decompression.
//! - The [gates] module for the structure of a gate analysis.
//! - The [identify] module for the two hashes.
//! - The [configuration](config) for the supported knobs.
//!
//! If you're in search of cnf formulas consider:
//! - The SATLIB benchmark problems at [www.cs.ubc.ca/~hoos/SATLIB/benchm.html](https://www.cs.ubc.ca/~hoos/SATLIB/benchm.html)
//! - The Global Benchmark Database at [benchmark-database.de](https://benchmark-database.de)
//!
//! # Example
//!
//! ```rust
//! # use cnfident::builder::dimacs::store_from_str;
//! # use cnfident::config::GateConfig;
//! # use cnfident::db::store::PointerStore;
//! # use cnfident::gates::GateAnalyzer;
//! // 1 <-> (2 & 3), constrained true.
//! let dimacs = "1 0\n-1 2 0\n-1 3 0\n1 -2 -3 0\n";
//! let formula: PointerStore = store_from_str(dimacs).unwrap();
//!
//! let analyzer = GateAnalyzer::new(&formula, GateConfig::default()).unwrap();
//! let gates = analyzer.analyze();
//!
//! assert_eq!(gates.root_count(), 1);
//! assert_eq!(gates.gate_count(), 1);
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, with a target per subsystem
//! (listed in [misc::log]), and no log implementation is provided.
//! For example, with [env_logger](https://docs.rs/env_logger/latest/env_logger/) logs of
//! gate recognition can be narrowed with `RUST_LOG=gates …`.

pub mod builder;
pub mod config;
pub mod db;
pub mod features;
pub mod gates;
pub mod generic;
pub mod identify;
pub mod misc;
pub mod structures;
pub mod types;

pub use features::{extract_base_features, extract_gate_features};
pub use identify::{gbd_hash, iso_hash};
