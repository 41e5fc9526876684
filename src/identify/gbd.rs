//! The GBD hash, aka. the canonical name-level digest of a CNF.
//!
//! The identifier benchmark databases key instances by: variable names are normalized to
//! a gapless range, clauses are emitted in parse order as space-separated signed
//! decimals with a `0` terminator and newline separator, and the byte stream is run
//! through a cryptographic digest.
//!
//! Unlike the [Weisfeiler-Leman hash](super::wl) this digest is sensitive to polarity
//! flips and to clause order --- it identifies a *file* up to variable naming, not a
//! formula up to isomorphism.

use sha2::{Digest, Sha256};

use crate::{db::store::ClauseStore, structures::clause::Clause};

/// The hex digest of the store's canonical clause text.
pub fn gbd_hash_of_store<S: ClauseStore>(store: &S) -> String {
    let mut hasher = Sha256::new();
    for clause in store.clauses() {
        hasher.update(clause.as_dimacs(true).as_bytes());
        hasher.update(b"\n");
    }

    let digest = hasher.finalize();
    let mut hex = String::with_capacity(2 * digest.len());
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}
