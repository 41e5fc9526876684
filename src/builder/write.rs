//! Writing a clause store back out in DIMACS form.
//!
//! The writer emits a `p cnf` header with recomputed totals, then every clause in the
//! store's iteration order.
//! As stored clauses are canonical, writing and re-reading a formula is stable:
//! `parse(write(parse(F)))` equals `parse(F)` as a multiset of clauses.

use std::io::Write;

use crate::{db::store::ClauseStore, structures::clause::Clause, types::err::ErrorKind};

/// Write the store to the given sink in DIMACS form.
pub fn write_dimacs<S: ClauseStore>(
    writer: &mut impl Write,
    store: &S,
) -> Result<(), ErrorKind> {
    writeln!(writer, "p cnf {} {}", store.var_count(), store.clause_count())?;
    for clause in store.clauses() {
        writeln!(writer, "{}", clause.as_dimacs(true))?;
    }
    Ok(())
}

/// Whether the file's clauses are already in canonical form.
///
/// True iff re-emitting the parsed store would preserve every clause as written: no
/// duplicate literals, no tautologies, no empty clauses, literals sorted.
/// A `false` answer means sanitization would alter the formula.
pub fn check_sanitized(
    reader: impl std::io::BufRead,
) -> Result<bool, ErrorKind> {
    use crate::{
        builder::dimacs::{read_dimacs, ParserInfo},
        db::store::PointerStore,
    };

    let mut raw_lines = Vec::default();
    let mut sanitized = true;

    let mut store = PointerStore::default();
    let info: ParserInfo;
    {
        let mut buffered = Vec::default();
        for line in reader.lines() {
            let line = line?;
            if !(line.starts_with('c') || line.starts_with('p') || line.is_empty()) {
                raw_lines.push(line.clone());
            }
            buffered.extend_from_slice(line.as_bytes());
            buffered.push(b'\n');
        }
        info = read_dimacs(buffered.as_slice(), &mut store)?;
    }

    if info.dropped_empty > 0 || info.dropped_tautologies > 0 {
        sanitized = false;
    }

    // Cheap structural comparison: the canonical text of the parsed clauses against the
    // clause lines as written.
    if sanitized {
        let canonical: Vec<String> = store
            .clauses()
            .map(|clause| clause.as_dimacs(true))
            .collect();
        let written: Vec<String> = raw_lines
            .iter()
            .flat_map(|line| split_clause_lines(line))
            .collect();
        sanitized = canonical == written;
    }

    Ok(sanitized)
}

/// Clause text as the writer would emit it, one string per `0`-terminated clause.
fn split_clause_lines(line: &str) -> Vec<String> {
    let mut clauses = Vec::default();
    let mut current = String::default();
    for token in line.split_whitespace() {
        if token == "0" {
            current.push('0');
            clauses.push(std::mem::take(&mut current));
        } else {
            current.push_str(token);
            current.push(' ');
        }
    }
    if !current.is_empty() {
        clauses.push(current);
    }
    clauses
}

#[cfg(test)]
mod write_tests {
    use super::*;
    use crate::{builder::dimacs::store_from_str, db::store::PointerStore};

    #[test]
    fn round_trip_is_stable() {
        let dimacs = "p cnf 3 3\n2 1 0\n-1 3 3 0\n1 -1 2 0\n";
        let store: PointerStore = store_from_str(dimacs).unwrap();

        let mut first = Vec::default();
        write_dimacs(&mut first, &store).unwrap();

        let reparsed: PointerStore =
            store_from_str(std::str::from_utf8(&first).unwrap()).unwrap();
        let mut second = Vec::default();
        write_dimacs(&mut second, &reparsed).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn sanitized_detection() {
        assert!(check_sanitized("p cnf 2 1\n1 2 0\n".as_bytes()).unwrap());
        assert!(!check_sanitized("2 1 0\n".as_bytes()).unwrap());
        assert!(!check_sanitized("1 -1 0\n".as_bytes()).unwrap());
    }
}
