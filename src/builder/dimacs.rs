//! Reading DIMACS CNF streams into a clause store.
//!
//! The parser accepts the usual benchmark-instance liberties: the `p cnf` header is
//! optional and its counts are ignored (totals are recomputed), `c` comment lines may
//! appear anywhere, and a `%` line ends the formula early (SATLIB instances carry one).
//!
//! Every clause is canonicalized before the store sees it:
//! - literals sorted, duplicates dropped;
//! - clauses holding a complementary pair (tautologies) dropped entirely;
//! - empty clauses dropped with a logged warning.
//!
//! Errors carry the byte offset of the offending token.

use std::io::BufRead;

use crate::{
    db::store::ClauseStore,
    misc::log::targets::{self},
    structures::{
        clause::CClause,
        literal::{Atom, CLiteral, Literal},
    },
    types::err::{self, ParseError},
};

/// Totals observed while parsing a DIMACS stream.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParserInfo {
    /// The atom count a `p cnf` header promised, if any.
    pub expected_atoms: Option<usize>,

    /// The clause count a `p cnf` header promised, if any.
    pub expected_clauses: Option<usize>,

    /// Clauses handed to the store, after canonicalization.
    pub added_clauses: usize,

    /// Clauses dropped as tautologies.
    pub dropped_tautologies: usize,

    /// Clauses dropped as empty.
    pub dropped_empty: usize,
}

/// Reads a DIMACS stream into the given store.
///
/// ```rust
/// # use cnfident::builder::dimacs::read_dimacs;
/// # use cnfident::db::store::{ClauseStore, PointerStore};
/// let dimacs = "
/// p cnf 3 3
/// c an and gate
/// -1 2 0
/// -1 3 0
/// 1 -2 -3 0
/// ";
///
/// let mut store = PointerStore::default();
/// let info = read_dimacs(dimacs.as_bytes(), &mut store).unwrap();
///
/// assert_eq!(info.added_clauses, 3);
/// assert_eq!(store.var_count(), 3);
/// ```
pub fn read_dimacs<S: ClauseStore>(
    mut reader: impl BufRead,
    store: &mut S,
) -> Result<ParserInfo, err::ErrorKind> {
    let mut buffer = String::default();
    let mut clause_buffer: CClause = Vec::default();
    let mut info = ParserInfo::default();

    // Bytes consumed before the line in the buffer, for error offsets.
    let mut offset = 0;

    'line_loop: loop {
        buffer.clear();
        let read = match reader.read_line(&mut buffer) {
            Ok(0) => break 'line_loop,
            Ok(read) => read,
            Err(e) => return Err(err::ErrorKind::from(e)),
        };

        match buffer.chars().next() {
            Some('c') | Some('\n') => {}

            Some('%') => break 'line_loop,

            Some('p') => {
                let mut details = buffer.split_whitespace().skip(1);
                match (details.next(), details.next(), details.next()) {
                    (Some("cnf"), Some(atoms), Some(clauses)) => {
                        let atoms: usize = match atoms.parse() {
                            Ok(count) => count,
                            Err(_) => {
                                return Err(err::ErrorKind::from(
                                    ParseError::ProblemSpecification { offset },
                                ))
                            }
                        };
                        let clauses: usize = match clauses.parse() {
                            Ok(count) => count,
                            Err(_) => {
                                return Err(err::ErrorKind::from(
                                    ParseError::ProblemSpecification { offset },
                                ))
                            }
                        };
                        info.expected_atoms = Some(atoms);
                        info.expected_clauses = Some(clauses);
                    }
                    _ => {
                        return Err(err::ErrorKind::from(ParseError::ProblemSpecification {
                            offset,
                        }))
                    }
                }
            }

            Some(_) => {
                for item in buffer.split_whitespace() {
                    match item {
                        "0" => {
                            let clause = std::mem::take(&mut clause_buffer);
                            store_canonical(clause, store, &mut info);
                        }
                        _ => {
                            let literal = match item.parse::<i64>() {
                                Ok(int) => match CLiteral::try_from(int) {
                                    Ok(literal) => literal,
                                    Err(_) => {
                                        return Err(err::ErrorKind::from(
                                            ParseError::AtomTooLarge { offset },
                                        ))
                                    }
                                },
                                Err(_) => {
                                    return Err(err::ErrorKind::from(ParseError::BadInteger {
                                        offset,
                                    }))
                                }
                            };
                            clause_buffer.push(literal);
                        }
                    }
                }
            }

            None => {}
        }

        offset += read;
    }

    if !clause_buffer.is_empty() {
        return Err(err::ErrorKind::from(ParseError::MissingDelimiter));
    }

    Ok(info)
}

/// Canonicalize a parsed clause and hand it to the store, or drop it.
fn store_canonical<S: ClauseStore>(mut clause: CClause, store: &mut S, info: &mut ParserInfo) {
    clause.sort_unstable();
    clause.dedup();

    if clause.is_empty() {
        log::warn!(target: targets::PARSE, "Empty clause dropped");
        info.dropped_empty += 1;
        return;
    }

    // Sorted literals of an atom are adjacent, so a complementary pair is a window.
    let tautology = clause
        .windows(2)
        .any(|pair| pair[0].atom() == pair[1].atom());
    if tautology {
        log::trace!(target: targets::PARSE, "Tautology dropped");
        info.dropped_tautologies += 1;
        return;
    }

    store.add_clause(clause);
    info.added_clauses += 1;
}

/// Reads a DIMACS string into a fresh store, of use in tests and examples.
pub fn store_from_str<S: ClauseStore>(dimacs: &str) -> Result<S, err::ErrorKind> {
    let mut store = S::default();
    read_dimacs(dimacs.as_bytes(), &mut store)?;
    Ok(store)
}

/// The maximum atom the parser accepts.
pub const ATOM_PARSE_MAX: Atom = Atom::MAX >> 1;

#[cfg(test)]
mod dimacs_parser_tests {
    use super::*;
    use crate::db::store::PointerStore;

    #[test]
    fn missing_delimiter() {
        let mut store = PointerStore::default();
        assert_eq!(
            read_dimacs("1 2".as_bytes(), &mut store),
            Err(err::ErrorKind::Parse(ParseError::MissingDelimiter))
        );
    }

    #[test]
    fn bad_problem_spec() {
        let mut store = PointerStore::default();
        assert_eq!(
            read_dimacs("p cnf\n1 2 0".as_bytes(), &mut store),
            Err(err::ErrorKind::Parse(ParseError::ProblemSpecification {
                offset: 0
            }))
        );
    }

    #[test]
    fn bad_integer_offset() {
        let mut store = PointerStore::default();
        // The comment line is 10 bytes, so the bad token's line begins at byte 10.
        assert_eq!(
            read_dimacs("c comment\n1 x 0\n".as_bytes(), &mut store),
            Err(err::ErrorKind::Parse(ParseError::BadInteger { offset: 10 }))
        );
    }

    #[test]
    fn empty_stream_ok() {
        let mut store = PointerStore::default();
        let info = read_dimacs("\n\n".as_bytes(), &mut store).unwrap();
        assert_eq!(info.added_clauses, 0);
        assert_eq!(store.clause_count(), 0);
    }

    #[test]
    fn header_counts_recorded_not_trusted() {
        let mut store = PointerStore::default();
        let info = read_dimacs("p cnf 100 100\n1 2 0\n".as_bytes(), &mut store).unwrap();

        assert_eq!(info.expected_atoms, Some(100));
        assert_eq!(info.added_clauses, 1);
        assert_eq!(store.var_count(), 2);
    }

    #[test]
    fn duplicates_and_tautologies() {
        let mut store = PointerStore::default();
        let info = read_dimacs("1 1 2 0\n1 -1 2 0\n0\n".as_bytes(), &mut store).unwrap();

        assert_eq!(info.added_clauses, 1);
        assert_eq!(info.dropped_tautologies, 1);
        assert_eq!(info.dropped_empty, 1);
        assert_eq!(store.clause(0).len(), 2);
    }

    #[test]
    fn percent_ends_formula() {
        let mut store = PointerStore::default();
        let info = read_dimacs("1 0\n%\n0\nanything".as_bytes(), &mut store).unwrap();
        assert_eq!(info.added_clauses, 1);
    }

    #[test]
    fn clauses_arrive_sorted() {
        let mut store = PointerStore::default();
        read_dimacs("3 -1 2 0\n".as_bytes(), &mut store).unwrap();
        let ints: Vec<isize> = store.clause(0).iter().map(|l| l.as_int()).collect();
        assert_eq!(ints, vec![-1, 2, 3]);
    }
}
