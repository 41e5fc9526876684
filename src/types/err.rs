/*!
Error types used in the library.

- Some of these surface misuse of the input, e.g. a malformed DIMACS stream.
- Others surface the environment, e.g. a missing file or an exceeded resource limit.
- Internal invariant violations are not represented here, and are treated as bugs.

Names of the error enums --- for the most part --- overlap with the area the error is from.
As such, throughout the library `err::{self}` is often used to prefix use of the types with `err::`.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error related to parsing.
    Parse(ParseError),

    /// An error related to file input or output.
    ///
    /// The kind is kept rather than the full [std::io::Error] so errors remain comparable.
    Io(std::io::ErrorKind),

    /// A resource limit was exceeded.
    Limit(LimitError),

    /// An error related to the semantic gate oracle.
    Oracle(OracleError),
}

/// Errors during parsing.
///
/// Offsets count bytes from the start of the stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification line of a DIMACS input.
    ProblemSpecification { offset: usize },

    /// A token which is not a (signed, non-zero) integer where one was required.
    BadInteger { offset: usize },

    /// The stream ended inside a clause, with no terminating `0`.
    MissingDelimiter,

    /// An atom outside the representable range.
    AtomTooLarge { offset: usize },
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e.kind())
    }
}

/// Resource limits, exceeded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LimitError {
    /// The wall-clock budget was exhausted.
    Time,

    /// The memory budget was exhausted.
    Memory,

    /// The generated output exceeded the file-size budget.
    FileSize,
}

impl From<LimitError> for ErrorKind {
    fn from(e: LimitError) -> Self {
        ErrorKind::Limit(e)
    }
}

/// Errors from the semantic gate oracle.
///
/// A solver failure *during* a query is not an error: the query answers
/// [Unknown](crate::gates::oracle::SolveResult::Unknown), and unknown answers never
/// recognize a gate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OracleError {
    /// The backing solver could not be initialized.
    Unavailable,
}

impl From<OracleError> for ErrorKind {
    fn from(e: OracleError) -> Self {
        ErrorKind::Oracle(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ErrorKind::Parse(ParseError::ProblemSpecification { offset }) => {
                write!(f, "Malformed problem specification at byte {offset}")
            }
            ErrorKind::Parse(ParseError::BadInteger { offset }) => {
                write!(f, "Malformed integer at byte {offset}")
            }
            ErrorKind::Parse(ParseError::MissingDelimiter) => {
                write!(f, "Stream ended inside a clause")
            }
            ErrorKind::Parse(ParseError::AtomTooLarge { offset }) => {
                write!(f, "Atom out of range at byte {offset}")
            }
            ErrorKind::Io(kind) => write!(f, "IO failure: {kind}"),
            ErrorKind::Limit(LimitError::Time) => write!(f, "Time Limit Exceeded"),
            ErrorKind::Limit(LimitError::Memory) => write!(f, "Memory Limit Exceeded"),
            ErrorKind::Limit(LimitError::FileSize) => write!(f, "File Size Limit Exceeded"),
            ErrorKind::Oracle(OracleError::Unavailable) => write!(f, "Solver unavailable"),
        }
    }
}
