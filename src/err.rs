//! Error types.
//!
//! Only loading a formula can fail. Satisfiable and unsatisfiable are both answers,
//! not errors, so no engine returns one of these.

use std::{fmt, io};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Parse(ParseError),
    Io(io::ErrorKind),
}

/// Noted errors when reading DIMACS input. Lines are numbered from 1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A token on a clause line is not an integer.
    Token { line: usize, token: String },

    /// A clause line does not end with `0`.
    Unterminated(usize),

    /// A `0` appears before the end of a clause line.
    MisplacedTerminator(usize),

    /// The magnitude of a literal does not fit a literal.
    Magnitude { line: usize, value: i64 },
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

impl From<io::Error> for ErrorKind {
    fn from(e: io::Error) -> Self {
        ErrorKind::Io(e.kind())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Token { line, token } => {
                write!(f, "line {}: '{}' is not an integer", line, token)
            }
            ParseError::Unterminated(line) => write!(f, "line {}: clause is not terminated by 0", line),
            ParseError::MisplacedTerminator(line) => {
                write!(f, "line {}: 0 before the end of the clause", line)
            }
            ParseError::Magnitude { line, value } => {
                write!(f, "line {}: literal {} is out of range", line, value)
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Parse(e) => write!(f, "parse error, {}", e),
            ErrorKind::Io(kind) => write!(f, "io error, {}", kind),
        }
    }
}

impl std::error::Error for ErrorKind {}
