//! Reader for the subset of DIMACS CNF used here: one clause per line.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    err::{ErrorKind, ParseError},
    Clause, Formula, Lit,
};

pub fn load(path: impl AsRef<Path>) -> Result<Formula, ErrorKind> {
    let path = path.as_ref();
    log::debug!("loading {}", path.display());
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

/// Read a formula, one clause per line.
///
/// Blank lines and lines starting with `c` or `p` are skipped, and a line starting
/// with `%` ends the input. Every other line is a list of integers ending in `0`;
/// a lone `0` is the empty clause. The problem line is not checked against the
/// clauses.
pub fn parse(reader: impl BufRead) -> Result<Formula, ErrorKind> {
    let mut clauses = vec![];

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let line_number = index + 1;

        match line.chars().next() {
            None | Some('c') | Some('p') => continue,
            // SATLIB trailer
            Some('%') => break,
            Some(_) => clauses.push(parse_clause(line, line_number)?),
        }
    }

    log::debug!("read {} clauses", clauses.len());
    Ok(Formula::new(clauses))
}

fn parse_clause(line: &str, line_number: usize) -> Result<Clause, ParseError> {
    let mut values = vec![];
    for token in line.split_whitespace() {
        let value = token.parse::<i64>().map_err(|_| ParseError::Token {
            line: line_number,
            token: token.to_string(),
        })?;
        values.push(value);
    }

    match values.pop() {
        Some(0) => (),
        _ => return Err(ParseError::Unterminated(line_number)),
    }

    values
        .into_iter()
        .map(|value| {
            if value == 0 {
                return Err(ParseError::MisplacedTerminator(line_number));
            }
            i32::try_from(value)
                .ok()
                .and_then(Lit::new)
                .ok_or(ParseError::Magnitude {
                    line: line_number,
                    value,
                })
        })
        .collect()
}
