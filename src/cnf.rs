use std::collections::HashSet;

use crate::{Clause, Formula, Lit};

/// A clause emptied by simplification. Holds the position of that clause in the
/// clause list it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict(pub usize);

// the remaining clauses of one search node
// every lookup takes the first match in clause order, so runs are reproducible
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
}

impl From<&Formula> for Cnf {
    fn from(value: &Formula) -> Self {
        Cnf {
            clauses: value.clauses().to_vec(),
        }
    }
}

impl Cnf {
    pub fn new(clauses: Vec<Clause>) -> Cnf {
        Cnf { clauses }
    }

    pub fn num_clause(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn empty_clause(&self) -> Option<usize> {
        self.clauses.iter().position(Clause::is_empty)
    }

    pub fn find_unit(&self) -> Option<Lit> {
        self.clauses
            .iter()
            .find(|clause| clause.len() == 1)
            .and_then(Clause::first)
    }

    // a literal whose negation occurs nowhere, first in encounter order
    pub fn find_pure(&self) -> Option<Lit> {
        let occurring = self.lits().collect::<HashSet<_>>();
        self.lits().find(|lit| !occurring.contains(&!*lit))
    }

    pub fn pivot(&self) -> Option<Lit> {
        self.clauses.first().and_then(Clause::first)
    }

    // based on lit is true
    // clauses containing lit are satisfied and dropped, !lit is removed from the rest
    pub fn simplify(&self, lit: Lit) -> Result<Cnf, Conflict> {
        let mut clauses = Vec::with_capacity(self.clauses.len());
        for (clause_id, clause) in self.clauses.iter().enumerate() {
            if clause.contains(lit) {
                continue;
            }
            if clause.contains(!lit) {
                let reduced: Clause = clause.iter().copied().filter(|&l| l != !lit).collect();
                if reduced.is_empty() {
                    log::trace!("clause {} emptied by {}", clause_id, lit);
                    return Err(Conflict(clause_id));
                }
                clauses.push(reduced);
            } else {
                clauses.push(clause.clone());
            }
        }
        Ok(Cnf { clauses })
    }

    // a pure literal never shortens a clause, so only satisfied clauses go
    pub fn eliminate_pure(&mut self, lit: Lit) {
        self.clauses.retain(|clause| !clause.contains(lit));
    }

    fn lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.clauses.iter().flat_map(|clause| clause.iter().copied())
    }
}
