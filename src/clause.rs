use std::collections::HashSet;

use crate::lit::{Lit, Var};

/// A disjunction of literals, kept in insertion order and possibly with repeats.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause(pub(crate) Vec<Lit>);

impl Clause {
    pub fn new(lits: Vec<Lit>) -> Self {
        Clause(lits)
    }

    pub fn inner(&self) -> &[Lit] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, lit: Lit) -> bool {
        self.0.contains(&lit)
    }

    pub fn first(&self) -> Option<Lit> {
        self.0.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lit> {
        self.0.iter()
    }

    /// Whether some variable occurs in both polarities.
    pub fn is_tautology(&self) -> bool {
        self.0.iter().any(|&lit| self.contains(!lit))
    }
}

impl From<&[i32]> for Clause {
    fn from(value: &[i32]) -> Self {
        Clause(value.iter().map(|&lit| Lit::from_dimacs(lit)).collect())
    }
}

impl From<Vec<i32>> for Clause {
    fn from(value: Vec<i32>) -> Self {
        Clause::from(value.as_slice())
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Clause(iter.into_iter().collect())
    }
}

/// A conjunction of clauses, in the order they were read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Formula { clauses }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// No clauses at all, so vacuously true.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Some clause has no literals, so the formula is a contradiction.
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn max_var(&self) -> Var {
        self.lits().map(Lit::var).max().unwrap_or(0)
    }

    pub fn var_count(&self) -> usize {
        self.lits().map(Lit::var).collect::<HashSet<_>>().len()
    }

    fn lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.clauses.iter().flat_map(|clause| clause.iter().copied())
    }
}

impl From<&[Vec<i32>]> for Formula {
    fn from(value: &[Vec<i32>]) -> Self {
        Formula::new(value.iter().map(|clause| Clause::from(clause.as_slice())).collect())
    }
}

impl From<Vec<Vec<i32>>> for Formula {
    fn from(value: Vec<Vec<i32>>) -> Self {
        Formula::from(value.as_slice())
    }
}
