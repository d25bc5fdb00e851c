use std::collections::BTreeMap;

use crate::{Formula, Lit, Var};

/// Truth values for the variables decided so far.
///
/// Variables are keys rather than indices, so arbitrarily large variable numbers
/// cost nothing. Variables never assigned are "don't care".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    values: BTreeMap<Var, bool>,
}

impl Model {
    pub fn new() -> Model {
        Model::default()
    }

    /// Make `lit` true.
    pub fn assign(&mut self, lit: Lit) {
        self.values.insert(lit.var(), lit.is_positive());
    }

    pub fn value(&self, var: Var) -> Option<bool> {
        self.values.get(&var).copied()
    }

    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.value(lit.var()).map(|value| value == lit.is_positive())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The true literal of every assigned variable, by ascending variable.
    pub fn lits(&self) -> impl Iterator<Item = Lit> + '_ {
        self.values
            .iter()
            .map(|(&var, &value)| Lit::with_value(var, value))
    }

    pub fn true_vars(&self) -> Vec<Var> {
        self.vars(true)
    }

    pub fn false_vars(&self) -> Vec<Var> {
        self.vars(false)
    }

    fn vars(&self, val: bool) -> Vec<Var> {
        self.values
            .iter()
            .filter(|(_, &v)| v == val)
            .map(|(&var, _)| var)
            .collect()
    }

    /// Every clause has a literal made true by this model.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula
            .clauses()
            .iter()
            .all(|clause| clause.iter().any(|&lit| self.lit_value(lit) == Some(true)))
    }
}
