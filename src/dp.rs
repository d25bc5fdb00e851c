use std::fmt;

use crate::{cnf::Conflict, Clause, Formula, Lit, Var};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DpStats {
    /// Variables whose elimination completed without a contradiction.
    pub vars_eliminated: usize,
    /// Non-empty resolvents produced over the whole run.
    pub resolvents: usize,
}

impl fmt::Display for DpStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vars_eliminated = {}, resolvents = {}",
            self.vars_eliminated, self.resolvents
        )
    }
}

/// Davis–Putnam elimination: variables are removed one at a time by resolving
/// every clause containing the variable against every clause containing its
/// negation.
#[derive(Debug, Clone)]
pub struct DpSolver {
    input: Vec<Clause>,
    clauses: Vec<Clause>,
    stats: DpStats,
}

impl DpSolver {
    pub fn new(formula: &Formula) -> DpSolver {
        DpSolver {
            input: formula.clauses().to_vec(),
            clauses: formula.clauses().to_vec(),
            stats: DpStats::default(),
        }
    }

    pub fn stats(&self) -> &DpStats {
        &self.stats
    }

    /// The clause set as the last elimination left it.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// `true` if the formula is satisfiable. Every call starts over from the formula.
    pub fn solve(&mut self) -> bool {
        self.clauses = self.input.clone();
        self.stats = DpStats::default();

        loop {
            if self.clauses.is_empty() {
                log::debug!("dp finished (sat): {}", self.stats);
                return true;
            }
            if self.clauses.iter().any(Clause::is_empty) {
                log::debug!("dp finished (unsat): {}", self.stats);
                return false;
            }

            let var = match self.choose_var() {
                Some(var) => var,
                None => return true,
            };
            if let Err(Conflict(clause_id)) = self.eliminate(var) {
                log::debug!(
                    "eliminating {} emptied a resolvent of clause {} (unsat): {}",
                    var,
                    clause_id,
                    self.stats
                );
                return false;
            }
        }
    }

    // the variable of the first literal of the first non-empty clause
    fn choose_var(&self) -> Option<Var> {
        self.clauses.iter().find_map(Clause::first).map(Lit::var)
    }

    /// Replace every clause mentioning `var` by the resolvents on `var`.
    ///
    /// Clauses with both polarities of `var` are true whatever `var` is and are
    /// dropped without resolving. On conflict the clause set is left as it was.
    pub fn eliminate(&mut self, var: Var) -> Result<(), Conflict> {
        let positive = Lit::with_value(var, true);
        let negative = !positive;

        let mut pos = vec![];
        let mut neg = vec![];
        let mut rest = vec![];
        for clause in &self.clauses {
            match (clause.contains(positive), clause.contains(negative)) {
                (true, true) => (),
                (true, false) => pos.push(clause),
                (false, true) => neg.push(clause),
                (false, false) => rest.push(clause.clone()),
            }
        }

        let mut resolvents = Vec::with_capacity(pos.len() * neg.len());
        for (clause_id, c1) in pos.iter().enumerate() {
            for c2 in &neg {
                let resolvent = resolve_on(var, c1, c2);
                if resolvent.is_empty() {
                    return Err(Conflict(clause_id));
                }
                resolvents.push(resolvent);
            }
        }

        log::debug!(
            "eliminate {}: {} positive, {} negative, {} untouched, {} resolvents",
            var,
            pos.len(),
            neg.len(),
            rest.len(),
            resolvents.len()
        );
        self.stats.resolvents += resolvents.len();
        self.stats.vars_eliminated += 1;

        rest.extend(resolvents);
        self.clauses = rest;
        Ok(())
    }
}

// union of both clauses without repeats and without either literal of var
fn resolve_on(var: Var, c1: &Clause, c2: &Clause) -> Clause {
    let mut resolvent: Vec<Lit> = Vec::with_capacity(c1.len() + c2.len());
    for &lit in c1.iter().chain(c2.iter()) {
        if lit.var() != var && !resolvent.contains(&lit) {
            resolvent.push(lit);
        }
    }
    Clause::new(resolvent)
}
