use std::{
    collections::{BTreeSet, HashSet},
    fmt,
};

use crate::{Clause, Formula, Lit};

/// A clause as a set of literals: repeats collapse and equal sets are the same clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LitSet(BTreeSet<Lit>);

impl LitSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, lit: Lit) -> bool {
        self.0.contains(&lit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lit> {
        self.0.iter()
    }
}

impl From<&Clause> for LitSet {
    fn from(value: &Clause) -> Self {
        LitSet(value.iter().copied().collect())
    }
}

impl From<&[i32]> for LitSet {
    fn from(value: &[i32]) -> Self {
        LitSet(value.iter().map(|&lit| Lit::from_dimacs(lit)).collect())
    }
}

impl fmt::Display for LitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, lit) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", lit)?;
        }
        write!(f, "}}")
    }
}

/// Every resolvent of `left` and `right`, one for each literal of `left` whose
/// negation is in `right`, in literal order.
///
/// Resolving on `lit` removes `lit` from `left` and `!lit` from `right` only, so a
/// literal pair on another variable survives as a tautological resolvent.
pub fn resolve(left: &LitSet, right: &LitSet) -> Vec<LitSet> {
    left.iter()
        .filter(|&&lit| right.contains(!lit))
        .map(|&lit| {
            let resolvent = left
                .iter()
                .filter(|&&l| l != lit)
                .chain(right.iter().filter(|&&l| l != !lit))
                .copied()
                .collect();
            LitSet(resolvent)
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Resolvents computed, duplicates and tautologies included.
    pub attempts: usize,
    pub passes: usize,
    /// 1-based pool positions of the clauses added by resolution.
    pub derived: Vec<usize>,
}

impl fmt::Display for ResolutionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resolution_attempts = {}, passes = {}, derived_clauses = {}",
            self.attempts,
            self.passes,
            self.derived.len()
        )
    }
}

/// Saturation of a clause set under pairwise resolution.
///
/// Complete, and impractical beyond toy inputs: every pass rescans all pairs of
/// the pool, and the pool may grow exponentially. Clauses are never removed.
#[derive(Debug, Clone)]
pub struct ResolutionEngine {
    input: Vec<LitSet>,
    pool: Vec<LitSet>,
    seen: HashSet<LitSet>,
    stats: ResolutionStats,
}

impl ResolutionEngine {
    pub fn new(formula: &Formula) -> ResolutionEngine {
        let input: Vec<LitSet> = formula.clauses().iter().map(LitSet::from).collect();
        let pool = input.clone();
        let seen = input.iter().cloned().collect();
        ResolutionEngine {
            input,
            pool,
            seen,
            stats: ResolutionStats::default(),
        }
    }

    pub fn stats(&self) -> &ResolutionStats {
        &self.stats
    }

    pub fn pool(&self) -> &[LitSet] {
        &self.pool
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Distinct clauses known, input and derived.
    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }

    /// `true` if the empty clause is derivable, i.e. the formula is unsatisfiable.
    /// Every call starts over from the formula.
    pub fn solve(&mut self) -> bool {
        self.pool = self.input.clone();
        self.seen = self.input.iter().cloned().collect();
        self.stats = ResolutionStats::default();

        if let Some(clause_id) = self.pool.iter().position(LitSet::is_empty) {
            log::debug!("clause {} is empty", clause_id);
            return true;
        }

        loop {
            self.stats.passes += 1;
            let current_len = self.pool.len();

            for i in 0..current_len {
                for j in i + 1..current_len {
                    for resolvent in resolve(&self.pool[i], &self.pool[j]) {
                        self.stats.attempts += 1;
                        if self.seen.contains(&resolvent) {
                            continue;
                        }
                        let empty = resolvent.is_empty();
                        log::trace!("{} from clauses {} and {}", resolvent, i + 1, j + 1);
                        self.seen.insert(resolvent.clone());
                        self.pool.push(resolvent);
                        self.stats.derived.push(self.pool.len());
                        if empty {
                            log::debug!("resolution finished (unsat): {}", self.stats);
                            return true;
                        }
                    }
                }
            }

            log::debug!(
                "pass {}: pool {} -> {}",
                self.stats.passes,
                current_len,
                self.pool.len()
            );
            if self.pool.len() == current_len {
                log::debug!("resolution finished (sat): {}", self.stats);
                return false;
            }
        }
    }
}
