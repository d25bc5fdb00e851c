use std::fmt;

use crate::{cnf::Conflict, Cnf, Formula, Model};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DpllStats {
    pub decisions: usize,
    /// Branch attempts that failed, including ones refuted by simplification alone.
    pub backtracks: usize,
    pub unit_propagations: usize,
    pub pure_literals: usize,
}

impl DpllStats {
    pub fn total_steps(&self) -> usize {
        self.decisions + self.backtracks + self.unit_propagations + self.pure_literals
    }
}

impl fmt::Display for DpllStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decisions = {}, backtracks = {}, unit_propagations = {}, pure_literals = {}",
            self.decisions, self.backtracks, self.unit_propagations, self.pure_literals
        )
    }
}

/// Davis–Putnam–Logemann–Loveland search with unit propagation and pure literal
/// elimination.
///
/// Every search node owns its clause list and its partial model; a branch is
/// explored on copies, so a failed branch leaves nothing behind for its sibling.
/// Recursion depth is bounded by the number of variables.
#[derive(Debug, Clone)]
pub struct DpllSolver {
    cnf: Cnf,
    stats: DpllStats,
}

impl DpllSolver {
    pub fn new(formula: &Formula) -> DpllSolver {
        DpllSolver {
            cnf: Cnf::from(formula),
            stats: DpllStats::default(),
        }
    }

    pub fn stats(&self) -> &DpllStats {
        &self.stats
    }

    /// A model of the formula, or `None` if it is unsatisfiable.
    pub fn solve(&mut self) -> Option<Model> {
        self.stats = DpllStats::default();

        if let Some(clause_id) = self.cnf.empty_clause() {
            log::debug!("clause {} is empty", clause_id);
            return None;
        }

        let result = self._dpll(self.cnf.clone(), Model::new());
        log::debug!(
            "dpll finished ({}): {}",
            if result.is_some() { "sat" } else { "unsat" },
            self.stats
        );
        result
    }

    fn propagate(&mut self, mut cnf: Cnf, model: &mut Model) -> Result<Cnf, Conflict> {
        // 1. unit propagation
        while let Some(lit) = cnf.find_unit() {
            self.stats.unit_propagations += 1;
            model.assign(lit);
            cnf = cnf.simplify(lit)?;
        }

        // 2. pure literal elimination
        while let Some(lit) = cnf.find_pure() {
            self.stats.pure_literals += 1;
            model.assign(lit);
            cnf.eliminate_pure(lit);
        }

        Ok(cnf)
    }

    fn _dpll(&mut self, cnf: Cnf, mut model: Model) -> Option<Model> {
        let cnf = match self.propagate(cnf, &mut model) {
            Ok(cnf) => cnf,
            Err(Conflict(clause_id)) => {
                log::trace!("conflict on clause {}", clause_id);
                return None;
            }
        };

        if cnf.is_empty() {
            return Some(model);
        }

        // 3. now that we must make a guess
        let pivot = cnf.pivot()?;
        self.stats.decisions += 1;
        log::trace!("decide {} with {} clauses left", pivot, cnf.num_clause());

        for guess in [pivot, !pivot] {
            let mut branch = model.clone();
            branch.assign(guess);
            if let Ok(reduced) = cnf.simplify(guess) {
                if let Some(found) = self._dpll(reduced, branch) {
                    return Some(found);
                }
            }
            self.stats.backtracks += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {

    use crate::*;

    fn solve(clauses: Vec<Vec<i32>>) -> (Option<Model>, DpllStats) {
        let formula = Formula::from(clauses);
        let mut solver = DpllSolver::new(&formula);
        let model = solver.solve();
        if let Some(model) = &model {
            assert!(model.satisfies(&formula), "{:?}", model);
        }
        (model, *solver.stats())
    }

    #[test]
    fn test_ok() {
        let (model, stats) = solve(vec![
            vec![1, -2, -3],
            vec![-1, 2, -3],
            vec![-1, -2, 3],
            vec![1],
            vec![2],
        ]);
        assert_eq!(model.unwrap().true_vars(), vec![1, 2, 3]);
        assert_eq!(stats.decisions, 0);
        assert_eq!(stats.unit_propagations, 3);
    }

    #[test]
    fn test_conflict() {
        let (model, _) = solve(vec![
            vec![-2, -3, -4, 5],
            vec![-1, -5, 6],
            vec![-5, 7],
            vec![-1, -6, -7],
            vec![-1, -2, 5],
            vec![-1, -3, 5],
            vec![-1, -4, 5],
            vec![1, 4],
            vec![-1, 2, 3, 4, 5, -6],
        ]);
        assert!(model.is_some());
    }

    #[test]
    fn unit_conflict() {
        let (model, stats) = solve(vec![vec![1], vec![-1]]);
        assert!(model.is_none());
        assert_eq!(stats.unit_propagations, 1);
        assert_eq!(stats.decisions, 0);
    }

    #[test]
    fn forced_by_units() {
        let (model, stats) = solve(vec![vec![1, 2], vec![-1]]);
        let model = model.unwrap();
        assert_eq!(model.value(1), Some(false));
        assert_eq!(model.value(2), Some(true));
        assert_eq!(stats.unit_propagations, 2);
        assert_eq!(stats.pure_literals, 0);
        assert_eq!(stats.decisions, 0);
    }

    #[test]
    fn cycle_needs_a_decision() {
        let (model, stats) = solve(vec![vec![1, -2], vec![2, -3], vec![3, -1]]);
        assert_eq!(model.unwrap().true_vars(), vec![1, 2, 3]);
        assert_eq!(stats.decisions, 1);
        assert_eq!(stats.backtracks, 0);
        assert_eq!(stats.pure_literals, 0);
        assert_eq!(stats.total_steps(), 3);
    }

    #[test]
    fn both_branches_fail() {
        let (model, stats) = solve(vec![vec![1, 2], vec![-1, 3], vec![-1, -3], vec![-2, 1]]);
        assert!(model.is_none());
        assert_eq!(stats.decisions, 1);
        assert_eq!(stats.backtracks, 2);
        assert_eq!(stats.unit_propagations, 2);
    }

    #[test]
    fn failed_branch_leaves_no_residue() {
        let (model, stats) = solve(vec![
            vec![1, 2],
            vec![-1, 3],
            vec![-1, -3],
            vec![-2, 4],
            vec![2, -4],
        ]);
        let model = model.unwrap();
        assert_eq!(model.value(1), Some(false));
        assert_eq!(model.value(3), None);
        assert_eq!(model.true_vars(), vec![2, 4]);
        assert_eq!(stats.decisions, 1);
        assert_eq!(stats.backtracks, 1);
        assert_eq!(stats.unit_propagations, 3);
    }

    #[test]
    fn pure_literals_satisfy() {
        let (model, stats) = solve(vec![vec![1, -2], vec![1, 3], vec![-2, -3]]);
        let model = model.unwrap();
        assert_eq!(model.value(1), Some(true));
        assert_eq!(stats.decisions, 0);
        assert_eq!(stats.pure_literals, 2);
    }

    #[test]
    fn trivial_formulas() {
        let (model, _) = solve(vec![]);
        assert!(model.unwrap().is_empty());
        let (model, stats) = solve(vec![vec![1, 2], vec![]]);
        assert!(model.is_none());
        assert_eq!(stats.total_steps(), 0);
    }

    #[test]
    fn negative_pivot_model_agrees() {
        let (model, stats) = solve(vec![vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        let model = model.unwrap();
        assert_eq!(model.false_vars(), vec![1, 2]);
        assert_eq!(stats.decisions, 1);
    }

    #[test]
    fn repeated_runs_agree() {
        let formula = Formula::from(vec![vec![1, -2], vec![2, -3], vec![3, -1], vec![-1, -2, -3, 4]]);
        let mut solver = DpllSolver::new(&formula);
        let first = solver.solve();
        let stats = *solver.stats();
        assert_eq!(solver.solve(), first);
        assert_eq!(*solver.stats(), stats);
    }
}
