mod clause;
mod cnf;
pub mod dimacs;
mod dp;
mod dpll;
pub mod err;
mod lit;
mod model;
pub mod report;
mod resolution;

use std::fmt;

pub use clause::{Clause, Formula};
pub use cnf::{Cnf, Conflict};
pub use dp::{DpSolver, DpStats};
pub use dpll::{DpllSolver, DpllStats};
pub use lit::{Lit, Var};
pub use model::Model;
pub use resolution::{resolve, LitSet, ResolutionEngine, ResolutionStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Dp,
    Dpll,
    Resolution,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::Dp, Engine::Dpll, Engine::Resolution];
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Engine::Dp => "DP",
            Engine::Dpll => "DPLL",
            Engine::Resolution => "Resolution",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Sat,
    Unsat,
}

impl Verdict {
    pub fn is_sat(self) -> bool {
        self == Verdict::Sat
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Sat => write!(f, "SATISFIABLE"),
            Verdict::Unsat => write!(f, "UNSATISFIABLE"),
        }
    }
}

/// Decide `formula` with a fresh instance of `engine`.
pub fn decide(formula: &Formula, engine: Engine) -> Verdict {
    let sat = match engine {
        Engine::Dp => DpSolver::new(formula).solve(),
        Engine::Dpll => DpllSolver::new(formula).solve().is_some(),
        Engine::Resolution => !ResolutionEngine::new(formula).solve(),
    };
    if sat {
        Verdict::Sat
    } else {
        Verdict::Unsat
    }
}
