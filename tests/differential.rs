use rand::{rngs::StdRng, Rng, SeedableRng};

use satcheck::{decide, DpSolver, DpllSolver, Engine, Formula, Model, ResolutionEngine, Verdict};

// small enough for resolution saturation to finish quickly
fn random_formula(rng: &mut StdRng) -> Formula {
    let var_count: i32 = rng.gen_range(1..=4);
    let clause_count = rng.gen_range(0..=8);
    let clauses = (0..clause_count)
        .map(|_| {
            let len = rng.gen_range(1..=3);
            (0..len)
                .map(|_| {
                    let var = rng.gen_range(1..=var_count);
                    if rng.gen_bool(0.5) {
                        var
                    } else {
                        -var
                    }
                })
                .collect::<Vec<i32>>()
        })
        .collect::<Vec<_>>();
    Formula::from(clauses)
}

fn brute_force(formula: &Formula) -> Verdict {
    let max_var = formula.max_var();
    for bits in 0u32..(1 << max_var) {
        let mut model = Model::new();
        for var in 1..=max_var {
            let value = bits & (1 << (var - 1)) != 0;
            model.assign(satcheck::Lit::with_value(var, value));
        }
        if model.satisfies(formula) {
            return Verdict::Sat;
        }
    }
    Verdict::Unsat
}

#[test]
fn engines_agree() {
    let mut rng = StdRng::seed_from_u64(0x5a7);
    let mut seen_sat = 0;
    let mut seen_unsat = 0;

    for _ in 0..300 {
        let formula = random_formula(&mut rng);
        let expected = brute_force(&formula);
        for engine in Engine::ALL {
            assert_eq!(decide(&formula, engine), expected, "{} on {:?}", engine, formula);
        }
        match expected {
            Verdict::Sat => seen_sat += 1,
            Verdict::Unsat => seen_unsat += 1,
        }
    }

    assert!(seen_sat > 0);
    assert!(seen_unsat > 0);
}

#[test]
fn models_satisfy() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..300 {
        let formula = random_formula(&mut rng);
        if let Some(model) = DpllSolver::new(&formula).solve() {
            assert!(model.satisfies(&formula), "{:?} for {:?}", model, formula);
        }
    }
}

#[test]
fn elimination_keeps_satisfiability() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let formula = random_formula(&mut rng);
        let Some(var) = formula.clauses().iter().find_map(|clause| clause.first()).map(|lit| lit.var()) else {
            continue;
        };

        let mut solver = DpSolver::new(&formula);
        let verdict = match solver.eliminate(var) {
            Err(_) => Verdict::Unsat,
            Ok(()) => {
                assert!(solver
                    .clauses()
                    .iter()
                    .all(|clause| clause.iter().all(|lit| lit.var() != var)));
                brute_force(&Formula::new(solver.clauses().to_vec()))
            }
        };
        assert_eq!(verdict, brute_force(&formula), "eliminating {} in {:?}", var, formula);
    }
}

#[test]
fn closure_only_grows() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let formula = random_formula(&mut rng);
        let mut engine = ResolutionEngine::new(&formula);
        let unsat = engine.solve();
        let stats = engine.stats();
        assert_eq!(engine.pool_len(), formula.len() + stats.derived.len());
        assert!(stats.derived.windows(2).all(|pair| pair[0] < pair[1]));
        if !unsat {
            assert!(!engine.pool().iter().any(|clause| clause.is_empty()));
        }
    }
}

#[test]
fn runs_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..50 {
        let formula = random_formula(&mut rng);

        let mut first = DpllSolver::new(&formula);
        let mut second = DpllSolver::new(&formula);
        let model = first.solve();
        assert_eq!(model, second.solve());
        assert_eq!(first.stats(), second.stats());
        assert_eq!(first.solve(), model);
        assert_eq!(first.stats(), second.stats());

        let mut first = DpSolver::new(&formula);
        let mut second = DpSolver::new(&formula);
        let sat = first.solve();
        assert_eq!(sat, second.solve());
        assert_eq!(first.stats(), second.stats());
        assert_eq!(first.clauses(), second.clauses());
        assert_eq!(first.solve(), sat);
        assert_eq!(first.stats(), second.stats());

        let mut first = ResolutionEngine::new(&formula);
        let mut second = ResolutionEngine::new(&formula);
        let unsat = first.solve();
        assert_eq!(unsat, second.solve());
        assert_eq!(first.stats(), second.stats());
        assert_eq!(first.pool(), second.pool());
        assert_eq!(first.solve(), unsat);
        assert_eq!(first.stats(), second.stats());
        assert_eq!(first.pool(), second.pool());
    }
}
