use std::{path::PathBuf, process::exit, thread};

use clap::{Parser, Subcommand};

use satcheck::{
    decide, dimacs,
    report::{Measure, TracingAllocator},
    DpSolver, DpllSolver, Engine, Formula, ResolutionEngine, Verdict,
};

#[global_allocator]
static GLOBAL: TracingAllocator = TracingAllocator;

const MAX_STACK_MIB: i64 = 4096;

fn stack_bytes(mib: u32) -> Option<usize> {
    usize::try_from(mib).ok()?.checked_mul(1024 * 1024)
}

/// Decide satisfiability of a DIMACS CNF formula.
#[derive(Parser, Debug)]
#[command(name = "satcheck", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Stack size of the solving thread, in MiB.
    #[arg(
        long,
        global = true,
        default_value_t = 256,
        value_parser = clap::value_parser!(u32).range(1..=MAX_STACK_MIB)
    )]
    stack_size: u32,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Davis–Putnam variable elimination.
    Dp { path: PathBuf },

    /// Backtracking search with unit propagation and pure literals.
    Dpll {
        path: PathBuf,

        /// Print the satisfying assignment, one literal per line.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Saturation under pairwise resolution.
    Resolution {
        path: PathBuf,

        /// Print the pool positions of derived clauses.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run all three engines and check that they agree.
    Compare { path: PathBuf },
}

impl Command {
    fn path(&self) -> &PathBuf {
        match self {
            Command::Dp { path }
            | Command::Dpll { path, .. }
            | Command::Resolution { path, .. }
            | Command::Compare { path } => path,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let formula = match dimacs::load(cli.command.path()) {
        Ok(formula) => formula,
        Err(e) => {
            eprintln!("c could not load {}: {}", cli.command.path().display(), e);
            exit(1);
        }
    };

    let stack_size = match stack_bytes(cli.stack_size) {
        Some(bytes) => bytes,
        None => {
            eprintln!("c stack size of {} MiB does not fit this platform", cli.stack_size);
            exit(1);
        }
    };

    // deep DPLL recursion gets a stack of its own
    let command = cli.command;
    let solver = thread::Builder::new()
        .name("solver".to_string())
        .stack_size(stack_size)
        .spawn(move || run(&command, &formula));

    let joined = match solver {
        Ok(handle) => handle.join().is_ok(),
        Err(e) => {
            eprintln!("c could not start the solver: {}", e);
            false
        }
    };
    if !joined {
        eprintln!("c solver failed before reaching a verdict");
        exit(1);
    }
}

fn run(command: &Command, formula: &Formula) {
    match command {
        Command::Dp { .. } => run_dp(formula),
        Command::Dpll { verbose, .. } => run_dpll(formula, *verbose),
        Command::Resolution { verbose, .. } => run_resolution(formula, *verbose),
        Command::Compare { .. } => run_compare(formula),
    }
}

fn print_verdict(verdict: Verdict) {
    println!("s {}", verdict);
}

fn run_dp(formula: &Formula) {
    let measure = Measure::start();
    let mut solver = DpSolver::new(formula);
    let sat = solver.solve();
    let usage = measure.finish();

    print_verdict(if sat { Verdict::Sat } else { Verdict::Unsat });
    println!("c original clauses = {}", formula.len());
    println!("c clauses after elimination = {}", solver.clauses().len());
    println!("c {}", solver.stats());
    println!("{}", usage);
}

fn run_dpll(formula: &Formula, verbose: bool) {
    let measure = Measure::start();
    let mut solver = DpllSolver::new(formula);
    let model = solver.solve();
    let usage = measure.finish();

    match &model {
        None => print_verdict(Verdict::Unsat),
        Some(model) => {
            print_verdict(Verdict::Sat);
            if verbose {
                for lit in model.lits() {
                    println!("v {}", lit);
                }
            }
        }
    }
    let stats = solver.stats();
    println!("c {}", stats);
    println!("c total steps = {}", stats.total_steps());
    println!("{}", usage);
}

fn run_resolution(formula: &Formula, verbose: bool) {
    let measure = Measure::start();
    let mut engine = ResolutionEngine::new(formula);
    let unsat = engine.solve();
    let usage = measure.finish();

    print_verdict(if unsat { Verdict::Unsat } else { Verdict::Sat });
    println!("c initial clauses = {}", formula.len());
    println!("c final clauses = {}", engine.seen_len());
    if verbose {
        let derived = engine
            .stats()
            .derived
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!("c derived clause indices: {}", derived);
    }
    println!("c {}", engine.stats());
    println!("{}", usage);
}

fn run_compare(formula: &Formula) {
    let mut verdicts = vec![];
    for engine in Engine::ALL {
        let measure = Measure::start();
        let verdict = decide(formula, engine);
        let usage = measure.finish();
        println!("c {}: {} in {:.4} s", engine, verdict, usage.wall.as_secs_f64());
        verdicts.push(verdict);
    }

    if verdicts.windows(2).all(|pair| pair[0] == pair[1]) {
        print_verdict(verdicts[0]);
    } else {
        println!("c engines disagree");
        log::error!("engines disagree: {:?}", verdicts);
    }
}
