//! Trainer Binary
//!
//! Runs a CFR+, Deep CFR, or Kuhn-validation training session from the
//! command line: `trainer [tabular|deep|kuhn] [iterations]`.

use colored::Colorize;
use nlhe_solver::abstraction::ActionAbstraction;
use nlhe_solver::bucketing::HandBucketing;
use nlhe_solver::cfr::{CFRSolver, KuhnSolver, SolverConfig};
use nlhe_solver::deep_cfr::{DeepCFRConfig, DeepCFRSolver};
use nlhe_solver::trainer::{Solver, Trainer};

fn main() {
    nlhe_solver::init_logging();

    let mut args = std::env::args().skip(1);
    let flavor = args.next().unwrap_or_else(|| "tabular".to_string());
    let iterations: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1_000);

    let mut rng = rand::rng();
    let solver = match flavor.as_str() {
        "tabular" => Solver::Tabular(CFRSolver::new(
            HandBucketing::new(Default::default()),
            ActionAbstraction::new(Default::default()),
            SolverConfig::default(),
        )),
        "deep" => Solver::Deep(DeepCFRSolver::new(
            HandBucketing::new(Default::default()),
            ActionAbstraction::new(Default::default()),
            DeepCFRConfig::default(),
            &mut rng,
        )),
        "kuhn" => Solver::Kuhn(KuhnSolver::new()),
        other => {
            eprintln!("{} unknown solver flavor {other:?}, expected tabular|deep|kuhn", "error:".red().bold());
            std::process::exit(1);
        }
    };

    let mut trainer = Trainer::new(solver);
    let summary = trainer.train(iterations, true, &mut rng);

    println!("{}", "training complete".green().bold());
    println!("  game value:  {:.4}", summary.game_value);
    if let Some(n) = summary.num_infosets {
        println!("  infosets:    {n}");
    }
    if let Some(strategies) = trainer.strategies() {
        println!("  strategies:  {} infosets exported", strategies.len());
    }
}
