//! Orchestrates a solver of one of three flavors (tabular CFR+, Deep CFR,
//! Kuhn validation): drives `train(iterations)`, reports progress, and
//! exposes the trained strategies for export. Checkpoint persistence is out
//! of scope here; the caller decides what to do with the exported table.

use crate::cfr::{CFRSolver, KuhnSolver};
use crate::deep_cfr::DeepCFRSolver;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;

/// Which concrete solver a `Trainer` is driving.
pub enum Solver {
    Tabular(CFRSolver),
    Deep(DeepCFRSolver),
    Kuhn(KuhnSolver),
}

/// Summary returned once a training run completes.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSummary {
    pub game_value: f64,
    pub num_infosets: Option<usize>,
}

pub struct Trainer {
    solver: Solver,
}

impl Trainer {
    pub fn new(solver: Solver) -> Self {
        Self { solver }
    }

    /// Runs `iterations` training rounds one at a time so progress can be
    /// reported between them, logging milestones at `info` and drawing an
    /// `indicatif` bar when `verbose`.
    pub fn train(&mut self, iterations: u64, verbose: bool, rng: &mut impl Rng) -> TrainingSummary {
        log::info!("starting training for {iterations} iterations");
        let bar = verbose.then(|| progress_bar(iterations));

        let mut game_value = 0.0;
        for _ in 0..iterations {
            game_value = match &mut self.solver {
                Solver::Tabular(solver) => solver.train(1, rng),
                Solver::Deep(solver) => solver.train(1, rng),
                Solver::Kuhn(solver) => solver.train(1, rng),
            };
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = bar {
            bar.finish_with_message("training complete");
        }

        let num_infosets = match &self.solver {
            Solver::Tabular(solver) => Some(solver.num_infosets()),
            Solver::Deep(_) | Solver::Kuhn(_) => None,
        };

        match num_infosets {
            Some(n) => log::info!("training complete: {n} infosets, game value {game_value:.4}"),
            None => log::info!("training complete: game value {game_value:.4}"),
        }

        TrainingSummary { game_value, num_infosets }
    }

    /// Exports the trained strategy table, if the underlying solver keeps
    /// one explicitly. Deep CFR's learned policy lives in its networks'
    /// weights rather than a table, so this returns `None` there.
    pub fn strategies(&self) -> Option<Vec<(String, Vec<f64>)>> {
        match &self.solver {
            Solver::Tabular(solver) => Some(solver.strategies()),
            Solver::Kuhn(solver) => Some(solver.strategies()),
            Solver::Deep(_) => None,
        }
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }
}

fn progress_bar(n: u64) -> ProgressBar {
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let bar = ProgressBar::new(n);
    bar.set_style(ProgressStyle::with_template(style).expect("static template is valid"));
    bar
}
