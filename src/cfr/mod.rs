pub mod infoset;
pub mod kuhn;
pub mod solver;

pub use infoset::InformationSet;
pub use kuhn::KuhnSolver;
pub use solver::{CFRSolver, SolverConfig};
