//! Deep CFR: the same counterfactual-regret traversal as `cfr`, but with
//! regrets approximated by a trained value network instead of stored per
//! infoset, for games too large to tabulate exhaustively.

pub mod features;
pub mod network;
pub mod reservoir;
pub mod solver;

pub use features::Features;
pub use network::{Mlp, MlpConfig, ValueNetwork};
pub use reservoir::ReservoirBuffer;
pub use solver::{DeepCFRConfig, DeepCFRSolver};
