pub mod abstraction;
pub mod bucketing;
pub mod cards;
pub mod cfr;
pub mod deep_cfr;
pub mod error;
pub mod gameplay;
pub mod trainer;

/// Players at the table. The core only ever models heads-up play.
#[allow(dead_code)]
const N: usize = 2;

/// Default starting stack and big blind, in chips, used when a caller
/// doesn't supply their own `SolverConfig`/`DeepCFRConfig`.
#[allow(dead_code)]
const STACK: u32 = 200;
#[allow(dead_code)]
const BIG_BLIND: u32 = 2;

/// Initializes the `env_logger` backend for binaries and integration tests.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(cfg!(test)).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_up_means_two_players() {
        assert_eq!(N, 2);
    }

    #[test]
    fn defaults_match_the_configs_used_elsewhere() {
        assert_eq!(STACK, crate::cfr::SolverConfig::default().starting_stack);
        assert_eq!(BIG_BLIND, crate::cfr::SolverConfig::default().big_blind);
    }
}
