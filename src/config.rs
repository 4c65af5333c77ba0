//! Search parameters for the annealing driver, loadable by a host binary
//! via `serde` (e.g. from TOML or environment variables); the core only
//! ever consumes the populated struct.

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    pub initial_temperature: f64,
    pub final_temperature: f64,
    pub iterations: u32,
    pub num_tries_per_action: u32,
    pub restart_probability: f64,
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            final_temperature: 1e-3,
            iterations: 10_000,
            num_tries_per_action: 10,
            restart_probability: 0.001,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_values() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.initial_temperature, 10.0);
        assert_eq!(cfg.iterations, 10_000);
    }
}
