//! Search configuration.
//!
//! [`SearchConfig`] carries the tuning knobs of a substring search: how many
//! shots each Grover search samples, how many amplification rounds it runs and
//! how wide a register the matcher may simulate.
//!
//! ```rust
//! use qgrep::config::SearchConfig;
//!
//! let cfg = SearchConfig::default();
//! assert!(cfg.validate().is_ok());
//! assert_eq!(cfg.iterations_for(7), 8);
//! ```

use crate::core::constants::{DEFAULT_MAX_QUBITS, DEFAULT_SHOTS};
use crate::core::{GroverError, Result};
use crate::grover::optimal_iterations;
use crate::simulation::Simulator;

/// Parameters of one substring search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Shots sampled per target character. Default: **1024**.
    pub shots: u32,

    /// Oracle/diffusion rounds per search. `None` derives the optimal count for
    /// a single marked state from the register width. Default: **None**.
    pub iterations: Option<u32>,

    /// Seed for the simulator's sampler; `None` draws from OS entropy.
    /// Default: **None**.
    pub seed: Option<u64>,

    /// Widest search register (ancilla excluded) the matcher will build.
    /// Default: **16**.
    pub max_qubits: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            iterations: None,
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

impl SearchConfig {
    /// Checks every field is usable.
    ///
    /// # Errors
    /// `InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(invalid("shots", "must be > 0"));
        }
        if self.iterations == Some(0) {
            return Err(invalid("iterations", "must be > 0 when given"));
        }
        if self.max_qubits == 0 {
            return Err(invalid("max_qubits", "must be > 0"));
        }
        if self.max_qubits > 30 {
            return Err(invalid("max_qubits", "must be <= 30"));
        }
        Ok(())
    }

    /// A simulator honouring `seed`, with room for a `max_qubits` register
    /// plus its ancilla.
    pub fn simulator(&self) -> Simulator {
        let simulator = match self.seed {
            Some(seed) => Simulator::with_seed(seed),
            None => Simulator::new(),
        };
        simulator.with_max_qubits(self.max_qubits.saturating_add(1))
    }

    /// Iterations to run for a register of `qubit_count` qubits.
    pub fn iterations_for(&self, qubit_count: u32) -> u32 {
        self.iterations.unwrap_or_else(|| optimal_iterations(qubit_count, 1))
    }
}

fn invalid(field: &str, reason: &str) -> GroverError {
    GroverError::InvalidConfig {
        message: format!("{} {}", field, reason),
    }
}
