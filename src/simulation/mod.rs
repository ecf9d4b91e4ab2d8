// src/simulation/mod.rs

//! Executes circuits and reports sampled measurement outcomes.
//!
//! The search code only depends on the [`SimulationAdapter`] trait; the
//! [`Simulator`] here is a dense state-vector implementation of it, and tests
//! substitute adapters returning fixed counts.

mod results;
pub(crate) mod engine;

pub use results::MeasurementCounts;

use crate::circuits::Circuit;
use crate::core::constants::DEFAULT_MAX_QUBITS;
use crate::core::{GroverError, Result, StateVector};
use engine::SimulationEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::trace;

/// Anything able to execute a circuit for a number of shots.
///
/// Implementations must sample outcomes with probability proportional to the
/// squared amplitudes of the circuit's final state. Failures are reported as
/// errors and are never retried by callers.
pub trait SimulationAdapter {
    /// Runs `circuit` `shots` times and returns the outcome histogram.
    fn execute(&mut self, circuit: &Circuit, shots: u32) -> Result<MeasurementCounts>;
}

impl<A: SimulationAdapter + ?Sized> SimulationAdapter for &mut A {
    fn execute(&mut self, circuit: &Circuit, shots: u32) -> Result<MeasurementCounts> {
        (**self).execute(circuit, shots)
    }
}

/// State-vector simulator.
///
/// Outcomes are drawn from a `StdRng`, seeded explicitly for reproducible
/// runs or from OS entropy otherwise.
pub struct Simulator {
    rng: StdRng,
    max_qubits: u32,
}

impl Simulator {
    /// Creates a simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            max_qubits: DEFAULT_MAX_QUBITS + 1,
        }
    }

    /// Creates a simulator whose sampling is fully determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_qubits: DEFAULT_MAX_QUBITS + 1,
        }
    }

    /// Caps the number of qubits (ancillas included) a circuit may use.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// The current qubit cap.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// Runs every operation of `circuit` once and returns the final state.
    /// Measurements and resets collapse the state as they would on a single shot.
    pub fn final_state(&mut self, circuit: &Circuit) -> Result<StateVector> {
        check_classical_width(circuit)?;
        let mut engine = SimulationEngine::init(circuit.qubits(), self.max_qubits)?;
        let mut outcome = 0;
        for op in circuit.operations() {
            engine.apply_operation(op, &mut self.rng, &mut outcome)?;
        }
        engine.validate_state()?;
        Ok(engine.into_state())
    }

    /// Exact probability of every outcome integer of `circuit`.
    ///
    /// # Errors
    /// `InvalidCircuit` unless every measurement is in the trailing block and
    /// no earlier reset collapsed a superposition, since the distribution
    /// would otherwise depend on random intermediate results.
    pub fn outcome_probabilities(&mut self, circuit: &Circuit) -> Result<BTreeMap<u64, f64>> {
        check_classical_width(circuit)?;
        let start = circuit.terminal_measurements_start().ok_or_else(|| GroverError::InvalidCircuit {
            message: "outcome probabilities need all measurements at the end of the circuit".to_string(),
        })?;
        let engine = self.evolve(circuit, start)?;
        if engine.collapsed() {
            return Err(GroverError::InvalidCircuit {
                message: "a reset collapsed a superposition before measurement".to_string(),
            });
        }
        engine.outcome_distribution(&circuit.operations()[start..])
    }

    fn evolve(&mut self, circuit: &Circuit, until: usize) -> Result<SimulationEngine> {
        let mut engine = SimulationEngine::init(circuit.qubits(), self.max_qubits)?;
        let mut outcome = 0;
        for op in &circuit.operations()[..until] {
            engine.apply_operation(op, &mut self.rng, &mut outcome)?;
        }
        engine.validate_state()?;
        Ok(engine)
    }

    fn sample(&mut self, distribution: &BTreeMap<u64, f64>, shots: u32, counts: &mut MeasurementCounts) {
        let mut cumulative = Vec::with_capacity(distribution.len());
        let mut total = 0.0;
        for (outcome, p) in distribution {
            total += p;
            cumulative.push((*outcome, total));
        }
        if cumulative.is_empty() {
            return;
        }
        for _ in 0..shots {
            let r = self.rng.random::<f64>() * total;
            let pick = cumulative
                .partition_point(|(_, c)| *c <= r)
                .min(cumulative.len() - 1);
            counts.record(cumulative[pick].0);
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationAdapter for Simulator {
    fn execute(&mut self, circuit: &Circuit, shots: u32) -> Result<MeasurementCounts> {
        if shots == 0 {
            return Err(GroverError::InvalidConfig {
                message: "shot count must be positive".to_string(),
            });
        }
        check_classical_width(circuit)?;
        if circuit.measurement_count() == 0 {
            return Err(GroverError::InvalidCircuit {
                message: "circuit has no measurements".to_string(),
            });
        }

        let mut counts = MeasurementCounts::new(circuit.num_clbits());

        // Evolve once and sample when nothing random happens before the
        // trailing measurements.
        if let Some(start) = circuit.terminal_measurements_start() {
            let engine = self.evolve(circuit, start)?;
            if !engine.collapsed() {
                let distribution = engine.outcome_distribution(&circuit.operations()[start..])?;
                trace!(outcomes = distribution.len(), shots, "sampling from exact distribution");
                self.sample(&distribution, shots, &mut counts);
                return Ok(counts);
            }
        }

        trace!(shots, "simulating shots individually");
        for _ in 0..shots {
            let mut engine = SimulationEngine::init(circuit.qubits(), self.max_qubits)?;
            let mut outcome = 0;
            for op in circuit.operations() {
                engine.apply_operation(op, &mut self.rng, &mut outcome)?;
            }
            counts.record(outcome);
        }
        Ok(counts)
    }
}

fn check_classical_width(circuit: &Circuit) -> Result<()> {
    if circuit.num_clbits() > u64::BITS {
        return Err(GroverError::InvalidCircuit {
            message: format!("{} classical bits do not fit a u64 outcome", circuit.num_clbits()),
        });
    }
    Ok(())
}
