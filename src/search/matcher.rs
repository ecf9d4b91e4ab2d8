// src/search/matcher.rs

use super::estimate::estimate;
use super::text::CharMatrix;
use crate::circuits::Circuit;
use crate::config::SearchConfig;
use crate::core::{GroverError, Result};
use crate::grover::assemble;
use crate::simulation::SimulationAdapter;
use std::collections::BTreeSet;
use tracing::{debug, info, trace, warn};

/// Finds the lines of a [`CharMatrix`] containing a target string by running
/// one Grover search per target character.
///
/// The searches run strictly in order: the candidate set left by character
/// `i` is the input to character `i + 1`.
pub struct SubstringMatcher<A: SimulationAdapter> {
    adapter: A,
    config: SearchConfig,
    on_circuit: Option<Box<dyn FnMut(usize, &Circuit)>>,
}

impl<A: SimulationAdapter> SubstringMatcher<A> {
    /// Creates a matcher executing its circuits on `adapter`.
    ///
    /// # Errors
    /// `InvalidConfig` if `config` does not validate.
    pub fn new(adapter: A, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { adapter, config, on_circuit: None })
    }

    /// Registers a callback receiving each assembled circuit together with the
    /// index of the target character it searches for.
    pub fn inspect_circuits<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, &Circuit) + 'static,
    {
        self.on_circuit = Some(Box::new(callback));
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Gives the adapter back.
    pub fn into_adapter(self) -> A {
        self.adapter
    }

    /// Returns the (0-based) rows of `haystack` that contain `target` as a
    /// contiguous run of codes.
    ///
    /// A match never spans two rows: flattened position `j` survives target
    /// character `i` only if `j + i` is a candidate and lies in the same row
    /// (`j % W + i < W`). Adjacency through a row boundary of the flattened
    /// sequence is not a match.
    ///
    /// An empty target matches nothing and performs no search.
    ///
    /// # Errors
    /// * `EmptyInput` for an empty haystack.
    /// * `QubitLimitExceeded` when the haystack needs a wider register than
    ///   `max_qubits`.
    /// * `InvalidOracleRange` when a target code does not fit the haystack's
    ///   register width.
    /// * Any error of the simulation adapter, unmodified.
    pub fn find(&mut self, haystack: &CharMatrix, target: &[u32]) -> Result<BTreeSet<usize>> {
        if target.is_empty() {
            debug!("empty target, nothing to search");
            return Ok(BTreeSet::new());
        }
        let qubit_count = register_width(haystack)?;
        if qubit_count > self.config.max_qubits {
            return Err(GroverError::QubitLimitExceeded {
                requested: qubit_count,
                maximum: self.config.max_qubits,
            });
        }

        let width = haystack.width();
        let keys: Vec<u64> = haystack.flattened().iter().map(|&c| u64::from(c)).collect();
        let iterations = self.config.iterations_for(qubit_count);

        let mut master: BTreeSet<usize> = BTreeSet::new();
        for (offset, &code) in target.iter().enumerate() {
            debug!(offset, code, qubit_count, iterations, "grover search for character");
            let candidates = self.search_character(offset, u64::from(code), qubit_count, iterations, &keys)?;

            if offset == 0 {
                master = candidates;
            } else {
                master = master
                    .into_iter()
                    .filter(|&j| j % width + offset < width && candidates.contains(&(j + offset)))
                    .collect();
            }
            trace!(offset, remaining = master.len(), "candidate positions after character");
            if master.is_empty() {
                break;
            }
        }

        let lines: BTreeSet<usize> = master.into_iter().map(|j| haystack.line_of(j)).collect();
        info!(matches = lines.len(), "substring search finished");
        Ok(lines)
    }

    /// Runs one Grover search for `code` and returns the flattened positions
    /// whose estimated probability reaches the mean of the vector.
    fn search_character(
        &mut self,
        offset: usize,
        code: u64,
        qubit_count: u32,
        iterations: u32,
        keys: &[u64],
    ) -> Result<BTreeSet<usize>> {
        let circuit = assemble(qubit_count, code, iterations)?;
        if let Some(callback) = self.on_circuit.as_mut() {
            callback(offset, &circuit);
        }
        let counts = self.adapter.execute(&circuit, self.config.shots)?;

        let probabilities = match estimate(&counts, keys) {
            Ok(probabilities) => probabilities,
            Err(GroverError::DegenerateProbability { .. }) => {
                warn!(offset, code, "no sampled outcome occurs in the haystack, dropping all candidates");
                return Ok(BTreeSet::new());
            }
            Err(other) => return Err(other),
        };
        Ok(above_mean(&probabilities))
    }
}

/// Register width needed for every code in `haystack`:
/// `ceil(log2(max_code + 1))`, at least one qubit.
///
/// # Errors
/// `EmptyInput` if the haystack has no codes.
pub fn register_width(haystack: &CharMatrix) -> Result<u32> {
    let max_code = haystack.max_code().ok_or(GroverError::EmptyInput { what: "haystack" })?;
    Ok((u32::BITS - max_code.leading_zeros()).max(1))
}

/// Indices whose value is at least the mean of `probabilities`.
pub(crate) fn above_mean(probabilities: &[f64]) -> BTreeSet<usize> {
    if probabilities.is_empty() {
        return BTreeSet::new();
    }
    let mean = probabilities.iter().sum::<f64>() / probabilities.len() as f64;
    probabilities
        .iter()
        .enumerate()
        .filter(|(_, p)| **p >= mean)
        .map(|(index, _)| index)
        .collect()
}
