// src/simulation/engine.rs
use crate::core::constants::AMPLITUDE_TOLERANCE;
use crate::core::{GroverError, QubitId, Result, StateVector};
use crate::operations::Operation;
use crate::validation::check_normalization;
use num_complex::Complex;
use num_traits::Zero;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::f64::consts::FRAC_1_SQRT_2;

/// Dense state-vector engine evolving one circuit execution.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps qubit ids to their position (0..N-1); position 0 is the most
    /// significant bit of a basis-state index.
    qubit_indices: HashMap<QubitId, usize>,
    /// Global state over all simulated qubits, dimension 2^N.
    state: StateVector,
    /// Number of simulated qubits (N).
    num_qubits: usize,
    /// Set once a reset or measurement picked a random branch.
    collapsed: bool,
}

impl SimulationEngine {
    /// Allocates |0...0> over `qubits`.
    ///
    /// # Errors
    /// `InvalidCircuit` for an empty qubit set, `QubitLimitExceeded` when the
    /// set is wider than `max_qubits`.
    pub(crate) fn init(qubits: &BTreeSet<QubitId>, max_qubits: u32) -> Result<Self> {
        if qubits.is_empty() {
            return Err(GroverError::InvalidCircuit {
                message: "cannot simulate a circuit without qubits".to_string(),
            });
        }
        let num_qubits = qubits.len();
        if num_qubits > max_qubits as usize {
            return Err(GroverError::QubitLimitExceeded {
                requested: num_qubits as u32,
                maximum: max_qubits,
            });
        }
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| GroverError::Simulation {
            message: format!("2^{} amplitudes overflow usize", num_qubits),
        })?;

        // BTreeSet iteration is already in id order.
        let qubit_indices = qubits.iter().enumerate().map(|(index, q)| (*q, index)).collect();

        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);

        Ok(Self {
            qubit_indices,
            state: StateVector::new(amplitudes, num_qubits as u32),
            num_qubits,
            collapsed: false,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            Err(GroverError::Simulation {
                message: format!(
                    "cannot set state: dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Whether a reset or measurement made a random choice so far.
    pub(crate) fn collapsed(&self) -> bool {
        self.collapsed
    }

    /// Applies one operation. Measurement results are written into the
    /// corresponding bit of `outcome`.
    pub(crate) fn apply_operation<R: Rng>(
        &mut self,
        op: &Operation,
        rng: &mut R,
        outcome: &mut u64,
    ) -> Result<()> {
        match op {
            Operation::Reset { target } => {
                let idx = self.get_qubit_index(target)?;
                if self.collapse_qubit(idx, rng) {
                    self.apply_single_qubit_gate(idx, &flip_matrix());
                }
            }
            Operation::Flip { target } => {
                let idx = self.get_qubit_index(target)?;
                self.apply_single_qubit_gate(idx, &flip_matrix());
            }
            Operation::Hadamard { target } => {
                let idx = self.get_qubit_index(target)?;
                self.apply_single_qubit_gate(idx, &hadamard_matrix());
            }
            Operation::ControlledFlip { controls, target } => {
                let target_idx = self.get_qubit_index(target)?;
                let mut control_idxs = Vec::with_capacity(controls.len());
                for control in controls {
                    let idx = self.get_qubit_index(control)?;
                    if idx == target_idx || control_idxs.contains(&idx) {
                        return Err(GroverError::InvalidCircuit {
                            message: format!("{} appears twice in a controlled flip", control),
                        });
                    }
                    control_idxs.push(idx);
                }
                self.apply_controlled_flip(&control_idxs, target_idx);
            }
            Operation::Measure { target, clbit } => {
                let idx = self.get_qubit_index(target)?;
                let bit = self.collapse_qubit(idx, rng);
                *outcome = write_clbit(*outcome, *clbit, bit);
            }
        }
        Ok(())
    }

    /// Exact distribution of outcome integers produced by `measurements`
    /// on the current state, without collapsing it.
    pub(crate) fn outcome_distribution(&self, measurements: &[Operation]) -> Result<BTreeMap<u64, f64>> {
        let mut readout = Vec::with_capacity(measurements.len());
        for op in measurements {
            match op {
                Operation::Measure { target, clbit } => {
                    readout.push((self.bit_mask(self.get_qubit_index(target)?), *clbit));
                }
                other => {
                    return Err(GroverError::InvalidCircuit {
                        message: format!("{:?} inside the terminal measurement block", other),
                    });
                }
            }
        }

        let mut distribution = BTreeMap::new();
        for (k, amplitude) in self.state.vector().iter().enumerate() {
            let p = amplitude.norm_sqr();
            if p == 0.0 {
                continue;
            }
            let outcome = readout
                .iter()
                .fold(0u64, |acc, (mask, clbit)| write_clbit(acc, *clbit, k & mask != 0));
            *distribution.entry(outcome).or_insert(0.0) += p;
        }
        Ok(distribution)
    }

    /// Checks the state is still normalised.
    pub(crate) fn validate_state(&self) -> Result<()> {
        check_normalization(&self.state, None)
    }

    fn get_qubit_index(&self, qubit: &QubitId) -> Result<usize> {
        self.qubit_indices
            .get(qubit)
            .copied()
            .ok_or(GroverError::UnknownQubit { qubit: *qubit })
    }

    fn bit_mask(&self, idx: usize) -> usize {
        1 << (self.num_qubits - 1 - idx)
    }

    /// Applies a 2x2 matrix to the qubit at position `target_idx`.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let k_mask = self.bit_mask(target_idx);
        let lower_mask = k_mask - 1;
        let upper_mask = !lower_mask;

        let amplitudes = self.state.vector_mut();
        // Each i enumerates one pair of basis states differing only at k.
        for i in 0..amplitudes.len() / 2 {
            let i0 = ((i & upper_mask) << 1) | (i & lower_mask);
            let i1 = i0 | k_mask;

            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Swaps the |..0..> and |..1..> amplitudes of the target wherever every
    /// control bit is set.
    fn apply_controlled_flip(&mut self, control_idxs: &[usize], target_idx: usize) {
        let control_mask = control_idxs.iter().fold(0usize, |mask, &idx| mask | self.bit_mask(idx));
        let target_mask = self.bit_mask(target_idx);

        let amplitudes = self.state.vector_mut();
        for k in 0..amplitudes.len() {
            if k & control_mask == control_mask && k & target_mask == 0 {
                amplitudes.swap(k, k | target_mask);
            }
        }
    }

    /// Projects the qubit at `idx` onto a computational basis state chosen
    /// with the Born rule and renormalises. Returns the observed bit.
    fn collapse_qubit<R: Rng>(&mut self, idx: usize, rng: &mut R) -> bool {
        let mask = self.bit_mask(idx);
        let p_one: f64 = self
            .state
            .vector()
            .iter()
            .enumerate()
            .filter(|(k, _)| k & mask != 0)
            .map(|(_, c)| c.norm_sqr())
            .sum();

        let bit = if p_one <= AMPLITUDE_TOLERANCE {
            false
        } else if p_one >= 1.0 - AMPLITUDE_TOLERANCE {
            true
        } else {
            self.collapsed = true;
            rng.random::<f64>() < p_one
        };

        let kept = if bit { p_one } else { 1.0 - p_one };
        let scale = if kept > 0.0 { 1.0 / kept.sqrt() } else { 1.0 };
        for (k, amplitude) in self.state.vector_mut().iter_mut().enumerate() {
            if (k & mask != 0) == bit {
                *amplitude *= scale;
            } else {
                *amplitude = Complex::zero();
            }
        }
        bit
    }
}

fn write_clbit(outcome: u64, clbit: u32, bit: bool) -> u64 {
    let mask = 1u64 << clbit;
    if bit { outcome | mask } else { outcome & !mask }
}

fn flip_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
        [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
    ]
}
