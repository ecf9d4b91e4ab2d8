// src/grover/assembler.rs

//! Composes initialisation, superposition, oracle/diffusion rounds and the
//! final measurement into one Grover search circuit.

use super::diffusion::build_diffusion;
use super::oracle::build_oracle;
use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{GroverError, QubitId, Result};
use crate::operations::Operation;

/// Qubit allocation of a Grover circuit: `qubit_count` register qubits
/// numbered from 0, followed by one ancilla.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroverRegisters {
    qubits: Vec<QubitId>,
    ancilla: QubitId,
}

impl GroverRegisters {
    /// Allocates register qubits `0..qubit_count` and ancilla `qubit_count`.
    ///
    /// # Errors
    /// `EmptyRegister` if `qubit_count` is zero.
    pub fn allocate(qubit_count: u32) -> Result<Self> {
        if qubit_count == 0 {
            return Err(GroverError::EmptyRegister { operator: "register allocation" });
        }
        Ok(Self {
            qubits: (0..qubit_count).map(QubitId).collect(),
            ancilla: QubitId(qubit_count),
        })
    }

    /// Search register qubits, most significant first.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// The phase-kickback ancilla.
    pub fn ancilla(&self) -> QubitId {
        self.ancilla
    }

    /// Width of the search register.
    pub fn qubit_count(&self) -> u32 {
        self.qubits.len() as u32
    }
}

/// Classical bit receiving register qubit `position` of an `qubit_count`-wide
/// register.
///
/// Register qubit 0 lands on the most significant outcome bit, so outcome
/// integers read in the same big-endian order the oracle encodes targets in.
pub fn big_endian_clbit(position: u32, qubit_count: u32) -> u32 {
    qubit_count - 1 - position
}

/// Resets every register qubit to |0> and the ancilla to |1>.
pub fn initialize(registers: &GroverRegisters) -> Vec<Operation> {
    let mut ops: Vec<Operation> = registers
        .qubits()
        .iter()
        .map(|&target| Operation::Reset { target })
        .collect();
    ops.push(Operation::Reset { target: registers.ancilla() });
    ops.push(Operation::Flip { target: registers.ancilla() });
    ops
}

/// Hadamard on every register qubit and on the ancilla, taking the register
/// to the uniform superposition and the ancilla from |1> to |->.
pub fn superposition(registers: &GroverRegisters) -> Vec<Operation> {
    registers
        .qubits()
        .iter()
        .chain(std::iter::once(&registers.ancilla()))
        .map(|&target| Operation::Hadamard { target })
        .collect()
}

/// Measures every register qubit with the big-endian classical mapping.
pub fn measure_register(registers: &GroverRegisters) -> Vec<Operation> {
    let n = registers.qubit_count();
    registers
        .qubits()
        .iter()
        .enumerate()
        .map(|(position, &target)| Operation::Measure {
            target,
            clbit: big_endian_clbit(position as u32, n),
        })
        .collect()
}

/// Assembles the Grover search circuit marking `target` in a
/// `qubit_count`-qubit register, running `iterations` oracle/diffusion rounds.
///
/// `iterations` is not capped; past roughly `pi/4 * sqrt(2^n)` rounds the
/// amplification overshoots and the success probability falls again.
///
/// # Errors
/// * `InvalidIterations` if `iterations` is zero.
/// * `EmptyRegister` if `qubit_count` is zero.
/// * `InvalidOracleRange` if `target` does not fit in `qubit_count` bits.
pub fn assemble(qubit_count: u32, target: u64, iterations: u32) -> Result<Circuit> {
    if iterations == 0 {
        return Err(GroverError::InvalidIterations { iterations });
    }
    let registers = GroverRegisters::allocate(qubit_count)?;

    let oracle = build_oracle(registers.qubits(), registers.ancilla(), target, qubit_count)?;
    let diffusion = build_diffusion(registers.qubits())?;

    let mut builder = CircuitBuilder::new()
        .add_ops(initialize(&registers))
        .add_ops(superposition(&registers));
    for _ in 0..iterations {
        builder = builder.add_ops(oracle.iter().cloned()).add_ops(diffusion.iter().cloned());
    }
    Ok(builder.add_ops(measure_register(&registers)).build())
}

/// Iteration count maximising the success probability when `num_targets` of
/// the `2^qubit_count` basis states are marked:
/// `round(pi / (4 * asin(sqrt(M / N))) - 0.5)`, at least 1.
pub fn optimal_iterations(qubit_count: u32, num_targets: usize) -> u32 {
    let n = 2f64.powi(qubit_count as i32);
    let fraction = (num_targets.max(1) as f64 / n).min(1.0);
    let theta = fraction.sqrt().asin();
    let k = (std::f64::consts::FRAC_PI_4 / theta - 0.5).round().max(1.0);
    k as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_rejects_zero_iterations() {
        assert_eq!(assemble(3, 1, 0), Err(GroverError::InvalidIterations { iterations: 0 }));
    }

    #[test]
    fn test_assemble_rejects_empty_register() {
        assert!(matches!(assemble(0, 0, 1), Err(GroverError::EmptyRegister { .. })));
    }

    #[test]
    fn test_assemble_layout() -> Result<()> {
        let n = 3;
        let circuit = assemble(n, 5, 2)?;
        let oracle_len = build_oracle(
            &[QubitId(0), QubitId(1), QubitId(2)],
            QubitId(3),
            5,
            n,
        )?
        .len();
        let diffusion_len = 4 * n as usize + 3;
        let init_len = n as usize + 2;
        let superposition_len = n as usize + 1;

        assert_eq!(
            circuit.len(),
            init_len + superposition_len + 2 * (oracle_len + diffusion_len) + n as usize
        );
        assert_eq!(circuit.qubits().len(), 4);
        assert_eq!(circuit.num_clbits(), n);
        assert_eq!(circuit.terminal_measurements_start(), Some(circuit.len() - n as usize));
        Ok(())
    }

    #[test]
    fn test_measurements_are_big_endian() -> Result<()> {
        let registers = GroverRegisters::allocate(3)?;
        let ops = measure_register(&registers);
        assert_eq!(
            ops,
            vec![
                Operation::Measure { target: QubitId(0), clbit: 2 },
                Operation::Measure { target: QubitId(1), clbit: 1 },
                Operation::Measure { target: QubitId(2), clbit: 0 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_ancilla_prepared_once() -> Result<()> {
        let circuit = assemble(2, 3, 4)?;
        let ancilla_hadamards = circuit
            .operations()
            .iter()
            .filter(|op| **op == Operation::Hadamard { target: QubitId(2) })
            .count();
        assert_eq!(ancilla_hadamards, 1);
        Ok(())
    }

    #[test]
    fn test_optimal_iterations() {
        // N=8, M=1 -> round(pi/4 / asin(1/sqrt(8)) - 0.5) = 2
        assert_eq!(optimal_iterations(3, 1), 2);
        // N=16, M=1 -> 3
        assert_eq!(optimal_iterations(4, 1), 3);
        assert!(optimal_iterations(1, 1) >= 1);
        assert!(optimal_iterations(2, 4) >= 1);
    }
}
