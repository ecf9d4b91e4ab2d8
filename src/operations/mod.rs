// src/operations/mod.rs

//! Elementary gate operations a circuit is built from.
//!
//! The set is deliberately small: everything the Grover oracle and diffusion
//! operator need can be expressed as resets, bit flips, Hadamards,
//! multi-controlled flips and measurements.

use crate::core::QubitId;

/// One elementary operation in a circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Non-unitary reset of `target` to |0>.
    Reset {
        /// Qubit to reset.
        target: QubitId,
    },

    /// Bit flip (Pauli X) on `target`.
    Flip {
        /// Qubit to flip.
        target: QubitId,
    },

    /// Hadamard on `target`.
    Hadamard {
        /// Qubit to rotate.
        target: QubitId,
    },

    /// Flip `target` iff every qubit in `controls` is |1>.
    ///
    /// With zero controls this is a plain flip, with one a CNOT, with two a
    /// Toffoli; the oracle uses one control per register qubit.
    ControlledFlip {
        /// Control qubits, all of which must read |1>.
        controls: Vec<QubitId>,
        /// Qubit flipped when the controls are satisfied.
        target: QubitId,
    },

    /// Measure `target` in the computational basis and store the bit at
    /// position `clbit` (weight `2^clbit`) of the outcome integer.
    Measure {
        /// Qubit to measure.
        target: QubitId,
        /// Classical bit receiving the result.
        clbit: u32,
    },
}

impl Operation {
    /// All qubits the operation acts on, controls first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Reset { target }
            | Operation::Flip { target }
            | Operation::Hadamard { target }
            | Operation::Measure { target, .. } => vec![*target],
            Operation::ControlledFlip { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
        }
    }

    /// Whether the operation is a measurement.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Operation::Measure { .. })
    }

    /// Short label used by the circuit diagram.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Reset { .. } => "|0>",
            Operation::Flip { .. } => "X",
            Operation::Hadamard { .. } => "H",
            Operation::ControlledFlip { .. } => "X",
            Operation::Measure { .. } => "M",
        }
    }
}
