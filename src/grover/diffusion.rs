// src/grover/diffusion.rs

//! Inversion about the mean over the search register.

use crate::core::{GroverError, QubitId, Result};
use crate::operations::Operation;

/// Builds the diffusion subsequence `H^n X^n (C^{n-1}Z) X^n H^n`.
///
/// The multi-controlled Z on the last register qubit is realised as
/// `H · C^{n-1}X · H`, so only flips and Hadamards are emitted. Up to a global
/// phase the result is `2|s><s| - I` with `|s>` the uniform superposition.
/// For a single-qubit register the controlled flip has no controls and
/// degenerates to a plain flip.
///
/// # Errors
/// `EmptyRegister` if `qubits` is empty.
pub fn build_diffusion(qubits: &[QubitId]) -> Result<Vec<Operation>> {
    let (&last, controls) = qubits
        .split_last()
        .ok_or(GroverError::EmptyRegister { operator: "diffusion" })?;

    let mut ops = Vec::with_capacity(4 * qubits.len() + 3);
    for &q in qubits {
        ops.push(Operation::Hadamard { target: q });
        ops.push(Operation::Flip { target: q });
    }

    ops.push(Operation::Hadamard { target: last });
    ops.push(Operation::ControlledFlip {
        controls: controls.to_vec(),
        target: last,
    });
    ops.push(Operation::Hadamard { target: last });

    for &q in qubits {
        ops.push(Operation::Flip { target: q });
        ops.push(Operation::Hadamard { target: q });
    }
    Ok(ops)
}
