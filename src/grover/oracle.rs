// src/grover/oracle.rs

//! Phase oracle marking a single basis state of the search register.

use crate::core::{GroverError, QubitId, Result};
use crate::operations::Operation;

/// Largest integer representable in `qubit_count` bits, or `None` when the
/// width does not fit a `u64`.
fn max_target(qubit_count: u32) -> Option<u64> {
    match qubit_count {
        0 => Some(0),
        1..=63 => Some((1u64 << qubit_count) - 1),
        64 => Some(u64::MAX),
        _ => None,
    }
}

/// Fixed-width binary digits of `target`, most significant bit first,
/// left-padded with zeros to `qubit_count` digits.
///
/// # Errors
/// `InvalidOracleRange` if `target` does not fit in `qubit_count` bits.
pub fn target_bits(target: u64, qubit_count: u32) -> Result<Vec<bool>> {
    match max_target(qubit_count) {
        Some(max) if qubit_count > 0 && target <= max => {}
        _ => return Err(GroverError::InvalidOracleRange { target, qubit_count }),
    }
    Ok((0..qubit_count)
        .rev()
        .map(|bit| (target >> bit) & 1 == 1)
        .collect())
}

/// The register qubits that must be flipped so that `target` reads as the
/// all-ones state: one entry for every zero digit of its binary encoding.
///
/// `qubits[0]` is paired with the most significant digit.
///
/// # Errors
/// * `InvalidOracleRange` if `target` does not fit in `qubit_count` bits.
/// * `InvalidOracleRegister` if `qubits` does not hold exactly `qubit_count`
///   qubits.
pub fn oracle_flip_pattern(qubits: &[QubitId], target: u64, qubit_count: u32) -> Result<Vec<QubitId>> {
    let bits = target_bits(target, qubit_count)?;
    if qubits.len() != bits.len() {
        return Err(GroverError::InvalidOracleRegister {
            message: format!(
                "oracle over {} qubits given a register of {}",
                qubit_count,
                qubits.len()
            ),
        });
    }
    Ok(qubits
        .iter()
        .zip(bits)
        .filter(|(_, bit)| !bit)
        .map(|(qubit, _)| *qubit)
        .collect())
}

/// Builds the oracle subsequence for `target` over `qubits`.
///
/// Zero digits are flipped to one, a flip controlled by every register qubit
/// is applied to `ancilla`, and the digit flips are undone. The ancilla is
/// therefore flipped exactly when the register holds `target`; with the
/// ancilla prepared in |->, that flip is a phase of -1 on the marked state.
///
/// # Errors
/// * `InvalidOracleRange` if `target` is outside `[0, 2^qubit_count - 1]`.
/// * `InvalidOracleRegister` if the register is the wrong width or contains
///   the ancilla.
pub fn build_oracle(
    qubits: &[QubitId],
    ancilla: QubitId,
    target: u64,
    qubit_count: u32,
) -> Result<Vec<Operation>> {
    let pattern = oracle_flip_pattern(qubits, target, qubit_count)?;
    if qubits.contains(&ancilla) {
        return Err(GroverError::InvalidOracleRegister {
            message: format!("ancilla {} is also a register qubit", ancilla),
        });
    }

    let flips = pattern.iter().map(|&qubit| Operation::Flip { target: qubit });
    let mut ops: Vec<Operation> = flips.clone().collect();
    ops.push(Operation::ControlledFlip {
        controls: qubits.to_vec(),
        target: ancilla,
    });
    ops.extend(flips);
    Ok(ops)
}
