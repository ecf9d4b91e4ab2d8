// src/core/state.rs

use num_complex::Complex;
use std::fmt;

/// Amplitudes of an `n`-qubit register over the `2^n` computational basis
/// states, in big-endian qubit order (the lowest qubit id is the most
/// significant bit of the index).
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: u32,
}

impl StateVector {
    /// Wraps a raw amplitude vector. The caller guarantees `len == 2^num_qubits`.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>, num_qubits: u32) -> Self {
        Self { amplitudes, num_qubits }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits the vector describes.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// `|c_k|^2` for every basis state `k`.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes; 1.0 for a normalised state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
