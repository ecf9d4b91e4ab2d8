//! Defaults and tolerances shared across the crate.

/// Shots drawn per Grover search when the caller does not choose.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Widest search register the matcher will simulate by default.
/// The simulator allocates one more qubit for the ancilla.
pub const DEFAULT_MAX_QUBITS: u32 = 16;

/// Allowed deviation of `sum(|c_i|^2)` from 1.0.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Probabilities below this are treated as zero when deciding whether a
/// reset or measurement actually collapses the state.
pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
