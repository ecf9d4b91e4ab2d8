//! Error handling logic

use super::qubit::QubitId;
use thiserror::Error;

/// Failures raised while building, simulating or interpreting a Grover search.
///
/// Every message is prefixed with the stage that failed so the top-level
/// caller can report where a search broke down.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroverError {
    /// The oracle target cannot be encoded in the requested number of qubits.
    #[error("oracle: target {target} is outside [0, 2^{qubit_count} - 1]")]
    InvalidOracleRange {
        /// Integer the oracle was asked to mark.
        target: u64,
        /// Width of the search register.
        qubit_count: u32,
    },

    /// The oracle was given a register it cannot act on: the wrong width, or
    /// one that contains its own ancilla.
    #[error("oracle: {message}")]
    InvalidOracleRegister {
        /// What is wrong with the register.
        message: String,
    },

    /// Grover iterations must be a positive count.
    #[error("assembly: iteration count must be positive, got {iterations}")]
    InvalidIterations {
        /// Requested iteration count.
        iterations: u32,
    },

    /// A register-wide subsequence was requested for zero qubits.
    #[error("assembly: {operator} needs at least one register qubit")]
    EmptyRegister {
        /// Which factory was called.
        operator: &'static str,
    },

    /// Haystack or target was empty where the operation needs content.
    #[error("matching: {what} is empty")]
    EmptyInput {
        /// Which input was empty.
        what: &'static str,
    },

    /// None of the sampled outcomes matched any of the requested keys.
    #[error("estimation: no sampled outcome matches any of the {keys} requested keys")]
    DegenerateProbability {
        /// Number of keys the estimate was aligned to.
        keys: usize,
    },

    /// The circuit needs more qubits than the simulator is allowed to allocate.
    #[error("simulation: {requested} qubits requested, limit is {maximum}")]
    QubitLimitExceeded {
        /// Qubits the circuit touches.
        requested: u32,
        /// Configured ceiling.
        maximum: u32,
    },

    /// The circuit refers to a qubit the simulation context does not know.
    #[error("simulation: {qubit} is not part of the simulated circuit")]
    UnknownQubit {
        /// Offending qubit.
        qubit: QubitId,
    },

    /// A gate or circuit is malformed (duplicate qubits, no measurements, ...).
    #[error("simulation: invalid circuit: {message}")]
    InvalidCircuit {
        /// What is wrong with the circuit.
        message: String,
    },

    /// The state vector lost its normalisation during evolution.
    #[error("simulation: incoherent state: {message}")]
    Incoherence {
        /// Normalisation details.
        message: String,
    },

    /// Any other failure reported by a simulation backend.
    #[error("simulation: {message}")]
    Simulation {
        /// Backend failure message.
        message: String,
    },

    /// A search parameter is out of range.
    #[error("config: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GroverError>;
