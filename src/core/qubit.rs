// src/core/qubit.rs

use std::fmt;

/// Identifier of one qubit within a circuit.
///
/// Ordering matters: the simulator assigns the lowest `QubitId` of a circuit
/// to the most significant bit of the basis-state index, so register qubit 0
/// reads as the leading bit of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Raw index of the qubit.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(value: u32) -> Self {
        QubitId(value)
    }
}
