// src/grover/mod.rs

//! Grover search circuits built from elementary gates.
//!
//! The factories here only *describe* circuits; they never execute anything.
//! Each returns a plain `Vec<Operation>` so callers can compose them into a
//! `CircuitBuilder` in any order:
//!
//! ```
//! use qgrep::grover::{self, GroverRegisters};
//! use qgrep::CircuitBuilder;
//!
//! # fn main() -> qgrep::core::Result<()> {
//! let registers = GroverRegisters::allocate(3)?;
//! let circuit = CircuitBuilder::new()
//!     .add_ops(grover::initialize(&registers))
//!     .add_ops(grover::superposition(&registers))
//!     .add_ops(grover::build_oracle(registers.qubits(), registers.ancilla(), 5, 3)?)
//!     .add_ops(grover::build_diffusion(registers.qubits())?)
//!     .add_ops(grover::measure_register(&registers))
//!     .build();
//! assert_eq!(circuit, grover::assemble(3, 5, 1)?);
//! # Ok(())
//! # }
//! ```

mod assembler;
mod diffusion;
mod oracle;

pub use assembler::{
    GroverRegisters, assemble, big_endian_clbit, initialize, measure_register, optimal_iterations,
    superposition,
};
pub use diffusion::build_diffusion;
pub use oracle::{build_oracle, oracle_flip_pattern, target_bits};
