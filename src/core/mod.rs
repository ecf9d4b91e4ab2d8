// src/core/mod.rs

//! Core data structures and types

pub mod constants;
pub mod error;
pub mod qubit;
pub mod state;

// Re-export public types for convenient access via `qgrep::core::TypeName`
pub use error::{GroverError, Result};
pub use qubit::QubitId;
pub use state::StateVector;
