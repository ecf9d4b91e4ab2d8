// src/search/mod.rs

//! Substring search over text built on per-character Grover searches.
//!
//! The pipeline is: text → [`CharMatrix`] of code points → one
//! [`assemble`](crate::grover::assemble)d circuit per target character →
//! [`SimulationAdapter`](crate::simulation::SimulationAdapter) →
//! [`estimate`] → candidate positions → matching line numbers.

mod estimate;
mod matcher;
mod text;

pub use estimate::estimate;
pub use matcher::{SubstringMatcher, register_width};
pub use text::{CharMatrix, FILLER, encode_str};
