// src/lib.rs

//! `qgrep` - substring search over text using simulated Grover search circuits
//!
//! Every character of the search target becomes one Grover search: an oracle
//! marks the character's code point, diffusion rounds amplify it, and the
//! sampled outcomes are mapped back onto the positions of a padded code-point
//! matrix of the text. Candidate positions are intersected character by
//! character to find the lines containing the whole target.

pub mod circuits;
pub mod config;
pub mod core;
pub mod grover;
pub mod operations;
pub mod search;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use circuits::{Circuit, CircuitBuilder};
pub use config::SearchConfig;
pub use core::{GroverError, QubitId, StateVector};
pub use operations::Operation;
pub use search::{CharMatrix, SubstringMatcher, encode_str};
pub use simulation::{MeasurementCounts, SimulationAdapter, Simulator};
pub use validation::{check_normalization, check_probability_vector};

// Example 1: Amplifying a marked integer
// Builds a 3-qubit Grover circuit marking 5 and samples it on a seeded simulator.
/// ```
/// use qgrep::{grover, SimulationAdapter, Simulator};
///
/// let circuit = grover::assemble(3, 5, grover::optimal_iterations(3, 1)).unwrap();
/// let mut simulator = Simulator::with_seed(7);
/// let counts = simulator.execute(&circuit, 1024).unwrap();
///
/// println!("Circuit:\n{}", circuit);
/// println!("{}", counts);
///
/// // Two rounds over 8 states put ~94.5% of the probability on |101>.
/// assert_eq!(counts.most_frequent().map(|(outcome, _)| outcome), Some(5));
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: Finding lines that contain a string
/// ```
/// use qgrep::{CharMatrix, SearchConfig, SubstringMatcher, encode_str};
///
/// let haystack = CharMatrix::from_lines(["cat", "dog", "cats"]);
/// let config = SearchConfig { seed: Some(1), ..SearchConfig::default() };
/// let mut matcher = SubstringMatcher::new(config.simulator(), config).unwrap();
///
/// let lines = matcher.find(&haystack, &encode_str("cat")).unwrap();
/// assert_eq!(lines.into_iter().collect::<Vec<_>>(), vec![0, 2]);
/// ```
#[doc(hidden)]
const _: () = ();
