// tests/grover_tests.rs

use qgrep::grover::{self, GroverRegisters};
use qgrep::{Circuit, CircuitBuilder, GroverError, Operation, QubitId, SimulationAdapter, Simulator};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn qid(id: u32) -> QubitId {
    QubitId(id)
}

/// Register prepared in the uniform superposition, ancilla in |->.
fn prepared(registers: &GroverRegisters) -> CircuitBuilder {
    CircuitBuilder::new()
        .add_ops(grover::initialize(registers))
        .add_ops(grover::superposition(registers))
}

fn success_probability(qubit_count: u32, target: u64, iterations: u32) -> Result<f64, GroverError> {
    let circuit = grover::assemble(qubit_count, target, iterations)?;
    let probabilities = Simulator::with_seed(0).outcome_probabilities(&circuit)?;
    Ok(probabilities.get(&target).copied().unwrap_or(0.0))
}

fn assert_states_close(a: &qgrep::StateVector, b: &qgrep::StateVector) {
    assert_eq!(a.dim(), b.dim());
    for (k, (x, y)) in a.vector().iter().zip(b.vector()).enumerate() {
        assert!((x - y).norm() < TOLERANCE, "amplitude {} differs: {} vs {}", k, x, y);
    }
}

#[test]
fn test_oracle_marks_only_the_target() -> Result<(), GroverError> {
    // Oracle without diffusion only changes phases; prefix it with a basis
    // preparation and the register outcome must be unchanged.
    let registers = GroverRegisters::allocate(3)?;
    for target in 0..8u64 {
        let oracle = grover::build_oracle(registers.qubits(), registers.ancilla(), target, 3)?;
        let circuit = prepared(&registers)
            .add_ops(oracle)
            .add_ops(grover::measure_register(&registers))
            .build();
        let probabilities = Simulator::with_seed(1).outcome_probabilities(&circuit)?;
        for outcome in 0..8u64 {
            let p = probabilities.get(&outcome).copied().unwrap_or(0.0);
            assert!((p - 0.125).abs() < TOLERANCE, "target {} outcome {}: {}", target, outcome, p);
        }
    }
    Ok(())
}

#[test]
fn test_oracle_flips_the_target_phase() -> Result<(), GroverError> {
    let registers = GroverRegisters::allocate(2)?;
    let before = prepared(&registers).build();
    let oracle = grover::build_oracle(registers.qubits(), registers.ancilla(), 2, 2)?;
    let after = prepared(&registers).add_ops(oracle).build();

    let mut simulator = Simulator::with_seed(3);
    let before = simulator.final_state(&before)?;
    let after = simulator.final_state(&after)?;

    // Register |10> is index 0b10x of the 3-qubit state (ancilla last).
    for k in 0..before.dim() {
        let expected = if k >> 1 == 0b10 { -before.vector()[k] } else { before.vector()[k] };
        assert!((after.vector()[k] - expected).norm() < TOLERANCE, "amplitude {}", k);
    }
    Ok(())
}

#[test]
fn test_diffusion_applied_twice_is_identity() -> Result<(), GroverError> {
    let registers = GroverRegisters::allocate(3)?;
    let skewed = CircuitBuilder::new()
        .hadamard(qid(0))
        .flip(qid(2))
        .controlled_flip(vec![qid(0)], qid(1));
    let diffusion = grover::build_diffusion(registers.qubits())?;

    let reference = skewed.clone().build();
    let twice = skewed.add_ops(diffusion.clone()).add_ops(diffusion).build();

    let mut simulator = Simulator::with_seed(5);
    assert_states_close(&simulator.final_state(&reference)?, &simulator.final_state(&twice)?);
    Ok(())
}

#[test]
fn test_success_probability_peaks_at_optimal_iterations() -> Result<(), GroverError> {
    let optimal = grover::optimal_iterations(4, 1);
    assert_eq!(optimal, 3);

    let curve: Vec<f64> = (1..=5)
        .map(|k| success_probability(4, 9, k))
        .collect::<Result<_, _>>()?;
    // sin^2((2k + 1) * asin(1/4))
    let theta = 0.25f64.asin();
    for (i, p) in curve.iter().enumerate() {
        let expected = ((2 * (i + 1) + 1) as f64 * theta).sin().powi(2);
        assert!((p - expected).abs() < 1e-6, "k = {}: {} vs {}", i + 1, p, expected);
    }
    assert!(curve[0] < curve[1] && curve[1] < curve[2]);
    assert!(curve[3] < curve[2], "overshooting must lose probability");
    assert!(curve[2] > 0.95);
    Ok(())
}

#[test]
fn test_single_round_from_marked_basis_state() -> Result<(), GroverError> {
    // Register starts in |111> instead of the superposition; one round leaves
    // amplitude -3/4 on the target and 1/4 everywhere else.
    let registers = GroverRegisters::allocate(3)?;
    let mut builder = CircuitBuilder::new().add_ops(grover::initialize(&registers));
    for &q in registers.qubits() {
        builder = builder.flip(q);
    }
    let circuit = builder
        .hadamard(registers.ancilla())
        .add_ops(grover::build_oracle(registers.qubits(), registers.ancilla(), 7, 3)?)
        .add_ops(grover::build_diffusion(registers.qubits())?)
        .add_ops(grover::measure_register(&registers))
        .build();

    let probabilities = Simulator::with_seed(11).outcome_probabilities(&circuit)?;
    assert!((probabilities[&7] - 0.5625).abs() < TOLERANCE);
    for outcome in 0..7u64 {
        assert!((probabilities[&outcome] - 0.0625).abs() < TOLERANCE);
    }

    let counts = Simulator::with_seed(11).execute(&circuit, 2000)?;
    assert_eq!(counts.most_frequent().map(|(outcome, _)| outcome), Some(7));
    Ok(())
}

#[test]
fn test_boundary_targets_are_amplified() -> Result<(), GroverError> {
    for qubit_count in 1..=5u32 {
        let iterations = grover::optimal_iterations(qubit_count, 1);
        let top = (1u64 << qubit_count) - 1;
        for target in [0, top] {
            let p = success_probability(qubit_count, target, iterations)?;
            let uniform = 1.0 / (1u64 << qubit_count) as f64;
            assert!(p >= uniform - TOLERANCE, "n = {}, target {}: {}", qubit_count, target, p);
        }
    }
    // Beyond the register
    assert_eq!(
        grover::assemble(3, 8, 1),
        Err(GroverError::InvalidOracleRange { target: 8, qubit_count: 3 })
    );
    Ok(())
}

#[test]
fn test_assembled_circuit_layout() -> Result<(), GroverError> {
    let circuit: Circuit = grover::assemble(2, 1, 2)?;
    let ops = circuit.operations();

    assert_eq!(circuit.qubits().len(), 3);
    assert_eq!(circuit.num_clbits(), 2);
    assert_eq!(ops.first(), Some(&Operation::Reset { target: qid(0) }));
    assert_eq!(
        &ops[ops.len() - 2..],
        &[
            Operation::Measure { target: qid(0), clbit: 1 },
            Operation::Measure { target: qid(1), clbit: 0 },
        ]
    );
    assert_eq!(circuit.terminal_measurements_start(), Some(ops.len() - 2));
    Ok(())
}

#[test]
fn test_invalid_assembly_arguments() {
    assert_eq!(
        grover::assemble(3, 1, 0),
        Err(GroverError::InvalidIterations { iterations: 0 })
    );
    assert!(matches!(grover::assemble(0, 0, 1), Err(GroverError::EmptyRegister { .. })));
    assert!(matches!(grover::build_diffusion(&[]), Err(GroverError::EmptyRegister { .. })));
}

proptest! {
    #[test]
    fn oracle_is_self_inverse(qubit_count in 1u32..=4, raw_target in any::<u64>(), seed in any::<u64>()) {
        let target = raw_target % (1u64 << qubit_count);
        let registers = GroverRegisters::allocate(qubit_count).unwrap();
        let oracle = grover::build_oracle(registers.qubits(), registers.ancilla(), target, qubit_count).unwrap();

        // Arbitrary non-uniform start: H on even qubits, flips on odd ones.
        let mut start = CircuitBuilder::new();
        for (i, &q) in registers.qubits().iter().enumerate() {
            start = if i % 2 == 0 { start.hadamard(q) } else { start.flip(q) };
        }
        start = start.hadamard(registers.ancilla());

        let reference = start.clone().build();
        let twice = start.add_ops(oracle.clone()).add_ops(oracle).build();

        let mut simulator = Simulator::with_seed(seed);
        let a = simulator.final_state(&reference).unwrap();
        let b = simulator.final_state(&twice).unwrap();
        for (x, y) in a.vector().iter().zip(b.vector()) {
            prop_assert!((x - y).norm() < TOLERANCE);
        }
    }

    #[test]
    fn flip_pattern_is_the_zero_digits(qubit_count in 1u32..=12, raw_target in any::<u64>()) {
        let target = raw_target % (1u64 << qubit_count);
        let qubits: Vec<QubitId> = (0..qubit_count).map(QubitId).collect();
        let pattern = grover::oracle_flip_pattern(&qubits, target, qubit_count).unwrap();
        let bits = grover::target_bits(target, qubit_count).unwrap();

        let expected: Vec<QubitId> = qubits
            .iter()
            .zip(&bits)
            .filter(|(_, bit)| !**bit)
            .map(|(q, _)| *q)
            .collect();
        prop_assert_eq!(pattern, expected);
        prop_assert_eq!(bits.len(), qubit_count as usize);
    }
}
