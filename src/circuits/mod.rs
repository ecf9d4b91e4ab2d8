// src/circuits/mod.rs

//! Ordered gate sequences (`Circuit`) and the fluent `CircuitBuilder` used
//! by the Grover factories to assemble them.

use crate::core::QubitId;
use crate::operations::Operation;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// An ordered sequence of operations over a set of qubits.
///
/// The qubit set and classical width are derived from the operations as they
/// are appended, so a finished circuit always knows how many qubits the
/// simulator must allocate and how wide its outcome integers are.
#[derive(Clone, PartialEq, Eq)]
pub struct Circuit {
    /// Every qubit touched by at least one operation, in id order.
    qubits: BTreeSet<QubitId>,

    /// The operations in application order.
    operations: Vec<Operation>,

    /// One more than the highest classical bit written by a measurement.
    num_clbits: u32,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: BTreeSet::new(),
            operations: Vec::new(),
            num_clbits: 0,
        }
    }

    /// Appends a single operation, registering the qubits it touches.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        if let Operation::Measure { clbit, .. } = op {
            self.num_clbits = self.num_clbits.max(clbit.saturating_add(1));
        }
        self.operations.push(op);
    }

    /// Appends every operation yielded by `ops`.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// The set of qubits involved in this circuit.
    pub fn qubits(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    /// The operations in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Width of the classical outcome register.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of measurement operations.
    pub fn measurement_count(&self) -> usize {
        self.operations.iter().filter(|op| op.is_measurement()).count()
    }

    /// Index of the first operation of the trailing measurement block, if
    /// every measurement in the circuit belongs to that block.
    ///
    /// Returns `None` when the circuit has no measurements or measures a
    /// qubit before later gates run.
    pub fn terminal_measurements_start(&self) -> Option<usize> {
        let start = self
            .operations
            .iter()
            .rposition(|op| !op.is_measurement())
            .map_or(0, |last_gate| last_gate + 1);
        let earlier_measurement = self.operations[..start].iter().any(Operation::is_measurement);
        if start == self.operations.len() || earlier_measurement {
            None
        } else {
            Some(start)
        }
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Builds a `Circuit` by method chaining.
///
/// The builder is passed by value through each call; the factory functions in
/// `crate::grover` return plain operation sequences which are appended with
/// [`CircuitBuilder::add_ops`].
#[derive(Clone)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Appends a single operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Appends every operation yielded by `ops`.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Resets `target` to |0>.
    pub fn reset(self, target: QubitId) -> Self {
        self.add_op(Operation::Reset { target })
    }

    /// Flips `target`.
    pub fn flip(self, target: QubitId) -> Self {
        self.add_op(Operation::Flip { target })
    }

    /// Applies a Hadamard to `target`.
    pub fn hadamard(self, target: QubitId) -> Self {
        self.add_op(Operation::Hadamard { target })
    }

    /// Flips `target` when all `controls` are |1>.
    pub fn controlled_flip(self, controls: Vec<QubitId>, target: QubitId) -> Self {
        self.add_op(Operation::ControlledFlip { controls, target })
    }

    /// Measures `target` into classical bit `clbit`.
    pub fn measure(self, target: QubitId, clbit: u32) -> Self {
        self.add_op(Operation::Measure { target, clbit })
    }

    /// Number of operations appended so far.
    pub fn len(&self) -> usize {
        self.circuit.len()
    }

    /// Returns `true` if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.circuit.is_empty()
    }

    /// Finishes construction.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Width of one time step in the diagram.
const CELL: usize = 7;

/// Gate label centred on a wire segment, truncated to the cell width.
fn cell(label: &str) -> String {
    let label: String = label.chars().take(CELL).collect();
    format!("{:─^width$}", label, width = CELL)
}

/// Draws one diagram column per operation: the label on each wire it acts
/// on, and whether a vertical connector runs below each wire.
fn column(op: &Operation, rows: &HashMap<QubitId, usize>, wires: usize) -> (Vec<String>, Vec<bool>) {
    let mut labels = vec![cell(""); wires];
    let mut links = vec![false; wires];
    let mut place = |qubit: &QubitId, label: &str| {
        if let Some(&row) = rows.get(qubit) {
            labels[row] = cell(label);
        }
    };

    match op {
        Operation::ControlledFlip { controls, target } => {
            controls.iter().for_each(|c| place(c, "@"));
            place(target, op.symbol());
            let touched: Vec<usize> = op.involved_qubits().iter().filter_map(|q| rows.get(q).copied()).collect();
            if let (Some(&top), Some(&bottom)) = (touched.iter().min(), touched.iter().max()) {
                links[top..bottom].iter_mut().for_each(|link| *link = true);
            }
        }
        Operation::Measure { target, clbit } => place(target, &format!("M{}", clbit)),
        _ => op.involved_qubits().iter().for_each(|q| place(q, op.symbol())),
    }
    (labels, links)
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "qgrep::Circuit[{} operations on {} qubits]",
            self.operations.len(),
            self.qubits.len()
        )?;
        if self.operations.is_empty() {
            return Ok(());
        }

        let wires: Vec<QubitId> = self.qubits.iter().copied().collect();
        let rows: HashMap<QubitId, usize> = wires.iter().enumerate().map(|(row, q)| (*q, row)).collect();
        let columns: Vec<(Vec<String>, Vec<bool>)> = self
            .operations
            .iter()
            .map(|op| column(op, &rows, wires.len()))
            .collect();

        let margin = wires.iter().map(|q| q.to_string().len()).max().unwrap_or(0) + 2;
        for (row, qubit) in wires.iter().enumerate() {
            write!(f, "{:<margin$}", format!("{}: ", qubit))?;
            for (labels, _) in &columns {
                f.write_str(&labels[row])?;
            }
            writeln!(f)?;

            if row + 1 < wires.len() {
                write!(f, "{:margin$}", "")?;
                for (_, links) in &columns {
                    let mark = if links[row] { '│' } else { ' ' };
                    write!(f, "{:^width$}", mark, width = CELL)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
