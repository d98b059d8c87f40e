//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::ParameterExpression;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit: an ordered list of instructions over a fixed set of
/// qubit and classical wires.
///
/// Instructions are kept in insertion order, which is the order a caller
/// built them in; [`dag`](Self::dag) offers the dependency view.
#[derive(Debug, Clone, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubit wires.
    num_qubits: u32,
    /// Number of classical wires.
    num_clbits: u32,
    /// Instructions in insertion order.
    instructions: Vec<Instruction>,
    /// Dependency view of `instructions`.
    #[serde(skip)]
    dag: CircuitDag,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            num_clbits: 0,
            instructions: vec![],
            dag: CircuitDag::new(),
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        self.dag.add_qubit(id);
        id
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.num_clbits);
        self.num_clbits += 1;
        self.dag.add_clbit(id);
        id
    }

    /// Validate and append an instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.dag.apply(self.instructions.len(), &instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        ))
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply a (possibly labelled) gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier((0..self.num_qubits).map(QubitId)))
    }

    // =========================================================================
    // Composition and binding
    // =========================================================================

    /// Append every instruction of `other` on the same qubit and bit indices.
    ///
    /// `other` may be narrower than `self` but not wider; missing classical
    /// bits are added to `self`. A width mismatch is the only failure and
    /// is reported before anything is appended.
    pub fn compose(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits > self.num_qubits {
            return Err(IrError::WidthMismatch {
                this: self.num_qubits(),
                other: other.num_qubits(),
            });
        }
        while self.num_clbits < other.num_clbits {
            self.add_clbit();
        }
        // Every instruction of `other` already passed `apply` on a circuit no
        // wider than `self`, so none of these can fail.
        for instruction in &other.instructions {
            self.apply(instruction.clone())?;
        }
        Ok(self)
    }

    /// Return a copy with every symbol found in `values` replaced by its
    /// value. Unknown symbols are left in place.
    pub fn bind_parameters(&self, values: &FxHashMap<String, f64>) -> IrResult<Circuit> {
        let mut bound = Circuit::with_size(self.name.clone(), self.num_qubits, self.num_clbits);
        for instruction in &self.instructions {
            let mut instruction = instruction.clone();
            if let Some(param) = instruction
                .gate_mut()
                .and_then(|gate| gate.kind.parameter_mut())
            {
                *param = param.bind_all(values);
            }
            bound.apply(instruction)?;
        }
        Ok(bound)
    }

    /// Sorted names of all unbound symbols in the circuit.
    pub fn parameters(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for param in self
            .instructions
            .iter()
            .filter_map(Instruction::as_gate)
            .filter_map(|gate| gate.kind.parameter())
        {
            param.collect_symbols(&mut names);
        }
        names
    }

    /// Serialize the circuit description as pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in insertion order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Get the circuit depth.
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Get a reference to the dependency DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }
}
