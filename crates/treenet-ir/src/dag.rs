//! Wire-dependency DAG over a circuit's instructions.
//!
//! The [`Circuit`](crate::Circuit) keeps its instructions in insertion order;
//! the DAG records which instruction feeds which along every qubit and
//! classical wire. Operation nodes store the index of their instruction in
//! the circuit, not a copy of it.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DagNode {
    /// Input node for a wire.
    In(WireId),
    /// Output node for a wire.
    Out(WireId),
    /// Operation node; holds the instruction's position in the circuit.
    Op(usize),
}

impl DagNode {
    /// Check if this is an operation node.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// The instruction position if this is an operation node.
    #[inline]
    pub fn op_index(&self) -> Option<usize> {
        match self {
            DagNode::Op(i) => Some(*i),
            _ => None,
        }
    }
}

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

impl From<QubitId> for WireId {
    fn from(q: QubitId) -> Self {
        WireId::Qubit(q)
    }
}

impl From<ClbitId> for WireId {
    fn from(c: ClbitId) -> Self {
        WireId::Clbit(c)
    }
}

/// An edge in the circuit DAG representing a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The wire this edge represents.
    pub wire: WireId,
}

/// DAG-based dependency view of a circuit.
///
/// - Each wire has exactly one input and one output node
/// - Operation nodes sit on the wires they touch, in insertion order
///
/// `wire_front` maps each wire to the node just before its output node, so
/// appending an operation is O(1) per wire. Operation depths are tracked on
/// insertion, which keeps [`depth`](Self::depth) free of a topological sort.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<DagNode, DagEdge, u32>,
    inputs: FxHashMap<WireId, NodeIndex>,
    outputs: FxHashMap<WireId, NodeIndex>,
    wire_front: FxHashMap<WireId, NodeIndex>,
    /// Depth of the last operation on each wire.
    wire_depth: FxHashMap<WireId, usize>,
    /// Node and depth of each operation, by instruction position.
    ops: Vec<(NodeIndex, usize)>,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self::default()
    }

    fn add_wire(&mut self, wire: WireId) {
        if self.inputs.contains_key(&wire) {
            return;
        }
        let in_node = self.graph.add_node(DagNode::In(wire));
        let out_node = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(in_node, out_node, DagEdge { wire });
        self.inputs.insert(wire, in_node);
        self.outputs.insert(wire, out_node);
        self.wire_front.insert(wire, in_node);
        self.wire_depth.insert(wire, 0);
    }

    /// Add a qubit wire.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        self.add_wire(WireId::Qubit(qubit));
    }

    /// Add a classical wire.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        self.add_wire(WireId::Clbit(clbit));
    }

    /// Validate `instruction` and attach it to the end of its wires.
    ///
    /// `position` must be the index the instruction will occupy in the
    /// owning circuit; positions are expected to arrive in increasing order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&mut self, position: usize, instruction: &Instruction) -> IrResult<NodeIndex> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            _ => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits() as usize;
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: expected as u32,
                    got: got as u32,
                });
            }
        }

        for &qubit in &instruction.qubits {
            if !self.inputs.contains_key(&WireId::Qubit(qubit)) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if !self.inputs.contains_key(&WireId::Clbit(clbit)) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        if position != self.ops.len() {
            return Err(IrError::InvalidDag(format!(
                "instruction position {position} does not follow {} existing operations",
                self.ops.len()
            )));
        }

        let wires: Vec<WireId> = instruction
            .qubits
            .iter()
            .copied()
            .map(WireId::Qubit)
            .chain(instruction.clbits.iter().copied().map(WireId::Clbit))
            .collect();

        let depth = 1 + wires
            .iter()
            .map(|w| self.wire_depth.get(w).copied().unwrap_or(0))
            .max()
            .unwrap_or(0);

        let op_node = self.graph.add_node(DagNode::Op(position));

        for wire in wires {
            let out_node = self.outputs[&wire];
            let prev_node = self.wire_front[&wire];

            let edge_id = self
                .graph
                .edges_directed(prev_node, Direction::Outgoing)
                .find(|e| e.weight().wire == wire && e.target() == out_node)
                .map(|e| e.id())
                .ok_or_else(|| {
                    IrError::InvalidDag(format!(
                        "Missing edge from predecessor to output for wire {wire:?}"
                    ))
                })?;
            self.graph.remove_edge(edge_id);
            self.graph.add_edge(prev_node, op_node, DagEdge { wire });
            self.graph.add_edge(op_node, out_node, DagEdge { wire });
            self.wire_front.insert(wire, op_node);
            self.wire_depth.insert(wire, depth);
        }

        self.ops.push((op_node, depth));
        Ok(op_node)
    }

    /// Get the number of qubit wires.
    pub fn num_qubits(&self) -> usize {
        self.inputs
            .keys()
            .filter(|w| matches!(w, WireId::Qubit(_)))
            .count()
    }

    /// Get the number of operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Node of the operation at instruction `position`.
    pub fn op_node(&self, position: usize) -> Option<NodeIndex> {
        self.ops.get(position).map(|(node, _)| *node)
    }

    /// Get a node by index.
    pub fn node(&self, node: NodeIndex) -> Option<DagNode> {
        self.graph.node_weight(node).copied()
    }

    /// Calculate the circuit depth (longest chain of dependent operations).
    pub fn depth(&self) -> usize {
        self.ops.iter().map(|(_, d)| *d).max().unwrap_or(0)
    }

    /// Instruction positions grouped by depth; layer `k` holds the operations
    /// whose longest dependency chain has `k + 1` operations.
    pub fn layers(&self) -> Vec<Vec<usize>> {
        let mut layers = vec![Vec::new(); self.depth()];
        for (position, (_, depth)) in self.ops.iter().enumerate() {
            layers[depth - 1].push(position);
        }
        layers
    }

    /// Qubits whose wires flow into `node`, including the node's own qubits.
    ///
    /// For a measurement this is the set of input features the measured bit
    /// can depend on.
    pub fn causal_cone(&self, node: NodeIndex) -> BTreeSet<QubitId> {
        let mut cone = BTreeSet::new();
        let mut visited = FxHashSet::default();
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            for edge in self.graph.edges_directed(current, Direction::Incoming) {
                if let WireId::Qubit(q) = edge.weight().wire {
                    cone.insert(q);
                }
                stack.push(edge.source());
            }
        }

        cone
    }
}
