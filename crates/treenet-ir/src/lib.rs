//! treenet circuit intermediate representation
//!
//! Core data structures for describing the circuits treenet builds: qubit
//! and bit identifiers, rotation parameters, gates, instructions, and the
//! ordered [`Circuit`] with its dependency [`CircuitDag`].
//!
//! # Example: a parameterized two-qubit block
//!
//! ```rust
//! use treenet_ir::{Circuit, ClbitId, ParameterVector, QubitId};
//!
//! let theta = ParameterVector::new("theta", 3);
//! let mut circuit = Circuit::with_size("block", 2, 1);
//!
//! circuit.ry(theta.as_slice()[0].clone(), QubitId(0)).unwrap();
//! circuit.ry(theta.as_slice()[1].clone(), QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.ry(theta.as_slice()[2].clone(), QubitId(1)).unwrap();
//! circuit.measure(QubitId(1), ClbitId(0)).unwrap();
//!
//! assert_eq!(circuit.num_ops(), 5);
//! assert_eq!(circuit.parameters().len(), 3);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CZ` | 2 | Controlled-Z |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::{ParameterExpression, ParameterVector};
pub use qubit::{ClbitId, QubitId, qubit_range};
