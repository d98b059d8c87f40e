//! Two-qubit building block of the tree.
//!
//! A block rotates both of its qubits by a trainable angle and then
//! entangles them, control first:
//!
//! ```text
//! control: ─R(θ₁)─■─
//!                 │
//! target:  ─R(θ₂)─X─
//! ```

use treenet_ir::{Circuit, Gate, Instruction, ParameterExpression, QubitId};

use crate::config::{Entangler, RotationAxis, TtnConfig};
use crate::error::{TtnError, TtnResult};
use crate::stream::ParameterStream;

/// Gate choice for blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockGates {
    /// Rotation applied to each operand.
    pub rotation: RotationAxis,
    /// Entangling gate from control to target.
    pub entangler: Entangler,
}

impl From<&TtnConfig> for BlockGates {
    fn from(config: &TtnConfig) -> Self {
        Self {
            rotation: config.rotation,
            entangler: config.entangler,
        }
    }
}

/// One pairwise unit: `{control, target, θ_control, θ_target}`.
///
/// Immutable once built. The target is the pair's representative at the
/// next tree level.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseBlock {
    control: QubitId,
    target: QubitId,
    theta_control: ParameterExpression,
    theta_target: ParameterExpression,
}

impl PairwiseBlock {
    /// Build a block on `(control, target)` of an `n_qubits`-wide circuit,
    /// taking two parameters from `stream`.
    ///
    /// Operands are validated before anything is taken, so a rejected pair
    /// leaves the stream untouched.
    pub fn build(
        control: QubitId,
        target: QubitId,
        n_qubits: u32,
        stream: &mut ParameterStream,
    ) -> TtnResult<Self> {
        for qubit in [control, target] {
            if qubit.0 >= n_qubits {
                return Err(TtnError::QubitOutOfRange { qubit, n_qubits });
            }
        }
        if control == target {
            return Err(TtnError::DuplicateQubit(control));
        }

        let (theta_control, theta_target) = stream.take_pair()?;
        Ok(Self {
            control,
            target,
            theta_control,
            theta_target,
        })
    }

    /// Control qubit (first member of the pair).
    pub fn control(&self) -> QubitId {
        self.control
    }

    /// Target qubit (second member of the pair).
    pub fn target(&self) -> QubitId {
        self.target
    }

    /// The qubit carried forward to the next level: always the target.
    pub fn winner(&self) -> QubitId {
        self.target
    }

    /// The two angles, control's first.
    pub fn parameters(&self) -> [&ParameterExpression; 2] {
        [&self.theta_control, &self.theta_target]
    }

    /// Label attached to the block's gates.
    pub fn label(&self) -> String {
        format!("ttn_block({},{})", self.control.0, self.target.0)
    }

    /// The block's three instructions in application order.
    pub fn instructions(&self, gates: BlockGates) -> [Instruction; 3] {
        let label = self.label();
        [
            Instruction::gate(
                Gate::standard(gates.rotation.gate(self.theta_control.clone()))
                    .with_label(label.clone()),
                [self.control],
            ),
            Instruction::gate(
                Gate::standard(gates.rotation.gate(self.theta_target.clone()))
                    .with_label(label.clone()),
                [self.target],
            ),
            Instruction::gate(
                Gate::standard(gates.entangler.gate()).with_label(label),
                [self.control, self.target],
            ),
        ]
    }

    /// The block as a standalone sub-circuit of width `n_qubits`.
    ///
    /// The caller appends it to a parent circuit.
    pub fn to_circuit(&self, n_qubits: u32, gates: BlockGates) -> TtnResult<Circuit> {
        let mut circuit = Circuit::with_size(self.label(), n_qubits, 0);
        for instruction in self.instructions(gates) {
            circuit.apply(instruction)?;
        }
        Ok(circuit)
    }
}
