//! Assembly of the trainable TTN circuit.

use tracing::{debug, instrument};
use treenet_ir::{Circuit, ClbitId, Instruction, ParameterExpression, ParameterVector, QubitId};

use crate::block::{BlockGates, PairwiseBlock};
use crate::config::TtnConfig;
use crate::error::{TtnError, TtnResult};
use crate::reducer::{ActiveQubitSet, TreeReducer};
use crate::stream::{ParameterStream, required_parameters};

/// Classical bit the output qubit is measured into.
pub const OUTPUT_CLBIT: ClbitId = ClbitId(0);

/// Builds hierarchical Tree Tensor Network classifier circuits
/// (Grant et al., 2018).
///
/// # Example
///
/// ```rust
/// use treenet_core::TtnBuilder;
/// use treenet_ir::QubitId;
///
/// let ttn = TtnBuilder::new(4).build().unwrap();
/// assert_eq!(ttn.blocks().len(), 3);
/// assert_eq!(ttn.output_qubit(), QubitId(3));
/// assert_eq!(ttn.circuit().parameters().len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct TtnBuilder {
    n_qubits: u32,
    config: TtnConfig,
}

impl TtnBuilder {
    /// Builder for an `n_qubits`-wide tree with the default configuration.
    pub fn new(n_qubits: u32) -> Self {
        Self {
            n_qubits,
            config: TtnConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: TtnConfig) -> Self {
        self.config = config;
        self
    }

    /// Width of the circuit.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Active configuration.
    pub fn config(&self) -> &TtnConfig {
        &self.config
    }

    /// Number of trainable parameters the circuit will carry.
    pub fn parameter_count(&self) -> TtnResult<usize> {
        required_parameters(self.n_qubits).ok_or(TtnError::InvalidSize(self.n_qubits))
    }

    /// Build the circuit with a fresh, correctly sized parameter stream.
    #[instrument(skip(self), fields(n_qubits = self.n_qubits))]
    pub fn build(&self) -> TtnResult<TtnCircuit> {
        self.check_variant()?;
        let stream = ParameterStream::for_qubits(self.n_qubits, &self.config.parameter_prefix)?;
        self.build_with_stream(stream)
    }

    /// Build the circuit drawing parameters from `stream`.
    ///
    /// The stream must hold exactly one parameter once the tree is built;
    /// otherwise the build fails with [`TtnError::StreamNotExhausted`].
    pub fn build_with_stream(&self, mut stream: ParameterStream) -> TtnResult<TtnCircuit> {
        self.check_variant()?;
        let reducer = TreeReducer::new(self.n_qubits)?;
        debug!(
            n_qubits = self.n_qubits,
            stream_len = stream.len(),
            "building TTN circuit"
        );

        let reduction = reducer.reduce(&mut stream)?;

        if stream.remaining() != 1 {
            return Err(TtnError::StreamNotExhausted {
                remaining: stream.remaining(),
            });
        }

        let gates = BlockGates::from(&self.config);
        let mut circuit = Circuit::with_size("ttn", self.n_qubits, 1);
        for block in &reduction.blocks {
            circuit.compose(&block.to_circuit(self.n_qubits, gates)?)?;
        }

        let final_rotation = stream.take_one()?;
        circuit.apply(Instruction::single_qubit_gate(
            self.config.rotation.gate(final_rotation.clone()),
            reduction.output,
        ))?;
        circuit.measure(reduction.output, OUTPUT_CLBIT)?;

        debug!(
            blocks = reduction.blocks.len(),
            output = reduction.output.0,
            depth = circuit.depth(),
            "TTN circuit assembled"
        );

        Ok(TtnCircuit {
            circuit,
            blocks: reduction.blocks,
            levels: reduction.levels,
            output: reduction.output,
            final_rotation,
            parameters: stream.into_vector(),
        })
    }

    fn check_variant(&self) -> TtnResult<()> {
        if self.config.complex_struct {
            return Err(TtnError::Unsupported("complex_struct"));
        }
        Ok(())
    }
}

/// An assembled TTN circuit together with the structure it was built from.
#[derive(Debug, Clone)]
pub struct TtnCircuit {
    circuit: Circuit,
    blocks: Vec<PairwiseBlock>,
    levels: Vec<ActiveQubitSet>,
    output: QubitId,
    final_rotation: ParameterExpression,
    parameters: ParameterVector,
}

impl TtnCircuit {
    /// The circuit: blocks in build order, final rotation, measurement.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Give up the structure and keep the circuit.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    /// Blocks in the order they were built and appended.
    pub fn blocks(&self) -> &[PairwiseBlock] {
        &self.blocks
    }

    /// Active qubit set at each reduction level.
    pub fn levels(&self) -> &[ActiveQubitSet] {
        &self.levels
    }

    /// The measured qubit.
    pub fn output_qubit(&self) -> QubitId {
        self.output
    }

    /// Angle of the final rotation on the output qubit.
    pub fn final_rotation(&self) -> &ParameterExpression {
        &self.final_rotation
    }

    /// The trainable parameters, in consumption order.
    pub fn parameters(&self) -> &ParameterVector {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_four() {
        let ttn = TtnBuilder::new(4).build().unwrap();
        let circuit = ttn.circuit();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_clbits(), 1);
        // 3 blocks × 3 gates + final rotation + measurement
        assert_eq!(circuit.num_ops(), 11);
        assert_eq!(ttn.output_qubit(), QubitId(3));
        assert_eq!(
            ttn.final_rotation(),
            &ParameterExpression::symbol("theta[6]")
        );
    }

    #[test]
    fn test_parameter_count() {
        assert_eq!(TtnBuilder::new(4).parameter_count().unwrap(), 7);
        assert!(matches!(
            TtnBuilder::new(0).parameter_count(),
            Err(TtnError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_builders_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TtnBuilder>();
        assert_send_sync::<TtnCircuit>();
    }

    #[test]
    fn test_complex_struct_unsupported() {
        let config = TtnConfig {
            complex_struct: true,
            ..TtnConfig::default()
        };
        assert!(matches!(
            TtnBuilder::new(4).with_config(config).build(),
            Err(TtnError::Unsupported("complex_struct"))
        ));
    }
}
