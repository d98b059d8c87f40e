//! Error types for TTN construction and embedding.

use thiserror::Error;
use treenet_ir::QubitId;

use crate::config::ConfigError;

/// Errors produced while building classifier circuits.
///
/// All of them are raised at the point of detection and indicate a
/// programming or configuration mistake; none is transient.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TtnError {
    /// A circuit needs at least one qubit.
    #[error("TTN circuit needs at least 1 qubit, got {0}")]
    InvalidSize(u32),

    /// A consumer asked the parameter stream for more than it holds.
    #[error("Parameter stream exhausted: requested {requested}, only {remaining} remaining")]
    ExhaustedStream {
        /// Number of parameters requested.
        requested: usize,
        /// Number of parameters left in the stream.
        remaining: usize,
    },

    /// The tree did not leave exactly one parameter for the final rotation.
    #[error(
        "Parameter stream holds {remaining} parameters before the final rotation, expected exactly 1"
    )]
    StreamNotExhausted {
        /// Number of parameters left after all blocks were built.
        remaining: usize,
    },

    /// A block operand lies outside the circuit.
    #[error("Qubit {qubit} is out of range for a {n_qubits}-qubit circuit")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the circuit.
        n_qubits: u32,
    },

    /// Both block operands are the same qubit.
    #[error("Pairwise block needs two distinct qubits, got {0} twice")]
    DuplicateQubit(QubitId),

    /// An embedding sample has fewer features than the circuit has qubits.
    #[error("Sample has {got} features but the circuit needs {expected}")]
    SampleTooShort {
        /// Number of qubits to encode.
        expected: usize,
        /// Number of features supplied.
        got: usize,
    },

    /// The requested TTN variant has no implementation.
    #[error("TTN variant '{0}' is not implemented")]
    Unsupported(&'static str),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] treenet_ir::IrError),
}

/// Result type for TTN operations.
pub type TtnResult<T> = Result<T, TtnError>;
