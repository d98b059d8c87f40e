//! Error types for QASM emission.

use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// The target dialect has no way to declare a free parameter.
    #[error("Parameter '{0}' must be bound before emitting OpenQASM 2.0")]
    UnboundParameter(String),

    /// OpenQASM has no literal for NaN or infinity.
    #[error("Angle {0} is not a finite number")]
    NonFiniteAngle(f64),
}

/// Result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;
