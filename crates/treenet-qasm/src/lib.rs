//! `OpenQASM` emission for treenet circuits
//!
//! Serializes a [`treenet_ir::Circuit`] in instruction order.
//!
//! | Dialect | Registers | Measurement | Free parameters |
//! |---------|-----------|-------------|-----------------|
//! | 3.0 ([`emit`]) | `qubit[n] q;` / `bit[n] c;` | `c[0] = measure q[3];` | `input` declarations |
//! | 2.0 ([`emit_qasm2`]) | `qreg q[n];` / `creg c[n];` | `measure q[3] -> c[0];` | rejected |
//!
//! # Example
//!
//! ```rust
//! use treenet_core::TtnBuilder;
//! use treenet_qasm::emit;
//!
//! let ttn = TtnBuilder::new(2).build().unwrap();
//! let qasm = emit(ttn.circuit()).unwrap();
//!
//! assert!(qasm.contains("input array[float[64], 3] theta;"));
//! assert!(qasm.contains("ry(theta[0]) q[0];"));
//! assert!(qasm.contains("c[0] = measure q[1];"));
//! ```

mod emitter;
mod error;

pub use emitter::{emit, emit_qasm2};
pub use error::{EmitError, EmitResult};
