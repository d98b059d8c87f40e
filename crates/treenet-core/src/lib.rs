//! `treenet-core`: Tree Tensor Network classifier circuits.
//!
//! Builds the hierarchical TTN ansatz of Grant et al. (2018) over an
//! `N`-qubit register as an `treenet_ir::Circuit`:
//!
//! - a [`ParameterStream`] of `2N - 1` named angles, consumed in order
//! - `N - 1` [`PairwiseBlock`]s (two rotations and an entangler each),
//!   laid out by the [`TreeReducer`]
//! - a final rotation on the surviving qubit, measured into bit 0
//!
//! [`AngleEmbedding`] encodes one feature per qubit, and
//! [`classifier_circuit`] chains the two behind a barrier.
//!
//! # Quick start
//!
//! ```rust
//! use treenet_core::{TtnBuilder, TtnConfig, classifier_circuit};
//!
//! let ttn = TtnBuilder::new(8).build().unwrap();
//! assert_eq!(ttn.blocks().len(), 7);
//! assert_eq!(ttn.parameters().len(), 15);
//!
//! let sample = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];
//! let circuit = classifier_circuit(&sample, 8, &TtnConfig::default()).unwrap();
//! assert_eq!(circuit.num_clbits(), 1);
//! ```

pub mod block;
pub mod builder;
pub mod classifier;
pub mod config;
pub mod embedding;
pub mod error;
pub mod reducer;
pub mod stream;

pub use block::{BlockGates, PairwiseBlock};
pub use builder::{OUTPUT_CLBIT, TtnBuilder, TtnCircuit};
pub use classifier::classifier_circuit;
pub use config::{ConfigError, Entangler, RotationAxis, TtnConfig};
pub use embedding::AngleEmbedding;
pub use error::{TtnError, TtnResult};
pub use reducer::{ActiveQubitSet, Reduction, TreeReducer};
pub use stream::{ParameterStream, required_parameters};
