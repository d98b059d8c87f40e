//! Angle (qubit) encoding of image features.
//!
//! One feature per qubit, used directly as a rotation angle; no clipping or
//! scaling is applied.

use ndarray::ArrayView2;
use tracing::debug;
use treenet_ir::{Circuit, Instruction, qubit_range};

use crate::config::RotationAxis;
use crate::error::{TtnError, TtnResult};

/// Maps a flattened sample to one rotation per qubit.
#[derive(Debug, Clone, Copy)]
pub struct AngleEmbedding {
    n_qubits: u32,
    rotation: RotationAxis,
}

impl AngleEmbedding {
    /// Embedding over `n_qubits` qubits using `ry` rotations.
    pub fn new(n_qubits: u32) -> Self {
        Self {
            n_qubits,
            rotation: RotationAxis::Y,
        }
    }

    /// Use a different rotation axis.
    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationAxis) -> Self {
        self.rotation = rotation;
        self
    }

    /// Width of the produced circuits.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Encode the first `n_qubits` values of `sample`; extra values are
    /// ignored. The circuit has no classical bits and no measurement.
    pub fn embed(&self, sample: &[f64]) -> TtnResult<Circuit> {
        if self.n_qubits == 0 {
            return Err(TtnError::InvalidSize(0));
        }
        let needed = self.n_qubits as usize;
        if sample.len() < needed {
            return Err(TtnError::SampleTooShort {
                expected: needed,
                got: sample.len(),
            });
        }

        debug!(
            n_qubits = self.n_qubits,
            sample_len = sample.len(),
            rotation = %self.rotation,
            "embedding sample"
        );

        let mut circuit = Circuit::with_size("embedding", self.n_qubits, 0);
        for (qubit, &angle) in qubit_range(self.n_qubits).zip(sample) {
            circuit.apply(Instruction::single_qubit_gate(
                self.rotation.gate(angle),
                qubit,
            ))?;
        }
        Ok(circuit)
    }

    /// Flatten a 2-D image row-major and encode it.
    pub fn embed_image(&self, image: ArrayView2<'_, f64>) -> TtnResult<Circuit> {
        let flat: Vec<f64> = image.iter().copied().collect();
        self.embed(&flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use treenet_ir::{ParameterExpression, QubitId, StandardGate};

    fn angles(circuit: &Circuit) -> Vec<f64> {
        circuit
            .instructions()
            .iter()
            .filter_map(|i| i.as_gate())
            .filter_map(|g| g.kind.parameter())
            .filter_map(ParameterExpression::as_f64)
            .collect()
    }

    #[test]
    fn test_embed_uses_first_values() {
        let circuit = AngleEmbedding::new(3)
            .embed(&[0.1, -2.5, 7.0, 9.9])
            .unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 0);
        assert_eq!(angles(&circuit), vec![0.1, -2.5, 7.0]);
        assert!(circuit.instructions().iter().all(|i| !i.is_measure()));
        assert_eq!(circuit.instructions()[1].qubits, vec![QubitId(1)]);
    }

    #[test]
    fn test_embed_rotation_axis() {
        let circuit = AngleEmbedding::new(1)
            .with_rotation(RotationAxis::X)
            .embed(&[0.5])
            .unwrap();
        assert_eq!(
            circuit.instructions()[0].as_gate().map(|g| &g.kind),
            Some(&StandardGate::Rx(ParameterExpression::constant(0.5)))
        );
    }

    #[test]
    fn test_embed_short_sample() {
        assert!(matches!(
            AngleEmbedding::new(4).embed(&[1.0, 2.0]),
            Err(TtnError::SampleTooShort {
                expected: 4,
                got: 2
            })
        ));
        assert!(matches!(
            AngleEmbedding::new(0).embed(&[1.0]),
            Err(TtnError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_embed_image_row_major() {
        let image = array![[0.0, 1.0], [2.0, 3.0]];
        let circuit = AngleEmbedding::new(3).embed_image(image.view()).unwrap();
        assert_eq!(angles(&circuit), vec![0.0, 1.0, 2.0]);
        assert_eq!(circuit.depth(), 1);
    }
}
