//! Tests for angle embedding of image samples.

use ndarray::Array2;
use treenet_core::{AngleEmbedding, RotationAxis, TtnError};
use treenet_ir::{ParameterExpression, QubitId};

fn encoded_angles(embedding: &AngleEmbedding, sample: &[f64]) -> Vec<(QubitId, f64)> {
    embedding
        .embed(sample)
        .unwrap()
        .instructions()
        .iter()
        .map(|op| {
            let angle = op
                .as_gate()
                .and_then(|g| g.kind.parameter())
                .and_then(ParameterExpression::as_f64)
                .unwrap();
            (op.qubits[0], angle)
        })
        .collect()
}

#[test]
fn values_are_used_verbatim() {
    let embedding = AngleEmbedding::new(4);
    let encoded = encoded_angles(&embedding, &[-10.0, 0.0, 3.5, 1e6]);
    assert_eq!(
        encoded,
        vec![
            (QubitId(0), -10.0),
            (QubitId(1), 0.0),
            (QubitId(2), 3.5),
            (QubitId(3), 1e6),
        ]
    );
}

#[test]
fn default_rotation_is_ry() {
    let circuit = AngleEmbedding::new(2).embed(&[0.1, 0.2]).unwrap();
    assert!(circuit.instructions().iter().all(|op| op.name() == "ry"));
    assert!(circuit.parameters().is_empty());
}

#[test]
fn rotation_axis_is_configurable() {
    let circuit = AngleEmbedding::new(2)
        .with_rotation(RotationAxis::Z)
        .embed(&[0.1, 0.2])
        .unwrap();
    assert!(circuit.instructions().iter().all(|op| op.name() == "rz"));
}

#[test]
fn image_is_flattened_row_major() {
    let image = Array2::from_shape_vec((2, 2), vec![0.25, 0.5, 0.75, 1.0]).unwrap();
    let circuit = AngleEmbedding::new(4).embed_image(image.view()).unwrap();
    let angles: Vec<f64> = circuit
        .instructions()
        .iter()
        .filter_map(|op| op.as_gate()?.kind.parameter()?.as_f64())
        .collect();
    assert_eq!(angles, vec![0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn small_image_rejected() {
    let image = Array2::<f64>::zeros((1, 3));
    assert!(matches!(
        AngleEmbedding::new(4).embed_image(image.view()),
        Err(TtnError::SampleTooShort {
            expected: 4,
            got: 3
        })
    ));
}
