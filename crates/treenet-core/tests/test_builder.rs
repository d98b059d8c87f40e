//! Tests for TTN circuit assembly.

use std::io::Write;

use treenet_core::{
    Entangler, ParameterStream, RotationAxis, TtnBuilder, TtnConfig, TtnError, classifier_circuit,
};
use treenet_ir::{ClbitId, InstructionKind, ParameterExpression, ParameterVector, QubitId};

fn block_pairs(n: u32) -> Vec<(u32, u32)> {
    TtnBuilder::new(n)
        .build()
        .unwrap()
        .blocks()
        .iter()
        .map(|b| (b.control().0, b.target().0))
        .collect()
}

fn symbol(i: usize) -> ParameterExpression {
    ParameterExpression::symbol(format!("theta[{i}]"))
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn four_qubit_layout() {
    let ttn = TtnBuilder::new(4).build().unwrap();
    let ops = ttn.circuit().instructions();

    let expected: Vec<(&str, Vec<QubitId>, Option<ParameterExpression>)> = vec![
        ("ry", vec![QubitId(0)], Some(symbol(0))),
        ("ry", vec![QubitId(1)], Some(symbol(1))),
        ("cx", vec![QubitId(0), QubitId(1)], None),
        ("ry", vec![QubitId(2)], Some(symbol(2))),
        ("ry", vec![QubitId(3)], Some(symbol(3))),
        ("cx", vec![QubitId(2), QubitId(3)], None),
        ("ry", vec![QubitId(1)], Some(symbol(4))),
        ("ry", vec![QubitId(3)], Some(symbol(5))),
        ("cx", vec![QubitId(1), QubitId(3)], None),
        ("ry", vec![QubitId(3)], Some(symbol(6))),
        ("measure", vec![QubitId(3)], None),
    ];

    assert_eq!(ops.len(), expected.len());
    for (op, (name, qubits, param)) in ops.iter().zip(expected) {
        assert_eq!(op.name(), name);
        assert_eq!(op.qubits, qubits);
        let actual = op.as_gate().and_then(|g| g.kind.parameter()).cloned();
        assert_eq!(actual, param);
    }
    assert_eq!(ops[10].clbits, vec![ClbitId(0)]);
    assert_eq!(ttn.parameters().len(), 7);
}

#[test]
fn odd_widths_carry_trailing_qubit() {
    assert_eq!(block_pairs(3), vec![(0, 1), (1, 2)]);
    assert_eq!(block_pairs(5), vec![(0, 1), (2, 3), (1, 3), (3, 4)]);
    assert_eq!(
        block_pairs(8),
        vec![(0, 1), (2, 3), (4, 5), (6, 7), (1, 3), (3, 5), (5, 7)]
    );
}

#[test]
fn single_qubit_circuit() {
    let ttn = TtnBuilder::new(1).build().unwrap();
    let ops = ttn.circuit().instructions();

    assert!(ttn.blocks().is_empty());
    assert_eq!(ttn.output_qubit(), QubitId(0));
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].name(), "ry");
    assert_eq!(ops[0].as_gate().and_then(|g| g.kind.parameter()), Some(&symbol(0)));
    assert!(ops[1].is_measure());
    assert_eq!(ttn.circuit().num_clbits(), 1);
}

#[test]
fn two_qubit_circuit() {
    let ttn = TtnBuilder::new(2).build().unwrap();
    assert_eq!(block_pairs(2), vec![(0, 1)]);
    assert_eq!(ttn.output_qubit(), QubitId(1));
    assert_eq!(ttn.circuit().num_ops(), 5);
    assert_eq!(ttn.circuit().parameters().len(), 3);
}

#[test]
fn output_cone_covers_every_qubit() {
    let ttn = TtnBuilder::new(6).build().unwrap();
    let dag = ttn.circuit().dag();
    let measure = dag.op_node(ttn.circuit().num_ops() - 1).unwrap();
    let cone = dag.causal_cone(measure);
    assert_eq!(cone.len(), 6);
}

#[test]
fn build_is_deterministic() {
    let config = TtnConfig {
        rotation: RotationAxis::Z,
        ..TtnConfig::default()
    };
    let builder = TtnBuilder::new(7).with_config(config);
    let first = builder.build().unwrap().into_circuit();
    let second = builder.build().unwrap().into_circuit();
    assert_eq!(first.instructions(), second.instructions());
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn zero_qubits_rejected() {
    assert!(matches!(
        TtnBuilder::new(0).build(),
        Err(TtnError::InvalidSize(0))
    ));
}

#[test]
fn oversized_stream_rejected() {
    let stream = ParameterStream::new(ParameterVector::new("theta", 8));
    assert!(matches!(
        TtnBuilder::new(4).build_with_stream(stream),
        Err(TtnError::StreamNotExhausted { remaining: 2 })
    ));
}

#[test]
fn stream_without_final_parameter_rejected() {
    let stream = ParameterStream::new(ParameterVector::new("theta", 6));
    assert!(matches!(
        TtnBuilder::new(4).build_with_stream(stream),
        Err(TtnError::StreamNotExhausted { remaining: 0 })
    ));
}

#[test]
fn undersized_stream_rejected() {
    let stream = ParameterStream::new(ParameterVector::new("theta", 3));
    assert!(matches!(
        TtnBuilder::new(4).build_with_stream(stream),
        Err(TtnError::ExhaustedStream {
            requested: 2,
            remaining: 1
        })
    ));
}

#[test]
fn complex_variant_unsupported() {
    let config = TtnConfig {
        complex_struct: true,
        ..TtnConfig::default()
    };
    let err = TtnBuilder::new(4).with_config(config).build().unwrap_err();
    assert!(matches!(err, TtnError::Unsupported("complex_struct")));
    assert!(err.to_string().contains("complex_struct"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_file_drives_gates_and_names() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rotation: rx\nentangler: cz\nparameter_prefix: w").unwrap();

    let config = TtnConfig::from_file(file.path()).unwrap();
    assert_eq!(config.rotation, RotationAxis::X);
    assert_eq!(config.entangler, Entangler::Cz);

    let ttn = TtnBuilder::new(2).with_config(config).build().unwrap();
    let names: Vec<_> = ttn
        .circuit()
        .instructions()
        .iter()
        .map(|i| i.name().to_string())
        .collect();
    assert_eq!(names, vec!["rx", "rx", "cz", "rx", "measure"]);
    assert!(ttn.circuit().parameters().contains("w[2]"));
}

#[test]
fn classifier_prepends_embedding() {
    let sample = [0.3, 0.1, 0.4, 0.1, 0.5];
    let circuit = classifier_circuit(&sample, 4, &TtnConfig::default()).unwrap();
    let ops = circuit.instructions();

    assert!(
        ops[..4]
            .iter()
            .all(|op| op.as_gate().and_then(|g| g.kind.parameter()).is_some_and(|p| !p.is_symbolic()))
    );
    assert!(matches!(ops[4].kind, InstructionKind::Barrier));
    assert_eq!(ops[4].qubits.len(), 4);
    assert_eq!(ops.len(), 4 + 1 + 11);

    assert!(matches!(
        classifier_circuit(&sample[..2], 4, &TtnConfig::default()),
        Err(TtnError::SampleTooShort {
            expected: 4,
            got: 2
        })
    ));
}
