//! Emission of full TTN and classifier circuits.

use proptest::prelude::*;
use rustc_hash::FxHashMap;
use treenet_core::{TtnBuilder, TtnConfig, classifier_circuit};
use treenet_qasm::{EmitError, emit, emit_qasm2};

#[test]
fn four_qubit_ttn_qasm3() {
    let ttn = TtnBuilder::new(4).build().unwrap();
    let qasm = emit(ttn.circuit()).unwrap();

    let expected = "\
OPENQASM 3.0;
include \"stdgates.inc\";

input array[float[64], 7] theta;

qubit[4] q;
bit[1] c;

// ttn_block(0,1)
ry(theta[0]) q[0];
ry(theta[1]) q[1];
cx q[0], q[1];
// ttn_block(2,3)
ry(theta[2]) q[2];
ry(theta[3]) q[3];
cx q[2], q[3];
// ttn_block(1,3)
ry(theta[4]) q[1];
ry(theta[5]) q[3];
cx q[1], q[3];
ry(theta[6]) q[3];
c[0] = measure q[3];
";
    assert_eq!(qasm, expected);
}

#[test]
fn classifier_qasm3_has_barrier() {
    let circuit = classifier_circuit(&[0.5, 1.5], 2, &TtnConfig::default()).unwrap();
    let qasm = emit(&circuit).unwrap();

    assert!(qasm.contains("ry(0.5) q[0];\nry(1.5) q[1];\nbarrier q[0], q[1];\n"));
    assert!(qasm.contains("input array[float[64], 3] theta;"));
}

#[test]
fn classifier_with_nan_feature_fails_to_emit() {
    let circuit = classifier_circuit(&[0.5, f64::NAN], 2, &TtnConfig::default()).unwrap();
    assert!(matches!(emit(&circuit), Err(EmitError::NonFiniteAngle(v)) if v.is_nan()));
}

#[test]
fn ttn_qasm2_needs_binding() {
    let circuit = TtnBuilder::new(3).build().unwrap().into_circuit();
    assert!(matches!(
        emit_qasm2(&circuit),
        Err(EmitError::UnboundParameter(_))
    ));

    let values: FxHashMap<String, f64> = circuit.parameters().into_iter().map(|p| (p, 1.0)).collect();
    let qasm = emit_qasm2(&circuit.bind_parameters(&values).unwrap()).unwrap();
    assert!(qasm.contains("ry(1.0) q[2];"));
    assert!(qasm.ends_with("measure q[2] -> c[0];\n"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// One gate line per gate, one measurement, one input array.
    #[test]
    fn emitted_line_counts(n in 1_u32..=32) {
        let ttn = TtnBuilder::new(n).build().unwrap();
        let qasm = emit(ttn.circuit()).unwrap();

        let gates = qasm
            .lines()
            .filter(|l| l.starts_with("ry(") || l.starts_with("cx "))
            .count();
        let input_decl = format!("input array[float[64], {}] theta;", 2 * n - 1);
        let measure_line = format!("c[0] = measure q[{}];", n - 1);

        prop_assert_eq!(gates, 3 * (n as usize - 1) + 1);
        prop_assert_eq!(qasm.matches("measure").count(), 1);
        prop_assert!(qasm.contains(&input_decl));
        let measure_suffix = format!("{measure_line}\n");
        prop_assert!(qasm.ends_with(&measure_suffix));
    }
}
