//! Full classifier circuit: embedding, barrier, trainable tree.

use treenet_ir::Circuit;

use crate::builder::TtnBuilder;
use crate::config::TtnConfig;
use crate::embedding::AngleEmbedding;
use crate::error::TtnResult;

/// Encode `sample` on `n_qubits` qubits and append the TTN built with
/// `config`, separated by a barrier.
pub fn classifier_circuit(
    sample: &[f64],
    n_qubits: u32,
    config: &TtnConfig,
) -> TtnResult<Circuit> {
    let mut circuit = AngleEmbedding::new(n_qubits).embed(sample)?;
    let ttn = TtnBuilder::new(n_qubits).with_config(config.clone()).build()?;
    circuit.barrier_all()?;
    circuit.compose(ttn.circuit())?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treenet_ir::{ClbitId, QubitId};

    #[test]
    fn test_classifier_layout() {
        let circuit = classifier_circuit(&[0.1, 0.2, 0.3, 0.4], 4, &TtnConfig::default()).unwrap();
        let ops = circuit.instructions();

        // 4 embedding rotations, barrier, 9 block gates, final rotation, measure
        assert_eq!(ops.len(), 16);
        assert!(ops[4].is_barrier());
        assert_eq!(circuit.num_clbits(), 1);
        let last = ops.last().unwrap();
        assert!(last.is_measure());
        assert_eq!(last.qubits, vec![QubitId(3)]);
        assert_eq!(last.clbits, vec![ClbitId(0)]);
        assert_eq!(circuit.parameters().len(), 7);
    }
}
