//! Build command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use treenet_core::{TtnBuilder, TtnCircuit};
use treenet_ir::Circuit;

use super::common::{OutputFormat, bind_random, circuit_summary, load_config, render, write_output};

/// Execute the build command.
pub fn execute(
    n_qubits: u32,
    config: Option<&Path>,
    format: OutputFormat,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    info!(n_qubits, rotation = %config.rotation, entangler = %config.entangler, "building TTN");

    let ttn = TtnBuilder::new(n_qubits)
        .with_config(config)
        .build()
        .with_context(|| format!("Failed to build a {n_qubits}-qubit TTN"))?;

    let circuit = match seed {
        Some(seed) => bind_random(ttn.circuit(), seed)?,
        None => ttn.circuit().clone(),
    };

    let content = render(&circuit, format, || ttn_summary(&circuit, &ttn))?;
    write_output(&content, output)
}

/// Summary of the emitted `circuit` plus the structure of the tree it came
/// from.
pub fn ttn_summary(circuit: &Circuit, ttn: &TtnCircuit) -> String {
    let mut summary = circuit_summary(circuit);
    summary.push_str(&format!("blocks:     {}\n", ttn.blocks().len()));
    summary.push_str(&format!("levels:     {}\n", ttn.levels().len()));
    summary.push_str(&format!("output:     {}\n", ttn.output_qubit()));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttn_summary() {
        let ttn = TtnBuilder::new(4).build().unwrap();
        let summary = ttn_summary(ttn.circuit(), &ttn);
        assert!(summary.contains("qubits:     4"));
        assert!(summary.contains("blocks:     3"));
        assert!(summary.contains("parameters: 7"));
        assert!(summary.contains("output:     q3"));
    }

    #[test]
    fn test_ttn_summary_of_bound_circuit() {
        let ttn = TtnBuilder::new(4).build().unwrap();
        let bound = bind_random(ttn.circuit(), 1).unwrap();
        let summary = ttn_summary(&bound, &ttn);
        assert!(summary.contains("parameters: 0"));
        assert!(summary.contains("blocks:     3"));
    }
}
