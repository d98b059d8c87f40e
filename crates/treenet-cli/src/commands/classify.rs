//! Classify command implementation.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use treenet_core::classifier_circuit;

use super::common::{
    OutputFormat, bind_random, circuit_summary, load_config, load_sample, render, resolve_width,
    write_output,
};

/// Execute the classify command: embedding, barrier, TTN.
pub fn execute(
    input: &Path,
    n_qubits: Option<u32>,
    config: Option<&Path>,
    format: OutputFormat,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<()> {
    let sample = load_sample(input)?;
    let n_qubits = resolve_width(n_qubits, &sample)?;
    let config = load_config(config)?;
    info!(n_qubits, features = sample.len(), "building classifier circuit");

    let mut circuit = classifier_circuit(&sample, n_qubits, &config)?;
    if let Some(seed) = seed {
        circuit = bind_random(&circuit, seed)?;
    }

    let content = render(&circuit, format, || circuit_summary(&circuit))?;
    write_output(&content, output)
}
