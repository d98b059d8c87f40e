//! Embed command implementation.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use treenet_core::AngleEmbedding;

use super::common::{
    OutputFormat, circuit_summary, load_sample, render, resolve_width, write_output,
};

/// Execute the embed command.
pub fn execute(
    input: &Path,
    n_qubits: Option<u32>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let sample = load_sample(input)?;
    let n_qubits = resolve_width(n_qubits, &sample)?;
    info!(n_qubits, features = sample.len(), "embedding sample");

    let circuit = AngleEmbedding::new(n_qubits).embed(&sample)?;
    let content = render(&circuit, format, || circuit_summary(&circuit))?;
    write_output(&content, output)
}
