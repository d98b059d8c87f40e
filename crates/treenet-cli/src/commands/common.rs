//! Shared helpers for CLI commands.

use std::f64::consts::TAU;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::{debug, info};

use treenet_core::TtnConfig;
use treenet_ir::Circuit;
use treenet_qasm::{emit, emit_qasm2};

/// How a circuit is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// OpenQASM 3.0, free parameters declared as inputs.
    Qasm3,
    /// OpenQASM 2.0; parameters must be bound.
    Qasm2,
    /// The circuit as JSON.
    Json,
    /// A short human-readable description.
    Summary,
}

/// Sample file contents: a flat feature list or a 2-D image.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SampleFile {
    Flat(Vec<f64>),
    Image(Vec<Vec<f64>>),
}

/// Load a sample from a JSON file, flattening images row-major.
pub fn load_sample(path: &Path) -> Result<Vec<f64>> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_sample(&source).with_context(|| format!("Invalid sample: {}", path.display()))
}

/// Parse sample JSON text.
pub fn parse_sample(source: &str) -> Result<Vec<f64>> {
    let sample: SampleFile = serde_json::from_str(source)
        .context("expected a JSON array of numbers or an array of rows")?;

    match sample {
        SampleFile::Flat(values) => Ok(values),
        SampleFile::Image(rows) => {
            let height = rows.len();
            let width = rows.first().map_or(0, Vec::len);
            let image = Array2::from_shape_vec((height, width), rows.concat())
                .context("image rows must all have the same length")?;
            debug!(height, width, "flattened image sample");
            Ok(image.iter().copied().collect())
        }
    }
}

/// Load the TTN configuration: file (if any), then `TREENET_*` overrides.
pub fn load_config(path: Option<&Path>) -> Result<TtnConfig> {
    let config = TtnConfig::load(path).context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Circuit width: explicit, or one qubit per feature.
pub fn resolve_width(n_qubits: Option<u32>, sample: &[f64]) -> Result<u32> {
    match n_qubits {
        Some(n) => Ok(n),
        None => u32::try_from(sample.len()).context("sample has too many features"),
    }
}

/// Bind every free parameter to a uniform angle in `[0, 2π)`.
///
/// Names are bound in sorted order so a seed always yields the same angles.
pub fn bind_random(circuit: &Circuit, seed: u64) -> Result<Circuit> {
    let mut rng = StdRng::seed_from_u64(seed);
    let values: FxHashMap<String, f64> = circuit
        .parameters()
        .into_iter()
        .map(|name| (name, rng.gen_range(0.0..TAU)))
        .collect();
    info!(seed, bound = values.len(), "binding parameters");
    Ok(circuit.bind_parameters(&values)?)
}

/// Serialize a circuit. `summary` supplies the text for the summary format.
pub fn render(
    circuit: &Circuit,
    format: OutputFormat,
    summary: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Qasm3 => emit(circuit).context("Emit error"),
        OutputFormat::Qasm2 => emit_qasm2(circuit)
            .context("Emit error (use --seed to bind parameters for OpenQASM 2.0)"),
        OutputFormat::Json => Ok(circuit.to_json()?),
        OutputFormat::Summary => Ok(summary()),
    }
}

/// Summary lines shared by every command.
pub fn circuit_summary(circuit: &Circuit) -> String {
    format!(
        "circuit:    {}\nqubits:     {}\nclbits:     {}\noperations: {}\ndepth:      {}\nparameters: {}\n",
        circuit.name(),
        circuit.num_qubits(),
        circuit.num_clbits(),
        circuit.num_ops(),
        circuit.depth(),
        circuit.parameters().len()
    )
}

/// Write to `output`, or to stdout when no file is given.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            println!(
                "{} Wrote {}",
                style("✓").green().bold(),
                style(path.display()).green()
            );
        }
        None => print!("{content}"),
    }
    Ok(())
}
