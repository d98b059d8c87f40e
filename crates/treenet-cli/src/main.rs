//! treenet Command-Line Interface
//!
//! Builds Tree Tensor Network classifier circuits and writes them as
//! OpenQASM, JSON, or a short summary.
//!
//! ```text
//! q0 ─R─■──────────────
//! q1 ─R─X─R─■──────────
//! q2 ─R─■───│──────────
//! q3 ─R─X─R─X─R─M══ c0
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::OutputFormat;
use commands::{build, classify, embed, version};

/// treenet - Tree Tensor Network quantum classifier circuits
#[derive(Parser)]
#[command(name = "treenet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the trainable TTN circuit
    Build {
        /// Number of qubits
        #[arg(short = 'n', long = "qubits")]
        n_qubits: u32,

        /// YAML configuration file
        #[arg(short, long, env = "TREENET_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "qasm3")]
        format: OutputFormat,

        /// Bind parameters to random angles drawn from this seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Angle-encode a sample (JSON array or 2-D array)
    Embed {
        /// Sample file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of qubits (defaults to the number of features)
        #[arg(short = 'n', long = "qubits")]
        n_qubits: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "qasm3")]
        format: OutputFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the full classifier: embedding, barrier, TTN
    Classify {
        /// Sample file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of qubits (defaults to the number of features)
        #[arg(short = 'n', long = "qubits")]
        n_qubits: Option<u32>,

        /// YAML configuration file
        #[arg(short, long, env = "TREENET_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "qasm3")]
        format: OutputFormat,

        /// Bind parameters to random angles drawn from this seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build {
            n_qubits,
            config,
            format,
            seed,
            output,
        } => build::execute(n_qubits, config.as_deref(), format, seed, output.as_deref()),

        Commands::Embed {
            input,
            n_qubits,
            format,
            output,
        } => embed::execute(&input, n_qubits, format, output.as_deref()),

        Commands::Classify {
            input,
            n_qubits,
            config,
            format,
            seed,
            output,
        } => classify::execute(
            &input,
            n_qubits,
            config.as_deref(),
            format,
            seed,
            output.as_deref(),
        ),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
