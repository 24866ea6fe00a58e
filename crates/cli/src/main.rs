//! Photonic CNN accelerator simulator CLI.
//!
//! This binary provides the entry point for simulation runs. It performs:
//! 1. **Configuration:** Load a JSON config file or fall back to built-in defaults.
//! 2. **Model loading:** Read a layer-dimension table describing the network.
//! 3. **Simulation:** Drive every convolution layer through the accelerator,
//!    print the lifetime summary, and optionally export per-layer metrics as CSV.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use phsim_core::sim::load_layer_table;
use phsim_core::stats::metric_rows;
use phsim_core::{Accelerator, Config};

#[derive(Parser, Debug)]
#[command(
    name = "phsim",
    author,
    version,
    about = "Photonic CNN accelerator performance simulator",
    long_about = "Simulate a CNN running on a photonic metasurface accelerator.\n\nThe network is described by a layer-dimension table (one row per layer);\nthe hardware by a JSON config file, with built-in defaults for every field.\n\nExamples:\n  phsim run -m models/vgg16.txt\n  phsim run -m models/vgg16.txt -c configs/sram_32nm.json -o results.csv"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate every convolution layer of a network model.
    Run {
        /// Layer-dimension table describing the network.
        #[arg(short, long)]
        model: PathBuf,

        /// JSON hardware config (defaults apply for every omitted field).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write per-layer metrics to this CSV file.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Log each layer report as it completes.
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            model,
            config,
            out,
            trace,
        } => cmd_run(&model, config.as_deref(), out.as_deref(), trace),
    }
}

/// Runs the simulator: builds the accelerator, drives every layer in table
/// order, prints the summary, and writes the CSV export if requested.
fn cmd_run(
    model: &std::path::Path,
    config_path: Option<&std::path::Path>,
    out: Option<&std::path::Path>,
    trace: bool,
) {
    let mut config = match config_path {
        Some(path) => load_config(path),
        None => Config::default(),
    };
    if trace {
        config.general.trace_layers = true;
    }

    let shapes = load_layer_table(model).unwrap_or_else(|e| {
        eprintln!("Error loading model {}: {}", model.display(), e);
        process::exit(1);
    });
    if shapes.is_empty() {
        eprintln!("Error: model {} contains no convolution layers", model.display());
        process::exit(1);
    }

    let mut acc = Accelerator::new(&config).unwrap_or_else(|e| {
        eprintln!("Error building accelerator: {e}");
        process::exit(1);
    });
    info!(
        layers = shapes.len(),
        cycle_time = acc.critical_path.latency,
        "starting simulation"
    );

    for shape in shapes {
        acc.run_layer(shape);
    }

    // Layer list is non-empty, so the summary precondition holds.
    match acc.summary() {
        Ok(summary) => summary.print(),
        Err(e) => {
            eprintln!("Error summarizing run: {e}");
            process::exit(1);
        }
    }

    if let Some(path) = out {
        write_csv(path, acc.reports().len(), metric_rows(acc.reports()));
        println!("per-layer metrics written to {}", path.display());
    }
}

/// Loads and deserializes the JSON config file. Exits on failure.
fn load_config(path: &std::path::Path) -> Config {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {}", path.display(), e);
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {}: {}", path.display(), e);
        process::exit(1);
    })
}

/// Writes the per-layer metric table as CSV: a header row of layer indices,
/// then one row per metric. Exits on failure.
fn write_csv(path: &std::path::Path, layers: usize, rows: Vec<(&'static str, Vec<f64>)>) {
    let mut text = String::from("metric");
    for i in 0..layers {
        let _ = write!(text, ",layer_{i}");
    }
    text.push('\n');
    for (metric, values) in rows {
        text.push_str(metric);
        for value in values {
            let _ = write!(text, ",{value}");
        }
        text.push('\n');
    }
    fs::write(path, text).unwrap_or_else(|e| {
        eprintln!("Error writing {}: {}", path.display(), e);
        process::exit(1);
    });
}
