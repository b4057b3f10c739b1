//! Vezalko - circuit sandbox simulator
//!
//! Loads a saved layout and prints the simulation result.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug vezalko layout.ron --kind electric
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use vezalko_core::{
    error::Result, ElectricCircuit, LogicCircuit, SavedCircuit, SimulationConfig,
};

/// Which workspace a layout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CircuitKind {
    Electric,
    Logic,
}

/// Circuit sandbox simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the saved layout (.ron)
    #[arg(value_name = "LAYOUT_FILE")]
    layout_file: PathBuf,

    /// Workspace the layout was saved from
    #[arg(short, long, value_enum, default_value_t = CircuitKind::Electric)]
    kind: CircuitKind,

    /// Distance under which endpoints merge into one junction
    #[arg(short, long, default_value_t = vezalko_core::config::DEFAULT_MERGE_RADIUS)]
    merge_radius: f64,

    /// Maximum logic propagation sweeps
    #[arg(long, default_value_t = vezalko_core::config::DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let saved = SavedCircuit::from_file(&args.layout_file)?;
    log::info!(
        "loaded {} components from {}",
        saved.components.len(),
        args.layout_file.display()
    );

    let config = SimulationConfig::new()
        .with_merge_radius(args.merge_radius)
        .with_max_iterations(args.max_iterations);

    match args.kind {
        CircuitKind::Electric => {
            let circuit = ElectricCircuit::from_saved(&saved, config)?;
            println!("result: {}", circuit.simulation_result());
            let lit: Vec<String> = circuit.lit_bulbs().iter().map(|id| id.to_string()).collect();
            println!("lit bulbs: [{}]", lit.join(", "));
            println!("arrangement: {}", circuit.classify_bulbs());
        }
        CircuitKind::Logic => {
            let circuit = LogicCircuit::from_saved(&saved, config)?;
            if let Some(run) = circuit.last_run() {
                log::info!("propagation took {} sweeps", run.sweeps);
                if !run.converged {
                    println!("warning: network did not settle");
                }
            }
            for output in circuit.get_outputs() {
                println!("{}: {}", output.id, output.value);
            }
        }
    }

    Ok(())
}
