#![deny(unsafe_code)]
//! CLI binary for the flowfield particle advection demo.
//!
//! Subcommands:
//! - `simulate` — build a session, run N steps, write a JSON snapshot
//! - `list` — print available field variants and RBF kernels

mod error;
mod snapshot;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use flowfield_core::{FieldVariant, RbfKernel, SimulationParameters, SimulationSession};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "RBF-interpolated 3D flow-field particle advection")]
struct Cli {
    /// Output run summaries as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a simulation for N steps and write a JSON snapshot.
    Simulate(SimulateArgs),
    /// List available field variants and RBF kernels.
    List,
}

#[derive(Args)]
struct SimulateArgs {
    /// Simulation parameters as a JSON object (keys: grid_size,
    /// particle_count, dt, intensity, flow_direction, variant, kernel,
    /// shape). Individual flags override JSON values.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Velocity samples per lattice axis, default 20 (the fit cost grows
    /// with the cube of this, keep it modest).
    #[arg(short = 'g', long)]
    grid_size: Option<usize>,

    /// Number of particles to seed, default 100.
    #[arg(short, long)]
    particles: Option<usize>,

    /// Number of advection steps.
    #[arg(short, long, default_value_t = 100)]
    steps: usize,

    /// Euler time step per advection step, default 0.1.
    #[arg(long)]
    dt: Option<f64>,

    /// PRNG seed for deterministic particle seeding.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Velocity intensity multiplier, default 1.0 (nominal range 0.1..5.0).
    #[arg(long)]
    intensity: Option<f64>,

    /// Uniform flow-direction factor in -1..1 (angle = factor·π);
    /// replaces the spatial pattern when set.
    #[arg(long)]
    direction: Option<f64>,

    /// Field variant name ("swirl", "unsteady"), default "swirl".
    #[arg(long)]
    variant: Option<String>,

    /// RBF kernel name ("multiquadric", "gaussian", "linear"),
    /// default "multiquadric".
    #[arg(long)]
    kernel: Option<String>,

    /// Explicit RBF shape parameter (default: spacing heuristic).
    #[arg(long)]
    shape: Option<f64>,

    /// Snapshot file path; omit to print the snapshot to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SimulateArgs {
    /// Builds the simulation parameters: `--params` JSON gives the base
    /// values (defaults for missing keys), then explicit flags override.
    ///
    /// Variant and kernel names given as flags are rejected when unknown;
    /// inside the JSON they follow the usual helper semantics and fall back
    /// to the defaults.
    fn resolve(&self) -> Result<SimulationParameters, CliError> {
        let base: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mut p = SimulationParameters::from_json(&base);

        if let Some(g) = self.grid_size {
            p.grid_size = g;
        }
        if let Some(n) = self.particles {
            p.particle_count = n;
        }
        if let Some(dt) = self.dt {
            p.dt = dt;
        }
        if let Some(i) = self.intensity {
            p.intensity = i;
        }
        if let Some(d) = self.direction {
            p.flow_direction = Some(d);
        }
        if let Some(name) = &self.variant {
            p.variant = FieldVariant::from_name(name)
                .ok_or_else(|| CliError::Input(format!("unknown field variant: {name}")))?;
        }
        if let Some(name) = &self.kernel {
            p.kernel = RbfKernel::from_name(name)
                .ok_or_else(|| CliError::Input(format!("unknown RBF kernel: {name}")))?;
        }
        if let Some(s) = self.shape {
            p.shape = Some(s);
        }
        Ok(p)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            if cli.json {
                let info = serde_json::json!({
                    "variants": FieldVariant::list_names(),
                    "kernels": RbfKernel::list_names(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Variants:");
                for name in FieldVariant::list_names() {
                    println!("  {name}");
                }
                println!("Kernels:");
                println!("  {}", RbfKernel::list_names().join(", "));
            }
        }
        Command::Simulate(args) => {
            let params = args.resolve()?;
            let mut session = SimulationSession::new(params, args.seed)?;

            for _ in 0..args.steps {
                session.step();
            }

            match &args.output {
                Some(path) => snapshot::write_snapshot(&session, path)?,
                None => println!(
                    "{}",
                    serde_json::to_string_pretty(&snapshot::session_snapshot(&session))?
                ),
            }

            let params = session.params();
            if cli.json {
                let info = serde_json::json!({
                    "variant": params.variant.name(),
                    "kernel": params.kernel.name(),
                    "grid_size": params.grid_size,
                    "particles": params.particle_count,
                    "steps": args.steps,
                    "seed": args.seed,
                    "output": args.output.as_ref().map(|p| p.display().to_string()),
                });
                eprintln!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "simulated {} ({} samples/axis, {} particles, {} steps, seed {})",
                    params.variant.name(),
                    params.grid_size,
                    params.particle_count,
                    args.steps,
                    args.seed,
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
