//! CVRP Solver - Command Line Interface
//!
//! A single positional argument names the instance file; `HIDE_PROGRESS`
//! and `BENCH` are read directly from the environment by the engine.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cvrp_solver::engine::{Engine, EngineConfig};
use cvrp_solver::io::{format_solution, load_instance};

#[derive(Parser)]
#[command(name = "cvrp-solver")]
#[command(author = "CVRP Solver Contributors")]
#[command(version)]
#[command(about = "A population-based evolutionary solver for the Capacitated Vehicle Routing Problem")]
struct Cli {
    /// Path to the instance JSON file
    instance: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let instance = match load_instance(&cli.instance) {
        Ok(instance) => instance.shared(),
        Err(err) => {
            log::error!("failed to load {}: {err}", cli.instance.display());
            return ExitCode::FAILURE;
        }
    };

    let engine = Engine::new(instance, EngineConfig::default());
    match engine.run() {
        Ok(solution) => {
            print!("{}", format_solution(&solution));
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("solver failed: {err}");
            ExitCode::FAILURE
        }
    }
}
