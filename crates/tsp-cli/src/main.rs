//! Command-line front end: argument parsing, logging init, and translating
//! the solver's typed result into the stdout/exit-code contract.

mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};

use error::CliError;

fn main() -> ExitCode {
    env_logger::init();

    match run(&std::env::args().collect::<Vec<_>>()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    let (input_path, ceiling) = parse_args(args)?;

    let graph = tsp_parser::parse_instance(&input_path)?;
    info!("parsed {} cities, root bound {:.1}", graph.n(), graph.root_bound());

    if graph.root_bound() > ceiling {
        info!("root bound {:.1} exceeds ceiling {ceiling:.1}, no search needed", graph.root_bound());
        println!("NO SOLUTION");
        return Ok(());
    }

    let workers = std::thread::available_parallelism().map(std::num::NonZeroUsize::get).unwrap_or(1);
    info!("starting search with {workers} worker(s)");
    let best = tsp_solvers::solve_token_ring(&graph, ceiling, workers);

    match tsp_solvers::Solution::from(best) {
        tsp_solvers::Solution::Tour { tour, cost } => {
            println!("{cost:.1}");
            let mut line = String::new();
            for city in &tour {
                line.push_str(&city.to_string());
                line.push(' ');
            }
            line.push('0');
            println!("{line}");
        }
        tsp_solvers::Solution::NoSolution => println!("NO SOLUTION"),
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<(PathBuf, f64), CliError> {
    let [_, path, ceiling_raw] = args else { return Err(CliError::BadArgs) };
    let ceiling: f64 = ceiling_raw.parse().map_err(|_| CliError::BadCeiling(ceiling_raw.clone()))?;
    if !(ceiling > 0.0) {
        return Err(CliError::BadCeiling(ceiling_raw.clone()));
    }
    Ok((PathBuf::from(path), ceiling))
}
