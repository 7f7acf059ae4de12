// ─────────────────────────────────────────────────────────────────────
// Theta Solver — Command-Line Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Build the automorphic solution from a problem file, evaluate it on the
//! mesh described by a mesh file and dump both as raw binary.

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use num_complex::Complex64;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use theta_core::io::{output_paths, write_complex_dump};
use theta_core::solution::{Solution, SolutionConfig};
use theta_math::numeric::check_finite;
use theta_types::config::{MeshConfig, ProblemConfig};
use theta_types::constants::{DEFAULT_MESH_FILE, DEFAULT_PROBLEM_FILE};
use theta_types::error::{ThetaError, ThetaResult};

#[derive(Parser)]
#[command(name = "theta-solve")]
#[command(about = "Evaluate a two-series automorphic solution over a rectangular mesh")]
#[command(version)]
struct Cli {
    /// Problem file: JSON, or text `tau A B C z_singular depth weight`
    #[arg(default_value = DEFAULT_PROBLEM_FILE)]
    problem: PathBuf,

    /// Mesh file: JSON, or text `x_min x_max x_count y_min y_max y_count`
    #[arg(default_value = DEFAULT_MESH_FILE)]
    mesh: PathBuf,

    /// Directory for the binary dumps
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Evaluate point by point on the calling thread
    #[arg(long)]
    sequential: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> ThetaResult<()> {
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| ThetaError::Config(format!("Failed to set thread pool size: {e}")))?;
        info!("Using {threads} threads");
    }

    let problem = ProblemConfig::from_file(&cli.problem)?;
    problem.validate()?;

    let started = Instant::now();
    let solution = Solution::new(&SolutionConfig::from_problem(&problem))?;
    info!(
        "Approximate solution with {} members of the series is built in {}",
        solution.members_count(),
        format_elapsed(started.elapsed())
    );

    let mesh_cfg = MeshConfig::from_file(&cli.mesh)?;
    mesh_cfg.validate()?;
    let mesh = mesh_cfg.create_mesh().points();

    let started = Instant::now();
    let values = if cli.sequential {
        solution.map(&mesh)
    } else {
        solution.parallel_map(&mesh)
    };
    info!(
        "The values are calculated on {} points in {}",
        values.len(),
        format_elapsed(started.elapsed())
    );
    if let Err(ThetaError::NonFinite { index }) = check_finite(&values) {
        warn!(
            "Non-finite value at mesh point {} (index {index})",
            mesh[index]
        );
    }

    write_outputs(cli, &mesh, &values)
}

fn write_outputs(
    cli: &Cli,
    mesh: &[Complex64],
    values: &[Complex64],
) -> ThetaResult<()> {
    std::fs::create_dir_all(&cli.output_dir)?;
    let (mesh_path, values_path) = output_paths(&cli.output_dir, &cli.problem, &cli.mesh);
    write_complex_dump(&mesh_path, mesh)?;
    write_complex_dump(&values_path, values)?;
    info!("Wrote {} and {}", mesh_path.display(), values_path.display());
    Ok(())
}

/// Milliseconds below one second, seconds above.
fn format_elapsed(dt: Duration) -> String {
    let secs = dt.as_secs_f64();
    if secs < 1.0 {
        format!("{} ms.", secs * 1000.0)
    } else {
        format!("{secs} sec.")
    }
}
