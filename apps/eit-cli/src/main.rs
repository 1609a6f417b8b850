use clap::{Parser, Subcommand, ValueEnum};
use eit_app::{
    AppError, AppResult, RunProgressEvent, RunTimingSummary, build_network, load_grid,
    run_with_progress,
};
use eit_core::{CancelToken, format_ids};
use eit_project::{SimulationConfig, SolverMethodDef};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(name = "eit-cli")]
#[command(about = "EIT forward simulator - solve resistor networks built from intensity grids", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a simulation config file
    Validate {
        /// Path to the config YAML or JSON file
        config_path: PathBuf,
    },
    /// Build the network for a grid and summarize it
    Graph {
        /// Grid file (JSON array of rows, or a CSV/whitespace table)
        grid_path: PathBuf,
        #[command(flatten)]
        mesh: MeshArgs,
    },
    /// Build, solve and assemble a grid's network
    Solve {
        /// Grid file (JSON array of rows, or a CSV/whitespace table)
        grid_path: PathBuf,
        #[command(flatten)]
        mesh: MeshArgs,
        /// Write the solved graph JSON here
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Linear solver
        #[arg(long, value_enum)]
        method: Option<MethodArg>,
        /// Relative residual tolerance for conjugate gradient
        #[arg(long)]
        tolerance: Option<f64>,
        /// Iteration cap for conjugate gradient
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Wall-clock budget in seconds
        #[arg(long)]
        timeout: Option<f64>,
    },
    /// Summarize a saved solved graph
    Show {
        /// Path to a solved graph JSON file
        solved_path: PathBuf,
    },
}

#[derive(clap::Args)]
struct MeshArgs {
    /// Simulation config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Mask radius in cells
    #[arg(long)]
    radius: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Direct,
    ConjugateGradient,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Graph { grid_path, mesh } => cmd_graph(&grid_path, &mesh),
        Commands::Solve {
            grid_path,
            mesh,
            out,
            method,
            tolerance,
            max_iterations,
            timeout,
        } => {
            let overrides = SolverOverrides {
                method,
                tolerance,
                max_iterations,
                timeout,
            };
            cmd_solve(&grid_path, &mesh, &overrides, out.as_deref())
        }
        Commands::Show { solved_path } => cmd_show(&solved_path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            clear_progress_line();
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn report_error(err: &AppError) {
    let kind = err.kind();
    eprintln!("✗ {kind}: {err}");
    if kind.is_retryable() {
        eprintln!("  hint: retry with --method direct, a looser --tolerance or more --max-iterations");
    }
}

struct SolverOverrides {
    method: Option<MethodArg>,
    tolerance: Option<f64>,
    max_iterations: Option<usize>,
    timeout: Option<f64>,
}

fn load_config(mesh: &MeshArgs) -> AppResult<SimulationConfig> {
    let mut config = match &mesh.config {
        Some(path) => eit_project::load(path)?,
        None => SimulationConfig::new("cli"),
    };
    if let Some(radius) = mesh.radius {
        config.mesh.radius = Some(radius);
    }
    Ok(config)
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = eit_project::load(config_path)?;
    println!("✓ Config '{}' is valid", config.name);
    Ok(())
}

fn cmd_graph(grid_path: &Path, mesh: &MeshArgs) -> AppResult<()> {
    let config = load_config(mesh)?;
    let grid = load_grid(grid_path)?;
    let (graph, params) = build_network(&grid, &config)?;
    let boundary = graph.boundary_nodes();

    println!("Network for {}x{} grid (radius {}):", grid.rows(), grid.cols(), params.radius);
    println!("  Nodes: {}", graph.node_count());
    println!("  Edges: {}", graph.edge_count());
    println!("  Boundary nodes: {} {}", boundary.len(), format_ids(&boundary, 12));
    Ok(())
}

fn cmd_solve(
    grid_path: &Path,
    mesh: &MeshArgs,
    overrides: &SolverOverrides,
    out: Option<&Path>,
) -> AppResult<()> {
    let mut config = load_config(mesh)?;
    if let Some(method) = overrides.method {
        config.solver.method = match method {
            MethodArg::Direct => SolverMethodDef::Direct,
            MethodArg::ConjugateGradient => SolverMethodDef::ConjugateGradient,
        };
    }
    if let Some(tolerance) = overrides.tolerance {
        config.solver.tolerance = tolerance;
    }
    if let Some(max_iterations) = overrides.max_iterations {
        config.solver.max_iterations = max_iterations;
    }
    if let Some(timeout) = overrides.timeout {
        config.solver.timeout_s = Some(timeout);
    }
    debug!(?config, "effective configuration");

    let grid = load_grid(grid_path)?;
    println!("Solving '{}' on {}x{} grid", config.name, grid.rows(), grid.cols());

    let response = run_with_progress(
        &grid,
        &config,
        &CancelToken::new(),
        Some(&mut |event| render_cli_progress(&event)),
    )?;
    clear_progress_line();

    println!("✓ Solve completed ({})", response.solve.method);
    println!("  Nodes: {}", response.stats.nodes);
    println!("  Edges: {}", response.stats.edges);
    println!(
        "  Reference: node {} at {} V",
        response.pair.reference, response.reference_voltage
    );
    println!("  Ground:    node {}", response.pair.ground);
    println!("  Injected current: {:.6e} A", response.solve.injected_current);
    if let Some(r) = response.solve.equivalent_resistance {
        println!("  Equivalent resistance: {:.6} Ω", r);
    }
    if response.solve.iterations > 0 {
        println!("  CG iterations: {}", response.solve.iterations);
    }
    println!("  Relative residual: {:.3e}", response.solve.residual);
    print_timing_summary(&response.timing);

    match out {
        Some(path) => {
            eit_results::save_json(path, &response.solved)?;
            println!("  Saved: {}", path.display());
        }
        None => println!("  (pass --out to save the solved graph)"),
    }
    Ok(())
}

fn cmd_show(solved_path: &Path) -> AppResult<()> {
    println!("Loading solved graph: {}", solved_path.display());
    let solved = eit_results::load_json(solved_path)?;
    let extrema = solved.extrema();
    let connections: usize = solved.nodes.iter().map(|n| n.connections.len()).sum();

    println!("\nSolved graph:");
    println!("  Nodes: {}", solved.len());
    println!("  Edges: {}", connections / 2);
    println!("  Max |voltage|: {:.6}", extrema.max_abs_voltage);
    println!("  Max |current|: {:.6e}", extrema.max_abs_current);
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        line.push_str(&format!("  {}", msg));
    }
    print!("{}", line);
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    let pct = |t: f64| 100.0 * t / total;

    println!("\nTiming summary:");
    println!("  Build:    {:.3}s ({:.1}%)", timing.build_time_s, pct(timing.build_time_s));
    println!("  Select:   {:.3}s ({:.1}%)", timing.select_time_s, pct(timing.select_time_s));
    println!("  Solve:    {:.3}s ({:.1}%)", timing.solve_time_s, pct(timing.solve_time_s));
    println!(
        "  Assemble: {:.3}s ({:.1}%)",
        timing.assemble_time_s,
        pct(timing.assemble_time_s)
    );
    println!("  Total:    {:.3}s", timing.total_time_s);
}
