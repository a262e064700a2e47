#![allow(non_snake_case)]
use RustedRoots::Utils::logger::{default_log_file_name, init_logger, parse_log_level};
use RustedRoots::numerical::scalar_roots::batch::{Solution, TaskOutcome, solve_tasks};
use RustedRoots::numerical::scalar_roots::task::{MethodParams, RootTask};
use RustedRoots::numerical::scalar_roots::{RootFindingConfig, RootFindingFailure, RootFindingResult};
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, error};
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Parser)]
#[command(author, version, about = "Find a real root of f(x) = 0", long_about = None)]
struct Cli {
    /// trace, debug, info, warn, error or off
    #[arg(long, global = true, default_value = "warn", value_parser = parse_log_level)]
    log_level: LevelFilter,
    /// also log to a file, a time-stamped name is used when no path is given
    #[arg(long, global = true)]
    log_file: Option<Option<PathBuf>>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SolverArgs {
    /// convergence tolerance
    #[arg(long, default_value_t = 1e-6)]
    tol: f64,
    /// iteration budget
    #[arg(long, default_value_t = 100)]
    max_iter: usize,
    /// write the iteration table to this csv file
    #[arg(long)]
    csv: Option<PathBuf>,
    /// draw f and the root to this png file
    #[arg(long)]
    plot: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bisection on the interval [a, b]
    Bisection {
        /// the function, e.g. "x^2 - 4" or "x^2 - 4 = 0"
        #[arg(long, allow_hyphen_values = true)]
        expr: String,
        #[arg(long, allow_negative_numbers = true)]
        a: f64,
        #[arg(long, allow_negative_numbers = true)]
        b: f64,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Newton-Raphson from the initial guess x0
    Newton {
        #[arg(long, allow_hyphen_values = true)]
        expr: String,
        #[arg(long, allow_negative_numbers = true)]
        x0: f64,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Solve every task file, in parallel
    Task {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn single_task(expression: String, params: MethodParams, solver: SolverArgs) -> RootTask {
    RootTask {
        expression,
        params,
        config: RootFindingConfig::new(solver.tol, solver.max_iter),
        csv: solver.csv,
        plot: solver.plot,
    }
}

fn print_success<I: Tabled>(result: &RootFindingResult<I>) {
    println!("{}", result.steps);
    let mut table = Table::new(&result.iterations);
    table.with(Style::modern_rounded());
    println!("{}", table);
    println!(
        "{}: root = {}, f(root) = {:e}, iterations = {}",
        result.method,
        result.root,
        result.function_value,
        result.iteration_count()
    );
}

fn print_failure(failure: &RootFindingFailure) {
    if !failure.steps.is_empty() {
        println!("{}", failure.steps);
    }
    eprintln!("{}", failure);
}

/// prints one outcome, false if the solve failed
fn report(task: &RootTask, outcome: &TaskOutcome) -> bool {
    println!("f(x) = {}", task.expression);
    let solved = match &outcome.solution {
        Solution::Bisection(Ok(result)) => {
            print_success(result);
            true
        }
        Solution::Newton(Ok(result)) => {
            print_success(result);
            true
        }
        Solution::Bisection(Err(failure)) | Solution::Newton(Err(failure)) => {
            print_failure(failure);
            false
        }
    };
    if let Err(e) = task.write_outputs(outcome) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return false;
    }
    solved
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = cli.log_file.map(|path| path.unwrap_or_else(default_log_file_name));
    if let Err(e) = init_logger(cli.log_level, log_file.as_deref()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let tasks = match cli.command {
        Commands::Bisection { expr, a, b, solver } => {
            vec![single_task(expr, MethodParams::Bisection { a, b }, solver)]
        }
        Commands::Newton { expr, x0, solver } => {
            vec![single_task(expr, MethodParams::Newton { x0 }, solver)]
        }
        Commands::Task { files } => {
            let mut tasks = Vec::with_capacity(files.len());
            for file in &files {
                match RootTask::from_file(file) {
                    Ok(task) => tasks.push(task),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }
            tasks
        }
    };

    let outcomes = solve_tasks(&tasks);
    let mut all_solved = true;
    for (task, outcome) in tasks.iter().zip(&outcomes) {
        all_solved &= report(task, outcome);
    }
    if all_solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_is_validated() {
        let cli = Cli::try_parse_from(["rusted_roots", "--log-level", "debug", "newton", "--expr", "x^2-2", "--x0", "1"])
            .unwrap();
        assert_eq!(cli.log_level, LevelFilter::Debug);
        let cli = Cli::try_parse_from(["rusted_roots", "newton", "--expr", "x^2-2", "--x0", "1"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Warn);
        assert!(
            Cli::try_parse_from(["rusted_roots", "--log-level", "loud", "newton", "--expr", "x", "--x0", "1"]).is_err()
        );
    }

    #[test]
    fn test_negative_arguments() {
        let cli = Cli::try_parse_from(["rusted_roots", "bisection", "--expr", "-x^2+4", "--a", "-3", "--b", "0"]).unwrap();
        match cli.command {
            Commands::Bisection { expr, a, b, solver } => {
                assert_eq!(expr, "-x^2+4");
                assert_eq!((a, b), (-3.0, 0.0));
                assert_eq!(solver.max_iter, 100);
            }
            _ => panic!("expected the bisection subcommand"),
        }
    }
}
