//! # Scalar root finding
//!
//! Finds a real root of f(x) = 0 for a single-variable function, by bisection on a
//! sign-changing bracket or by Newton-Raphson from a starting point. Every solve returns
//! the iteration table and a step trace describing each iteration in words.
//!
//! ```
//! use RustedRoots::numerical::scalar_roots::solve_bisection;
//! let result = solve_bisection("x^2 - 4", 0.0, 3.0, 1e-6, 50).unwrap();
//! assert!((result.root - 2.0).abs() < 1e-5);
//! for step in &result.steps {
//!     println!("{}", step);
//! }
//! ```
use log::info;
use strum_macros::{Display, EnumString};

pub mod batch;
pub mod bisection;
pub mod error;
pub mod function;
pub mod newton;
pub mod suggestions;
pub mod task;
pub mod trace;
mod scalar_roots_tests;

pub use error::{ErrorKind, RootFindingError, RootFindingFailure, Suggestions};
pub use function::{ClosureFunction, FunctionWithDerivative, NonlinearFunction, SymbolicFunction};
pub use trace::{BisectionIteration, NewtonIteration, StepRecord, StepStatus, StepTrace};

/// Enum to represent the root finding methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum RootFindingMethod {
    #[strum(serialize = "bisection", to_string = "Bisection")]
    Bisection,
    #[strum(serialize = "newton", serialize = "newton_raphson", to_string = "Newton-Raphson")]
    NewtonRaphson,
}

/// Configuration for root finding methods
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFindingConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for RootFindingConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl RootFindingConfig {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// tolerance must be positive and finite, at least one iteration must be allowed
    pub fn validate(&self) -> Result<(), RootFindingError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(RootFindingError::invalid(format!(
                "tolerance must be > 0 and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(RootFindingError::invalid("max_iter must be > 0"));
        }
        Ok(())
    }
}

/// Result structure for root finding methods
#[derive(Debug, Clone, PartialEq)]
pub struct RootFindingResult<I> {
    pub root: f64,
    pub function_value: f64,
    pub iterations: Vec<I>,
    pub steps: StepTrace,
    pub method: RootFindingMethod,
}

impl<I> RootFindingResult<I> {
    /// number of completed refinement iterations
    pub fn iteration_count(&self) -> usize {
        self.iterations.len()
    }
}

/// Main structure for scalar root finding methods
#[derive(Debug, Clone, Default)]
pub struct ScalarRootFinder {
    config: RootFindingConfig,
}

impl ScalarRootFinder {
    /// Create a new ScalarRootFinder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ScalarRootFinder with custom configuration
    pub fn with_config(config: RootFindingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RootFindingConfig {
        &self.config
    }

    /// Set tolerance for convergence
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.config.tolerance = tolerance;
    }

    /// Set maximum number of iterations
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.config.max_iterations = max_iterations;
    }
}

/// Parses `expr` and solves it by bisection on [a, b]
pub fn solve_bisection(
    expr: &str,
    a: f64,
    b: f64,
    tol: f64,
    max_iter: usize,
) -> Result<RootFindingResult<BisectionIteration>, RootFindingFailure> {
    let config = RootFindingConfig::new(tol, max_iter);
    config.validate()?;
    let function = SymbolicFunction::from_string(expr)?;
    info!("solving {} = 0 by bisection", function.canonical());
    ScalarRootFinder::with_config(config).bisection(&function, a, b)
}

/// Parses `expr` and solves it by Newton-Raphson from x0
pub fn solve_newton(
    expr: &str,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> Result<RootFindingResult<NewtonIteration>, RootFindingFailure> {
    let config = RootFindingConfig::new(tol, max_iter);
    config.validate()?;
    let function = SymbolicFunction::from_string(expr)?;
    info!("solving {} = 0 by Newton-Raphson", function.canonical());
    ScalarRootFinder::with_config(config).newton_raphson(&function, x0)
}
