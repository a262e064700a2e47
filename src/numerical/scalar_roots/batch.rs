//! Solving independent root finding tasks, one per rayon worker.
use crate::Utils::logger::save_iterations_to_csv;
use crate::Utils::plots::plot_root;
use crate::numerical::scalar_roots::task::{MethodParams, RootTask, TaskError};
use crate::numerical::scalar_roots::{
    BisectionIteration, NewtonIteration, RootFindingFailure, RootFindingResult, ScalarRootFinder,
    StepTrace, SymbolicFunction,
};
use log::info;
use rayon::prelude::*;
use std::path::Path;

/// The result of one task, typed by the method that produced it
#[derive(Debug)]
pub enum Solution {
    Bisection(Result<RootFindingResult<BisectionIteration>, RootFindingFailure>),
    Newton(Result<RootFindingResult<NewtonIteration>, RootFindingFailure>),
}

impl Solution {
    pub fn root(&self) -> Option<f64> {
        match self {
            Solution::Bisection(Ok(r)) => Some(r.root),
            Solution::Newton(Ok(r)) => Some(r.root),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&RootFindingFailure> {
        match self {
            Solution::Bisection(Err(f)) | Solution::Newton(Err(f)) => Some(f),
            _ => None,
        }
    }

    pub fn steps(&self) -> &StepTrace {
        match self {
            Solution::Bisection(Ok(r)) => &r.steps,
            Solution::Newton(Ok(r)) => &r.steps,
            Solution::Bisection(Err(f)) | Solution::Newton(Err(f)) => &f.steps,
        }
    }
}

#[derive(Debug)]
pub struct TaskOutcome {
    /// None when the expression was rejected
    pub function: Option<SymbolicFunction>,
    pub solution: Solution,
}

impl RootTask {
    /// Parses the expression and runs the chosen method
    pub fn solve(&self) -> TaskOutcome {
        let finder = ScalarRootFinder::with_config(self.config);
        let function = SymbolicFunction::from_string(&self.expression);
        let solution = match (&function, self.params) {
            (Ok(f), MethodParams::Bisection { a, b }) => Solution::Bisection(finder.bisection(f, a, b)),
            (Ok(f), MethodParams::Newton { x0 }) => Solution::Newton(finder.newton_raphson(f, x0)),
            (Err(e), MethodParams::Bisection { .. }) => Solution::Bisection(Err(e.clone().into())),
            (Err(e), MethodParams::Newton { .. }) => Solution::Newton(Err(e.clone().into())),
        };
        TaskOutcome {
            function: function.ok(),
            solution,
        }
    }

    /// Saves the iteration table and the plot the task asks for. Failed solves write nothing.
    pub fn write_outputs(&self, outcome: &TaskOutcome) -> Result<(), TaskError> {
        if let Some(csv_path) = &self.csv {
            match &outcome.solution {
                Solution::Bisection(Ok(r)) => save_iterations_to_csv(&r.iterations, csv_path)?,
                Solution::Newton(Ok(r)) => save_iterations_to_csv(&r.iterations, csv_path)?,
                _ => {}
            }
        }
        if let (Some(plot_path), Some(function), Some(root)) =
            (&self.plot, &outcome.function, outcome.solution.root())
        {
            let bracket = match self.params {
                MethodParams::Bisection { a, b } => Some((a, b)),
                MethodParams::Newton { .. } => None,
            };
            draw(function, root, bracket, plot_path)?;
        }
        Ok(())
    }
}

fn draw(function: &SymbolicFunction, root: f64, bracket: Option<(f64, f64)>, path: &Path) -> Result<(), TaskError> {
    plot_root(function.function(), root, bracket, path).map_err(|e| TaskError::Plot {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    info!("plot saved to {}", path.display());
    Ok(())
}

/// Solves every task in parallel. Outcomes come back in task order.
pub fn solve_tasks(tasks: &[RootTask]) -> Vec<TaskOutcome> {
    info!("solving {} tasks", tasks.len());
    tasks.par_iter().map(RootTask::solve).collect()
}
