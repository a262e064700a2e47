use crate::numerical::scalar_roots::error::{RootFindingError, RootFindingFailure, Suggestions};
use crate::numerical::scalar_roots::function::NonlinearFunction;
use crate::numerical::scalar_roots::suggestions::suggest_initial_guesses;
use crate::numerical::scalar_roots::trace::{NewtonIteration, StepStatus, StepTrace};
use crate::numerical::scalar_roots::{RootFindingMethod, RootFindingResult, ScalarRootFinder};
use log::{debug, info, warn};

/// |f'(x)| below this makes the Newton step undefined
pub const SINGULAR_DERIVATIVE: f64 = 1e-12;

fn evaluation_failure(
    steps: &mut StepTrace,
    index: usize,
    what: &str,
    x: f64,
    value: f64,
) -> RootFindingFailure {
    let error = RootFindingError::Evaluation {
        what: what.to_string(),
        x,
        value,
    };
    warn!("newton: {}", error);
    steps.push(
        index,
        "Evaluation failed ✗",
        format!("{} is not finite at x = {:.6}", what, x),
        vec![
            format!("{} = {}", what, value),
            "Try another initial guess.".to_string(),
        ],
        StepStatus::Failed,
    );
    RootFindingFailure::new(error, std::mem::take(steps))
}

impl ScalarRootFinder {
    /// Newton-Raphson method: x_{n+1} = x_n - f(x_n) / f'(x_n)
    ///
    /// Uses the analytical derivative when the function has one, a central difference
    /// otherwise. Converged only when both |x_{n+1} - x_n| <= `tolerance` and
    /// |f(x_{n+1})| <= `tolerance`.
    pub fn newton_raphson<F>(
        &self,
        function: &F,
        x0: f64,
    ) -> Result<RootFindingResult<NewtonIteration>, RootFindingFailure>
    where
        F: NonlinearFunction + ?Sized,
    {
        self.config.validate()?;
        if !x0.is_finite() {
            return Err(RootFindingError::invalid(format!("x0 must be finite, got {}", x0)).into());
        }
        let tol = self.config.tolerance;
        let max_iter = self.config.max_iterations;

        let fx0 = function.evaluate(x0);
        let dfx0 = function.derivative_or_estimate(x0);
        for (what, value) in [("f(x0)", fx0), ("f'(x0)", dfx0)] {
            if !value.is_finite() {
                warn!("newton: {} = {} is not finite", what, value);
                return Err(RootFindingError::Evaluation {
                    what: what.to_string(),
                    x: x0,
                    value,
                }
                .into());
            }
        }

        info!(
            "Newton-Raphson for {} from x0 = {}, tolerance {}, max_iter {}",
            function.name(),
            x0,
            tol,
            max_iter
        );
        let mut steps = StepTrace::default();
        let mut iterations = Vec::new();
        steps.push(
            0,
            "Initialization",
            format!("Initial guess: x₀ = {:.6}", x0),
            vec![
                format!("f(x₀) = {:.6}", fx0),
                format!("f'(x₀) = {:.6}", dfx0),
                "Formula: x_{n+1} = x_n - f(x_n) / f'(x_n)".to_string(),
            ],
            StepStatus::Init,
        );

        let mut x_old = x0;
        let mut last = (x0, fx0);
        for i in 1..=max_iter {
            let fx = function.evaluate(x_old);
            if !fx.is_finite() {
                return Err(evaluation_failure(&mut steps, i, "f(x)", x_old, fx));
            }
            let dfx = function.derivative_or_estimate(x_old);
            if !dfx.is_finite() {
                return Err(evaluation_failure(&mut steps, i, "f'(x)", x_old, dfx));
            }

            if dfx.abs() < SINGULAR_DERIVATIVE {
                let error = RootFindingError::SingularDerivative {
                    x: x_old,
                    derivative: dfx,
                };
                warn!("newton: {}", error);
                let seeds = suggest_initial_guesses(function, x_old);
                let mut details = vec![
                    format!("f'(x_{}) = {:e}", i - 1, dfx),
                    "A horizontal tangent never crosses zero; the function may have no real root here.".to_string(),
                ];
                details.extend(seeds.iter().map(|s| format!("Try initial guess: {:.2}", s)));
                steps.push(
                    i,
                    "Derivative is zero ✗",
                    format!("f'(x) ≈ 0 at x = {:.6}", x_old),
                    details,
                    StepStatus::Failed,
                );
                return Err(RootFindingFailure::new(error, steps)
                    .with_suggestions(Suggestions::InitialGuesses(seeds)));
            }

            let delta = fx / dfx;
            let x_new = x_old - delta;
            if !x_new.is_finite() {
                let error = RootFindingError::Divergence { x_old, x_new };
                warn!("newton: {}", error);
                steps.push(
                    i,
                    "Diverged ✗",
                    format!("The step from x = {:.6} is not finite", x_old),
                    vec![
                        format!("Δx = f(x)/f'(x) = {:.6}/{:.6} = {}", fx, dfx, delta),
                        "Try another initial guess.".to_string(),
                    ],
                    StepStatus::Failed,
                );
                return Err(RootFindingFailure::new(error, steps));
            }

            let error = (x_new - x_old).abs();
            let fx_new = function.evaluate(x_new);
            if !fx_new.is_finite() {
                return Err(evaluation_failure(&mut steps, i, "f(x)", x_new, fx_new));
            }
            let converged = error <= tol && fx_new.abs() <= tol;

            steps.push(
                i,
                format!("Iteration {}", i),
                format!("x = {:.6}, f(x) = {:.6}", x_new, fx_new),
                vec![
                    format!("f(x_{}) = f({:.6}) = {:.6}", i - 1, x_old, fx),
                    format!("f'(x_{}) = {:.6}", i - 1, dfx),
                    format!("Δx = f(x)/f'(x) = {:.6}/{:.6} = {:.6}", fx, dfx, delta),
                    format!("x_{} = x_{} - Δx = {:.6} - {:.6} = {:.6}", i, i - 1, x_old, delta, x_new),
                    format!("|Δx| = {:.10}", error),
                    format!("|f(x_{})| = {:.10}", i, fx_new.abs()),
                ],
                if converged {
                    StepStatus::Converged
                } else {
                    StepStatus::Calculating
                },
            );
            iterations.push(NewtonIteration {
                index: i,
                x: x_old,
                f_x: fx,
                df_x: dfx,
                error,
            });
            debug!("newton iteration {}: x = {}, f(x) = {}, f'(x) = {}, error = {}", i, x_old, fx, dfx, error);
            last = (x_new, fx_new);

            if converged {
                steps.push(
                    i + 1,
                    "Converged! ✓",
                    format!("Root found: x ≈ {:.6}", x_new),
                    vec![
                        format!("|Δx| = {:.10} ≤ {}", error, tol),
                        format!("|f(x)| = {:.10} ≤ {}", fx_new.abs(), tol),
                        format!("Solution: x = {:.6}", x_new),
                    ],
                    StepStatus::Success,
                );
                info!("Newton-Raphson converged to {} after {} iterations", x_new, i);
                return Ok(RootFindingResult {
                    root: x_new,
                    function_value: fx_new,
                    iterations,
                    steps,
                    method: RootFindingMethod::NewtonRaphson,
                });
            }
            x_old = x_new;
        }

        let (last_x, last_fx) = last;
        steps.push(
            max_iter + 1,
            "Not converged ✗",
            format!("Newton-Raphson found no root within {} iterations.", max_iter),
            vec![
                format!("Last value: x ≈ {:.6}", last_x),
                format!("f(x) = {:.10}", last_fx),
                "Possible causes: a poor initial guess or no real root (e.g. x^2 + 2).".to_string(),
            ],
            StepStatus::Failed,
        );
        let error = RootFindingError::Convergence {
            method: RootFindingMethod::NewtonRaphson,
            max_iterations: max_iter,
            last_x,
            last_value: last_fx,
        };
        warn!("{}", error);
        Err(RootFindingFailure::new(error, steps))
    }
}
