use crate::numerical::scalar_roots::error::{RootFindingError, RootFindingFailure, Suggestions};
use crate::numerical::scalar_roots::function::NonlinearFunction;
use crate::numerical::scalar_roots::suggestions::suggest_intervals;
use crate::numerical::scalar_roots::trace::{BisectionIteration, StepStatus, StepTrace};
use crate::numerical::scalar_roots::{RootFindingMethod, RootFindingResult, ScalarRootFinder};
use log::{debug, info, warn};

/// Both values non-zero with the same sign. Compares signs, so tiny values whose
/// product underflows to zero are still told apart.
pub(crate) fn same_sign(u: f64, v: f64) -> bool {
    u != 0.0 && v != 0.0 && u.signum() == v.signum()
}

impl ScalarRootFinder {
    /// Bisection method for finding roots
    /// Requires a < b and that f(a) and f(b) do not have the same sign.
    ///
    /// Each iteration halves the bracket and keeps the half where the sign changes.
    /// Converged when the midpoint moved by at most `tolerance` or |f(c)| <= `tolerance`.
    pub fn bisection<F>(
        &self,
        function: &F,
        a: f64,
        b: f64,
    ) -> Result<RootFindingResult<BisectionIteration>, RootFindingFailure>
    where
        F: NonlinearFunction + ?Sized,
    {
        self.config.validate()?;
        if !a.is_finite() || !b.is_finite() {
            return Err(RootFindingError::invalid(format!("a and b must be finite, got a = {}, b = {}", a, b)).into());
        }
        if a >= b {
            return Err(RootFindingError::invalid(format!("a must be < b, got a = {}, b = {}", a, b)).into());
        }
        let tol = self.config.tolerance;
        let max_iter = self.config.max_iterations;
        let (mut a, mut b) = (a, b);

        let mut fa = function.evaluate(a);
        let fb = function.evaluate(b);
        for (what, x, value) in [("f(a)", a, fa), ("f(b)", b, fb)] {
            if !value.is_finite() {
                warn!("bisection: {} = {} is not finite", what, value);
                return Err(RootFindingError::Evaluation {
                    what: what.to_string(),
                    x,
                    value,
                }
                .into());
            }
        }
        if same_sign(fa, fb) {
            let error = RootFindingError::SignCondition { a, b, fa, fb };
            warn!("bisection: {}", error);
            let intervals = suggest_intervals(function);
            return Err(RootFindingFailure::new(error, StepTrace::default())
                .with_suggestions(Suggestions::Intervals(intervals)));
        }

        info!(
            "bisection for {} on [{}, {}], tolerance {}, max_iter {}",
            function.name(),
            a,
            b,
            tol,
            max_iter
        );
        let mut steps = StepTrace::default();
        let mut iterations = Vec::new();
        steps.push(
            0,
            "Initialization",
            format!("Initial interval: [a, b] = [{:.6}, {:.6}]", a, b),
            vec![
                format!("f(a) = {:.6}", fa),
                format!("f(b) = {:.6}", fb),
                format!("f(a)×f(b) = {:.6} ≤ 0 ✓", fa * fb),
                "The root lies between a and b (signs differ).".to_string(),
            ],
            StepStatus::Init,
        );

        let mut c_old: Option<f64> = None;
        let mut last = (a, fa);
        for i in 1..=max_iter {
            let c = (a + b) / 2.0;
            let fc = function.evaluate(c);
            if !fc.is_finite() {
                let error = RootFindingError::Evaluation {
                    what: "f(c)".to_string(),
                    x: c,
                    value: fc,
                };
                warn!("bisection: {}", error);
                steps.push(
                    i,
                    "Evaluation failed ✗",
                    format!("f(c) is not finite at c = {:.6}", c),
                    vec![
                        format!("c = (a+b)/2 = ({:.6}+{:.6})/2 = {:.6}", a, b, c),
                        "Try another interval.".to_string(),
                    ],
                    StepStatus::Failed,
                );
                return Err(RootFindingFailure::new(error, steps));
            }
            last = (c, fc);
            let error = match c_old {
                Some(prev) => (c - prev).abs(),
                None => (b - a).abs(),
            };
            iterations.push(BisectionIteration {
                index: i,
                a,
                b,
                c,
                f_c: fc,
                error,
            });
            debug!("bisection iteration {}: a = {}, b = {}, c = {}, f(c) = {}, error = {}", i, a, b, c, fc, error);

            let keep_left = !same_sign(fa, fc);
            let (action, next_interval) = if keep_left {
                (
                    "f(a)×f(c) ≤ 0 → root in the left half → b = c",
                    format!("[{:.6}, {:.6}]", a, c),
                )
            } else {
                (
                    "f(a)×f(c) > 0 → root in the right half → a = c",
                    format!("[{:.6}, {:.6}]", c, b),
                )
            };
            steps.push(
                i,
                format!("Iteration {}", i),
                format!("c = {:.6}, f(c) = {:.6}", c, fc),
                vec![
                    format!("c = (a+b)/2 = ({:.6}+{:.6})/2 = {:.6}", a, b, c),
                    format!("f(c) = {:.6}", fc),
                    format!("f(a)×f(c) = {:.6}×{:.6} = {:.6}", fa, fc, fa * fc),
                    action.to_string(),
                    format!("New interval: {}", next_interval),
                    format!("Error: {:.10}", error),
                ],
                StepStatus::Calculating,
            );

            if error <= tol || fc.abs() <= tol {
                steps.push(
                    i + 1,
                    "Converged! ✓",
                    format!("Root found: x ≈ {:.6}", c),
                    vec![
                        format!("Error = {:.10}, tolerance = {}", error, tol),
                        format!("f(x) = {:.10} ≈ 0", fc),
                    ],
                    StepStatus::Success,
                );
                info!("bisection converged to {} after {} iterations", c, i);
                return Ok(RootFindingResult {
                    root: c,
                    function_value: fc,
                    iterations,
                    steps,
                    method: RootFindingMethod::Bisection,
                });
            }

            if keep_left {
                b = c;
            } else {
                a = c;
                fa = fc;
            }
            c_old = Some(c);
        }

        let (last_c, last_fc) = last;
        steps.push(
            max_iter + 1,
            "Not converged ✗",
            format!("Bisection did not reach the tolerance within {} iterations.", max_iter),
            vec![
                format!("Last estimate: c ≈ {:.6}", last_c),
                format!("f(c) = {:.10}", last_fc),
                "Try increasing max_iter or changing the initial interval.".to_string(),
            ],
            StepStatus::Failed,
        );
        let error = RootFindingError::Convergence {
            method: RootFindingMethod::Bisection,
            max_iterations: max_iter,
            last_x: last_c,
            last_value: last_fc,
        };
        warn!("{}", error);
        Err(RootFindingFailure::new(error, steps))
    }
}
