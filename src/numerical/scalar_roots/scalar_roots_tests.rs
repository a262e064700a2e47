#[cfg(test)]
mod tests {
    use crate::numerical::scalar_roots::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn finder(tol: f64, max_iter: usize) -> ScalarRootFinder {
        ScalarRootFinder::with_config(RootFindingConfig::new(tol, max_iter))
    }

    ////////////////////////////BISECTION/////////////////////////////////
    #[test]
    fn test_bisection_from_string() {
        let result = solve_bisection("x^2-4", 0.0, 3.0, 1e-6, 50).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-5);
        assert!(result.function_value.abs() <= 1e-6);
        assert_eq!(result.method, RootFindingMethod::Bisection);
        assert_eq!(result.iteration_count(), 22);
        assert_eq!(result.iterations[0].c, 1.5);
        assert_eq!(result.iterations[0].error, 3.0);
    }

    #[test]
    fn test_bisection_simple_quadratic() {
        let solver = finder(1e-12, 100);
        let func = ClosureFunction::new(|x| x * x - 4.0, "x^2 - 4".to_string());
        let result = solver.bisection(&func, 0.0, 3.0).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-10);
        let result = solver.bisection(&func, -3.0, 0.0).unwrap();
        assert_relative_eq!(result.root, -2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bisection_cubic() {
        let solver = finder(1e-12, 100);
        // f(x) = x^3 - x - 1, root approximately at x = 1.324717957
        let func = ClosureFunction::new(|x| x * x * x - x - 1.0, "x^3 - x - 1".to_string());
        let result = solver.bisection(&func, 1.0, 2.0).unwrap();
        assert_relative_eq!(result.root, 1.324717957244746, epsilon = 1e-9);
    }

    #[test]
    fn test_bisection_trigonometric() {
        let result = solve_bisection("sin(x)", 3.0, 4.0, 1e-12, 100).unwrap();
        assert_relative_eq!(result.root, PI, epsilon = 1e-10);
    }

    #[test]
    fn test_bisection_root_at_endpoint() {
        let result = solve_bisection("x - 2", 1.0, 2.0, 1e-6, 100).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_bisection_sign_condition() {
        let failure = solve_bisection("x^2+1", 1.0, 2.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::SignConditionError);
        assert!(failure.steps.is_empty());
        // no probe interval changes sign for x^2 + 1
        assert_eq!(failure.suggestions, None);

        let failure = solve_bisection("x^2-4", 3.0, 5.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::SignConditionError);
        let f = |x: f64| x * x - 4.0;
        match &failure.suggestions {
            Some(Suggestions::Intervals(intervals)) => {
                assert_eq!(intervals, &vec![(-2.0, 2.0), (0.0, 2.0), (1.0, 3.0)]);
                for &(a, b) in intervals {
                    assert!(f(a) * f(b) <= 0.0);
                }
            }
            other => panic!("expected intervals, got {:?}", other),
        }
        assert!(failure.message().contains("1. a=-2, b=2"));
    }

    #[test]
    fn test_bisection_invalid_parameters() {
        let failure = solve_bisection("x^2-4", 3.0, 0.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::InvalidParameterError);
        let failure = solve_bisection("x^2-4", 0.0, 3.0, 0.0, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::InvalidParameterError);
        let failure = solve_bisection("x^2-4", 0.0, 3.0, 1e-6, 0).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::InvalidParameterError);
        let failure = solve_bisection("x^2-4", f64::NEG_INFINITY, 3.0, 1e-6, 10).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::InvalidParameterError);
        let failure = solve_bisection("x +* 4", 0.0, 3.0, 1e-6, 10).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::ExpressionError);
        assert!(failure.steps.is_empty());
    }

    #[test]
    fn test_bisection_endpoint_not_finite() {
        let failure = solve_bisection("sqrt(x) - 1", -1.0, 3.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::EvaluationError);
        assert!(failure.steps.is_empty());
    }

    #[test]
    fn test_bisection_midpoint_not_finite() {
        let solver = finder(1e-6, 50);
        let func = ClosureFunction::new(
            |x: f64| if x == 0.0 { f64::NAN } else { x },
            "x with a hole".to_string(),
        );
        let failure = solver.bisection(&func, -1.0, 1.0).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::EvaluationError);
        let last = failure.steps.last().unwrap();
        assert_eq!(last.index, 1);
        assert_eq!(last.status, StepStatus::Failed);
    }

    #[test]
    fn test_bisection_bracket_invariant() {
        let result = solve_bisection("x^3 - 2*x - 5", 2.0, 3.0, 1e-9, 100).unwrap();
        let f = |x: f64| x.powf(3.0) - 2.0 * x - 5.0;
        for it in &result.iterations {
            assert!(f(it.a) * f(it.b) <= 0.0);
            assert!(it.a <= it.c && it.c <= it.b);
            let (a, b) = if f(it.a) * f(it.c) <= 0.0 { (it.a, it.c) } else { (it.c, it.b) };
            assert!(f(a) * f(b) <= 0.0);
        }
        // [2, 3] keeps every endpoint a dyadic rational, so halving is exact
        for pair in result.iterations.windows(2) {
            assert_eq!(pair[1].b - pair[1].a, (pair[0].b - pair[0].a) / 2.0);
        }
    }

    #[test]
    fn test_bisection_sign_test_survives_underflow() {
        let solver = finder(1e-300, 100);
        // f(a)*f(b) underflows to zero although both values are positive
        let flat = ClosureFunction::new(|_| 1e-200, "1e-200".to_string());
        let failure = solver.bisection(&flat, 0.0, 1.0).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::SignConditionError);

        // every product f(a)*f(c) underflows, the bracket still follows the sign change
        let tiny = ClosureFunction::new(|x| 1e-200 * (x - 0.3), "1e-200*(x - 0.3)".to_string());
        let result = solver.bisection(&tiny, 0.0, 1.0).unwrap();
        assert_relative_eq!(result.root, 0.3, epsilon = 1e-12);
        for it in &result.iterations {
            assert!(it.a <= 0.3 && 0.3 <= it.b);
        }
    }

    #[test]
    fn test_bisection_bounded_termination() {
        let failure = solve_bisection("x^2-4", 0.0, 3.0, 1e-15, 5).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::ConvergenceError);
        let indices: Vec<usize> = failure.steps.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(failure.steps.records()[0].status, StepStatus::Init);
        assert_eq!(failure.steps.last().unwrap().status, StepStatus::Failed);
        match failure.error {
            RootFindingError::Convergence { max_iterations, last_x, .. } => {
                assert_eq!(max_iterations, 5);
                assert_eq!(last_x, 1.96875);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bisection_trace_shape() {
        let result = solve_bisection("x^2-4", 0.0, 3.0, 1e-6, 50).unwrap();
        let n = result.iteration_count();
        assert_eq!(result.steps.len(), n + 2);
        let first = &result.steps.records()[0];
        assert_eq!(first.status, StepStatus::Init);
        assert_eq!(first.title, "Initialization");
        let last = result.steps.last().unwrap();
        assert_eq!(last.index, n + 1);
        assert_eq!(last.status, StepStatus::Success);
        for (i, step) in result.steps.records()[1..=n].iter().enumerate() {
            assert_eq!(step.index, i + 1);
            assert_eq!(step.status, StepStatus::Calculating);
        }
    }

    #[test]
    fn test_finder_setters() {
        let mut solver = ScalarRootFinder::new();
        assert_eq!(solver.config(), &RootFindingConfig::default());
        solver.set_tolerance(1e-12);
        solver.set_max_iterations(3);
        assert_eq!(solver.config(), &RootFindingConfig::new(1e-12, 3));
        let func = ClosureFunction::new(|x| x * x - 4.0, "x^2 - 4".to_string());
        let failure = solver.bisection(&func, 0.0, 3.0).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::ConvergenceError);
        solver.set_max_iterations(100);
        let result = solver.bisection(&func, 0.0, 3.0).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_deeply_nested_input_is_an_expression_error() {
        let long_sum = format!("x{}-2", "+0".repeat(2000));
        let failure = solve_bisection(&long_sum, 0.0, 3.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::ExpressionError);
        assert!(failure.message().contains("nested too deeply"));
        let brackets = format!("{}x{}-2", "(".repeat(1000), ")".repeat(1000));
        let failure = solve_newton(&brackets, 1.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::ExpressionError);
        // well below the limit the pipeline still works
        let sum = format!("x{}-2", "+0".repeat(150));
        let result = solve_bisection(&sum, 0.0, 3.0, 1e-6, 50).unwrap();
        assert_relative_eq!(result.root, 2.0, epsilon = 1e-5);
    }

    ////////////////////////////NEWTON/////////////////////////////////
    #[test]
    fn test_newton_from_string() {
        let result = solve_newton("x^2-2", 1.0, 1e-10, 50).unwrap();
        assert_relative_eq!(result.root, 1.41421356, epsilon = 1e-8);
        assert!(result.function_value.abs() <= 1e-10);
        assert!(result.iterations.last().unwrap().error <= 1e-10);
        assert_eq!(result.method, RootFindingMethod::NewtonRaphson);
        assert_eq!(result.iteration_count(), 5);
        // the table keeps the starting iterate of every step
        assert_eq!(result.iterations[0].x, 1.0);
        assert_eq!(result.iterations[1].x, 1.5);
        let statuses: Vec<StepStatus> = result.steps.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                StepStatus::Init,
                StepStatus::Calculating,
                StepStatus::Calculating,
                StepStatus::Calculating,
                StepStatus::Calculating,
                StepStatus::Converged,
                StepStatus::Success,
            ]
        );
    }

    #[test]
    fn test_newton_cubic_with_closures() {
        let solver = finder(1e-10, 50);
        let func = ClosureFunction::new(|x| x * x * x - x - 1.0, "x^3 - x - 1".to_string());
        let result = solver.newton_raphson(&func, 1.0).unwrap();
        assert_relative_eq!(result.root, 1.324717957244746, epsilon = 1e-9);

        let func = FunctionWithDerivative::new(
            |x| x * x * x - x - 1.0,
            |x| 3.0 * x * x - 1.0,
            "x^3 - x - 1".to_string(),
        );
        let result = solver.newton_raphson(&func, 1.0).unwrap();
        assert_relative_eq!(result.root, 1.324717957244746, epsilon = 1e-9);
    }

    #[test]
    fn test_newton_trigonometric() {
        let result = solve_newton("cos(x) - x", 1.0, 1e-10, 50).unwrap();
        assert_relative_eq!(result.root, 0.7390851332151607, epsilon = 1e-9);
    }

    #[test]
    fn test_newton_singular_derivative() {
        let failure = solve_newton("x^2", 0.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::SingularDerivativeError);
        assert_eq!(failure.steps.len(), 2);
        let last = failure.steps.last().unwrap();
        assert_eq!(last.index, 1);
        assert_eq!(last.status, StepStatus::Failed);
        assert!(last.details.iter().any(|d| d == "Try initial guess: 0.50"));
        assert_eq!(
            failure.suggestions,
            Some(Suggestions::InitialGuesses(vec![0.5, -0.5, 1.0]))
        );
    }

    #[test]
    fn test_newton_no_convergence() {
        // x^3 - 2x + 2 cycles between 0 and 1
        let failure = solve_newton("x^3 - 2*x + 2", 0.0, 1e-10, 20).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::ConvergenceError);
        assert_eq!(failure.steps.len(), 22);
        assert_eq!(failure.steps.last().unwrap().index, 21);
        assert_eq!(failure.suggestions, None);
    }

    #[test]
    fn test_newton_divergence() {
        let solver = finder(1e-6, 50);
        let func = FunctionWithDerivative::new(|_| 1e300, |_| 1e-11, "steep".to_string());
        let failure = solver.newton_raphson(&func, 1.0).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::DivergenceError);
        assert_eq!(failure.steps.last().unwrap().status, StepStatus::Failed);
    }

    #[test]
    fn test_newton_start_not_finite() {
        let failure = solve_newton("sqrt(x) - 2", -1.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::EvaluationError);
        assert!(failure.steps.is_empty());
        let failure = solve_newton("x^2-2", f64::NAN, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::InvalidParameterError);
    }

    #[test]
    fn test_newton_iterate_leaves_domain() {
        // the first step from x = 16 lands on x = -8
        let failure = solve_newton("sqrt(x) - 1", 16.0, 1e-6, 50).unwrap_err();
        assert_eq!(failure.kind(), ErrorKind::EvaluationError);
        assert_eq!(failure.steps.len(), 2);
        assert_eq!(failure.steps.last().unwrap().status, StepStatus::Failed);
    }

    ////////////////////////////DETERMINISM/////////////////////////////////
    #[test]
    fn test_identical_inputs_give_identical_traces() {
        let first = solve_bisection("exp(x) - 2", 0.0, 1.0, 1e-8, 100).unwrap();
        let second = solve_bisection("exp(x) - 2", 0.0, 1.0, 1e-8, 100).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.steps.to_string(), second.steps.to_string());

        let first = solve_newton("tan(x) - 1", 0.5, 1e-10, 100).unwrap();
        let second = solve_newton("tan(x) - 1", 0.5, 1e-10, 100).unwrap();
        assert_eq!(first, second);
        assert_relative_eq!(first.root, PI / 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_function_stays_callable_after_solve() {
        let f = SymbolicFunction::from_string("x^2 - 4").unwrap();
        let result = finder(1e-8, 100).bisection(&f, 0.0, 3.0).unwrap();
        assert!(result.root.is_finite());
        assert_relative_eq!(f.evaluate(result.root), result.function_value);
    }
}
