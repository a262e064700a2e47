//! The full string-to-trees pipeline: normalize, parse, differentiate, probe.
use crate::symbolic::normalize_expr::normalize_expression;
use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::ExpressionError;
use log::{debug, warn};

/// point where both trees are evaluated once after parsing
pub const PROBE_POINT: f64 = 0.0;

/// A parsed function and its derivative, both validated at the probe point
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFunction {
    /// canonical text produced by the normalizer
    pub canonical: String,
    pub expr: Expr,
    pub derivative: Expr,
}

/// Runs the whole pipeline on raw user input.
///
/// ```
/// use RustedRoots::symbolic::symbolic_pipeline::parse_function;
/// let parsed = parse_function("x^2 - 4 = 0").unwrap();
/// assert_eq!(parsed.canonical, "x**2-4");
/// assert_eq!(parsed.derivative.eval(3.0), 6.0);
/// ```
pub fn parse_function(raw: &str) -> Result<ParsedFunction, ExpressionError> {
    let canonical = normalize_expression(raw)?;
    let expr = parse_expression_func(&canonical)?;
    let derivative = expr.diff();
    debug!("f(x) = {}, f'(x) = {}", expr, derivative);
    probe(&canonical, &expr, &derivative)?;
    Ok(ParsedFunction {
        canonical,
        expr,
        derivative,
    })
}

/// Evaluates a function and its derivative once at the probe point with the checked
/// evaluator; `label` names the function in the error.
pub fn probe(label: &str, expr: &Expr, derivative: &Expr) -> Result<(), ExpressionError> {
    for tree in [expr, derivative] {
        if let Err(fault) = tree.eval_checked(PROBE_POINT) {
            warn!("probe of '{}' at x = {} failed: {}", label, PROBE_POINT, fault);
            return Err(ExpressionError::Probe {
                expression: label.to_string(),
                reason: fault.to_string(),
            });
        }
    }
    Ok(())
}
