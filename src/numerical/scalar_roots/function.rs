use crate::numerical::scalar_roots::error::RootFindingError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_pipeline::{parse_function, probe};
use crate::symbolic::utils::central_difference;
use std::fmt;

/// step of the central difference used when no analytical derivative exists
pub const NUMERICAL_DIFF_STEP: f64 = 1e-8;

//////////////////////////////////TRAITS AND IMPLEMENTATIONS/////////////////////////////////
/// Trait for representing a nonlinear equation f(x) = 0
pub trait NonlinearFunction {
    /// Evaluate the function at point x
    fn evaluate(&self, x: f64) -> f64;

    /// Evaluate the derivative at point x (optional, for methods that can use it)
    fn derivative(&self, _x: f64) -> Option<f64> {
        None
    }

    /// analytical derivative if there is one, central difference otherwise
    fn derivative_or_estimate(&self, x: f64) -> f64 {
        match self.derivative(x) {
            Some(d) => d,
            None => central_difference(|t| self.evaluate(t), x, NUMERICAL_DIFF_STEP),
        }
    }

    /// Get function name for debugging/logging
    fn name(&self) -> &str {
        "unnamed_function"
    }
}

/// Simple function wrapper for closures
pub struct ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    func: F,
    name: String,
}

impl<F> ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(func: F, name: String) -> Self {
        Self { func, name }
    }
}

impl<F> NonlinearFunction for ClosureFunction<F>
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Function wrapper with analytical derivative
pub struct FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    func: F,
    derivative_func: D,
    name: String,
}

impl<F, D> FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    pub fn new(func: F, derivative_func: D, name: String) -> Self {
        Self {
            func,
            derivative_func,
            name,
        }
    }
}

impl<F, D> NonlinearFunction for FunctionWithDerivative<F, D>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn derivative(&self, x: f64) -> Option<f64> {
        Some((self.derivative_func)(x))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

////////////////////////SYMBOLIC FUNCTIONS//////////////////////////////////////////
pub type Lambdified = Box<dyn Fn(f64) -> f64 + Send + Sync>;

/// Function parsed from a string, differentiated symbolically and compiled into closures.
/// Stays usable after a solve, e.g. for plotting.
pub struct SymbolicFunction {
    canonical: String,
    expr: Expr,
    derivative_expr: Expr,
    name: String,
    func: Lambdified,
    derivative_func: Lambdified,
}

impl SymbolicFunction {
    /// Create a new symbolic function from a raw string expression
    /// ```
    /// use RustedRoots::numerical::scalar_roots::{NonlinearFunction, SymbolicFunction};
    /// let f = SymbolicFunction::from_string("x^2 - 2").unwrap();
    /// assert_eq!(f.evaluate(2.0), 2.0);
    /// assert_eq!(f.derivative(2.0), Some(4.0));
    /// ```
    pub fn from_string(expr_str: &str) -> Result<Self, RootFindingError> {
        let parsed = parse_function(expr_str)?;
        Ok(Self::compile(
            parsed.canonical,
            parsed.expr,
            parsed.derivative,
            expr_str.trim().to_string(),
        ))
    }

    /// Create a new symbolic function from an Expr, validated the same way as parsed input
    pub fn from_expr(expr: Expr, name: Option<String>) -> Result<Self, RootFindingError> {
        let canonical = expr.to_string();
        let derivative_expr = expr.diff();
        probe(&canonical, &expr, &derivative_expr)?;
        let name = name.unwrap_or_else(|| canonical.clone());
        Ok(Self::compile(canonical, expr, derivative_expr, name))
    }

    fn compile(canonical: String, expr: Expr, derivative_expr: Expr, name: String) -> Self {
        let func = expr.lambdify1D();
        let derivative_func = derivative_expr.lambdify1D();
        Self {
            canonical,
            expr,
            derivative_expr,
            name,
            func,
            derivative_func,
        }
    }

    /// canonical text the function was parsed from
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn derivative_expr(&self) -> &Expr {
        &self.derivative_expr
    }

    /// Get the symbolic expression as string
    pub fn expression_string(&self) -> String {
        self.expr.to_string()
    }

    /// Get the derivative expression as string
    pub fn derivative_string(&self) -> String {
        self.derivative_expr.to_string()
    }

    /// the compiled f
    pub fn function(&self) -> &(dyn Fn(f64) -> f64 + Send + Sync) {
        self.func.as_ref()
    }

    /// the compiled f'
    pub fn derivative_function(&self) -> &(dyn Fn(f64) -> f64 + Send + Sync) {
        self.derivative_func.as_ref()
    }
}

impl fmt::Debug for SymbolicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolicFunction")
            .field("name", &self.name)
            .field("canonical", &self.canonical)
            .field("expr", &self.expr)
            .field("derivative_expr", &self.derivative_expr)
            .finish()
    }
}

impl NonlinearFunction for SymbolicFunction {
    fn evaluate(&self, x: f64) -> f64 {
        (self.func)(x)
    }

    fn derivative(&self, x: f64) -> Option<f64> {
        Some((self.derivative_func)(x))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::scalar_roots::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_closure_function() {
        let func = ClosureFunction::new(|x| x * x - 4.0, "x^2 - 4".to_string());
        assert_eq!(func.evaluate(2.0), 0.0);
        assert_eq!(func.evaluate(0.0), -4.0);
        assert_eq!(func.name(), "x^2 - 4");
        assert_eq!(func.derivative(1.0), None);
        assert_relative_eq!(func.derivative_or_estimate(3.0), 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_function_with_derivative() {
        let func = FunctionWithDerivative::new(
            |x| x * x - 4.0,
            |x| 2.0 * x,
            "x^2 - 4 with derivative".to_string(),
        );
        assert_eq!(func.derivative(3.0), Some(6.0));
        assert_eq!(func.derivative_or_estimate(3.0), 6.0);
    }

    #[test]
    fn test_symbolic_function_from_string() {
        let f = SymbolicFunction::from_string("sin(x) - 0.5").unwrap();
        assert_eq!(f.canonical(), "sin(x)-0.5");
        assert_eq!(f.name(), "sin(x) - 0.5");
        let x: f64 = 0.4;
        assert_relative_eq!(f.evaluate(x), x.sin() - 0.5);
        assert_relative_eq!(f.derivative(x).unwrap(), x.cos());
        assert_eq!((f.function())(x), f.evaluate(x));
        assert_eq!((f.derivative_function())(x), f.derivative(x).unwrap());
        assert_eq!(f.expression_string(), "(sin(x) - 0.5)");
    }

    #[test]
    fn test_symbolic_function_rejects_bad_input() {
        let err = SymbolicFunction::from_string("x + y").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpressionError);
        let err = SymbolicFunction::from_string("1/x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpressionError);
    }

    #[test]
    fn test_symbolic_function_from_expr() {
        let f = SymbolicFunction::from_expr(Expr::Var.exp() - Expr::Const(2.0), None).unwrap();
        assert_relative_eq!(f.evaluate(2.0_f64.ln()), 0.0, epsilon = 1e-15);
        assert_eq!(f.name(), "(exp(x) - 2)");
        assert!(SymbolicFunction::from_expr(Expr::Const(1.0) / Expr::Var, None).is_err());
    }
}
