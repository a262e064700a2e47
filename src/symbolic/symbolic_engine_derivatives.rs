//! # Symbolic Engine Derivatives Module
//!
//! This module extends the symbolic engine with analytical differentiation and its
//! numerical validation.
//!
//! ## Key Methods
//!
//! ### Differentiation
//! - `diff()` - Analytical derivative with respect to `x`
//! - `n_th_derivative1D()` - Higher-order derivatives
//!
//! ### Numerical Analysis
//! - `compare_num1D()` - Validate the analytical derivative against a central difference
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Differentiation Rules**: sum, product, quotient, power and chain rules
//!    for every supported function, one match arm per node kind
//!
//! 2. **Independent Derivative Tree**: every arm builds new nodes from clones of the
//!    source sub-trees, the original expression is never touched

use crate::symbolic::symbolic_engine::{Expr, Function};
use crate::symbolic::utils::{linspace, norm, numerical_derivative};

impl Expr {
    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to `x`.
    ///
    /// Implements all standard differentiation rules from calculus:
    /// - Power rule: d/dx(u^n) = n*u^(n-1)*u'
    /// - Product rule: d/dx(u*v) = u'*v + u*v'
    /// - Quotient rule: d/dx(u/v) = (u'*v - u*v')/(v*v)
    /// - Chain rule: d/dx(f(u)) = f'(u)*u'
    ///
    /// # Examples
    /// ```
    /// use RustedRoots::symbolic::symbolic_engine::Expr;
    /// let f = Expr::Var.pow(2.0); // x^2
    /// let df_dx = f.diff(); // 2*x^1*1
    /// assert_eq!(df_dx.eval(3.0), 6.0);
    /// ```
    pub fn diff(&self) -> Expr {
        match self {
            Expr::Var => Expr::Const(1.0),
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => lhs.diff() + rhs.diff(),
            Expr::Sub(lhs, rhs) => lhs.diff() - rhs.diff(),
            Expr::Mul(lhs, rhs) => {
                lhs.diff() * rhs.as_ref().clone() + lhs.as_ref().clone() * rhs.diff()
            }
            Expr::Div(lhs, rhs) => {
                let u = lhs.as_ref().clone();
                let v = rhs.as_ref().clone();
                (lhs.diff() * v.clone() - u * rhs.diff()) / (v.clone() * v)
            }
            // d/dx(u^0) is zero everywhere, u^(-1) must not appear
            Expr::Pow(_, n) if *n == 0.0 => Expr::Const(0.0),
            Expr::Pow(base, n) => {
                Expr::Const(*n) * base.as_ref().clone().pow(n - 1.0) * base.diff()
            }
            Expr::Call(func, arg) => {
                let u = arg.as_ref().clone();
                let outer = match func {
                    Function::Sin => u.cos(),
                    Function::Cos => -u.sin(),
                    Function::Tan => Expr::Const(1.0) / u.cos().pow(2.0),
                    Function::Exp => u.exp(),
                    Function::Log => Expr::Const(1.0) / u,
                    Function::Sqrt => Expr::Const(1.0) / (Expr::Const(2.0) * u.sqrt()),
                };
                outer * arg.diff()
            }
        }
    } // end of diff

    /// n-th derivative, `n = 0` returns a copy of the expression
    pub fn n_th_derivative1D(&self, n: usize) -> Expr {
        let mut expr = self.clone();
        for _ in 0..n {
            expr = expr.diff();
        }
        expr
    }

    /// Compares the analytical derivative with a central difference on `num_values`
    /// points of `[start, end]`. Returns the root mean square distance and whether it
    /// is below `max_norm`.
    pub fn compare_num1D(&self, start: f64, end: f64, num_values: usize, max_norm: f64) -> (f64, bool) {
        let domain = linspace(start, end, num_values);
        let derivative = self.diff();
        let analytical: Vec<f64> = domain.iter().map(|&x| derivative.eval(x)).collect();
        let step = if num_values > 1 {
            1e-4 * (end - start) / (num_values as f64 - 1.0)
        } else {
            1e-6
        };
        let numerical = numerical_derivative(|x| self.eval(x), &domain, step);
        let norma_val = norm(&analytical, &numerical);
        (norma_val, norma_val < max_norm)
    }
}
