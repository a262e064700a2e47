//! # Symbolic Engine Module
//!
//! This module holds the expression tree every other part of the pipeline works on:
//! the parser builds it, the differentiator derives a second, independent tree from it,
//! and the lambdify module compiles both into plain Rust closures.
//!
//! ## Main Structures
//!
//! ### `Expr` Enum
//! - **Variable**: `Var` - the single unknown `x`
//! - **Constants**: `Const(f64)` - numerical constants, `pi` and `e` included
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div` - basic arithmetic
//! - **Power**: `Pow(base, n)` - the exponent is always a constant
//! - **Functions**: `Call(Function, argument)` - sin, cos, tan, exp, log, sqrt
//!
//! ### `Function` Enum
//! The closed vocabulary of elementary functions. Names are parsed with `strum`,
//! so anything outside the vocabulary is rejected at parse time.
//!
//! ## Interesting Code Features
//!
//! 1. **Recursive Expression Tree**: `Box<Expr>` children, every tree owns its nodes,
//!    clones are deep copies so the derivative never shares sub-nodes with the source
//!
//! 2. **Operator Overloading**: std::ops traits (Add, Sub, Mul, Div, Neg) give natural
//!    syntax when building derivative trees: `u.diff() * v + u * v.diff()`
#![allow(non_camel_case_types)]

use std::f64;
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Elementary functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    /// natural logarithm
    Log,
    Sqrt,
}

impl Function {
    /// Applies the function to a number with IEEE semantics (NaN/Inf propagate).
    #[inline(always)]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Function::Sin => value.sin(),
            Function::Cos => value.cos(),
            Function::Tan => value.tan(),
            Function::Exp => value.exp(),
            Function::Log => value.ln(),
            Function::Sqrt => value.sqrt(),
        }
    }
}

/// Core symbolic expression enum representing a function of the single variable `x`.
///
/// # Examples
/// ```
/// use RustedRoots::symbolic::symbolic_engine::Expr;
/// // x^2 - 4
/// let expr = Expr::Var.pow(2.0) - Expr::Const(4.0);
/// assert_eq!(expr.eval(2.0), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// The unknown `x`
    Var,
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation with constant exponent: base ^ n
    Pow(Box<Expr>, f64),
    /// Elementary function call: name(argument)
    Call(Function, Box<Expr>),
}

/// Display implementation for pretty printing symbolic expressions.
///
/// Every binary operation is wrapped in parentheses, so the printed form parses back
/// to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var => write!(f, "x"),
            Expr::Const(val) if *val < 0.0 => write!(f, "({})", val),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) if *exp < 0.0 => write!(f, "({} ** ({}))", base, exp),
            Expr::Pow(base, exp) => write!(f, "({} ** {})", base, exp),
            Expr::Call(func, arg) => write!(f, "{}({})", func, arg),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn pow(self, exponent: f64) -> Expr {
        Expr::Pow(self.boxed(), exponent)
    }

    pub fn call(func: Function, arg: Expr) -> Expr {
        Expr::Call(func, arg.boxed())
    }

    pub fn sin(self) -> Expr {
        Expr::call(Function::Sin, self)
    }

    pub fn cos(self) -> Expr {
        Expr::call(Function::Cos, self)
    }

    pub fn tan(self) -> Expr {
        Expr::call(Function::Tan, self)
    }

    pub fn exp(self) -> Expr {
        Expr::call(Function::Exp, self)
    }

    pub fn ln(self) -> Expr {
        Expr::call(Function::Log, self)
    }

    pub fn sqrt(self) -> Expr {
        Expr::call(Function::Sqrt, self)
    }

    /// Returns true if `x` occurs anywhere in the tree.
    pub fn contains_var(&self) -> bool {
        match self {
            Expr::Var => true,
            Expr::Const(_) => false,
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => {
                lhs.contains_var() || rhs.contains_var()
            }
            Expr::Pow(base, _) => base.contains_var(),
            Expr::Call(_, arg) => arg.contains_var(),
        }
    }

    /// Length of the longest path from the root to a leaf, a leaf has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Expr::Var | Expr::Const(_) => 1,
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => {
                1 + lhs.depth().max(rhs.depth())
            }
            Expr::Pow(base, _) => 1 + base.depth(),
            Expr::Call(_, arg) => 1 + arg.depth(),
        }
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Var | Expr::Const(_) => 1,
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => {
                1 + lhs.node_count() + rhs.node_count()
            }
            Expr::Pow(base, _) => 1 + base.node_count(),
            Expr::Call(_, arg) => 1 + arg.node_count(),
        }
    }
}
