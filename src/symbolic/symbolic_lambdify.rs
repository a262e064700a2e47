use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::EvalFault;

/// Checked value: the number plus whether it came from native scalar arithmetic
/// (constants, `x`, and arithmetic on those) rather than from an elementary function.
#[derive(Debug, Clone, Copy)]
struct Checked {
    value: f64,
    native: bool,
}

impl Expr {
    /// LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Converts the expression into an executable Rust closure.
    ///
    /// The closure is composed once from the tree, so no parsing or matching happens
    /// per call. IEEE semantics throughout: NaN and infinities propagate.
    ///
    /// # Examples
    /// ```
    /// use RustedRoots::symbolic::symbolic_engine::Expr;
    /// let f = Expr::Var.pow(2.0); // x^2
    /// let func = f.lambdify1D();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        match self {
            Expr::Var => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) + rhs_fn(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) - rhs_fn(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) * rhs_fn(x))
            }
            Expr::Div(lhs, rhs) => {
                let lhs_fn = lhs.lambdify1D();
                let rhs_fn = rhs.lambdify1D();
                Box::new(move |x| lhs_fn(x) / rhs_fn(x))
            }
            Expr::Pow(base, exp) => {
                let base_fn = base.lambdify1D();
                let exp = *exp;
                Box::new(move |x| base_fn(x).powf(exp))
            }
            Expr::Call(func, arg) => {
                let func = *func;
                let arg_fn = arg.lambdify1D();
                Box::new(move |x| func.apply(arg_fn(x)))
            }
        }
    } // end of lambdify1D

    /// Tree-walking evaluation, same semantics as the closure from `lambdify1D`
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Var => x,
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval(x) + rhs.eval(x),
            Expr::Sub(lhs, rhs) => lhs.eval(x) - rhs.eval(x),
            Expr::Mul(lhs, rhs) => lhs.eval(x) * rhs.eval(x),
            Expr::Div(lhs, rhs) => lhs.eval(x) / rhs.eval(x),
            Expr::Pow(base, exp) => base.eval(x).powf(*exp),
            Expr::Call(func, arg) => func.apply(arg.eval(x)),
        }
    }

    /// Evaluation that faults where plain scalar arithmetic would: division by exactly
    /// zero and zero raised to a negative power, both only between native scalars.
    /// Values coming out of elementary functions follow IEEE rules and never fault.
    pub fn eval_checked(&self, x: f64) -> Result<f64, EvalFault> {
        self.eval_tracked(x).map(|checked| checked.value)
    }

    fn eval_tracked(&self, x: f64) -> Result<Checked, EvalFault> {
        let native = |value| Checked { value, native: true };
        match self {
            Expr::Var => Ok(native(x)),
            Expr::Const(val) => Ok(native(*val)),
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) | Expr::Mul(lhs, rhs) | Expr::Div(lhs, rhs) => {
                let l = lhs.eval_tracked(x)?;
                let r = rhs.eval_tracked(x)?;
                let both_native = l.native && r.native;
                let value = match self {
                    Expr::Add(..) => l.value + r.value,
                    Expr::Sub(..) => l.value - r.value,
                    Expr::Mul(..) => l.value * r.value,
                    _ => {
                        if both_native && r.value == 0.0 {
                            return Err(EvalFault::DivisionByZero);
                        }
                        l.value / r.value
                    }
                };
                Ok(Checked {
                    value,
                    native: both_native,
                })
            }
            Expr::Pow(base, exp) => {
                let b = base.eval_tracked(x)?;
                if b.native && b.value == 0.0 && *exp < 0.0 {
                    return Err(EvalFault::ZeroToNegativePower { exponent: *exp });
                }
                Ok(Checked {
                    value: b.value.powf(*exp),
                    native: b.native,
                })
            }
            Expr::Call(func, arg) => {
                let a = arg.eval_tracked(x)?;
                Ok(Checked {
                    value: func.apply(a.value),
                    native: false,
                })
            }
        }
    }
}
