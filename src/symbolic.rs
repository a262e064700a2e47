#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a raw user string into the canonical expression text
///
///# Example
/// ```
/// use RustedRoots::symbolic::normalize_expr::normalize_expression;
/// assert_eq!(normalize_expression("x^2 - 4 = 0").unwrap(), "x**2-4");
/// ```
pub mod normalize_expr;
/// nom lexer for canonical expressions
pub mod tokenizer;
///____________________________________________________________________________________________________________________________
/// a module turns a canonical String expression into a symbolic expression
///# Example
/// ```
/// use RustedRoots::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("sin(x) - 0.5").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// ```
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree of a function of x
/// 2) turns a symbolic expression into a Rust function
/// 3) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use RustedRoots::symbolic::symbolic_engine::Expr;
/// let input = "exp(x) - 2";
/// // here you've got symbolic expression
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// // differentiate with respect to x
/// let df_dx = parsed_expression.diff();
/// println!("df_dx = {}", df_dx);
/// // convert symbolic expression to a Rust function and evaluate the function
/// let f = parsed_expression.lambdify1D();
/// let f_res = f(2.0_f64.ln());
/// assert!(f_res.abs() < 1e-12);
/// // compare numerical and analtical derivatives on a linspace
/// let (norma, ok) = parsed_expression.compare_num1D(0.0, 1.0, 100, 1e-6);
/// println!(" result_of compare = {} {}", norma, ok);
/// ```
pub mod symbolic_engine;
/// analytical differentiation of expression trees
pub mod symbolic_engine_derivatives;
pub mod symbolic_errors;
/// closures and evaluators built from expression trees
pub mod symbolic_lambdify;
/// normalize, parse, differentiate and probe in one call
pub mod symbolic_pipeline;
pub mod utils;
