//! Errors of the expression pipeline: normalization, tokenizing, parsing and the
//! probe evaluation that follows compilation.
use thiserror::Error;

/// The token set accepted by the normalizer, reported back to the user.
pub const ALLOWED_TOKENS: &str =
    "digits, x, +, -, *, /, **, (), sin, cos, tan, exp, log, sqrt";

/// Example inputs shown when an expression is rejected.
pub const VALID_EXAMPLES: &str = "x**2 - 4, sin(x) - 0.5, exp(x) - 2";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("function must not be empty")]
    Empty,

    #[error("invalid character '{character}' in function '{expression}'. Use only: {allowed}", allowed = ALLOWED_TOKENS)]
    InvalidCharacter { character: char, expression: String },

    #[error("unknown symbol '{symbol}' at position {position}. Use only: {allowed}, pi, e", allowed = ALLOWED_TOKENS)]
    UnknownSymbol { symbol: String, position: usize },

    #[error("syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("exponent '{exponent}' depends on x; only constant exponents can be differentiated")]
    NonConstantExponent { exponent: String },

    #[error("invalid function: '{expression}'. Error: {reason}. Valid examples: {examples}", examples = VALID_EXAMPLES)]
    Probe { expression: String, reason: String },
}

impl ExpressionError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        ExpressionError::Syntax {
            position,
            message: message.into(),
        }
    }
}

/// Faults raised by the checked (probe) evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EvalFault {
    #[error("division by zero")]
    DivisionByZero,
    #[error("zero raised to a negative power {exponent}")]
    ZeroToNegativePower { exponent: f64 },
}
