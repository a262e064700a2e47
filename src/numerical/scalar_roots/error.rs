use crate::numerical::scalar_roots::RootFindingMethod;
use crate::numerical::scalar_roots::trace::StepTrace;
use crate::symbolic::symbolic_errors::ExpressionError;
use itertools::Itertools;
use std::fmt;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// Error types for root finding methods
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RootFindingError {
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{what} is not finite at x = {x:.6} (got {value}), try other starting values")]
    Evaluation { what: String, x: f64, value: f64 },

    #[error("f(a) and f(b) have the same sign: f({a:.6}) = {fa:.6}, f({b:.6}) = {fb:.6}")]
    SignCondition { a: f64, b: f64, fa: f64, fb: f64 },

    #[error("derivative vanishes at x = {x:.6} (f'(x) = {derivative:e}), the Newton step is undefined")]
    SingularDerivative { x: f64, derivative: f64 },

    #[error("iteration diverged: the step from x = {x_old:.6} gave {x_new}")]
    Divergence { x_old: f64, x_new: f64 },

    #[error("{method} did not converge within {max_iterations} iterations: x = {last_x:.6}, f(x) = {last_value:.6}")]
    Convergence {
        method: RootFindingMethod,
        max_iterations: usize,
        last_x: f64,
        last_value: f64,
    },
}

impl RootFindingError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RootFindingError::InvalidParameter(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RootFindingError::Expression(_) => ErrorKind::ExpressionError,
            RootFindingError::InvalidParameter(_) => ErrorKind::InvalidParameterError,
            RootFindingError::Evaluation { .. } => ErrorKind::EvaluationError,
            RootFindingError::SignCondition { .. } => ErrorKind::SignConditionError,
            RootFindingError::SingularDerivative { .. } => ErrorKind::SingularDerivativeError,
            RootFindingError::Divergence { .. } => ErrorKind::DivergenceError,
            RootFindingError::Convergence { .. } => ErrorKind::ConvergenceError,
        }
    }
}

/// Failure taxonomy reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ErrorKind {
    ExpressionError,
    InvalidParameterError,
    EvaluationError,
    SignConditionError,
    SingularDerivativeError,
    DivergenceError,
    ConvergenceError,
}

/// Alternative inputs proposed after a failure
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    /// brackets with f(a)*f(b) <= 0
    Intervals(Vec<(f64, f64)>),
    /// starting points with a usable derivative
    InitialGuesses(Vec<f64>),
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        match self {
            Suggestions::Intervals(v) => v.is_empty(),
            Suggestions::InitialGuesses(v) => v.is_empty(),
        }
    }

    /// one line per suggestion, numbered from 1
    pub fn lines(&self) -> Vec<String> {
        match self {
            Suggestions::Intervals(v) => v
                .iter()
                .enumerate()
                .map(|(i, (a, b))| format!("{}. a={}, b={}", i + 1, a, b))
                .collect(),
            Suggestions::InitialGuesses(v) => v
                .iter()
                .enumerate()
                .map(|(i, x)| format!("{}. x0={:.2}", i + 1, x))
                .collect(),
        }
    }
}

impl fmt::Display for Suggestions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = match self {
            Suggestions::Intervals(_) => "Try one of these intervals (signs differ):",
            Suggestions::InitialGuesses(_) => "Try one of these initial guesses:",
        };
        write!(f, "{}\n{}", header, self.lines().iter().join("\n"))
    }
}

/// A failed solve: the error, the trace recorded up to the failure and optional hints.
#[derive(Debug, Clone, PartialEq)]
pub struct RootFindingFailure {
    pub error: RootFindingError,
    pub steps: StepTrace,
    pub suggestions: Option<Suggestions>,
}

impl RootFindingFailure {
    pub fn new(error: RootFindingError, steps: StepTrace) -> Self {
        Self {
            error,
            steps,
            suggestions: None,
        }
    }

    /// keeps only non-empty suggestion lists
    pub fn with_suggestions(mut self, suggestions: Suggestions) -> Self {
        if !suggestions.is_empty() {
            self.suggestions = Some(suggestions);
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// error text followed by the suggestions, if any
    pub fn message(&self) -> String {
        match &self.suggestions {
            Some(s) => format!("{}\n\n{}", self.error, s),
            None => self.error.to_string(),
        }
    }
}

impl From<RootFindingError> for RootFindingFailure {
    fn from(error: RootFindingError) -> Self {
        RootFindingFailure::new(error, StepTrace::default())
    }
}

impl From<ExpressionError> for RootFindingFailure {
    fn from(error: ExpressionError) -> Self {
        RootFindingFailure::from(RootFindingError::from(error))
    }
}

impl fmt::Display for RootFindingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for RootFindingFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
