//! Root finding tasks read from task documents.
use crate::numerical::scalar_roots::{RootFindingConfig, RootFindingMethod};
use crate::Utils::task_parser::{DocumentMap, Value, parse_document_as};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("cannot read task file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse task document: {0}")]
    Parse(String),
    #[error("missing key '{key}' in section '{section}'")]
    MissingKey { section: String, key: String },
    #[error("key '{key}' in section '{section}' has invalid value '{value}'")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
    #[error("unknown method '{0}', expected bisection or newton")]
    UnknownMethod(String),
    #[error("cannot write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot draw plot {path}: {reason}")]
    Plot { path: String, reason: String },
}

/// Method with its starting data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MethodParams {
    Bisection { a: f64, b: f64 },
    Newton { x0: f64 },
}

impl MethodParams {
    pub fn method(&self) -> RootFindingMethod {
        match self {
            MethodParams::Bisection { .. } => RootFindingMethod::Bisection,
            MethodParams::Newton { .. } => RootFindingMethod::NewtonRaphson,
        }
    }
}

/// One independent solve: function, method, solver settings and optional outputs
#[derive(Debug, Clone, PartialEq)]
pub struct RootTask {
    pub expression: String,
    pub params: MethodParams,
    pub config: RootFindingConfig,
    pub csv: Option<PathBuf>,
    pub plot: Option<PathBuf>,
}

fn first_value<'a>(doc: &'a DocumentMap, section: &str, key: &str) -> Option<&'a Value> {
    doc.get(section)
        .and_then(|s| s.get(key))
        .and_then(|values| values.first())
}

fn required<'a>(doc: &'a DocumentMap, section: &str, key: &str) -> Result<&'a Value, TaskError> {
    first_value(doc, section, key).ok_or_else(|| TaskError::MissingKey {
        section: section.to_string(),
        key: key.to_string(),
    })
}

fn invalid(section: &str, key: &str, value: &Value) -> TaskError {
    TaskError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string_value(),
    }
}

fn required_f64(doc: &DocumentMap, section: &str, key: &str) -> Result<f64, TaskError> {
    let value = required(doc, section, key)?;
    value.as_f64().ok_or_else(|| invalid(section, key, value))
}

impl RootTask {
    /// Builds a task from a parsed document. Sections: `function` (expression),
    /// `method` (name, a, b or x0), optional `solver` (tolerance, max_iter) and
    /// optional `output` (csv, plot).
    pub fn from_map(doc: &DocumentMap) -> Result<Self, TaskError> {
        let expression = required(doc, "function", "expression")?.to_string_value();

        let name = required(doc, "method", "name")?.to_string_value();
        let method = RootFindingMethod::from_str(&name.to_ascii_lowercase())
            .map_err(|_| TaskError::UnknownMethod(name.clone()))?;
        let params = match method {
            RootFindingMethod::Bisection => MethodParams::Bisection {
                a: required_f64(doc, "method", "a")?,
                b: required_f64(doc, "method", "b")?,
            },
            RootFindingMethod::NewtonRaphson => MethodParams::Newton {
                x0: required_f64(doc, "method", "x0")?,
            },
        };

        let mut config = RootFindingConfig::default();
        if let Some(value) = first_value(doc, "solver", "tolerance") {
            config.tolerance = value.as_f64().ok_or_else(|| invalid("solver", "tolerance", value))?;
        }
        if let Some(value) = first_value(doc, "solver", "max_iter") {
            config.max_iterations = value
                .as_integer()
                .and_then(|i| usize::try_from(i).ok())
                .ok_or_else(|| invalid("solver", "max_iter", value))?;
        }

        let path_of = |key: &str| first_value(doc, "output", key).map(|v| PathBuf::from(v.to_string_value()));
        Ok(RootTask {
            expression,
            params,
            config,
            csv: path_of("csv"),
            plot: path_of("plot"),
        })
    }

    /// Parses a task document text
    pub fn from_document(text: &str) -> Result<Self, TaskError> {
        let doc = parse_document_as(text).map_err(TaskError::Parse)?;
        Self::from_map(&doc)
    }

    pub fn from_file(path: &Path) -> Result<Self, TaskError> {
        let text = std::fs::read_to_string(path).map_err(|source| TaskError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_document(&text)
    }
}
