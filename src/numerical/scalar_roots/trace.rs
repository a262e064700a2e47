//! Iteration tables and the human-readable step trace built by the solvers.
use std::fmt;
use strum_macros::Display;
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StepStatus {
    Init,
    Calculating,
    Converged,
    Success,
    Failed,
}

/// One entry of the step trace
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub index: usize,
    pub title: String,
    pub description: String,
    pub details: Vec<String>,
    pub status: StepStatus,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}] step {}: {} - {}",
            self.status, self.index, self.title, self.description
        )?;
        for detail in &self.details {
            writeln!(f, "    {}", detail)?;
        }
        Ok(())
    }
}

/// Ordered, append-only list of steps. Only the solvers append.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepTrace {
    records: Vec<StepRecord>,
}

impl StepTrace {
    pub(crate) fn push(
        &mut self,
        index: usize,
        title: impl Into<String>,
        description: impl Into<String>,
        details: Vec<String>,
        status: StepStatus,
    ) {
        self.records.push(StepRecord {
            index,
            title: title.into(),
            description: description.into(),
            details,
            status,
        });
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.records.last()
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a StepRecord;
    type IntoIter = std::slice::Iter<'a, StepRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for StepTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}

/// Row of the bisection table; the bracket is the one before the update
#[derive(Debug, Clone, Copy, PartialEq, Tabled)]
pub struct BisectionIteration {
    #[tabled(rename = "iteration")]
    pub index: usize,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    #[tabled(rename = "f(c)")]
    pub f_c: f64,
    pub error: f64,
}

/// Row of the Newton table; `x` is the iterate the step started from
#[derive(Debug, Clone, Copy, PartialEq, Tabled)]
pub struct NewtonIteration {
    #[tabled(rename = "iteration")]
    pub index: usize,
    pub x: f64,
    #[tabled(rename = "f(x)")]
    pub f_x: f64,
    #[tabled(rename = "f'(x)")]
    pub df_x: f64,
    pub error: f64,
}
