use serde::{Deserialize, Serialize};
use std::fmt;

/// The outcome of a single check within a checkup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub is_healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckResult {
    pub fn healthy(name: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            is_healthy: true,
            reason: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, reason: Option<String>) -> Self {
        CheckResult {
            name: name.into(),
            is_healthy: false,
            reason,
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_healthy {
            return write!(f, "ok: {}", self.name);
        }
        write!(f, "error: {}", self.name)?;
        if let Some(reason) = &self.reason {
            write!(f, ": {}", reason)?;
        }
        Ok(())
    }
}

/// The results of one checkup, in the order the checks were registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    results: Vec<CheckResult>,
}

impl Report {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Report { results }
    }

    /// Returns true if every check in the report is healthy. An empty report
    /// is healthy.
    pub fn is_healthy(&self) -> bool {
        self.results.iter().all(|result| result.is_healthy)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckResult> {
        self.results.iter()
    }
}

impl std::ops::Index<usize> for Report {
    type Output = CheckResult;

    fn index(&self, index: usize) -> &Self::Output {
        &self.results[index]
    }
}

/// Renders one line per check followed by the overall state.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(f, "{}", result)?;
        }
        write!(f, "{}", if self.is_healthy() { "healthy" } else { "unhealthy" })
    }
}
