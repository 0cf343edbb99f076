//! Diagnostics reported back to the host alongside artifacts

use serde::Serialize;
use std::fmt;

/// Diagnostic id for two entities generating the same wrapper method
pub const DUPLICATE_WRAPPER_NAME: &str = "WFG001";

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Info,
    /// Generation succeeded but the output will likely not compile
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One diagnostic
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Diagnostic {
    /// Stable id, e.g. `WFG001`
    pub id: String,

    /// Severity
    pub severity: Severity,

    /// Human readable message
    pub message: String,
}

impl Diagnostic {
    /// A warning
    pub fn warning(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Two or more entities generate `method` in `container`
    pub fn duplicate_wrapper(container: &str, method: &str, sources: &[String]) -> Self {
        Self::warning(
            DUPLICATE_WRAPPER_NAME,
            format!(
                "'{container}.{method}' is generated for more than one declaration: {}",
                sources.join(", ")
            ),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.id, self.message)
    }
}
