use serde::{Deserialize, Serialize};

use crate::model::AstLocation;

/// How loudly a diagnostic is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Reported to tooling but not shown to users.
    Hidden,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Usage,
    Performance,
    CodeQuality,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usage => "Usage",
            Self::Performance => "Performance",
            Self::CodeQuality => "Code Quality",
        }
    }
}

/// A rendered diagnostic ready for a reporting sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub category: RuleCategory,
    pub location: AstLocation,

    /// Path of the file `location` points into, when the compilation knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_link: Option<String>,
}
