use serde::{Deserialize, Serialize};

use ormsync_core::{AstLocation, Diagnostic, Severity};

use crate::rules::metadata::RuleDescriptor;

/// One flagged call site, as produced by a classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    pub location: AstLocation,

    /// Name of the synchronous method that was called.
    pub method_name: String,
}

impl ViolationReport {
    pub fn into_finding(self, rule_id: &str) -> RuleFinding {
        RuleFinding {
            rule_id: rule_id.to_string(),
            location: self.location,
            message_args: vec![self.method_name],
        }
    }
}

/// A lightweight finding produced by a rule (engine-internal).
///
/// The session turns it into a [`Diagnostic`] once severity overrides and
/// file filters have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFinding {
    /// The ID of the rule that produced this.
    pub rule_id: String,

    /// Where in the code this finding comes from.
    pub location: AstLocation,

    /// Values for the descriptor's message slots.
    #[serde(default)]
    pub message_args: Vec<String>,
}

impl RuleFinding {
    pub fn into_diagnostic(
        self,
        descriptor: &RuleDescriptor,
        severity: Severity,
        file_path: Option<String>,
    ) -> Diagnostic {
        Diagnostic {
            message: descriptor.format_message(&self.message_args),
            rule_id: self.rule_id,
            severity,
            category: descriptor.category,
            location: self.location,
            file_path,
            help_link: Some(descriptor.help_link.to_string()).filter(|l| !l.is_empty()),
        }
    }
}
