//! Static rule identity and message rendering.
//!
//! Each rule exposes its descriptor through `Rule::descriptor()`. This module
//! also provides a stable lookup by `rule_id` for call sites that only have a
//! finding's id string.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use ormsync_core::{RuleCategory, Severity};

use crate::rules::registry::RuleRegistry;

/// Identity and presentation of a rule, as shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub id: &'static str,
    pub title: &'static str,

    /// Message template with positional `{0}`, `{1}`, ... slots.
    pub message_format: &'static str,

    pub category: RuleCategory,
    pub default_severity: Severity,
    pub enabled_by_default: bool,
    pub description: &'static str,
    pub help_link: &'static str,
}

impl RuleDescriptor {
    /// Substitute positional placeholders. Slots without an argument are left
    /// as written.
    pub fn format_message<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut message = self.message_format.to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), arg.as_ref());
        }
        message
    }
}

pub const EF_SYNC_IN_ASYNC: RuleDescriptor = RuleDescriptor {
    id: "EFASYNC001",
    title: "Use async EF Core method",
    message_format: "Use '{0}Async' instead of '{0}' to avoid blocking",
    category: RuleCategory::Usage,
    default_severity: Severity::Warning,
    enabled_by_default: true,
    description: "Synchronous EF Core calls can cause thread pool starvation and deadlocks.",
    help_link: "https://learn.microsoft.com/en-us/ef/core/performance/efficient-querying#asynchronous-programming",
};

static DESCRIPTOR_BY_RULE_ID: OnceLock<HashMap<&'static str, &'static RuleDescriptor>> =
    OnceLock::new();

pub fn descriptor_for_rule_id(rule_id: &str) -> Option<&'static RuleDescriptor> {
    let map = DESCRIPTOR_BY_RULE_ID.get_or_init(|| {
        RuleRegistry::with_builtin_rules()
            .all()
            .iter()
            .map(|r| (r.id(), r.descriptor()))
            .collect()
    });
    map.get(rule_id).copied()
}
