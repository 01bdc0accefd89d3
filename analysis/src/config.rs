use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use ormsync_core::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How many compilations may be analyzed at the same time.
    pub max_parallel_compilations: usize,

    /// Report call sites located in tool-generated files.
    pub analyze_generated_code: bool,

    /// Per-rule severity overrides, keyed by rule id.
    pub severity_overrides: HashMap<String, SeverityOverride>,

    /// Names that identify the ORM framework in a compilation.
    pub framework: FrameworkConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_parallel_compilations: 16,
            analyze_generated_code: false,
            severity_overrides: HashMap::new(),
            framework: FrameworkConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_parallel_compilations == 0 {
            return Err(EngineError::Config(
                "max_parallel_compilations must be at least 1".to_string(),
            ));
        }
        let fw = &self.framework;
        for (field, value) in [
            ("namespace_prefix", &fw.namespace_prefix),
            ("context_type_name", &fw.context_type_name),
            ("dataset_type_name", &fw.dataset_type_name),
            ("dataset_accessor_name", &fw.dataset_accessor_name),
        ] {
            if value.trim().is_empty() {
                return Err(EngineError::Config(format!("framework.{field} is empty")));
            }
        }
        Ok(())
    }

    /// Severity a rule reports at, or `None` when the rule is switched off.
    pub fn effective_severity(&self, rule_id: &str, default: Severity) -> Option<Severity> {
        match self.severity_overrides.get(rule_id) {
            Some(o) => o.to_severity(),
            None => Some(default),
        }
    }
}

/// Fully qualified names the classifier resolves in each compilation.
///
/// Defaults describe Entity Framework Core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    /// Module and namespace prefix of the framework itself.
    pub namespace_prefix: String,

    /// The unit-of-work / session base class.
    pub context_type_name: String,

    /// The generic per-entity collection type.
    pub dataset_type_name: String,

    /// Generic method on the context that returns a dataset for an entity type.
    pub dataset_accessor_name: String,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: "Microsoft.EntityFrameworkCore".to_string(),
            context_type_name: "Microsoft.EntityFrameworkCore.DbContext".to_string(),
            dataset_type_name: "Microsoft.EntityFrameworkCore.DbSet`1".to_string(),
            dataset_accessor_name: "Set".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityOverride {
    /// Disable the rule.
    None,
    Hidden,
    Info,
    Warning,
    Error,
}

impl SeverityOverride {
    pub fn to_severity(self) -> Option<Severity> {
        match self {
            Self::None => None,
            Self::Hidden => Some(Severity::Hidden),
            Self::Info => Some(Severity::Info),
            Self::Warning => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}
