pub mod catalog;
pub mod efcore;
pub mod finding;
pub mod metadata;
pub mod registry;

use async_trait::async_trait;
use std::fmt::Debug;

use ormsync_core::Compilation;

use crate::config::FrameworkConfig;
use crate::rules::finding::RuleFinding;
use crate::rules::metadata::RuleDescriptor;

/// A single rule the engine can run.
///
/// Rules are pure: they inspect one compilation and return findings.
/// They do not mutate engine state.
#[async_trait]
pub trait Rule: Send + Sync + Debug {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;

    /// Static identity shown to users: title, message template, category,
    /// default severity and documentation link.
    fn descriptor(&self) -> &'static RuleDescriptor;

    /// Evaluate the rule against one compilation. `framework` names the ORM
    /// types and namespace of the engine's current configuration.
    ///
    /// Returns a list of findings (may be empty if no issues found). Missing
    /// or malformed pieces of the model never make a rule fail; they simply
    /// produce no finding.
    async fn evaluate(
        &self,
        compilation: &Compilation,
        framework: &FrameworkConfig,
    ) -> Vec<RuleFinding>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::metadata::EF_SYNC_IN_ASYNC;
    use ormsync_core::CompilationBuilder;

    #[derive(Debug)]
    struct DummyRule;

    #[async_trait]
    impl Rule for DummyRule {
        fn id(&self) -> &'static str {
            "dummy.rule"
        }
        fn name(&self) -> &'static str {
            "Dummy Rule"
        }
        fn descriptor(&self) -> &'static RuleDescriptor {
            &EF_SYNC_IN_ASYNC
        }
        async fn evaluate(
            &self,
            _compilation: &Compilation,
            _framework: &FrameworkConfig,
        ) -> Vec<RuleFinding> {
            vec![]
        }
    }

    #[test]
    fn test_rule_trait_methods() {
        let rule = DummyRule;
        assert_eq!(rule.id(), "dummy.rule");
        assert_eq!(rule.name(), "Dummy Rule");
        assert_eq!(rule.descriptor().id, "EFASYNC001");
    }

    #[tokio::test]
    async fn test_rule_evaluate_empty() {
        let rule = DummyRule;
        let compilation = CompilationBuilder::new("Empty").build().unwrap();
        let findings = rule.evaluate(&compilation, &FrameworkConfig::default()).await;
        assert!(findings.is_empty());
    }
}
