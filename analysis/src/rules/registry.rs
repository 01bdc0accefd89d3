use std::collections::HashSet;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::rules::Rule;
use crate::rules::efcore::EfSyncInvocationRule;

#[derive(Debug, Default, Clone)]
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn all(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Rule>> {
        self.rules.iter().find(|r| r.id() == id).cloned()
    }

    /// Check if a rule exists.
    pub fn contains(&self, id: &str) -> bool {
        self.rules.iter().any(|r| r.id() == id)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Create a new registry containing only rules with the given IDs.
    ///
    /// Rules not found are silently ignored.
    pub fn filter_by_ids(&self, ids: &[String]) -> Self {
        let id_set: HashSet<&str> = ids.iter().map(|s| s.as_str()).collect();
        let filtered_rules: Vec<Arc<dyn Rule>> = self
            .rules
            .iter()
            .filter(|r| id_set.contains(r.id()))
            .cloned()
            .collect();

        Self {
            rules: filtered_rules,
        }
    }

    /// Convenience factory to build a registry with built-in rules.
    pub fn with_builtin_rules() -> Self {
        let mut registry = RuleRegistry::new();

        // EF Core
        registry.register(Arc::new(EfSyncInvocationRule::new()));

        registry
    }

    /// Built-in rules enabled under `config`.
    ///
    /// Rules that are off by default are only kept when a severity override
    /// switches them on. Framework names are not captured here; the session
    /// hands the current ones to every evaluation.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut registry = RuleRegistry::with_builtin_rules();
        registry.rules.retain(|r| {
            r.descriptor().enabled_by_default
                || config
                    .severity_overrides
                    .get(r.id())
                    .is_some_and(|o| o.to_severity().is_some())
        });
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FrameworkConfig, SeverityOverride};
    use crate::fixtures::{EfFixture, custom_orm_framework};
    use crate::rules::finding::RuleFinding;
    use crate::rules::metadata::{EF_SYNC_IN_ASYNC, RuleDescriptor};
    use async_trait::async_trait;
    use ormsync_core::{Compilation, CompilationBuilder};

    // ==================== Mock Rule for Testing ====================

    #[derive(Debug)]
    struct TestRule {
        id: &'static str,
        name: &'static str,
    }

    impl TestRule {
        fn new(id: &'static str, name: &'static str) -> Self {
            Self { id, name }
        }
    }

    #[async_trait]
    impl Rule for TestRule {
        fn id(&self) -> &'static str {
            self.id
        }

        fn name(&self) -> &'static str {
            self.name
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

    // ==================== RuleRegistry::new Tests ====================

    #[test]
    fn new_creates_empty_registry() {
        let registry = RuleRegistry::new();
        assert!(registry.all().is_empty());
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn default_is_equivalent_to_new() {
        let new_registry = RuleRegistry::new();
        let default_registry = RuleRegistry::default();
        assert_eq!(new_registry.all().len(), default_registry.all().len());
    }

    // ==================== RuleRegistry::register Tests ====================

    #[test]
    fn register_preserves_order() {
        let mut registry = RuleRegistry::new();

        registry.register(Arc::new(TestRule::new("first", "First")));
        registry.register(Arc::new(TestRule::new("second", "Second")));
        registry.register(Arc::new(TestRule::new("third", "Third")));

        let rules = registry.all();
        assert_eq!(rules[0].id(), "first");
        assert_eq!(rules[1].id(), "second");
        assert_eq!(rules[2].id(), "third");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn register_allows_duplicate_rule_ids() {
        let mut registry = RuleRegistry::new();

        registry.register(Arc::new(TestRule::new("same.id", "Rule One")));
        registry.register(Arc::new(TestRule::new("same.id", "Rule Two")));

        // Both rules are registered even with same ID
        assert_eq!(registry.all().len(), 2);
        // get returns the first one
        assert_eq!(registry.get("same.id").unwrap().name(), "Rule One");
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn get_and_contains() {
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(TestRule::new("rule.a", "Rule A")));

        assert!(registry.contains("rule.a"));
        assert!(!registry.contains("rule.b"));
        assert_eq!(registry.get("rule.a").map(|r| r.name()), Some("Rule A"));
        assert!(registry.get("rule.b").is_none());
    }

    #[test]
    fn filter_by_ids_keeps_known_ids_only() {
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(TestRule::new("rule.a", "Rule A")));
        registry.register(Arc::new(TestRule::new("rule.b", "Rule B")));
        registry.register(Arc::new(TestRule::new("rule.c", "Rule C")));

        let filtered =
            registry.filter_by_ids(&["rule.c".to_string(), "rule.a".to_string(), "nope".to_string()]);
        let ids: Vec<&str> = filtered.all().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["rule.a", "rule.c"]);

        assert!(registry.filter_by_ids(&[]).is_empty());
    }

    // ==================== Built-in Rules Tests ====================

    #[test]
    fn with_builtin_rules_contains_sync_in_async_rule() {
        let registry = RuleRegistry::with_builtin_rules();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("EFASYNC001"));
    }

    #[test]
    fn with_builtin_rules_all_rules_have_non_empty_ids_and_names() {
        let registry = RuleRegistry::with_builtin_rules();

        for rule in registry.all() {
            assert!(!rule.id().is_empty(), "Rule ID should not be empty");
            assert!(!rule.name().is_empty(), "Rule name should not be empty");
            assert_eq!(rule.id(), rule.descriptor().id);
        }
    }

    #[test]
    fn can_add_rules_after_builtin() {
        let mut registry = RuleRegistry::with_builtin_rules();
        let initial_count = registry.all().len();

        registry.register(Arc::new(TestRule::new("custom.rule", "Custom Rule")));

        assert_eq!(registry.all().len(), initial_count + 1);
    }

    #[test]
    fn from_config_uses_default_framework() {
        let registry = RuleRegistry::from_config(&EngineConfig::default());
        assert!(registry.contains("EFASYNC001"));
    }

    #[test]
    fn from_config_drops_rules_disabled_by_override() {
        let mut config = EngineConfig::default();
        config
            .severity_overrides
            .insert("EFASYNC001".to_string(), SeverityOverride::None);
        let registry = RuleRegistry::from_config(&config);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn from_config_rules_evaluate_with_configured_framework() {
        let mut fx = EfFixture::without_orm();
        let ctx = fx.context_class("App.TestContext", None);
        let scope = fx.async_method("Run");
        let db = fx.local("context", ctx);
        fx.call_instance(fx.save_changes, db, Some(fx.int), scope);
        let compilation = fx.build();

        let config = EngineConfig {
            framework: custom_orm_framework(),
            ..EngineConfig::default()
        };
        let registry = RuleRegistry::from_config(&config);

        let mut findings = Vec::new();
        for rule in registry.all() {
            findings.extend(rule.evaluate(&compilation, &config.framework).await);
        }
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, "EFASYNC001");
    }

    #[test]
    fn registry_implements_debug() {
        let mut registry = RuleRegistry::new();
        registry.register(Arc::new(TestRule::new("test", "Test")));

        let debug_str = format!("{:?}", registry);
        assert!(debug_str.contains("RuleRegistry"));
    }

    #[tokio::test]
    async fn builtin_rules_can_be_evaluated() {
        let registry = RuleRegistry::with_builtin_rules();
        let compilation = CompilationBuilder::new("Empty").build().unwrap();

        for rule in registry.all() {
            // Each rule should be callable without panicking
            assert!(
                rule.evaluate(&compilation, &FrameworkConfig::default())
                    .await
                    .is_empty()
            );
        }
    }
}
