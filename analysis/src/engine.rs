use std::sync::Arc;

use arc_swap::ArcSwap;

use ormsync_core::{AnalysisResult, Compilation};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::rules::registry::RuleRegistry;
use crate::session::AnalysisSession;

/// The ormsync analysis engine.
///
/// Thread-safe and designed for concurrent use. Configuration and rules can
/// be hot-swapped via `ArcSwap`; a running analysis keeps the snapshot it
/// started with.
///
/// # Usage
///
/// ```rust,ignore
/// use ormsync_analysis::engine::Engine;
///
/// let engine = Engine::with_default_config();
///
/// // Analyze with all rules
/// let result = engine.analyze(compilations).await?;
///
/// // Or only with specific rule IDs
/// let result = engine.analyze_with_rules(compilations, &rule_ids).await?;
/// ```
pub struct Engine {
    pub config: ArcSwap<EngineConfig>,
    pub rule_registry: ArcSwap<RuleRegistry>,
}

impl Engine {
    /// Create a new engine with the given configuration and rules.
    pub fn new(config: EngineConfig, rule_registry: RuleRegistry) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            rule_registry: ArcSwap::from_pointee(rule_registry),
        }
    }

    /// Convenience constructor with default configuration and built-in rules.
    pub fn with_default_config() -> Self {
        Self::new(EngineConfig::default(), RuleRegistry::with_builtin_rules())
    }

    /// Validate `config` and keep the built-in rules it enables.
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let registry = RuleRegistry::from_config(&config);
        Ok(Self::new(config, registry))
    }

    /// Main entry point: analyze a batch of compilations with every rule in
    /// the registry.
    ///
    /// The engine is stateless between calls; all state lives inside the call.
    /// Rules evaluate against the framework names of the config loaded here.
    pub async fn analyze(
        &self,
        compilations: Vec<Compilation>,
    ) -> Result<AnalysisResult, EngineError> {
        let rules = self.rule_registry.load_full();
        let config = self.config.load_full();
        AnalysisSession::new(compilations, rules, config).run().await
    }

    /// Analyze with a specific set of rules (by ID).
    ///
    /// Rules not found in the registry are silently ignored.
    pub async fn analyze_with_rules(
        &self,
        compilations: Vec<Compilation>,
        rule_ids: &[String],
    ) -> Result<AnalysisResult, EngineError> {
        let full_registry = self.rule_registry.load_full();
        let filtered_registry = full_registry.filter_by_ids(rule_ids);
        let config = self.config.load_full();
        AnalysisSession::new(compilations, Arc::new(filtered_registry), config)
            .run()
            .await
    }

    /// Get the rule registry.
    pub fn rules(&self) -> arc_swap::Guard<Arc<RuleRegistry>> {
        self.rule_registry.load()
    }
}
