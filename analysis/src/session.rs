use std::sync::Arc;

use anyhow::Context;
use log::{debug, warn};
use tokio::sync::Semaphore;

use ormsync_core::{AnalysisResult, Compilation, CompilationResult, Diagnostic};

use crate::config::EngineConfig;
use crate::error::{EngineError, RuleError, SessionError};
use crate::rules::Rule;
use crate::rules::finding::RuleFinding;
use crate::rules::registry::RuleRegistry;

/// State for a single analysis run.
///
/// The pipeline per compilation:
/// 1. Validate the model (problems are logged, analysis continues)
/// 2. Run every rule that is not switched off, each as its own task; a rule
///    that fails is logged and skipped
/// 3. Drop findings in generated files (unless configured otherwise)
/// 4. Render diagnostics and sort them by location
///
/// Compilations are analyzed concurrently, at most
/// `max_parallel_compilations` at a time.
pub struct AnalysisSession {
    pub compilations: Vec<Compilation>,
    pub rules: Arc<RuleRegistry>,
    pub config: Arc<EngineConfig>,
}

impl AnalysisSession {
    pub fn new(
        compilations: Vec<Compilation>,
        rules: Arc<RuleRegistry>,
        config: Arc<EngineConfig>,
    ) -> Self {
        Self {
            compilations,
            rules,
            config,
        }
    }

    /// Results come back in input order.
    pub async fn run(self) -> Result<AnalysisResult, EngineError> {
        let Self {
            compilations,
            rules,
            config,
        } = self;
        config.validate()?;

        debug!(
            "analyzing {} compilations with {} rules (parallelism {})",
            compilations.len(),
            rules.len(),
            config.max_parallel_compilations
        );

        let semaphore = Arc::new(Semaphore::new(config.max_parallel_compilations));
        let mut handles = Vec::with_capacity(compilations.len());

        for compilation in compilations {
            let name = compilation.name.clone();
            let semaphore = Arc::clone(&semaphore);
            let rules = Arc::clone(&rules);
            let config = Arc::clone(&config);

            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .context("concurrency limiter closed")?;
                Ok::<_, anyhow::Error>(analyze_compilation(compilation, &rules, config).await)
            });
            handles.push((name, handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            let result = match handle.await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    return Err(SessionError::TaskFailed {
                        compilation: name,
                        reason: format!("{e:#}"),
                    }
                    .into());
                }
                Err(e) => {
                    return Err(SessionError::TaskFailed {
                        compilation: name,
                        reason: e.to_string(),
                    }
                    .into());
                }
            };
            results.push(result);
        }

        Ok(AnalysisResult {
            compilations: results,
        })
    }
}

/// Run every enabled rule over one compilation and render the diagnostics.
///
/// Rules see the framework names of `config`. A rule that fails contributes
/// nothing; the other rules still report.
pub async fn analyze_compilation(
    compilation: Compilation,
    rules: &RuleRegistry,
    config: Arc<EngineConfig>,
) -> CompilationResult {
    if let Err(e) = compilation.validate() {
        warn!(
            "compilation {} has an inconsistent semantic model ({e}); unresolved parts are skipped",
            compilation.name
        );
    }

    let compilation = Arc::new(compilation);
    let mut pending = Vec::with_capacity(rules.len());
    for rule in rules.all() {
        let descriptor = rule.descriptor();
        let Some(severity) = config.effective_severity(rule.id(), descriptor.default_severity)
        else {
            debug!("{}: rule {} disabled by configuration", compilation.name, rule.id());
            continue;
        };

        let handle = tokio::spawn(evaluate_rule(
            Arc::clone(rule),
            Arc::clone(&compilation),
            Arc::clone(&config),
        ));
        pending.push((Arc::clone(rule), severity, handle));
    }

    let mut diagnostics = Vec::new();
    for (rule, severity, handle) in pending {
        let findings = match handle.await {
            Ok(findings) => findings,
            Err(e) => {
                let err = RuleError::RuleFailed {
                    rule_id: rule.id().to_string(),
                    source: anyhow::Error::new(e),
                };
                warn!("{}: {err}; its findings are skipped", compilation.name);
                continue;
            }
        };
        let findings = filter_generated(&compilation, findings, config.analyze_generated_code);
        diagnostics.extend(render(&compilation, rule.as_ref(), findings, severity));
    }

    diagnostics.sort_by(|a, b| {
        a.location
            .cmp(&b.location)
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });

    debug!("{}: {} diagnostics", compilation.name, diagnostics.len());
    CompilationResult {
        compilation: compilation.name.clone(),
        diagnostics,
    }
}

async fn evaluate_rule(
    rule: Arc<dyn Rule>,
    compilation: Arc<Compilation>,
    config: Arc<EngineConfig>,
) -> Vec<RuleFinding> {
    rule.evaluate(&compilation, &config.framework).await
}

/// Drop findings located in tool-generated files.
fn filter_generated(
    compilation: &Compilation,
    findings: Vec<RuleFinding>,
    analyze_generated_code: bool,
) -> Vec<RuleFinding> {
    if analyze_generated_code {
        return findings;
    }
    findings
        .into_iter()
        .filter(|f| !compilation.is_generated(f.location.file_id))
        .collect()
}

fn render(
    compilation: &Compilation,
    rule: &dyn Rule,
    findings: Vec<RuleFinding>,
    severity: ormsync_core::Severity,
) -> Vec<Diagnostic> {
    let descriptor = rule.descriptor();
    findings
        .into_iter()
        .map(|f| {
            let path = compilation
                .file(f.location.file_id)
                .map(|file| file.path.clone());
            f.into_diagnostic(descriptor, severity, path)
        })
        .collect()
}
