use thiserror::Error;

/// Top-level error type exposed by the engine.
///
/// Classification itself never fails; these cover configuration and the
/// orchestration around it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// "Catch-all" for unexpected internal failures.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Errors executing rules. The session logs these and drops the failed
/// rule's findings for that compilation.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule {rule_id} failed: {source}")]
    RuleFailed {
        rule_id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Errors in the session orchestration layer.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("analysis task for compilation {compilation} failed: {reason}")]
    TaskFailed { compilation: String, reason: String },
}
