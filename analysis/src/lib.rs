//! ormsync-analysis: flags blocking ORM calls made from asynchronous code
//!
//! This crate provides the rule engine on top of the `ormsync-core`
//! semantic model, including:
//! - The `EFASYNC001` rule: synchronous EF Core calls (`ToList`, `First`,
//!   `SaveChanges`, ...) inside async methods, local functions and lambdas
//! - Framework type resolution, inheritance checks and operand tracing
//! - Session orchestration across many compilations
//!
//! # Example
//!
//! ```ignore
//! use ormsync_analysis::Engine;
//!
//! let engine = Engine::with_default_config();
//! let result = engine.analyze(compilations).await?;
//! for diagnostic in result.all_diagnostics() {
//!     println!("{}: {}", diagnostic.rule_id, diagnostic.message);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod semantics;
pub mod session;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export main engine types
pub use config::{EngineConfig, FrameworkConfig, SeverityOverride};
pub use engine::Engine;
pub use error::{EngineError, RuleError, SessionError};
pub use rules::Rule;
pub use rules::efcore::{EfSyncInvocationRule, SyncCallClassifier};
pub use rules::finding::{RuleFinding, ViolationReport};
pub use rules::metadata::{RuleDescriptor, descriptor_for_rule_id};
pub use rules::registry::RuleRegistry;
pub use semantics::SemanticTypeCache;
