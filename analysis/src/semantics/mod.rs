//! Semantic building blocks shared by rules: framework type resolution,
//! type relations and async-context detection.

pub mod async_context;
pub mod type_cache;
pub mod type_relations;

pub use async_context::{ExecutableScope, enclosing_scope, is_in_async_context};
pub use type_cache::SemanticTypeCache;
pub use type_relations::{inherits_from, is_dataset_operand, unwrap_operand};
