//! Per-compilation resolution of the ORM framework's well-known types.

use log::debug;

use ormsync_core::model::{Compilation, TypeId};

use crate::config::FrameworkConfig;

/// Framework types resolved once per compilation and shared read-only by
/// every classification in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SemanticTypeCache {
    /// The context (unit-of-work) base class, if it resolved.
    pub context_base_type: Option<TypeId>,

    /// The generic dataset definition, if it resolved.
    pub dataset_type: Option<TypeId>,

    /// Whether the compilation uses the framework at all. When false,
    /// nothing in the compilation is ever reported.
    pub orm_available: bool,
}

impl SemanticTypeCache {
    pub fn build(compilation: &Compilation, framework: &FrameworkConfig) -> Self {
        let context_base_type = compilation
            .type_by_metadata_name(&framework.context_type_name)
            .map(|t| t.id);
        let dataset_type = compilation
            .type_by_metadata_name(&framework.dataset_type_name)
            .map(|t| t.id);

        // Only framework-internal types may be visible, so a referenced module
        // carrying the framework prefix is enough.
        let orm_available = context_base_type.is_some()
            || compilation
                .referenced_modules()
                .any(|display| display.contains(&framework.namespace_prefix));

        debug!(
            "type cache for {}: context={:?} dataset={:?} orm_available={}",
            compilation.name, context_base_type, dataset_type, orm_available
        );

        Self {
            context_base_type,
            dataset_type,
            orm_available,
        }
    }
}
