//! Rule: Synchronous EF Core call inside async code
//!
//! Flags calls such as `ToList()`, `First()` or `SaveChanges()` that hit the
//! database synchronously from a method, local function or lambda that is
//! itself asynchronous. The call blocks a thread-pool thread for the whole
//! round trip even though an `...Async` twin exists.
//!
//! # Examples
//!
//! Bad:
//! ```csharp
//! public async Task<List<Order>> GetOrders()
//! {
//!     return _db.Orders.Where(o => o.Open).ToList();
//! }
//! ```
//!
//! Good:
//! ```csharp
//! public async Task<List<Order>> GetOrders()
//! {
//!     return await _db.Orders.Where(o => o.Open).ToListAsync();
//! }
//! ```

use async_trait::async_trait;
use log::{debug, trace};
use rayon::prelude::*;

use ormsync_core::model::{Compilation, MethodSymbol, Operation, OperationId, OperationKind, TypeId};

use crate::config::FrameworkConfig;
use crate::rules::Rule;
use crate::rules::catalog::is_sync_method;
use crate::rules::finding::{RuleFinding, ViolationReport};
use crate::rules::metadata::{EF_SYNC_IN_ASYNC, RuleDescriptor};
use crate::semantics::{SemanticTypeCache, inherits_from, is_dataset_operand, is_in_async_context};

/// Why a call site was classified as an ORM call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchReason {
    /// The called method is declared in the framework itself.
    FrameworkMember,
    /// The receiver derives from the context base type.
    ContextReceiver,
    /// The receiver is an interface mirroring a member of the context base type.
    InterfaceReceiver,
    /// An extension call whose source is dataset-bound.
    DatasetExtension,
}

/// Per-call decision procedure for one compilation.
///
/// Holds only shared references, so one classifier can serve every call site
/// of the compilation from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct SyncCallClassifier<'a> {
    compilation: &'a Compilation,
    cache: &'a SemanticTypeCache,
    framework: &'a FrameworkConfig,
}

impl<'a> SyncCallClassifier<'a> {
    pub fn new(
        compilation: &'a Compilation,
        cache: &'a SemanticTypeCache,
        framework: &'a FrameworkConfig,
    ) -> Self {
        Self {
            compilation,
            cache,
            framework,
        }
    }

    /// Zero or one violation for the given operation. Anything that is not an
    /// invocation, or that lacks the information to decide, yields `None`.
    pub fn classify(&self, op: &Operation) -> Option<ViolationReport> {
        let OperationKind::Invocation {
            target,
            instance,
            arguments,
        } = &op.kind
        else {
            return None;
        };

        let method = self.compilation.method(*target)?;
        if !is_sync_method(&method.name) {
            return None;
        }
        if !self.cache.orm_available {
            return None;
        }

        let site = op.syntax.and_then(|id| self.compilation.syntax_node(id))?;
        if !is_in_async_context(self.compilation, site.id) {
            trace!("{}: {} at {:?} is not in async code", op.id.0, method.name, site.location);
            return None;
        }

        let receiver_ty = instance
            .and_then(|i| self.compilation.operation(i))
            .and_then(|receiver| receiver.ty);
        let Some(reason) = self.match_reason(method, receiver_ty, arguments) else {
            trace!("{}: {} is not an ORM call", op.id.0, method.name);
            return None;
        };

        trace!(
            "{}: {} at {:?} flagged ({:?})",
            op.id.0, method.name, site.location, reason
        );
        Some(ViolationReport {
            location: site.location,
            method_name: method.name.clone(),
        })
    }

    /// First matching classification rule, in priority order.
    pub fn match_reason(
        &self,
        method: &MethodSymbol,
        receiver_ty: Option<TypeId>,
        arguments: &[OperationId],
    ) -> Option<MatchReason> {
        if self.is_framework_member(method) {
            Some(MatchReason::FrameworkMember)
        } else if self.is_context_receiver(receiver_ty) {
            Some(MatchReason::ContextReceiver)
        } else if self.is_mirrored_by_interface(method, receiver_ty) {
            Some(MatchReason::InterfaceReceiver)
        } else if self.is_dataset_extension(method, arguments) {
            Some(MatchReason::DatasetExtension)
        } else {
            None
        }
    }

    fn is_framework_member(&self, method: &MethodSymbol) -> bool {
        method
            .containing_module
            .as_deref()
            .is_some_and(|module| module.starts_with(&self.framework.namespace_prefix))
    }

    fn is_context_receiver(&self, receiver_ty: Option<TypeId>) -> bool {
        match (self.cache.context_base_type, receiver_ty) {
            (Some(base), Some(ty)) => inherits_from(self.compilation, ty, base),
            _ => false,
        }
    }

    /// The concrete context is hidden behind an interface; accept when the
    /// context base type declares a member with the same name and arity.
    fn is_mirrored_by_interface(&self, method: &MethodSymbol, receiver_ty: Option<TypeId>) -> bool {
        let (Some(base), Some(ty)) = (self.cache.context_base_type, receiver_ty) else {
            return false;
        };
        let receiver_is_interface = self
            .compilation
            .type_symbol(ty)
            .is_some_and(|t| t.is_interface());
        receiver_is_interface
            && self
                .compilation
                .members_named(base, &method.name)
                .any(|m| m.parameter_count == method.parameter_count)
    }

    fn is_dataset_extension(&self, method: &MethodSymbol, arguments: &[OperationId]) -> bool {
        method.is_extension
            && arguments.first().is_some_and(|&source| {
                is_dataset_operand(
                    self.compilation,
                    source,
                    self.cache,
                    &self.framework.dataset_accessor_name,
                )
            })
    }
}

/// Rule that flags synchronous ORM calls made from asynchronous code.
#[derive(Debug, Default)]
pub struct EfSyncInvocationRule;

impl EfSyncInvocationRule {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Rule for EfSyncInvocationRule {
    fn id(&self) -> &'static str {
        EF_SYNC_IN_ASYNC.id
    }

    fn name(&self) -> &'static str {
        "Synchronous ORM call in async code"
    }

    fn descriptor(&self) -> &'static RuleDescriptor {
        &EF_SYNC_IN_ASYNC
    }

    async fn evaluate(
        &self,
        compilation: &Compilation,
        framework: &FrameworkConfig,
    ) -> Vec<RuleFinding> {
        let cache = SemanticTypeCache::build(compilation, framework);
        if !cache.orm_available {
            debug!(
                "{}: {} not referenced, skipping {}",
                compilation.name,
                framework.namespace_prefix,
                self.id()
            );
            return Vec::new();
        }

        let classifier = SyncCallClassifier::new(compilation, &cache, framework);
        let invocations: Vec<&Operation> = compilation.invocations().collect();

        let findings: Vec<RuleFinding> = invocations
            .par_iter()
            .filter_map(|op| classifier.classify(op))
            .map(|report| report.into_finding(self.id()))
            .collect();

        debug!(
            "{}: {} findings from {} invocations",
            compilation.name,
            findings.len(),
            invocations.len()
        );
        findings
    }
}
