//! Inheritance checks and operand-chain tracing.

use ormsync_core::model::{Compilation, Operation, OperationId, OperationKind, TypeId};

use crate::semantics::type_cache::SemanticTypeCache;

/// Whether `ty` is `base`, derives from it, or (for an interface `base`)
/// implements it anywhere in its hierarchy.
pub fn inherits_from(compilation: &Compilation, ty: TypeId, base: TypeId) -> bool {
    let mut current = Some(ty);
    let mut budget = compilation.types.len() + 1;
    while let Some(id) = current {
        if id == base {
            return true;
        }
        if budget == 0 {
            break;
        }
        budget -= 1;
        current = compilation.type_symbol(id).and_then(|t| t.base_type);
    }

    let base_is_interface = compilation
        .type_symbol(base)
        .is_some_and(|t| t.is_interface());
    base_is_interface && compilation.all_interfaces(ty).contains(&base)
}

/// One step outward through a transparent wrapper: a conversion to its
/// operand, a member access to its instance, an invocation to its receiver
/// (or, for an extension-style call, its first argument).
pub fn unwrap_operand(op: &Operation) -> Option<OperationId> {
    match &op.kind {
        OperationKind::Conversion { operand } => Some(*operand),
        OperationKind::MemberAccess { instance, .. } => *instance,
        OperationKind::Invocation {
            instance,
            arguments,
            ..
        } => instance.or_else(|| arguments.first().copied()),
        OperationKind::Reference { .. } | OperationKind::Other { .. } => None,
    }
}

/// Traces `operand` back through wrapper operations looking for data that
/// comes from an ORM dataset.
pub fn is_dataset_operand(
    compilation: &Compilation,
    operand: OperationId,
    cache: &SemanticTypeCache,
    dataset_accessor_name: &str,
) -> bool {
    let mut current = compilation.operation(operand);
    // Operations only refer to earlier ones, so this bound is never hit on a
    // valid model.
    let mut budget = compilation.operations.len();

    while let Some(op) = current {
        if is_dataset_typed(compilation, op, cache)
            || is_dataset_accessor_call(compilation, op, cache, dataset_accessor_name)
        {
            return true;
        }
        if budget == 0 {
            break;
        }
        budget -= 1;
        current = unwrap_operand(op).and_then(|next| compilation.operation(next));
    }

    false
}

/// Static type is an instantiation of the dataset definition, e.g. `DbSet<Order>`.
fn is_dataset_typed(compilation: &Compilation, op: &Operation, cache: &SemanticTypeCache) -> bool {
    let Some(dataset) = cache.dataset_type else {
        return false;
    };
    op.ty
        .and_then(|ty| compilation.type_symbol(ty))
        .is_some_and(|t| t.is_constructed_generic() && t.constructed_from == Some(dataset))
}

/// A generic `Set<T>()`-style call on a receiver that derives from the context base.
fn is_dataset_accessor_call(
    compilation: &Compilation,
    op: &Operation,
    cache: &SemanticTypeCache,
    accessor_name: &str,
) -> bool {
    let Some(context_base) = cache.context_base_type else {
        return false;
    };
    let OperationKind::Invocation {
        target,
        instance: Some(instance),
        ..
    } = &op.kind
    else {
        return false;
    };

    let named_accessor = compilation
        .method(*target)
        .is_some_and(|m| m.name == accessor_name && m.is_generic());
    if !named_accessor {
        return false;
    }

    compilation
        .operation(*instance)
        .and_then(|receiver| receiver.ty)
        .is_some_and(|ty| inherits_from(compilation, ty, context_base))
}
