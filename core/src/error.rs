use thiserror::Error;

use crate::model::{FileId, MethodId, OperationId, SyntaxNodeId, TypeId};

/// Structural problems found when validating a semantic model.
///
/// The analysis engine tolerates all of these (lookups simply miss); they are
/// surfaced so front ends can catch bugs in the models they produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown type id {0:?}")]
    UnknownType(TypeId),

    #[error("unknown method id {0:?}")]
    UnknownMethod(MethodId),

    #[error("unknown syntax node id {0:?}")]
    UnknownSyntaxNode(SyntaxNodeId),

    #[error("unknown operation id {0:?}")]
    UnknownOperation(OperationId),

    #[error("operation {from:?} refers to {to:?}, which is not an earlier operation")]
    ForwardOperationReference { from: OperationId, to: OperationId },

    #[error("unknown file id {0:?}")]
    UnknownFile(FileId),

    #[error("table entry at index {index} carries id {found}")]
    MisplacedId { index: usize, found: u32 },
}
