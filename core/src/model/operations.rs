//! Bound operations: the semantic view of expressions.

use serde::{Deserialize, Serialize};

use super::symbols::{MethodId, TypeId};
use super::syntax::SyntaxNodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OperationId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OperationKind {
    /// Implicit or explicit conversion of `operand` to the operation's type.
    Conversion { operand: OperationId },

    /// Field or property access; `instance` is `None` for static members.
    MemberAccess {
        member: String,
        #[serde(default)]
        instance: Option<OperationId>,
    },

    /// A method call. For an extension call written as `x.M()`, `instance`
    /// is `None` and `x` is the first argument.
    Invocation {
        target: MethodId,
        #[serde(default)]
        instance: Option<OperationId>,
        #[serde(default)]
        arguments: Vec<OperationId>,
    },

    /// Local, parameter or `this` reference.
    Reference { name: String },

    Other { label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub id: OperationId,
    #[serde(flatten)]
    pub kind: OperationKind,

    /// Static type of the expression, if it bound.
    #[serde(default)]
    pub ty: Option<TypeId>,

    #[serde(default)]
    pub syntax: Option<SyntaxNodeId>,
}

impl Operation {
    pub fn is_invocation(&self) -> bool {
        matches!(self.kind, OperationKind::Invocation { .. })
    }

    /// Sub-operations this operation directly refers to, in source order.
    pub fn children(&self) -> Vec<OperationId> {
        match &self.kind {
            OperationKind::Conversion { operand } => vec![*operand],
            OperationKind::MemberAccess { instance, .. } => instance.iter().copied().collect(),
            OperationKind::Invocation {
                instance,
                arguments,
                ..
            } => instance.iter().chain(arguments.iter()).copied().collect(),
            OperationKind::Reference { .. } | OperationKind::Other { .. } => Vec::new(),
        }
    }
}
