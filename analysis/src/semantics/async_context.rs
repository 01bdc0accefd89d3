//! Deciding whether a call site executes on an asynchronous path.
//!
//! The nearest function-like scope around the call decides. Methods and local
//! functions count as asynchronous when they carry the `async` modifier or
//! when their declared return type text mentions a task-like type; lambdas and
//! anonymous methods only through their own `async` marker.
//!
//! The return-type check is textual on purpose: `Task<List<Order>>`,
//! `ValueTask` and `System.Threading.Tasks.Task` all match without resolving
//! anything, and so does a user type that merely has `Task` in its name.

use ormsync_core::model::{Compilation, SyntaxKind, SyntaxNodeId};

pub const ASYNC_MODIFIER: &str = "async";

/// Substrings of a declared return type that mark it as task-like.
pub const TASK_LIKE_MARKERS: &[&str] = &["Task", "ValueTask"];

/// A function-like scope enclosing a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutableScope<'a> {
    Method {
        modifiers: &'a [String],
        return_type: &'a str,
    },
    LocalFunction {
        modifiers: &'a [String],
        return_type: &'a str,
    },
    /// Parenthesized or simple lambda.
    Lambda { is_async: bool },
    AnonymousMethod { is_async: bool },
}

impl<'a> ExecutableScope<'a> {
    pub fn from_kind(kind: &'a SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::MethodDeclaration {
                modifiers,
                return_type,
                ..
            } => Some(Self::Method {
                modifiers,
                return_type,
            }),
            SyntaxKind::LocalFunction {
                modifiers,
                return_type,
                ..
            } => Some(Self::LocalFunction {
                modifiers,
                return_type,
            }),
            SyntaxKind::ParenthesizedLambda { is_async }
            | SyntaxKind::SimpleLambda { is_async } => Some(Self::Lambda {
                is_async: *is_async,
            }),
            SyntaxKind::AnonymousMethod { is_async } => Some(Self::AnonymousMethod {
                is_async: *is_async,
            }),
            SyntaxKind::TypeDeclaration { .. }
            | SyntaxKind::Invocation
            | SyntaxKind::Other { .. } => None,
        }
    }

    pub fn has_async_marker(&self) -> bool {
        match self {
            Self::Method { modifiers, .. } | Self::LocalFunction { modifiers, .. } => {
                modifiers.iter().any(|m| m == ASYNC_MODIFIER)
            }
            Self::Lambda { is_async } | Self::AnonymousMethod { is_async } => *is_async,
        }
    }

    /// Return type as written; lambdas and anonymous methods declare none.
    pub fn declared_return_type(&self) -> Option<&'a str> {
        match self {
            Self::Method { return_type, .. } | Self::LocalFunction { return_type, .. } => {
                Some(*return_type)
            }
            Self::Lambda { .. } | Self::AnonymousMethod { .. } => None,
        }
    }

    pub fn is_async(&self) -> bool {
        self.has_async_marker()
            || self
                .declared_return_type()
                .is_some_and(|text| TASK_LIKE_MARKERS.iter().any(|m| text.contains(m)))
    }
}

/// The innermost executable scope containing `node`, `node` itself included.
pub fn enclosing_scope(compilation: &Compilation, node: SyntaxNodeId) -> Option<ExecutableScope<'_>> {
    compilation
        .ancestors_and_self(node)
        .find_map(|n| ExecutableScope::from_kind(&n.kind))
}

/// Whether the call site at `node` runs inside an asynchronous scope.
/// A site with no enclosing scope is not asynchronous.
pub fn is_in_async_context(compilation: &Compilation, node: SyntaxNodeId) -> bool {
    enclosing_scope(compilation, node).is_some_and(|scope| scope.is_async())
}
