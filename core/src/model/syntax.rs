//! Syntax nodes with parent pointers.
//!
//! Only the node shapes the engine reasons about are distinguished; everything
//! else is `Other` and is walked through transparently.

use serde::{Deserialize, Serialize};

use super::location::AstLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SyntaxNodeId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntaxKind {
    /// A named method on a type.
    MethodDeclaration {
        name: String,
        #[serde(default)]
        modifiers: Vec<String>,
        /// Declared return type exactly as written in source.
        return_type: String,
    },
    /// A function declared inside another function body.
    LocalFunction {
        name: String,
        #[serde(default)]
        modifiers: Vec<String>,
        return_type: String,
    },
    /// `(a, b) => ...`
    ParenthesizedLambda {
        #[serde(default)]
        is_async: bool,
    },
    /// `a => ...`
    SimpleLambda {
        #[serde(default)]
        is_async: bool,
    },
    /// `delegate (...) { ... }`
    AnonymousMethod {
        #[serde(default)]
        is_async: bool,
    },
    TypeDeclaration { name: String },
    Invocation,
    Other { label: String },
}

impl SyntaxKind {
    pub fn method(name: impl Into<String>, modifiers: &[&str], return_type: impl Into<String>) -> Self {
        Self::MethodDeclaration {
            name: name.into(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            return_type: return_type.into(),
        }
    }

    pub fn local_function(
        name: impl Into<String>,
        modifiers: &[&str],
        return_type: impl Into<String>,
    ) -> Self {
        Self::LocalFunction {
            name: name.into(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            return_type: return_type.into(),
        }
    }

    pub fn other(label: impl Into<String>) -> Self {
        Self::Other {
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub id: SyntaxNodeId,
    #[serde(flatten)]
    pub kind: SyntaxKind,
    #[serde(default)]
    pub parent: Option<SyntaxNodeId>,
    pub location: AstLocation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::location::{FileId, TextRange};

    #[test]
    fn syntax_node_serializes_with_flattened_kind() {
        let node = SyntaxNode {
            id: SyntaxNodeId(4),
            kind: SyntaxKind::method("Main", &["static", "async"], "Task"),
            parent: Some(SyntaxNodeId(1)),
            location: AstLocation::new(FileId(1), TextRange::on_line(3, 4, 30)),
        };

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "method_declaration");
        assert_eq!(json["return_type"], "Task");

        let back: SyntaxNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }
}
